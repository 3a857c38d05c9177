//! Output formatting for the CLI.

use colored::*;
use firewatch_domain::{Marker, NearbyResult, RadiusKm, SeverityTier, Toast};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format markers grouped by severity tier, highest first.
    pub fn format_markers(&self, markers: &[Marker]) -> String {
        if markers.is_empty() {
            return self.colorize("No active hazards.", "yellow");
        }

        let mut out = Vec::new();
        for tier in SeverityTier::ALL {
            let group: Vec<&Marker> = markers.iter().filter(|m| m.style.tier == tier).collect();
            if group.is_empty() {
                continue;
            }
            out.push(self.tier_heading(tier, group.len()));
            for marker in group {
                out.push(format!("  {}", marker.popup.replace('\n', " | ")));
            }
        }
        out.join("\n")
    }

    fn tier_heading(&self, tier: SeverityTier, count: usize) -> String {
        let heading = format!("{} ({})", tier, count);
        let color = match tier {
            SeverityTier::High => "red",
            SeverityTier::Normal => "yellow",
            SeverityTier::Low => "green",
        };
        if self.color_enabled {
            heading.color(color).bold().to_string()
        } else {
            heading
        }
    }

    /// Format the nearest hazard result.
    pub fn nearest(&self, result: &NearbyResult) -> String {
        let point = &result.point;
        self.warning(&format!(
            "{} is {} km away (confidence {}, {})",
            point.title,
            result.distance_km,
            point.confidence_label(),
            point.observed_at
        ))
    }

    /// Format the "nothing nearby" result.
    pub fn none_within(&self, radius: RadiusKm) -> String {
        self.success(&format!("No fires within {} km", radius))
    }

    /// Format an in-app toast.
    pub fn toast(&self, toast: &Toast) -> String {
        let body = toast.body.replace('\n', " | ");
        match &toast.title {
            Some(title) => {
                let title = if self.color_enabled {
                    title.bold().to_string()
                } else {
                    title.clone()
                };
                format!("» {}: {}", title, body)
            }
            None => format!("» {}", body),
        }
    }

    /// Format a platform notification.
    pub fn notification(&self, title: &str, body: &str) -> String {
        self.colorize(
            &format!("🔔 {}: {}", title, body.replace('\n', " | ")),
            "magenta",
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch_domain::{MarkerStyle, Toast};
    use std::time::Duration;

    fn marker(title: &str, tier: SeverityTier) -> Marker {
        Marker {
            latitude: 1.0,
            longitude: 2.0,
            style: MarkerStyle::for_tier(tier),
            popup: format!("{}\nConfidence: 70", title),
            click_toast: Toast::new(title, Duration::from_secs(8)),
        }
    }

    #[test]
    fn test_markers_grouped_high_first() {
        let formatter = Formatter::new(false);
        let output = formatter.format_markers(&[
            marker("low one", SeverityTier::Low),
            marker("high one", SeverityTier::High),
        ]);

        let high = output.find("high one").unwrap();
        let low = output.find("low one").unwrap();
        assert!(high < low);
        assert!(output.contains("high one | Confidence: 70"));
    }

    #[test]
    fn test_empty_markers() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.format_markers(&[]), "No active hazards.");
    }

    #[test]
    fn test_toast_flattened() {
        let formatter = Formatter::new(false);
        let toast = Toast::titled("Nearby fire!", "B\nDist: 3.2 km", Duration::from_secs(8));
        assert_eq!(formatter.toast(&toast), "» Nearby fire!: B | Dist: 3.2 km");
    }

    #[test]
    fn test_plain_messages() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.error("failed"), "✗ failed");
        assert_eq!(
            formatter.none_within(RadiusKm::new(50.0).unwrap()),
            "✓ No fires within 50 km"
        );
    }
}
