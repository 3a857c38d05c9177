//! Severity module - display tiers for hazard points

/// Severity tier of a hazard point
///
/// Derived solely from confidence (see [`crate::confidence`]); never stored
/// independently of the point it describes.
/// - High: confidence at or above the high threshold
/// - Normal: confidence at or above the normal threshold
/// - Low: everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeverityTier {
    /// Likely a real event
    High,

    /// Plausible event
    Normal,

    /// Weak detection
    Low,
}

impl SeverityTier {
    /// All tiers, most severe first
    pub const ALL: [SeverityTier; 3] =
        [SeverityTier::High, SeverityTier::Normal, SeverityTier::Low];

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::High => "high",
            SeverityTier::Normal => "normal",
            SeverityTier::Low => "low",
        }
    }

    /// Parse a tier from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(SeverityTier::High),
            "normal" | "nominal" => Some(SeverityTier::Normal),
            "low" => Some(SeverityTier::Low),
            _ => None,
        }
    }

    /// Marker color for this tier (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::High => "#ff0000",
            SeverityTier::Normal => "#ff8c00",
            SeverityTier::Low => "#00a000",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeverityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity tier: {}", s))
    }
}
