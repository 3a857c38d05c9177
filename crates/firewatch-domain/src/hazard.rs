//! Hazard module - detected events and their distance from the user

use crate::confidence::{self, ConfidenceThresholds};
use crate::SeverityTier;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// When a hazard was observed
///
/// Backends report observation times inconsistently: full RFC 3339
/// timestamps, bare acquisition dates, or free text. Anything that does not
/// parse is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedAt {
    /// A parsed instant
    Timestamp(DateTime<Utc>),
    /// Unparseable text, shown as-is
    Raw(String),
    /// No observation time reported
    Unknown,
}

impl ObservedAt {
    /// Parse an observation time as reported by the backend
    ///
    /// # Examples
    ///
    /// ```
    /// use firewatch_domain::ObservedAt;
    ///
    /// assert!(matches!(ObservedAt::parse("2024-01-01T00:00:00Z"), ObservedAt::Timestamp(_)));
    /// assert!(matches!(ObservedAt::parse("2024-01-01"), ObservedAt::Timestamp(_)));
    /// assert_eq!(ObservedAt::parse("yesterday"), ObservedAt::Raw("yesterday".to_string()));
    /// assert_eq!(ObservedAt::parse("  "), ObservedAt::Unknown);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return ObservedAt::Unknown;
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return ObservedAt::Timestamp(ts.with_timezone(&Utc));
        }

        // FIRMS-style acquisition date
        if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return ObservedAt::Timestamp(midnight.and_utc());
        }

        ObservedAt::Raw(raw.to_string())
    }
}

impl fmt::Display for ObservedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedAt::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M UTC")),
            ObservedAt::Raw(raw) => f.write_str(raw),
            ObservedAt::Unknown => f.write_str("unknown"),
        }
    }
}

/// A single detected hazard
///
/// Ephemeral: a set of points lives for exactly one poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Confidence as reported (0-100 scale assumed), if any
    pub confidence: Option<f64>,
    /// Human-readable title
    pub title: String,
    /// Upstream source identifier (e.g. "eonet", "firms")
    pub source: String,
    /// Observation time
    pub observed_at: ObservedAt,
}

impl HazardPoint {
    /// Confidence with the default applied when missing
    pub fn effective_confidence(&self) -> f64 {
        confidence::normalize(self.confidence)
    }

    /// Confidence for display: the reported value, or `unknown`
    pub fn confidence_label(&self) -> String {
        match self.confidence {
            Some(c) if c.is_finite() => c.to_string(),
            _ => "unknown".to_string(),
        }
    }

    /// Severity tier under the given thresholds
    pub fn severity(&self, thresholds: &ConfidenceThresholds) -> SeverityTier {
        thresholds.classify(self.confidence)
    }
}

/// A hazard together with its distance from the user
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResult {
    /// The hazard
    pub point: HazardPoint,
    /// Great-circle distance from the user in kilometres
    pub distance_km: f64,
}
