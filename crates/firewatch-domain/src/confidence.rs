//! Confidence classification
//!
//! Maps a detection confidence score onto a [`SeverityTier`]. The score is
//! assumed to be on a 0-100 scale but is never clamped: classification only
//! compares against the thresholds, so 150 is High and -5 is Low.

use crate::SeverityTier;

/// Confidence assumed when a detection carries none
pub const DEFAULT_CONFIDENCE: f64 = 60.0;

/// Threshold pair used to classify confidence scores
///
/// Defaults: High >= 80, Normal >= 60, Low otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for [`SeverityTier::High`]
    pub high: f64,
    /// Minimum confidence for [`SeverityTier::Normal`]
    pub normal: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 80.0,
            normal: 60.0,
        }
    }
}

impl ConfidenceThresholds {
    /// Create a threshold pair
    ///
    /// Both values must be finite and `normal <= high`.
    pub fn new(high: f64, normal: f64) -> Result<Self, String> {
        let thresholds = Self { high, normal };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check the invariants of this threshold pair
    pub fn validate(&self) -> Result<(), String> {
        if !self.high.is_finite() || !self.normal.is_finite() {
            return Err("Confidence thresholds must be finite".to_string());
        }
        if self.normal > self.high {
            return Err(format!(
                "Normal threshold ({}) must not exceed high threshold ({})",
                self.normal, self.high
            ));
        }
        Ok(())
    }

    /// Classify a possibly-missing confidence value
    ///
    /// Missing or non-finite values are normalized to [`DEFAULT_CONFIDENCE`].
    pub fn classify(&self, confidence: Option<f64>) -> SeverityTier {
        let c = normalize(confidence);
        if c >= self.high {
            SeverityTier::High
        } else if c >= self.normal {
            SeverityTier::Normal
        } else {
            SeverityTier::Low
        }
    }
}

/// Replace a missing or non-finite confidence with the default
pub fn normalize(confidence: Option<f64>) -> f64 {
    match confidence {
        Some(c) if c.is_finite() => c,
        _ => DEFAULT_CONFIDENCE,
    }
}

/// Classify a confidence value using the default thresholds
///
/// # Examples
///
/// ```
/// use firewatch_domain::{classify, SeverityTier};
///
/// assert_eq!(classify(Some(85.0)), SeverityTier::High);
/// assert_eq!(classify(None), SeverityTier::Normal);
/// assert_eq!(classify(Some(10.0)), SeverityTier::Low);
/// ```
pub fn classify(confidence: Option<f64>) -> SeverityTier {
    ConfidenceThresholds::default().classify(confidence)
}
