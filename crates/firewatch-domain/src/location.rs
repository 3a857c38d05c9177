//! User position and alert radius

use std::fmt;

/// The user's position, set only by an explicit acquisition
///
/// Persists until replaced by a newer acquisition; never expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserLocation {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
}

impl UserLocation {
    /// Create a validated location
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("Latitude out of range: {}", latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("Longitude out of range: {}", longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for UserLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Alert radius in kilometres
///
/// Always finite and strictly positive, so every radius-dependent
/// computation can rely on it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RadiusKm(f64);

impl RadiusKm {
    /// Create a validated radius
    ///
    /// # Examples
    ///
    /// ```
    /// use firewatch_domain::RadiusKm;
    ///
    /// assert_eq!(RadiusKm::new(50.0).unwrap().km(), 50.0);
    /// assert!(RadiusKm::new(0.0).is_err());
    /// assert!(RadiusKm::new(-3.0).is_err());
    /// ```
    pub fn new(km: f64) -> Result<Self, String> {
        if km.is_finite() && km > 0.0 {
            Ok(Self(km))
        } else {
            Err(format!("Radius must be a positive number of kilometres, got {}", km))
        }
    }

    /// Radius in kilometres
    pub fn km(&self) -> f64 {
        self.0
    }

    /// Radius in metres (map circles are drawn in metres)
    pub fn meters(&self) -> f64 {
        self.0 * 1000.0
    }
}

impl fmt::Display for RadiusKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
