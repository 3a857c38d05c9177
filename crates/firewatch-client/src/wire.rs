//! JSON wire format of the hazard backend.
//!
//! The backend merges several upstream feeds, so most fields are optional
//! and extra fields (`id`, ...) are ignored.

use firewatch_domain::{HazardPoint, NearbyResult, ObservedAt};
use serde::{Deserialize, Serialize};

/// A hazard as served by `GET /api/fires`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireHazard {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Detection confidence, 0-100
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Event title
    #[serde(default)]
    pub title: Option<String>,
    /// Upstream feed
    #[serde(default)]
    pub source: Option<String>,
    /// Observation time, usually RFC 3339
    #[serde(default)]
    pub datetime: Option<String>,
}

/// A hazard as served by `GET /api/nearby`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNearby {
    /// The hazard fields
    #[serde(flatten)]
    pub hazard: WireHazard,
    /// Distance from the query point in kilometres
    pub distance_km: f64,
}

impl From<WireHazard> for HazardPoint {
    fn from(w: WireHazard) -> Self {
        HazardPoint {
            latitude: w.lat,
            longitude: w.lon,
            confidence: w.confidence,
            title: w.title.unwrap_or_default(),
            source: w.source.unwrap_or_default(),
            observed_at: w
                .datetime
                .as_deref()
                .map(ObservedAt::parse)
                .unwrap_or(ObservedAt::Unknown),
        }
    }
}

impl From<WireNearby> for NearbyResult {
    fn from(w: WireNearby) -> Self {
        NearbyResult {
            point: w.hazard.into(),
            distance_km: w.distance_km,
        }
    }
}

/// Sort nearby results ascending by distance
///
/// The backend already sorts; this only guards the "first is nearest" rule.
pub fn sort_by_distance(results: &mut [NearbyResult]) {
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fires_payload() {
        let json = r#"[
            {"id": "EONET_1_2024", "lat": 10, "lon": 20, "confidence": 85,
             "title": "A", "source": "S", "datetime": "2024-01-01T00:00:00Z"},
            {"lat": -33.5, "lon": 150.25}
        ]"#;

        let wire: Vec<WireHazard> = serde_json::from_str(json).unwrap();
        let points: Vec<HazardPoint> = wire.into_iter().map(Into::into).collect();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].latitude, 10.0);
        assert_eq!(points[0].confidence, Some(85.0));
        assert_eq!(points[0].title, "A");
        assert!(matches!(points[0].observed_at, ObservedAt::Timestamp(_)));

        assert_eq!(points[1].confidence, None);
        assert_eq!(points[1].title, "");
        assert_eq!(points[1].observed_at, ObservedAt::Unknown);
    }

    #[test]
    fn test_null_confidence_is_absent() {
        let json = r#"{"lat": 1, "lon": 2, "confidence": null, "title": null}"#;
        let point: HazardPoint = serde_json::from_str::<WireHazard>(json).unwrap().into();
        assert_eq!(point.confidence, None);
        assert_eq!(point.effective_confidence(), 60.0);
    }

    #[test]
    fn test_parse_nearby_payload() {
        let json = r#"[{"lat": 1, "lon": 2, "title": "B", "confidence": 90, "distance_km": 3.2}]"#;
        let wire: Vec<WireNearby> = serde_json::from_str(json).unwrap();
        let result: NearbyResult = wire[0].clone().into();
        assert_eq!(result.point.title, "B");
        assert_eq!(result.distance_km, 3.2);
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let json = r#"{"lon": 2, "title": "no lat"}"#;
        assert!(serde_json::from_str::<WireHazard>(json).is_err());
    }

    #[test]
    fn test_sort_by_distance() {
        let json = r#"[
            {"lat": 0, "lon": 0, "title": "far", "distance_km": 40.0},
            {"lat": 0, "lon": 0, "title": "near", "distance_km": 2.5}
        ]"#;
        let mut results: Vec<NearbyResult> = serde_json::from_str::<Vec<WireNearby>>(json)
            .unwrap()
            .into_iter()
            .map(Into::into)
            .collect();
        sort_by_distance(&mut results);
        assert_eq!(results[0].point.title, "near");
    }
}
