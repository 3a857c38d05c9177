//! Nearby-hazard checks against the backend

use crate::controller::Command;
use crate::session::SessionState;
use crate::timer::ProximityTimer;
use firewatch_domain::traits::HazardApi;
use firewatch_domain::{NearbyResult, RadiusKm};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Duration;

/// Result of one proximity check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// No position known; the backend was not contacted
    NoLocation,
    /// The nearest hazard within the radius
    Nearest(NearbyResult),
    /// Nothing within the radius
    NoneWithinRadius(RadiusKm),
    /// The backend call failed; not surfaced to the user
    Failed(String),
}

/// Runs proximity checks and owns their repeating schedule
pub struct ProximityMonitor<A> {
    api: Arc<A>,
    timer: ProximityTimer,
    period: Duration,
}

impl<A: HazardApi + 'static> ProximityMonitor<A> {
    /// Create a monitor that repeats checks every `period`
    pub fn new(api: Arc<A>, period: Duration) -> Self {
        Self {
            api,
            timer: ProximityTimer::new(),
            period,
        }
    }

    /// Query hazards near the session's position
    ///
    /// Without a known position this returns [`CheckOutcome::NoLocation`]
    /// and makes no request.
    pub async fn check_nearby(&self, session: &SessionState) -> CheckOutcome {
        self.check(session).await
    }

    /// Build a check against the session's current position and radius
    ///
    /// The returned future owns everything it needs, so it can be spawned
    /// and outlive later changes to the session.
    pub fn check(
        &self,
        session: &SessionState,
    ) -> impl Future<Output = CheckOutcome> + Send + 'static {
        let api = Arc::clone(&self.api);
        let target = session.location().map(|location| (location, session.radius()));

        async move {
            let Some((location, radius)) = target else {
                tracing::debug!("Skipping proximity check, no location");
                return CheckOutcome::NoLocation;
            };

            match api.fetch_nearby(location, radius).await {
                Ok(results) => nearest_within(results, radius),
                Err(e) => {
                    tracing::warn!(error = %e, "Proximity check failed");
                    CheckOutcome::Failed(e.to_string())
                }
            }
        }
    }

    /// Replace the repeating schedule; returns whether one was replaced
    pub fn start_schedule(&mut self, commands: UnboundedSender<Command>) -> bool {
        let replaced = self.timer.stop();
        let generation = self.timer.start(self.period, commands);
        tracing::debug!(
            generation,
            period_secs = self.period.as_secs(),
            "Proximity schedule installed"
        );
        replaced
    }

    /// Cancel the repeating schedule, if any
    pub fn stop_schedule(&mut self) -> bool {
        self.timer.stop()
    }

    /// The schedule
    pub fn timer(&self) -> &ProximityTimer {
        &self.timer
    }

    /// Interval between scheduled checks
    pub fn period(&self) -> Duration {
        self.period
    }
}

fn nearest_within(results: Vec<NearbyResult>, radius: RadiusKm) -> CheckOutcome {
    // Backend sorts ascending, but don't rely on it
    let nearest = results
        .into_iter()
        .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    match nearest {
        Some(nearest) => {
            tracing::info!(
                title = %nearest.point.title,
                distance_km = nearest.distance_km,
                "Hazard within radius"
            );
            CheckOutcome::Nearest(nearest)
        }
        None => {
            tracing::debug!(radius_km = radius.km(), "No hazards within radius");
            CheckOutcome::NoneWithinRadius(radius)
        }
    }
}
