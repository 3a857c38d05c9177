//! Scripted in-memory backend

use crate::error::ClientError;
use firewatch_domain::traits::HazardApi;
use firewatch_domain::{HazardPoint, NearbyResult, RadiusKm, UserLocation};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Mock backend for deterministic testing
///
/// Responses to `fetch_points` are taken from a queue of scripted replies
/// (each with an optional delay); once the queue is empty the standing
/// point set is returned. Clones share state, so a test can keep a handle
/// while the mock is owned by the code under test.
///
/// # Examples
///
/// ```
/// use firewatch_client::MockHazardApi;
/// use firewatch_domain::traits::HazardApi;
///
/// # tokio_test_block(async {
/// let api = MockHazardApi::new();
/// api.fail_points_once("backend down");
///
/// assert!(api.fetch_points().await.is_err());
/// assert!(api.fetch_points().await.unwrap().is_empty());
/// assert_eq!(api.points_calls(), 2);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHazardApi {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    points: Vec<HazardPoint>,
    scripted_points: VecDeque<(Duration, Result<Vec<HazardPoint>, String>)>,
    nearby: Vec<NearbyResult>,
    nearby_error: Option<String>,
    nearby_delay: Duration,
    nearby_hangs: bool,
    points_calls: usize,
    nearby_calls: Vec<(UserLocation, RadiusKm)>,
}

impl MockHazardApi {
    /// Create a mock serving no hazards
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set the standing reply of `fetch_points`
    pub fn set_points(&self, points: Vec<HazardPoint>) {
        self.state().points = points;
    }

    /// Queue one reply to `fetch_points`, delivered after `delay`
    pub fn push_points_delayed(&self, delay: Duration, points: Vec<HazardPoint>) {
        self.state().scripted_points.push_back((delay, Ok(points)));
    }

    /// Make the next `fetch_points` call fail
    pub fn fail_points_once(&self, message: impl Into<String>) {
        self.state()
            .scripted_points
            .push_back((Duration::ZERO, Err(message.into())));
    }

    /// Set the reply of `fetch_nearby`
    pub fn set_nearby(&self, results: Vec<NearbyResult>) {
        self.state().nearby = results;
    }

    /// Make every `fetch_nearby` call fail until cleared with `None`
    pub fn set_nearby_error(&self, message: Option<String>) {
        self.state().nearby_error = message;
    }

    /// Delay every `fetch_nearby` reply by `delay`
    pub fn delay_nearby(&self, delay: Duration) {
        self.state().nearby_delay = delay;
    }

    /// Make `fetch_nearby` calls never complete (until switched off)
    pub fn hang_nearby(&self, hang: bool) {
        self.state().nearby_hangs = hang;
    }

    /// Number of `fetch_points` calls so far
    pub fn points_calls(&self) -> usize {
        self.state().points_calls
    }

    /// Arguments of every `fetch_nearby` call so far
    pub fn nearby_calls(&self) -> Vec<(UserLocation, RadiusKm)> {
        self.state().nearby_calls.clone()
    }
}

impl HazardApi for MockHazardApi {
    type Error = ClientError;

    async fn fetch_points(&self) -> Result<Vec<HazardPoint>, ClientError> {
        let (delay, reply) = {
            let mut state = self.state();
            state.points_calls += 1;
            match state.scripted_points.pop_front() {
                Some(scripted) => scripted,
                None => (Duration::ZERO, Ok(state.points.clone())),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.map_err(ClientError::Other)
    }

    async fn fetch_nearby(
        &self,
        location: UserLocation,
        radius: RadiusKm,
    ) -> Result<Vec<NearbyResult>, ClientError> {
        let (delay, hangs, reply) = {
            let mut state = self.state();
            state.nearby_calls.push((location, radius));
            let reply = match &state.nearby_error {
                Some(message) => Err(ClientError::Other(message.clone())),
                None => Ok(state.nearby.clone()),
            };
            (state.nearby_delay, state.nearby_hangs, reply)
        };

        if hangs {
            std::future::pending::<()>().await;
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}
