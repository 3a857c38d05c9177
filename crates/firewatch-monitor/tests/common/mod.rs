//! Recording fakes for the platform traits
//!
//! Each fake is a cheap handle over shared state, so a test can move one
//! clone into the controller and inspect another.

#![allow(dead_code)]

use firewatch_client::MockHazardApi;
use firewatch_domain::traits::{
    Geolocator, MapView, MarkerLayer, MessageSurface, Permission, PlatformNotifier,
};
use firewatch_domain::{
    Circle, CircleId, HazardPoint, Marker, NearbyResult, ObservedAt, PlatformNotification,
    Toast, UserLocation,
};
use firewatch_monitor::{AlertController, Command, Flow, MonitorConfig};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Geolocator answering from a script, then repeating the last answer
#[derive(Clone, Default)]
pub struct FakeGeolocator {
    answers: Arc<Mutex<VecDeque<Result<UserLocation, String>>>>,
    calls: Arc<Mutex<usize>>,
}

impl FakeGeolocator {
    pub fn at(lat: f64, lon: f64) -> Self {
        let geolocator = Self::default();
        geolocator.push_position(lat, lon);
        geolocator
    }

    pub fn failing(reason: &str) -> Self {
        let geolocator = Self::default();
        geolocator.push_error(reason);
        geolocator
    }

    pub fn push_position(&self, lat: f64, lon: f64) {
        lock(&self.answers).push_back(UserLocation::new(lat, lon));
    }

    pub fn push_error(&self, reason: &str) {
        lock(&self.answers).push_back(Err(reason.to_string()));
    }

    /// Drop every scripted answer and fail from now on
    pub fn set_error(&self, reason: &str) {
        let mut answers = lock(&self.answers);
        answers.clear();
        answers.push_back(Err(reason.to_string()));
    }

    pub fn calls(&self) -> usize {
        *lock(&self.calls)
    }
}

impl Geolocator for FakeGeolocator {
    type Error = String;

    async fn current_position(&self) -> Result<UserLocation, String> {
        *lock(&self.calls) += 1;
        let mut answers = lock(&self.answers);
        if answers.len() > 1 {
            answers.pop_front().unwrap_or_else(|| Err("no answer".to_string()))
        } else {
            answers
                .front()
                .cloned()
                .unwrap_or_else(|| Err("no answer".to_string()))
        }
    }
}

#[derive(Default)]
struct ViewState {
    views: Vec<(UserLocation, u8)>,
    circles: BTreeMap<u64, Circle>,
    next_id: u64,
}

/// Map view that records viewport changes and live circles
#[derive(Clone, Default)]
pub struct RecordingView {
    state: Arc<Mutex<ViewState>>,
}

impl RecordingView {
    pub fn last_view(&self) -> Option<(UserLocation, u8)> {
        lock(&self.state).views.last().copied()
    }

    pub fn circles(&self) -> Vec<Circle> {
        lock(&self.state).circles.values().cloned().collect()
    }
}

impl MapView for RecordingView {
    fn set_view(&mut self, center: UserLocation, zoom: u8) {
        lock(&self.state).views.push((center, zoom));
    }

    fn add_circle(&mut self, circle: Circle) -> CircleId {
        let mut state = lock(&self.state);
        state.next_id += 1;
        let id = state.next_id;
        state.circles.insert(id, circle);
        CircleId(id)
    }

    fn remove_circle(&mut self, id: CircleId) {
        lock(&self.state).circles.remove(&id.0);
    }
}

/// Marker layer that keeps the markers it was given
#[derive(Clone, Default)]
pub struct RecordingLayer {
    markers: Arc<Mutex<Vec<Marker>>>,
}

impl RecordingLayer {
    pub fn markers(&self) -> Vec<Marker> {
        lock(&self.markers).clone()
    }
}

impl MarkerLayer for RecordingLayer {
    fn clear(&mut self) {
        lock(&self.markers).clear();
    }

    fn add(&mut self, marker: Marker) {
        lock(&self.markers).push(marker);
    }

    fn len(&self) -> usize {
        lock(&self.markers).len()
    }
}

#[derive(Default)]
struct SurfaceState {
    toasts: Vec<Toast>,
    notices: Vec<String>,
}

/// Message surface that records toasts and notices
#[derive(Clone, Default)]
pub struct RecordingSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl RecordingSurface {
    pub fn toasts(&self) -> Vec<Toast> {
        lock(&self.state).toasts.clone()
    }

    pub fn toast_texts(&self) -> Vec<String> {
        lock(&self.state).toasts.iter().map(Toast::text).collect()
    }

    pub fn notices(&self) -> Vec<String> {
        lock(&self.state).notices.clone()
    }
}

impl MessageSurface for RecordingSurface {
    fn toast(&mut self, toast: Toast) {
        lock(&self.state).toasts.push(toast);
    }

    fn notice(&mut self, message: &str) {
        lock(&self.state).notices.push(message.to_string());
    }
}

struct NotifierState {
    current: Permission,
    answer: Permission,
    prompts: usize,
    delivered: Vec<PlatformNotification>,
    visible: BTreeMap<String, PlatformNotification>,
}

/// Platform notifier with one visible slot per tag
#[derive(Clone)]
pub struct FakeNotifier {
    state: Arc<Mutex<NotifierState>>,
}

impl FakeNotifier {
    pub fn answering(answer: Permission) -> Self {
        Self::with_state(Permission::Default, answer)
    }

    pub fn unsupported() -> Self {
        Self::with_state(Permission::Unsupported, Permission::Unsupported)
    }

    fn with_state(current: Permission, answer: Permission) -> Self {
        Self {
            state: Arc::new(Mutex::new(NotifierState {
                current,
                answer,
                prompts: 0,
                delivered: Vec::new(),
                visible: BTreeMap::new(),
            })),
        }
    }

    pub fn prompts(&self) -> usize {
        lock(&self.state).prompts
    }

    pub fn delivered(&self) -> Vec<PlatformNotification> {
        lock(&self.state).delivered.clone()
    }

    pub fn visible(&self) -> Vec<PlatformNotification> {
        lock(&self.state).visible.values().cloned().collect()
    }
}

impl PlatformNotifier for FakeNotifier {
    type Error = String;

    fn permission(&self) -> Permission {
        lock(&self.state).current
    }

    async fn request_permission(&mut self) -> Permission {
        let mut state = lock(&self.state);
        state.prompts += 1;
        state.current = state.answer;
        state.answer
    }

    fn show(&mut self, notification: &PlatformNotification) -> Result<(), String> {
        let mut state = lock(&self.state);
        state.delivered.push(notification.clone());
        state
            .visible
            .insert(notification.tag.clone(), notification.clone());
        Ok(())
    }
}

pub type TestController =
    AlertController<MockHazardApi, FakeGeolocator, RecordingView, RecordingSurface, FakeNotifier>;

/// Handles to every fake wired into a controller
pub struct Harness {
    pub controller: TestController,
    pub api: MockHazardApi,
    pub geolocator: FakeGeolocator,
    pub view: RecordingView,
    pub surface: RecordingSurface,
    pub notifier: FakeNotifier,
}

impl Harness {
    pub fn new(geolocator: FakeGeolocator, notifier: FakeNotifier) -> Self {
        Self::with_config(&MonitorConfig::default(), geolocator, notifier)
    }

    pub fn with_config(
        config: &MonitorConfig,
        geolocator: FakeGeolocator,
        notifier: FakeNotifier,
    ) -> Self {
        let api = MockHazardApi::new();
        let view = RecordingView::default();
        let surface = RecordingSurface::default();
        let controller = AlertController::new(
            config,
            Arc::new(api.clone()),
            geolocator.clone(),
            view.clone(),
            surface.clone(),
            notifier.clone(),
        )
        .expect("valid config");

        Self {
            controller,
            api,
            geolocator,
            view,
            surface,
            notifier,
        }
    }

    /// Apply a command and wait for the checks it started
    pub async fn apply(&mut self, command: Command) -> Flow {
        let flow = self.controller.handle(command).await;
        self.controller.settle().await;
        flow
    }
}

pub fn point(lat: f64, lon: f64, confidence: Option<f64>, title: &str) -> HazardPoint {
    HazardPoint {
        latitude: lat,
        longitude: lon,
        confidence,
        title: title.to_string(),
        source: "S".to_string(),
        observed_at: ObservedAt::parse("2024-01-01T00:00:00Z"),
    }
}

pub fn nearby(title: &str, confidence: f64, distance_km: f64) -> NearbyResult {
    NearbyResult {
        point: point(40.0, -120.0, Some(confidence), title),
        distance_km,
    }
}
