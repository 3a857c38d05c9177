//! Terminal implementations of the map, message and platform traits.

use crate::output::Formatter;
use firewatch_domain::traits::{
    Geolocator, MapView, MarkerLayer, MessageSurface, Permission, PlatformNotifier,
};
use firewatch_domain::{Circle, CircleId, Marker, PlatformNotification, Toast, UserLocation};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marker layer shared between the poller and the prompt.
#[derive(Clone, Default)]
pub struct TerminalLayer {
    markers: Arc<Mutex<Vec<Marker>>>,
}

impl TerminalLayer {
    /// Snapshot of the current markers.
    pub fn markers(&self) -> Vec<Marker> {
        lock(&self.markers).clone()
    }
}

impl MarkerLayer for TerminalLayer {
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

/// Map view printing viewport and radius changes.
pub struct TerminalMap {
    formatter: Formatter,
    circles: HashMap<CircleId, Circle>,
    next_id: u64,
}

impl TerminalMap {
    /// Create a map view.
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            circles: HashMap::new(),
            next_id: 0,
        }
    }

    /// Circles currently drawn.
    pub fn circles(&self) -> usize {
        self.circles.len()
    }
}

impl MapView for TerminalMap {
    fn set_view(&mut self, center: UserLocation, zoom: u8) {
        println!(
            "{}",
            self.formatter
                .info(&format!("Map centered on {} (zoom {})", center, zoom))
        );
    }

    fn add_circle(&mut self, circle: Circle) -> CircleId {
        self.next_id += 1;
        let id = CircleId(self.next_id);
        println!(
            "{}",
            self.formatter.info(&format!(
                "Watching {} km around {}",
                circle.radius_m / 1000.0,
                circle.center
            ))
        );
        self.circles.insert(id, circle);
        id
    }

    fn remove_circle(&mut self, id: CircleId) {
        self.circles.remove(&id);
    }
}

/// Message surface writing toasts and notices to stdout.
pub struct TerminalSurface {
    formatter: Formatter,
}

impl TerminalSurface {
    /// Create a surface.
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }
}

impl MessageSurface for TerminalSurface {
    fn toast(&mut self, toast: Toast) {
        println!("{}", self.formatter.toast(&toast));
    }

    fn notice(&mut self, message: &str) {
        println!("{}", self.formatter.warning(message));
    }
}

/// Terminal "platform" notifications with one visible slot per tag.
pub struct TerminalNotifier {
    formatter: Formatter,
    permission: Permission,
    visible: HashMap<String, PlatformNotification>,
}

impl TerminalNotifier {
    /// Notifier that grants permission when asked.
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            permission: Permission::Default,
            visible: HashMap::new(),
        }
    }

    /// Notifier for a terminal without notification support.
    pub fn unsupported(formatter: Formatter) -> Self {
        Self {
            permission: Permission::Unsupported,
            ..Self::new(formatter)
        }
    }

    /// Notification currently shown under `tag`.
    pub fn visible(&self, tag: &str) -> Option<&PlatformNotification> {
        self.visible.get(tag)
    }
}

impl PlatformNotifier for TerminalNotifier {
    type Error = String;

    fn permission(&self) -> Permission {
        self.permission
    }

    async fn request_permission(&mut self) -> Permission {
        if self.permission == Permission::Default {
            // The prompt is the user's own 'enable' command
            self.permission = Permission::Granted;
        }
        self.permission
    }

    fn show(&mut self, notification: &PlatformNotification) -> Result<(), String> {
        if self.permission != Permission::Granted {
            return Err(format!("permission is {:?}", self.permission));
        }
        let replaced = self
            .visible
            .insert(notification.tag.clone(), notification.clone())
            .is_some();
        tracing::debug!(tag = %notification.tag, replaced, "Notification shown");
        println!(
            "\x07{}",
            self.formatter
                .notification(&notification.title, &notification.body)
        );
        Ok(())
    }
}

/// Position source fed from the command line and the prompt.
#[derive(Clone, Default)]
pub struct StaticGeolocator {
    position: Arc<Mutex<Option<UserLocation>>>,
}

impl StaticGeolocator {
    /// Geolocator starting at `position`, if any.
    pub fn new(position: Option<UserLocation>) -> Self {
        Self {
            position: Arc::new(Mutex::new(position)),
        }
    }

    /// Replace the reported position.
    pub fn set(&self, position: UserLocation) {
        *lock(&self.position) = Some(position);
    }
}

impl Geolocator for StaticGeolocator {
    type Error = String;

    async fn current_position(&self) -> Result<UserLocation, String> {
        let position = *lock(&self.position);
        position.ok_or_else(|| "no position set, use 'locate <lat> <lon>'".to_string())
    }
}
