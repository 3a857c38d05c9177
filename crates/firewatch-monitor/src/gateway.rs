//! Permission-gated delivery of proximity alerts

use crate::config::MonitorConfig;
use firewatch_domain::traits::{MessageSurface, Permission, PlatformNotifier};
use firewatch_domain::{NearbyResult, PlatformNotification, RadiusKm, Toast};
use std::time::Duration;

/// Title of the in-app alert toast
pub const NEARBY_TOAST_TITLE: &str = "Nearby fire!";

/// Title of platform notifications
pub const NOTIFICATION_TITLE: &str = "Firepoint nearby";

/// Notice shown when permission is refused
pub const DENIED_NOTICE: &str = "Please allow notifications to receive wildfire alerts.";

/// Notice shown when the platform cannot deliver notifications
pub const UNSUPPORTED_NOTICE: &str = "This platform does not support notifications.";

/// Toast shown once alerts are enabled
pub const ALERTS_ENABLED_MESSAGE: &str =
    "Alerts enabled. Click 'Center on me' to start nearby checks.";

/// Routes proximity results to the in-app surface and, when permitted,
/// to platform notifications
///
/// Permission is requested at most once per gateway. A refusal (or an
/// unsupported platform) turns the platform path off for good; the in-app
/// path keeps working.
pub struct NotificationGateway<S, N> {
    surface: S,
    notifier: N,
    tag: String,
    requested: Option<Permission>,
    nearby_toast: Duration,
    no_hazards_toast: Duration,
}

impl<S, N> NotificationGateway<S, N>
where
    S: MessageSurface,
    N: PlatformNotifier,
{
    /// Create a gateway using the configured tag and toast durations
    pub fn new(surface: S, notifier: N, config: &MonitorConfig) -> Self {
        Self {
            surface,
            notifier,
            tag: config.notification_tag.clone(),
            requested: None,
            nearby_toast: config.display.nearby_toast(),
            no_hazards_toast: config.display.no_hazards_toast(),
        }
    }

    /// Ask for platform permission
    ///
    /// Only the first call reaches the platform; later calls reuse that
    /// answer. Anything other than [`Permission::Granted`] is reported with
    /// a blocking notice, every time.
    pub async fn request_permission(&mut self) -> Permission {
        let permission = match self.requested {
            Some(permission) => permission,
            None => {
                let permission = match self.notifier.permission() {
                    Permission::Unsupported => Permission::Unsupported,
                    Permission::Granted => Permission::Granted,
                    Permission::Denied => Permission::Denied,
                    Permission::Default => match self.notifier.request_permission().await {
                        // A dismissed prompt counts as a refusal
                        Permission::Default => Permission::Denied,
                        other => other,
                    },
                };
                tracing::info!(?permission, "Notification permission resolved");
                self.requested = Some(permission);
                permission
            }
        };

        match permission {
            Permission::Granted => {}
            Permission::Unsupported => self.surface.notice(UNSUPPORTED_NOTICE),
            Permission::Denied | Permission::Default => self.surface.notice(DENIED_NOTICE),
        }
        permission
    }

    /// Whether the platform notification path is open
    pub fn platform_enabled(&self) -> bool {
        !matches!(
            self.requested,
            Some(Permission::Denied | Permission::Unsupported | Permission::Default)
        ) && self.notifier.permission() == Permission::Granted
    }

    /// Alert the user about the nearest hazard
    ///
    /// The in-app toast is always shown. Returns whether a platform
    /// notification was delivered.
    pub fn notify(&mut self, nearest: &NearbyResult) -> bool {
        let body = alert_body(nearest);
        self.surface
            .toast(Toast::titled(NEARBY_TOAST_TITLE, body.clone(), self.nearby_toast));

        if !self.platform_enabled() {
            return false;
        }

        let notification = PlatformNotification {
            title: NOTIFICATION_TITLE.to_string(),
            body,
            tag: self.tag.clone(),
        };
        match self.notifier.show(&notification) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Platform notification failed");
                false
            }
        }
    }

    /// Tell the user nothing was found within `radius`
    pub fn inform_none(&mut self, radius: RadiusKm) {
        self.surface.toast(Toast::new(
            format!("No fires within {} km", radius),
            self.no_hazards_toast,
        ));
    }

    /// Show an informational toast
    pub fn info(&mut self, message: impl Into<String>, duration: Duration) {
        self.surface.toast(Toast::new(message, duration));
    }

    /// Show a blocking notice
    pub fn notice(&mut self, message: &str) {
        self.surface.notice(message);
    }

    /// The in-app surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The platform notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// Body shared by the toast and the platform notification
pub fn alert_body(nearest: &NearbyResult) -> String {
    format!(
        "{}\nConfidence: {}\nDist: {} km",
        nearest.point.title,
        nearest.point.confidence_label(),
        nearest.distance_km
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch_domain::{HazardPoint, ObservedAt};

    #[derive(Default)]
    struct Surface {
        toasts: Vec<Toast>,
        notices: Vec<String>,
    }

    impl MessageSurface for Surface {
        fn toast(&mut self, toast: Toast) {
            self.toasts.push(toast);
        }

        fn notice(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    struct Notifier {
        current: Permission,
        answer: Permission,
        prompts: usize,
        shown: Vec<PlatformNotification>,
    }

    impl Notifier {
        fn answering(answer: Permission) -> Self {
            Self {
                current: Permission::Default,
                answer,
                prompts: 0,
                shown: Vec::new(),
            }
        }
    }

    impl PlatformNotifier for Notifier {
        type Error = String;

        fn permission(&self) -> Permission {
            self.current
        }

        async fn request_permission(&mut self) -> Permission {
            self.prompts += 1;
            self.current = self.answer;
            self.answer
        }

        fn show(&mut self, notification: &PlatformNotification) -> Result<(), String> {
            self.shown.push(notification.clone());
            Ok(())
        }
    }

    fn gateway(answer: Permission) -> NotificationGateway<Surface, Notifier> {
        NotificationGateway::new(
            Surface::default(),
            Notifier::answering(answer),
            &MonitorConfig::default(),
        )
    }

    fn nearest() -> NearbyResult {
        NearbyResult {
            point: HazardPoint {
                latitude: 1.0,
                longitude: 2.0,
                confidence: Some(90.0),
                title: "B".to_string(),
                source: "MODIS".to_string(),
                observed_at: ObservedAt::Unknown,
            },
            distance_km: 3.2,
        }
    }

    #[test]
    fn test_alert_body() {
        assert_eq!(alert_body(&nearest()), "B\nConfidence: 90\nDist: 3.2 km");
    }

    #[tokio::test]
    async fn test_granted_sends_both() {
        let mut gateway = gateway(Permission::Granted);
        assert_eq!(gateway.request_permission().await, Permission::Granted);
        assert!(gateway.surface().notices.is_empty());

        assert!(gateway.notify(&nearest()));
        let toast = &gateway.surface().toasts[0];
        assert_eq!(toast.title.as_deref(), Some("Nearby fire!"));
        assert_eq!(toast.duration, Duration::from_millis(8000));

        let shown = &gateway.notifier().shown;
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Firepoint nearby");
        assert_eq!(shown[0].tag, "wildfire-alert");
    }

    #[tokio::test]
    async fn test_denied_keeps_in_app_path() {
        let mut gateway = gateway(Permission::Denied);
        assert_eq!(gateway.request_permission().await, Permission::Denied);
        assert_eq!(gateway.surface().notices, vec![DENIED_NOTICE.to_string()]);

        assert!(!gateway.notify(&nearest()));
        assert_eq!(gateway.surface().toasts.len(), 1);
        assert!(gateway.notifier().shown.is_empty());
    }

    #[tokio::test]
    async fn test_requested_once() {
        let mut gateway = gateway(Permission::Denied);
        gateway.request_permission().await;
        gateway.request_permission().await;

        assert_eq!(gateway.notifier().prompts, 1);
        assert_eq!(gateway.surface().notices.len(), 2);
    }

    #[tokio::test]
    async fn test_dismissed_prompt_is_refusal() {
        let mut gateway = gateway(Permission::Default);
        assert_eq!(gateway.request_permission().await, Permission::Denied);
        assert!(!gateway.platform_enabled());
    }

    #[tokio::test]
    async fn test_unsupported() {
        let mut notifier = Notifier::answering(Permission::Granted);
        notifier.current = Permission::Unsupported;
        let mut gateway =
            NotificationGateway::new(Surface::default(), notifier, &MonitorConfig::default());

        assert_eq!(gateway.request_permission().await, Permission::Unsupported);
        assert_eq!(gateway.notifier().prompts, 0);
        assert_eq!(gateway.surface().notices, vec![UNSUPPORTED_NOTICE.to_string()]);
    }

    #[test]
    fn test_inform_none() {
        let mut gateway = gateway(Permission::Granted);
        gateway.inform_none(RadiusKm::new(50.0).unwrap());

        let toast = &gateway.surface().toasts[0];
        assert_eq!(toast.body, "No fires within 50 km");
        assert_eq!(toast.duration, Duration::from_millis(3500));
        assert!(gateway.notifier().shown.is_empty());
    }
}
