//! Diagnostic counters for the poll and alert loops
//!
//! Background failures never reach the user; these counters (and the
//! accompanying log lines) are where they become observable.

/// Counters for the hazard poll loop
#[derive(Debug, Clone, Default)]
pub struct PollMetrics {
    /// Fetches dispatched
    pub polls_started: usize,

    /// Fetches whose result replaced the markers
    pub polls_rendered: usize,

    /// Fetches that failed (markers kept)
    pub polls_failed: usize,

    /// Successful fetches discarded because a newer one had already rendered
    pub stale_dropped: usize,

    /// Markers shown after the most recent render
    pub markers_shown: usize,

    /// Text of the most recent failure
    pub last_error: Option<String>,
}

impl PollMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatched fetch
    pub fn record_dispatch(&mut self) {
        self.polls_started += 1;
    }

    /// Record a render of `markers` markers
    pub fn record_render(&mut self, markers: usize) {
        self.polls_rendered += 1;
        self.markers_shown = markers;
    }

    /// Record a failed fetch
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.polls_failed += 1;
        self.last_error = Some(error.into());
    }

    /// Record a discarded out-of-order response
    pub fn record_stale(&mut self) {
        self.stale_dropped += 1;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Hazard Poll Summary".to_string(),
            "===================".to_string(),
            format!("Polls started: {}", self.polls_started),
            format!("Polls rendered: {}", self.polls_rendered),
            format!("Polls failed: {}", self.polls_failed),
            format!("Stale responses dropped: {}", self.stale_dropped),
            format!("Markers shown: {}", self.markers_shown),
        ];
        if let Some(err) = &self.last_error {
            lines.push(format!("Last error: {}", err));
        }
        lines.join("\n")
    }
}

/// Counters for the proximity alert loop
#[derive(Debug, Clone, Default)]
pub struct AlertMetrics {
    /// Proximity checks dispatched
    pub checks_run: usize,

    /// Checks skipped because no location was known
    pub checks_without_location: usize,

    /// Checks whose backend call failed
    pub checks_failed: usize,

    /// Checks that found at least one hazard
    pub hazards_found: usize,

    /// Checks that found nothing within the radius
    pub none_within_radius: usize,

    /// Platform notifications delivered
    pub platform_notifications: usize,

    /// Platform notifications that failed to deliver
    pub platform_failures: usize,

    /// Repeating schedules installed
    pub schedules_installed: usize,

    /// Schedules cancelled to make room for a new one
    pub schedules_replaced: usize,

    /// Ticks from an already-cancelled schedule that were ignored
    pub stale_ticks_ignored: usize,

    /// Ticks skipped because the previous check was still running
    pub ticks_coalesced: usize,

    /// Check results discarded because a newer check superseded them
    pub stale_checks_dropped: usize,
}

impl AlertMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Proximity Alert Summary".to_string(),
            "=======================".to_string(),
            format!("Checks run: {}", self.checks_run),
            format!("Checks without location: {}", self.checks_without_location),
            format!("Checks failed: {}", self.checks_failed),
            format!("Hazards found: {}", self.hazards_found),
            format!("None within radius: {}", self.none_within_radius),
            format!(
                "Platform notifications: {} ({} failed)",
                self.platform_notifications, self.platform_failures
            ),
            format!(
                "Schedules installed: {} ({} replaced)",
                self.schedules_installed, self.schedules_replaced
            ),
            format!("Stale ticks ignored: {}", self.stale_ticks_ignored),
            format!("Ticks coalesced: {}", self.ticks_coalesced),
            format!("Stale checks dropped: {}", self.stale_checks_dropped),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_metrics_creation() {
        let metrics = PollMetrics::new();
        assert_eq!(metrics.polls_started, 0);
        assert_eq!(metrics.polls_failed, 0);
        assert!(metrics.last_error.is_none());
    }

    #[test]
    fn test_record_render_and_failure() {
        let mut metrics = PollMetrics::new();
        metrics.record_dispatch();
        metrics.record_render(12);
        metrics.record_dispatch();
        metrics.record_failure("connection refused");

        assert_eq!(metrics.polls_started, 2);
        assert_eq!(metrics.polls_rendered, 1);
        assert_eq!(metrics.polls_failed, 1);
        // A failure leaves the last marker count untouched
        assert_eq!(metrics.markers_shown, 12);
        assert_eq!(metrics.last_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_poll_summary() {
        let mut metrics = PollMetrics::new();
        metrics.record_dispatch();
        metrics.record_stale();
        metrics.record_failure("timeout");

        let summary = metrics.summary();
        assert!(summary.contains("Polls started: 1"));
        assert!(summary.contains("Stale responses dropped: 1"));
        assert!(summary.contains("Last error: timeout"));
    }

    #[test]
    fn test_reset() {
        let mut metrics = PollMetrics::new();
        metrics.record_dispatch();
        metrics.record_failure("x");
        metrics.reset();
        assert_eq!(metrics.polls_started, 0);
        assert!(metrics.last_error.is_none());

        let mut alerts = AlertMetrics::new();
        alerts.checks_run = 3;
        alerts.reset();
        assert_eq!(alerts.checks_run, 0);
    }

    #[test]
    fn test_alert_summary() {
        let metrics = AlertMetrics {
            checks_run: 4,
            checks_failed: 1,
            schedules_installed: 2,
            schedules_replaced: 1,
            ticks_coalesced: 3,
            ..Default::default()
        };
        let summary = metrics.summary();
        assert!(summary.contains("Ticks coalesced: 3"));
        assert!(summary.contains("Checks run: 4"));
        assert!(summary.contains("Checks failed: 1"));
        assert!(summary.contains("Schedules installed: 2 (1 replaced)"));
    }
}
