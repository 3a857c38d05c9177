//! Proximity-alert state machine
//!
//! UI events arrive as [`Command`]s on a channel. The controller owns the
//! session and applies each command before taking the next, so the
//! components never observe a half-applied transition. The proximity
//! schedule feeds its ticks into the same channel.
//!
//! Proximity checks run as background tasks. Each one carries a ticket;
//! a location, radius or opt-in change cancels the checks in flight and
//! raises the floor below which late results are dropped. A tick that
//! fires while its schedule's check is still running is coalesced into
//! that check, so a slow backend never queues up work.

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::gateway::{NotificationGateway, ALERTS_ENABLED_MESSAGE};
use crate::metrics::AlertMetrics;
use crate::proximity::{CheckOutcome, ProximityMonitor};
use crate::session::{AlertState, SessionState};
use crate::tracker::LocationTracker;
use firewatch_domain::traits::{
    Geolocator, HazardApi, MapView, MessageSurface, Permission, PlatformNotifier,
};
use firewatch_domain::{RadiusKm, UserLocation};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinSet};

/// Events driving the alert state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// "Center on me": acquire the position once
    AcquireLocation,
    /// New radius selection, in kilometres
    ChangeRadius(f64),
    /// "Enable alerts": request permission and opt in
    EnableAlerts,
    /// Scheduled proximity check from the given schedule generation
    ProximityTick {
        /// Generation of the schedule that fired
        generation: u64,
    },
    /// Stop processing commands
    Shutdown,
}

/// Whether the controller keeps running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing
    Continue,
    /// Stop the loop
    Stop,
}

/// Owns the session and coordinates tracker, monitor and gateway
pub struct AlertController<A, G, V, S, N> {
    session: SessionState,
    tracker: LocationTracker<G, V>,
    monitor: ProximityMonitor<A>,
    overview: (UserLocation, u8),
    gateway: NotificationGateway<S, N>,
    commands_tx: UnboundedSender<Command>,
    commands_rx: UnboundedReceiver<Command>,
    alerts_enabled_toast: Duration,
    radius_updated_toast: Duration,
    metrics: AlertMetrics,
    in_flight: JoinSet<(u64, CheckOutcome)>,
    issued: u64,
    floor: u64,
    running: Option<u64>,
}

impl<A, G, V, S, N> AlertController<A, G, V, S, N>
where
    A: HazardApi + 'static,
    G: Geolocator,
    V: MapView,
    S: MessageSurface,
    N: PlatformNotifier,
{
    /// Create a controller in the `Disabled` state
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default radius or initial map
    /// center is invalid.
    pub fn new(
        config: &MonitorConfig,
        api: Arc<A>,
        geolocator: G,
        view: V,
        surface: S,
        notifier: N,
    ) -> Result<Self, MonitorError> {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        Ok(Self {
            session: SessionState::new(config.default_radius()?),
            tracker: LocationTracker::new(geolocator, view, config.map.locate_zoom),
            monitor: ProximityMonitor::new(api, config.poll_interval()),
            overview: (config.map.initial_center()?, config.map.initial_zoom),
            gateway: NotificationGateway::new(surface, notifier, config),
            commands_tx,
            commands_rx,
            alerts_enabled_toast: config.display.alerts_enabled_toast(),
            radius_updated_toast: config.display.radius_updated_toast(),
            metrics: AlertMetrics::new(),
            in_flight: JoinSet::new(),
            issued: 0,
            floor: 0,
            running: None,
        })
    }

    /// Center the map on the configured overview
    pub fn show_overview(&mut self) {
        let (center, zoom) = self.overview;
        self.tracker.show_overview(center, zoom);
    }

    /// Sender for feeding commands from the UI
    pub fn sender(&self) -> UnboundedSender<Command> {
        self.commands_tx.clone()
    }

    /// Process commands until `Shutdown` or Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown signal cannot be installed.
    pub async fn run(&mut self) -> Result<(), MonitorError> {
        let mut signal_error = None;
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                signal_error = Some(e);
            }
        })
        .await;

        match signal_error {
            Some(e) => Err(MonitorError::Worker(format!(
                "Failed to listen for shutdown signal: {}",
                e
            ))),
            None => Ok(()),
        }
    }

    /// Process commands until `Shutdown` or until `shutdown` completes
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!("Alert controller started");

        loop {
            tokio::select! {
                command = self.commands_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    if self.handle(command).await == Flow::Stop {
                        break;
                    }
                }
                Some(joined) = self.in_flight.join_next() => self.finish_check(joined),
                _ = &mut shutdown => break,
            }
        }

        self.in_flight.abort_all();
        self.monitor.stop_schedule();
        tracing::info!("Alert controller stopped. Final metrics:\n{}", self.metrics.summary());
    }

    /// Wait for the next command or finished check and apply it
    pub async fn step(&mut self) -> Flow {
        tokio::select! {
            command = self.commands_rx.recv() => match command {
                Some(command) => self.handle(command).await,
                None => Flow::Stop,
            },
            Some(joined) = self.in_flight.join_next() => {
                self.finish_check(joined);
                Flow::Continue
            }
        }
    }

    /// Wait for every check in flight and deliver its outcome
    pub async fn settle(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            self.finish_check(joined);
        }
    }

    /// Apply one command
    pub async fn handle(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, state = ?self.alert_state(), "Handling command");
        match command {
            Command::AcquireLocation => self.acquire_location().await,
            Command::ChangeRadius(km) => self.change_radius(km).await,
            Command::EnableAlerts => self.enable_alerts().await,
            Command::ProximityTick { generation } => {
                if !self.monitor.timer().is_current(generation) {
                    tracing::debug!(generation, "Ignoring tick from replaced schedule");
                    self.metrics.stale_ticks_ignored += 1;
                } else if let Some(ticket) = self.running {
                    tracing::debug!(ticket, "Check still running, coalescing tick");
                    self.metrics.ticks_coalesced += 1;
                } else {
                    self.spawn_check();
                }
            }
            Command::Shutdown => return Flow::Stop,
        }
        Flow::Continue
    }

    async fn acquire_location(&mut self) {
        match self.tracker.acquire(self.session.radius()).await {
            Ok(location) => {
                self.session.set_location(location);
                if self.session.alerts_enabled() {
                    self.install_schedule();
                }
                self.restart_check();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Location unavailable");
                self.gateway.notice(&format!("Could not get location: {}", e));
            }
        }
    }

    async fn change_radius(&mut self, km: f64) {
        let radius = match RadiusKm::new(km) {
            Ok(radius) => radius,
            Err(e) => {
                let error = MonitorError::InvalidRadius(e);
                tracing::warn!(%error, "Radius change rejected");
                self.gateway.notice(&error.to_string());
                return;
            }
        };

        self.session.set_radius(radius);
        self.cancel_checks();
        self.tracker.redraw_radius(self.session.location(), radius);
        tracing::info!(radius_km = radius.km(), "Radius changed");

        if self.session.should_monitor() {
            self.install_schedule();
            self.gateway.info(
                format!("Radius updated to {} km", radius),
                self.radius_updated_toast,
            );
            self.restart_check();
        }
    }

    async fn enable_alerts(&mut self) {
        if self.gateway.request_permission().await != Permission::Granted {
            tracing::info!("Alerts not enabled, permission unavailable");
            return;
        }

        self.session.enable_alerts();
        self.gateway.info(ALERTS_ENABLED_MESSAGE, self.alerts_enabled_toast);
        tracing::info!(state = ?self.alert_state(), "Alerts enabled");

        if self.session.should_monitor() {
            self.install_schedule();
            self.restart_check();
        }
    }

    fn install_schedule(&mut self) {
        let replaced = self.monitor.start_schedule(self.commands_tx.clone());
        self.metrics.schedules_installed += 1;
        if replaced {
            self.metrics.schedules_replaced += 1;
        }
    }

    /// Cancel the checks in flight and start a fresh one
    fn restart_check(&mut self) {
        self.cancel_checks();
        self.spawn_check();
    }

    /// Abort the checks in flight; anything they still deliver is dropped
    fn cancel_checks(&mut self) {
        if !self.in_flight.is_empty() {
            tracing::debug!(checks = self.in_flight.len(), "Cancelling checks in flight");
        }
        self.in_flight.abort_all();
        self.floor = self.issued + 1;
        self.running = None;
    }

    fn spawn_check(&mut self) {
        self.issued += 1;
        let ticket = self.issued;
        self.metrics.checks_run += 1;
        self.running = Some(ticket);

        let check = self.monitor.check(&self.session);
        tracing::debug!(ticket, "Dispatching proximity check");
        self.in_flight.spawn(async move { (ticket, check.await) });
    }

    fn finish_check(&mut self, joined: Result<(u64, CheckOutcome), JoinError>) {
        let (ticket, outcome) = match joined {
            Ok(reply) => reply,
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                tracing::error!("Proximity check task failed: {}", e);
                self.metrics.checks_failed += 1;
                self.running = None;
                return;
            }
        };

        if ticket < self.floor {
            tracing::debug!(ticket, floor = self.floor, "Dropping superseded check result");
            self.metrics.stale_checks_dropped += 1;
            return;
        }
        if self.running == Some(ticket) {
            self.running = None;
        }
        self.deliver(&outcome);
    }

    /// Run one proximity check now and wait for its outcome
    ///
    /// Supersedes any check still in flight.
    pub async fn run_check(&mut self) -> CheckOutcome {
        self.cancel_checks();
        self.issued += 1;
        self.metrics.checks_run += 1;

        let outcome = self.monitor.check_nearby(&self.session).await;
        self.deliver(&outcome);
        outcome
    }

    fn deliver(&mut self, outcome: &CheckOutcome) {
        match outcome {
            CheckOutcome::NoLocation => self.metrics.checks_without_location += 1,
            CheckOutcome::Nearest(nearest) => {
                self.metrics.hazards_found += 1;
                if self.gateway.notify(nearest) {
                    self.metrics.platform_notifications += 1;
                } else if self.gateway.platform_enabled() {
                    self.metrics.platform_failures += 1;
                }
            }
            CheckOutcome::NoneWithinRadius(radius) => {
                self.metrics.none_within_radius += 1;
                self.gateway.inform_none(*radius);
            }
            CheckOutcome::Failed(_) => self.metrics.checks_failed += 1,
        }
    }

    /// Number of proximity checks still running
    pub fn checks_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Current alerting state
    pub fn alert_state(&self) -> AlertState {
        self.session.alert_state()
    }

    /// The session
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Alert metrics
    pub fn metrics(&self) -> &AlertMetrics {
        &self.metrics
    }

    /// The location tracker
    pub fn tracker(&self) -> &LocationTracker<G, V> {
        &self.tracker
    }

    /// The proximity monitor
    pub fn monitor(&self) -> &ProximityMonitor<A> {
        &self.monitor
    }

    /// The notification gateway
    pub fn gateway(&self) -> &NotificationGateway<S, N> {
        &self.gateway
    }
}
