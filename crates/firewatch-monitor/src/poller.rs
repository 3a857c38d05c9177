//! Background worker that keeps the hazard markers current

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::metrics::PollMetrics;
use crate::render::{RenderLayer, RenderOutcome};
use crate::source::{FetchReply, PointSource};
use firewatch_domain::traits::{HazardApi, MarkerLayer};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Background worker that polls the backend and re-renders markers
///
/// Runs independently of alerting. Each fetch is spawned on its own, so a
/// slow response never holds back the next scheduled poll; out-of-order
/// responses are discarded by the render layer.
///
/// # Examples
///
/// ```no_run
/// use firewatch_client::HttpHazardApi;
/// use firewatch_monitor::{HazardPoller, MonitorConfig};
/// # use firewatch_domain::{traits::MarkerLayer, Marker};
/// # struct Layer;
/// # impl MarkerLayer for Layer {
/// #     fn clear(&mut self) {}
/// #     fn add(&mut self, _: Marker) {}
/// #     fn len(&self) -> usize { 0 }
/// # }
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = MonitorConfig::default();
///     let api = Arc::new(HttpHazardApi::new(&config.api_base_url)?);
///     let mut poller = HazardPoller::new(api, Layer, &config);
///
///     // Run indefinitely (until Ctrl+C)
///     poller.run().await?;
///     Ok(())
/// }
/// ```
pub struct HazardPoller<A, L> {
    source: PointSource<A>,
    render: RenderLayer<L>,
    interval: Duration,
    metrics: PollMetrics,
}

impl<A, L> HazardPoller<A, L>
where
    A: HazardApi + 'static,
    L: MarkerLayer,
{
    /// Create a poller drawing into `layer`
    pub fn new(api: Arc<A>, layer: L, config: &MonitorConfig) -> Self {
        Self {
            source: PointSource::new(api),
            render: RenderLayer::new(
                layer,
                config.confidence_thresholds(),
                config.display.marker_toast(),
            ),
            interval: config.poll_interval(),
            metrics: PollMetrics::new(),
        }
    }

    /// Run the worker until Ctrl+C
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

    /// Run the worker until `shutdown` completes
    ///
    /// Fetches once immediately, then every poll interval. In-flight
    /// fetches are abandoned on shutdown.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight: JoinSet<FetchReply> = JoinSet::new();
        tokio::pin!(shutdown);

        tracing::info!("Hazard poller started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.metrics.record_dispatch();
                    let fetch = self.source.dispatch();
                    tracing::debug!(ticket = self.source.issued(), "Dispatching hazard fetch");
                    in_flight.spawn(fetch);
                }
                Some(joined) = in_flight.join_next() => {
                    match joined {
                        Ok(reply) => self.handle_reply(reply),
                        Err(e) => {
                            tracing::error!("Hazard fetch task failed: {}", e);
                            self.metrics.record_failure(e.to_string());
                        }
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping hazard poller");
                    break;
                }
            }
        }

        in_flight.abort_all();
        tracing::info!("Hazard poller stopped. Final metrics:\n{}", self.metrics.summary());
    }

    /// Run a fixed number of sequential poll cycles
    ///
    /// The first cycle runs immediately, later ones one interval apart.
    /// Fetch failures skip their cycle, exactly as in [`HazardPoller::run`].
    pub async fn run_cycles(&mut self, cycles: usize) {
        let mut ticker = interval(self.interval);

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting poll cycle {}/{}", cycle + 1, cycles);

            self.metrics.record_dispatch();
            let reply = self.source.dispatch().await;
            self.handle_reply(reply);
        }
    }

    /// Apply one fetch result to the markers
    pub fn handle_reply(&mut self, reply: FetchReply) {
        match reply.result {
            Ok(points) => match self.render.apply(reply.ticket, &points) {
                RenderOutcome::Rendered(count) => {
                    tracing::info!("Rendered {} hazard markers", count);
                    self.metrics.record_render(count);
                }
                RenderOutcome::Stale => self.metrics.record_stale(),
            },
            Err(e) => {
                tracing::warn!("Hazard fetch failed, keeping current markers: {}", e);
                self.metrics.record_failure(e);
            }
        }
    }

    /// Poll metrics
    pub fn metrics(&self) -> &PollMetrics {
        &self.metrics
    }

    /// The render layer
    pub fn render_layer(&self) -> &RenderLayer<L> {
        &self.render
    }
}
