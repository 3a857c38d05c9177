//! Interactive watch session.

use crate::cli::WatchArgs;
use crate::commands::build_api;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::repl;
use crate::terminal::{
    StaticGeolocator, TerminalLayer, TerminalMap, TerminalNotifier, TerminalSurface,
};
use firewatch_domain::UserLocation;
use firewatch_monitor::{
    AlertController, Command, HazardPoller, MonitorConfig, MonitorError, TileSource,
};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Execute the watch command.
///
/// Runs the hazard poller and the alert controller in the background and
/// the prompt in the foreground until `quit`, end of input or Ctrl+C.
pub async fn execute_watch(
    args: WatchArgs,
    config: &MonitorConfig,
    formatter: &Formatter,
) -> Result<()> {
    let start = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            Some(UserLocation::new(lat, lon).map_err(CliError::InvalidInput)?)
        }
        _ => None,
    };

    let api = Arc::new(build_api(config)?);
    let tiles = TileSource::resolve(&config.tiles);
    println!(
        "{}",
        formatter.info(&format!(
            "Watching {} every {}s (tiles: {})",
            api.base_url(),
            config.poll_interval_secs,
            tiles
        ))
    );

    let layer = TerminalLayer::default();
    let mut poller = HazardPoller::new(Arc::clone(&api), layer.clone(), config);

    let geolocator = StaticGeolocator::new(start);
    let notifier = if args.no_notifications {
        TerminalNotifier::unsupported(*formatter)
    } else {
        TerminalNotifier::new(*formatter)
    };
    let mut controller = AlertController::new(
        config,
        api,
        geolocator.clone(),
        TerminalMap::new(*formatter),
        TerminalSurface::new(*formatter),
        notifier,
    )?;
    controller.show_overview();
    let commands = controller.sender();

    let (stop_poller, poller_stopped) = oneshot::channel::<()>();
    let poller_task = tokio::spawn(async move {
        poller
            .run_until(async {
                let _ = poller_stopped.await;
            })
            .await;
    });
    let controller_task = tokio::spawn(async move {
        controller.run_until(std::future::pending::<()>()).await;
    });

    let outcome = tokio::select! {
        result = repl::run_repl(commands.clone(), geolocator, layer, formatter) => result,
        signal = tokio::signal::ctrl_c() => signal.map_err(CliError::from),
    };

    // Both sends fail only if the task already ended
    let _ = commands.send(Command::Shutdown);
    let _ = stop_poller.send(());

    for task in [controller_task, poller_task] {
        task.await.map_err(|e| {
            MonitorError::Worker(format!("Background task failed: {}", e))
        })?;
    }

    outcome
}
