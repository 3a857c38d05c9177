//! One-shot proximity query.

use crate::cli::NearbyArgs;
use crate::commands::build_api;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use firewatch_domain::UserLocation;
use firewatch_monitor::{CheckOutcome, MonitorConfig, MonitorError, ProximityMonitor, SessionState};
use std::sync::Arc;

/// Execute the nearby command.
pub async fn execute_nearby(
    args: NearbyArgs,
    config: &MonitorConfig,
    formatter: &Formatter,
) -> Result<()> {
    let location = UserLocation::new(args.lat, args.lon).map_err(CliError::InvalidInput)?;
    let mut session = SessionState::new(config.default_radius()?);
    session.set_location(location);

    let monitor = ProximityMonitor::new(Arc::new(build_api(config)?), config.poll_interval());
    match monitor.check_nearby(&session).await {
        CheckOutcome::Nearest(nearest) => println!("{}", formatter.nearest(&nearest)),
        CheckOutcome::NoneWithinRadius(radius) => println!("{}", formatter.none_within(radius)),
        CheckOutcome::Failed(message) => return Err(MonitorError::Fetch(message).into()),
        CheckOutcome::NoLocation => {
            return Err(CliError::InvalidInput("Position required".to_string()))
        }
    }
    Ok(())
}
