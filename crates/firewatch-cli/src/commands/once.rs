//! One-shot hazard listing.

use crate::commands::build_api;
use crate::error::Result;
use crate::output::Formatter;
use crate::terminal::TerminalLayer;
use firewatch_domain::traits::HazardApi;
use firewatch_monitor::{MonitorConfig, RenderLayer};

/// Execute the once command.
pub async fn execute_once(config: &MonitorConfig, formatter: &Formatter) -> Result<()> {
    let api = build_api(config)?;
    let points = api.fetch_points().await?;

    let layer = TerminalLayer::default();
    let mut render = RenderLayer::new(
        layer.clone(),
        config.confidence_thresholds(),
        config.display.marker_toast(),
    );
    let count = render.render(&points);

    println!("{}", formatter.format_markers(&layer.markers()));
    println!("{}", formatter.info(&format!("{} active hazard(s)", count)));
    Ok(())
}
