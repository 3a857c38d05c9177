//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Firewatch - wildfire hazard map and proximity alerts in the terminal.
#[derive(Debug, Parser)]
#[command(name = "firewatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Hazard backend base URL
    #[arg(long, global = true, env = "FIREWATCH_API")]
    pub api: Option<String>,

    /// Alert radius in kilometres
    #[arg(short, long, global = true)]
    pub radius: Option<f64>,

    /// Poll interval in seconds
    #[arg(short, long, global = true)]
    pub interval: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Keep hazards current and run the interactive alert session (default)
    Watch(WatchArgs),

    /// Fetch hazards once, print them by severity and exit
    Once,

    /// Report the nearest hazard around a position and exit
    Nearby(NearbyArgs),
}

/// Arguments for the watch command.
#[derive(Debug, Default, Args)]
pub struct WatchArgs {
    /// Starting latitude for 'locate'
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Starting longitude for 'locate'
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Treat platform notifications as unsupported
    #[arg(long)]
    pub no_notifications: bool,
}

/// Arguments for the nearby command.
#[derive(Debug, Args)]
pub struct NearbyArgs {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}
