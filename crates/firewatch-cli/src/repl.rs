//! Interactive prompt driving the alert session.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::terminal::{StaticGeolocator, TerminalLayer};
use firewatch_domain::UserLocation;
use firewatch_monitor::Command;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;

/// One parsed prompt line.
#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    /// Leave the session
    Quit,
    /// Show the command list
    Help,
    /// Print the current markers
    Markers,
    /// Acquire the position, optionally setting it first
    Locate(Option<UserLocation>),
    /// Forward a command to the alert controller
    Send(Command),
}

/// Parse a prompt line.
pub fn parse_line(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match head {
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        "help" | "?" => Ok(ReplCommand::Help),
        "markers" | "list" => Ok(ReplCommand::Markers),
        "enable" => Ok(ReplCommand::Send(Command::EnableAlerts)),
        "locate" => parse_locate(&parts[1..]),
        "radius" => parse_radius(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

fn parse_locate(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [] => Ok(ReplCommand::Locate(None)),
        [lat, lon] => {
            let lat = parse_number(lat, "latitude")?;
            let lon = parse_number(lon, "longitude")?;
            let location = UserLocation::new(lat, lon).map_err(CliError::InvalidInput)?;
            Ok(ReplCommand::Locate(Some(location)))
        }
        _ => Err(CliError::InvalidInput(
            "Usage: locate [<lat> <lon>]".to_string(),
        )),
    }
}

fn parse_radius(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [km] => Ok(ReplCommand::Send(Command::ChangeRadius(parse_number(
            km, "radius",
        )?))),
        _ => Err(CliError::InvalidInput("Usage: radius <km>".to_string())),
    }
}

fn parse_number(value: &str, what: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| CliError::InvalidInput(format!("Invalid {}: {}", what, value)))
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run_repl(
    commands: UnboundedSender<Command>,
    geolocator: StaticGeolocator,
    layer: TerminalLayer,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("Firewatch - Type 'help' for commands, 'quit' to exit")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(ReplCommand::Quit) => break,
            Ok(ReplCommand::Help) => print_help(formatter),
            Ok(ReplCommand::Markers) => println!("{}", formatter.format_markers(&layer.markers())),
            Ok(ReplCommand::Locate(position)) => {
                if let Some(position) = position {
                    geolocator.set(position);
                }
                forward(&commands, Command::AcquireLocation)?;
            }
            Ok(ReplCommand::Send(command)) => forward(&commands, command)?,
            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
        }
    }

    Ok(())
}

fn forward(commands: &UnboundedSender<Command>, command: Command) -> Result<()> {
    commands.send(command).map_err(|_| {
        CliError::Monitor(firewatch_monitor::MonitorError::Worker(
            "Alert controller stopped".to_string(),
        ))
    })
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!("  enable                Enable proximity alerts");
    println!("  locate [<lat> <lon>]  Center on your position and check nearby fires");
    println!("  radius <km>           Change the alert radius");
    println!("  markers               Show current hazards by severity");
    println!("  help                  Show this help");
    println!("  quit                  Exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_line("quit").unwrap(), ReplCommand::Quit);
        assert_eq!(parse_line("  help ").unwrap(), ReplCommand::Help);
        assert_eq!(parse_line("markers").unwrap(), ReplCommand::Markers);
        assert_eq!(
            parse_line("enable").unwrap(),
            ReplCommand::Send(Command::EnableAlerts)
        );
    }

    #[test]
    fn test_parse_locate() {
        assert_eq!(parse_line("locate").unwrap(), ReplCommand::Locate(None));

        match parse_line("locate 45.5 -122.6").unwrap() {
            ReplCommand::Locate(Some(location)) => {
                assert_eq!(location.latitude, 45.5);
                assert_eq!(location.longitude, -122.6);
            }
            other => panic!("Expected Locate, got {:?}", other),
        }

        assert!(parse_line("locate 95 0").is_err());
        assert!(parse_line("locate 45").is_err());
    }

    #[test]
    fn test_parse_radius() {
        assert_eq!(
            parse_line("radius 100").unwrap(),
            ReplCommand::Send(Command::ChangeRadius(100.0))
        );
        assert!(parse_line("radius").is_err());
        assert!(parse_line("radius far").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_line("launch").unwrap_err();
        assert!(err.to_string().contains("Unknown command: launch"));
    }
}
