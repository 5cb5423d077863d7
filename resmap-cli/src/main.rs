//! resmap CLI - drive the layer engine from the command line.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use resmap::navigation::Screen;

use commands::config::ConfigCommands;

#[derive(Parser)]
#[command(name = "resmap")]
#[command(version = resmap::VERSION)]
#[command(about = "Map layer orchestration for natural-resource planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which layers a screen and step display
    Layers {
        /// Screen name (e.g. groundwater, resource_mapping)
        #[arg(value_parser = parse_screen)]
        screen: Screen,

        /// Step within the screen
        #[arg(default_value = "0")]
        step: u8,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Run a headless session against the configured servers
    Run {
        /// Screen to open after start-up
        #[arg(long, value_parser = parse_screen, default_value = "HomeScreen")]
        screen: Screen,

        /// Step to open on that screen
        #[arg(long, default_value = "0")]
        step: u8,

        /// Fallback latitude if the location endpoint is unavailable
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Fallback longitude if the location endpoint is unavailable
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Click at `lon,lat` once the screen has loaded
        #[arg(long, value_parser = parse_point)]
        click: Option<(f64, f64)>,
    },
}

fn parse_screen(s: &str) -> Result<Screen, String> {
    s.parse().map_err(|e: resmap::navigation::NavigationError| e.to_string())
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (lon, lat) = s
        .split_once(',')
        .ok_or_else(|| format!("expected lon,lat but got '{}'", s))?;
    let lon = lon.trim().parse().map_err(|_| format!("invalid longitude '{}'", lon))?;
    let lat = lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", lat))?;
    Ok((lon, lat))
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Layers { screen, step } => commands::layers::run(screen, step),
        Commands::Config { command } => commands::config::run(command),
        Commands::Run {
            screen,
            step,
            lat,
            lon,
            click,
        } => commands::run::run(commands::run::RunArgs {
            screen,
            step,
            fallback: lat.zip(lon),
            click,
        }),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("75.1, 25.2"), Ok((75.1, 25.2)));
        assert!(parse_point("75.1").is_err());
        assert!(parse_point("east,25").is_err());
    }

    #[test]
    fn test_parse_screen() {
        assert_eq!(parse_screen("groundwater"), Ok(Screen::Groundwater));
        assert!(parse_screen("nowhere").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
