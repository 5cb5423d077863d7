//! `resmap run`: a headless session against the configured servers.
//!
//! Layers are drawn on an in-memory surface, so tile layers settle through
//! the fallback window while vector layers are fetched for real.

use std::sync::Arc;

use resmap::config::ConfigFile;
use resmap::coord::LonLat;
use resmap::location::{FallbackLocation, FixedLocation, LocalEndpointSource};
use resmap::logging::init_logging;
use resmap::navigation::Screen;
use resmap::session::{MapSession, SessionOptions};
use resmap::source::ReqwestClient;
use resmap::surface::{InMemorySurface, RenderSurface};
use resmap::transition::TransitionOutcome;
use tracing::info;

use crate::error::CliError;

pub struct RunArgs {
    pub screen: Screen,
    pub step: u8,
    /// `(lat, lon)` used when the location endpoint is unavailable.
    pub fallback: Option<(f64, f64)>,
    /// `(lon, lat)` to click after loading.
    pub click: Option<(f64, f64)>,
}

pub fn run(args: RunArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    if !config.plan.is_complete() {
        return Err(CliError::Config(
            "plan district and block must be set to run a session".to_string(),
        ));
    }

    let _guard = init_logging(&config.logging.directory, &config.logging.file)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    runtime.block_on(run_session(&config, args))
}

async fn run_session(config: &ConfigFile, args: RunArgs) -> Result<(), CliError> {
    let client = Arc::new(ReqwestClient::with_timeout(config.server.timeout).map_err(CliError::Http)?);
    let surface = Arc::new(InMemorySurface::new());
    let session = MapSession::new(
        Arc::clone(&client),
        Arc::clone(&surface),
        SessionOptions::from_config(config),
    );

    let start = session.start().await;
    match &start.boundary {
        Ok(outcome) => println!("Boundary loaded: {:?}", outcome),
        Err(e) => println!("Boundary failed ({}), showing world view", e),
    }

    if args.screen != Screen::HomeScreen {
        print_outcome(&session.set_screen(args.screen).await);
    }
    if args.step > 0 {
        print_outcome(&session.set_step(args.step).await?);
    }

    if let Some(endpoint) = &config.server.location_endpoint {
        let fixed = FixedLocation(args.fallback.map(|(lat, lon)| LonLat::new(lon, lat)));
        let source = FallbackLocation::new(LocalEndpointSource::new(Arc::clone(&client), endpoint), fixed);
        match session.locate(&source).await {
            Ok(_) => info!("Flew to current location"),
            Err(e) => println!("Location unavailable: {}", e),
        }
    } else if let Some((lat, lon)) = args.fallback {
        session.update_location(LonLat::new(lon, lat)).await;
    }

    if let Some((lon, lat)) = args.click {
        match session.click(LonLat::new(lon, lat)).await {
            Some(selection) => {
                println!("Selected {} ({:?})", selection.slot, selection.panel);
                for (key, value) in &selection.properties {
                    println!("  {} = {}", key, value);
                }
            }
            None => println!("Nothing clickable at {}, {}", lon, lat),
        }
    }

    println!();
    println!("Attached layers ({}):", session.navigation_state());
    for layer in surface.layers() {
        println!(
            "  {:>4}  {:<22} {:?} features={}",
            layer.z_rank(),
            layer.key().to_string(),
            layer.load_state(),
            layer.feature_count()
        );
    }

    session.shutdown();
    Ok(())
}

fn print_outcome(outcome: &TransitionOutcome) {
    match outcome {
        TransitionOutcome::Completed(report) => {
            println!(
                "Transition {} to {}: {} created, {} failed",
                report.id,
                report.state,
                report.created.len(),
                report.failed.len()
            );
            for (key, error) in &report.failed {
                println!("  {} failed: {}", key, error);
            }
        }
        TransitionOutcome::Superseded { id } => println!("Transition {} superseded", id),
    }
}
