//! `resmap layers`: print the layers a screen shows.

use resmap::config::ConfigFile;
use resmap::layer::SlotKey;
use resmap::navigation::{NavigationState, Screen};
use resmap::source::LayerCatalog;
use resmap::transition::{working_set, RETAINED};

use crate::error::CliError;

pub fn run(screen: Screen, step: u8) -> Result<(), CliError> {
    let state = NavigationState::new(screen, step)?;
    let config = ConfigFile::load()?;
    let catalog = LayerCatalog::new(&config.server.geoserver_url);
    let plan = config.plan.context();
    let describe = config.plan.is_complete();

    println!("{} (step {} of {})", screen, step, screen.max_step());
    println!();
    println!("{:<5} {:<22} {:<24} SOURCE", "Z", "SLOT", "KIND");

    let mut rows: Vec<(SlotKey, i32)> = RETAINED.iter().chain(working_set(state)).copied().collect();
    rows.sort_by_key(|(_, z)| *z);
    for (key, z) in rows {
        let source = if describe {
            catalog.source_for(key, &plan).describe()
        } else {
            "-".to_string()
        };
        let marker = if key.is_retained() { "*" } else { " " };
        println!(
            "{:<5} {:<22} {:<24} {}",
            z,
            format!("{}{}", key, marker),
            format!("{:?}", key.kind()),
            source
        );
    }

    println!();
    println!("* retained across screens");
    if !describe {
        println!("Set [plan] district and block to see remote layer names.");
    }
    Ok(())
}
