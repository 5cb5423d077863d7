//! Configuration for resmap sessions.
//!
//! Settings live in `~/.resmap/config.ini`, one `[section]` per concern:
//!
//! - `[server]`: feature, submission, form and location endpoints
//! - `[plan]`: the plan context that scopes every layer name
//! - `[loading]`: the zero-tile fallback window
//! - `[viewport]`: animation timings and the world-view fallback
//! - `[logging]`: log file location
//!
//! A missing file means defaults. Invalid values are reported with their
//! section and key.
//!
//! ```ignore
//! use resmap::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let plan = config.plan.context();
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError, InitOutcome};
pub use settings::{
    ConfigFile, LoadingSettings, LoggingSettings, PlanSettings, ServerSettings, ViewportSettings,
};
