//! CLI command implementations.
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`layers`] - Working-set inspection
//! - [`run`] - Headless session

pub mod config;
pub mod layers;
pub mod run;
