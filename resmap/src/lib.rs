//! resmap - map layer orchestration for natural-resource planning
//!
//! Field workers browse a layered map of one administrative block, scoped
//! to a plan. For every `(screen, step)` of the planning workflow this
//! library decides which layers are visible, creates and caches their
//! remote sources lazily, tracks load completion and resolves clicks
//! against the visible layers.
//!
//! # High-Level API
//!
//! [`session::MapSession`] is the facade most callers need:
//!
//! ```ignore
//! use resmap::config::ConfigFile;
//! use resmap::navigation::Screen;
//! use resmap::session::{MapSession, SessionOptions};
//! use resmap::source::ReqwestClient;
//! use resmap::surface::InMemorySurface;
//!
//! let config = ConfigFile::load()?;
//! let client = Arc::new(ReqwestClient::with_timeout(config.server.timeout)?);
//! let surface = Arc::new(InMemorySurface::new());
//! let session = MapSession::new(client, surface, SessionOptions::from_config(&config));
//!
//! session.start().await;
//! session.set_screen(Screen::Groundwater).await;
//! ```
//!
//! The rendering engine is abstracted behind [`surface::RenderSurface`] and
//! [`surface::ViewController`]; remote services behind
//! [`source::AsyncHttpClient`].

pub mod cache;
pub mod config;
pub mod coord;
pub mod hit_test;
pub mod layer;
pub mod load;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod source;
pub mod style;
pub mod surface;
pub mod survey;
pub mod transition;
pub mod viewport;

/// Version of the resmap library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
