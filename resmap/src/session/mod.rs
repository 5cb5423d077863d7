//! Map session facade.
//!
//! [`MapSession`] wires the engine together for one plan: navigation,
//! the transition controller, click dispatch, viewport animation, raster
//! queries and survey submissions. UI layers drive the map through it.
//!
//! ```ignore
//! let session = MapSession::new(client, surface, SessionOptions::from_config(&config));
//! session.start().await;
//! session.set_screen(Screen::Groundwater).await;
//! if let Some(selection) = session.click(at).await { ... }
//! ```

mod error;
mod map;
mod options;

pub use error::SessionError;
pub use map::{MapSession, StartReport, SubmitOutcome};
pub use options::SessionOptions;
