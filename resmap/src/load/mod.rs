//! Load completion tracking.
//!
//! Every layer instance gets exactly one [`LoadCompletion`]: a one-shot
//! future that settles when the layer's initial data has arrived, when it
//! turned out there was nothing to load, or when loading failed.
//!
//! The producer half is a [`LoadSignal`]. Feature adapters settle it from
//! their fetch task; raster layers hand it to a [`TileLoadTracker`] which
//! settles it from the rendering engine's tile events.

mod completion;
mod tiles;

pub use completion::{
    load_channel, LoadCompletion, LoadError, LoadOutcome, LoadResult, LoadSignal, LoadState,
    LoadStateCell,
};
pub use tiles::{TileLoadTracker, TileStats, DEFAULT_FALLBACK_WINDOW};
