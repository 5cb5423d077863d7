use thiserror::Error;

use crate::location::LocationError;
use crate::navigation::NavigationError;
use crate::source::SourceError;
use crate::survey::SubmissionError;

/// Errors surfaced by [`MapSession`](super::MapSession).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("cannot build form link: {0}")]
    FormLink(#[from] SourceError),

    #[error("no map position selected yet")]
    NoClick,
}
