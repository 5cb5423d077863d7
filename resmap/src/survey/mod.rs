//! Survey forms.
//!
//! Field workers record assets through web forms opened outside the map.
//! This module builds the deep link that opens a form pre-filled with the
//! clicked position and plan, and posts the submission notification whose
//! success triggers a refetch of the affected layer.

mod link;
mod submit;

pub use link::{form_path, FormKind, FormLink};
pub use submit::{SubmissionClient, SubmissionError, SubmissionPayload, SubmissionResponse};
