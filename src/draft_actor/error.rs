//! Error types for the draft session actor.

use thiserror::Error;

use crate::kitchen::SubmissionError;
use crate::model::DraftError;

/// Errors that can occur during draft session operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftSessionError {
    /// No session is open for the given table.
    #[error("No open session for table: {0}")]
    NotFound(String),

    /// A session is already open for the given table.
    #[error("Session already open for table: {0}")]
    AlreadyOpen(String),

    /// A full-order send was requested with nothing in the draft.
    #[error("Cannot send an empty order")]
    EmptyDraft,

    /// An additional-items send was requested but there is no delta to send,
    /// or no prior send to append to.
    #[error("No unsent items to send to the kitchen")]
    NothingToSend,

    /// The session's policy rejects amending a line that is already in the
    /// kitchen.
    #[error("Line {0} was already sent to the kitchen")]
    LineAlreadySent(usize),

    /// A draft-level programming error (bad index, empty item code).
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The kitchen backend failed or refused the submission.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// The session actor rejected the request.
    #[error("Session rejected the request: {0}")]
    Rejected(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for DraftSessionError {
    fn from(msg: String) -> Self {
        DraftSessionError::Rejected(msg)
    }
}
