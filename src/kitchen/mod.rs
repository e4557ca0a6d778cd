//! The external order-submission boundary.
//!
//! The kitchen backend is an external collaborator: this crate defines only
//! the in-process seam to it. Given a table identifier and a list of order
//! lines, a [`KitchenService`] returns success or failure. Wire format,
//! authentication and endpoint naming all live behind the trait, outside this
//! crate.

pub mod mock;

use serde::{Serialize, Deserialize};
use std::sync::Arc;
use thiserror::Error;

use async_trait::async_trait;

use crate::model::OrderLine;

/// The payload of one kitchen submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub table_id: String,
    pub lines: Vec<OrderLine>,
}

/// What the backend returns for an accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Backend identifier of the waiter order the lines landed on.
    pub order_id: String,
    /// How many lines this submission carried.
    pub line_count: usize,
}

/// Errors from the submission boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    /// The backend refused the order (e.g. table no longer available).
    #[error("Kitchen rejected the order: {0}")]
    Rejected(String),

    /// The call never reached a decision (timeout, connection loss).
    #[error("Kitchen transport error: {0}")]
    Transport(String),
}

/// The order-submission service.
///
/// Two calls, mirroring the two UI actions: a full order creates or replaces
/// the table's kitchen order; additional items append to an existing one.
/// Implementations own all transport policy (timeouts, retries on the wire).
#[async_trait]
pub trait KitchenService: Send + Sync {
    async fn send_full_order(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError>;

    async fn send_additional_items(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Shared handle to whatever kitchen backend is wired in.
pub type KitchenClient = Arc<dyn KitchenService>;
