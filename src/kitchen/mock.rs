//! A scriptable in-memory kitchen for tests.
//!
//! [`MockKitchen`] records every request it receives and answers from a queue
//! of scripted results. With an empty queue it acks everything, minting
//! sequential order ids, so happy-path tests need no scripting at all.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{KitchenService, SubmissionError, SubmissionReceipt, SubmissionRequest};

/// Which of the two service calls a recorded request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    FullOrder,
    AdditionalItems,
}

/// Test double for the kitchen backend.
pub struct MockKitchen {
    scripted: Mutex<VecDeque<Result<SubmissionReceipt, SubmissionError>>>,
    requests: Mutex<Vec<(SubmissionKind, SubmissionRequest)>>,
    next_order: Mutex<u64>,
}

impl MockKitchen {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            next_order: Mutex::new(1),
        }
    }

    /// Scripts the next response to be the given error.
    pub fn enqueue_err(&self, error: SubmissionError) {
        self.scripted.lock().unwrap().push_back(Err(error));
    }

    /// Scripts the next response to be a receipt with the given order id.
    /// `line_count` is filled in from the actual request.
    pub fn enqueue_ok(&self, order_id: impl Into<String>) {
        self.scripted.lock().unwrap().push_back(Ok(SubmissionReceipt {
            order_id: order_id.into(),
            line_count: 0,
        }));
    }

    /// Everything this kitchen has been asked to do, in order.
    pub fn requests(&self) -> Vec<(SubmissionKind, SubmissionRequest)> {
        self.requests.lock().unwrap().clone()
    }

    /// Panics if scripted responses were left unconsumed.
    pub fn verify(&self) {
        let remaining = self.scripted.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all scripted kitchen responses were consumed. {} remaining", remaining);
        }
    }

    fn answer(
        &self,
        kind: SubmissionKind,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let line_count = request.lines.len();
        self.requests.lock().unwrap().push((kind, request));

        match self.scripted.lock().unwrap().pop_front() {
            Some(Ok(mut receipt)) => {
                receipt.line_count = line_count;
                Ok(receipt)
            }
            Some(Err(e)) => Err(e),
            None => {
                let mut next = self.next_order.lock().unwrap();
                let order_id = format!("WO-{:04}", *next);
                *next += 1;
                Ok(SubmissionReceipt { order_id, line_count })
            }
        }
    }
}

impl Default for MockKitchen {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KitchenService for MockKitchen {
    async fn send_full_order(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.answer(SubmissionKind::FullOrder, request)
    }

    async fn send_additional_items(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.answer(SubmissionKind::AdditionalItems, request)
    }
}
