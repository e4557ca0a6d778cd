//! The per-table draft session and its [`SessionEntity`] implementation.

use async_trait::async_trait;

use crate::framework::SessionEntity;
use crate::kitchen::{KitchenClient, SubmissionReceipt, SubmissionRequest};
use crate::model::OrderDraft;

use super::actions::{DraftAmend, DraftStatus, DraftSubmit};
use super::error::DraftSessionError;

/// What a session does when asked to decrement or remove a line that is
/// already in the kitchen.
///
/// Different deployments want different behavior here, so it is chosen per
/// session at open time rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentLinePolicy {
    /// Amend freely; the kitchen copy is the waiter's problem.
    #[default]
    Allow,
    /// Silently keep the line as it is. The amendment reports success but
    /// changes nothing.
    Keep,
    /// Refuse with [`DraftSessionError::LineAlreadySent`].
    Reject,
}

impl SentLinePolicy {
    fn permits_amending_sent(self) -> bool {
        matches!(self, SentLinePolicy::Allow)
    }
}

/// Parameters for opening a table's session.
#[derive(Debug, Clone, Default)]
pub struct SessionOpen {
    pub policy: SentLinePolicy,
}

/// One table's order draft, owned by the session actor.
///
/// The session exists exactly while its table is selected, so "table
/// selected" is always true from inside a session; the gates in
/// [`OrderDraft`] are evaluated accordingly. Closing the session (or
/// [`DraftAmend::StartNewOrder`]) is what resets the draft.
#[derive(Debug, Clone)]
pub struct DraftSession {
    pub table_id: String,
    pub draft: OrderDraft,
    pub policy: SentLinePolicy,
}

impl DraftSession {
    fn status(&self) -> DraftStatus {
        DraftStatus {
            lines: self.draft.lines().to_vec(),
            can_send_full_order: self.draft.can_send_full_order(true),
            can_send_additional: self.draft.can_send_additional(true),
            total_amount: self.draft.total_amount(),
        }
    }

    fn guard_sent_line(&self, index: usize) -> Result<(), DraftSessionError> {
        if self.policy == SentLinePolicy::Reject && self.draft.is_line_acknowledged(index)? {
            return Err(DraftSessionError::LineAlreadySent(index));
        }
        Ok(())
    }

    fn amend(&mut self, amend: DraftAmend) -> Result<DraftStatus, DraftSessionError> {
        match amend {
            DraftAmend::AddLine(selection) => {
                self.draft.add_line(
                    selection.item_code,
                    selection.item_name,
                    selection.unit_price,
                    selection.attributes,
                )?;
            }
            DraftAmend::IncrementLine(index) => {
                self.draft.increment_quantity(index)?;
            }
            DraftAmend::DecrementLine(index) => {
                self.guard_sent_line(index)?;
                let permit = self.policy.permits_amending_sent();
                self.draft.decrement_quantity_if(index, |_| permit)?;
            }
            DraftAmend::RemoveLine(index) => {
                self.guard_sent_line(index)?;
                let permit = self.policy.permits_amending_sent();
                self.draft.remove_line_if(index, |_| permit)?;
            }
            DraftAmend::StartNewOrder => {
                self.draft.reset();
            }
        }
        Ok(self.status())
    }

    async fn submit(
        &mut self,
        submit: DraftSubmit,
        kitchen: &KitchenClient,
    ) -> Result<SubmissionReceipt, DraftSessionError> {
        // mark_sent happens only after the kitchen call succeeds; on any
        // error the draft is untouched and the same submit can be retried.
        match submit {
            DraftSubmit::FullOrder => {
                if !self.draft.can_send_full_order(true) {
                    return Err(DraftSessionError::EmptyDraft);
                }
                let request = SubmissionRequest {
                    table_id: self.table_id.clone(),
                    lines: self.draft.lines().to_vec(),
                };
                let receipt = kitchen.send_full_order(request).await?;
                self.draft.mark_sent();
                Ok(receipt)
            }
            DraftSubmit::AdditionalItems => {
                if !self.draft.can_send_additional(true) {
                    return Err(DraftSessionError::NothingToSend);
                }
                let request = SubmissionRequest {
                    table_id: self.table_id.clone(),
                    lines: self.draft.unsent_lines(),
                };
                let receipt = kitchen.send_additional_items(request).await?;
                self.draft.mark_sent();
                Ok(receipt)
            }
        }
    }
}

#[async_trait]
impl SessionEntity for DraftSession {
    type Id = String;
    type OpenParams = SessionOpen;
    type Amend = DraftAmend;
    type AmendResult = DraftStatus;
    type Submit = DraftSubmit;
    type SubmitResult = SubmissionReceipt;
    type Context = KitchenClient;

    fn open(id: Self::Id, params: Self::OpenParams) -> Result<Self, String> {
        Ok(Self {
            table_id: id,
            draft: OrderDraft::new(),
            policy: params.policy,
        })
    }

    fn apply_amend(&mut self, amend: Self::Amend) -> Result<Self::AmendResult, String> {
        self.amend(amend).map_err(|e| e.to_string())
    }

    async fn handle_submit(
        &mut self,
        submit: Self::Submit,
        ctx: &Self::Context,
    ) -> Result<Self::SubmitResult, String> {
        self.submit(submit, ctx).await.map_err(|e| e.to_string())
    }
}
