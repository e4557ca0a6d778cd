use tracing::{debug, info, instrument};

use async_trait::async_trait;

use crate::clients::actor_client::SessionHandle;
use crate::draft_actor::{
    DraftAmend, DraftSession, DraftSessionError, DraftStatus, DraftSubmit, LineSelection,
    SentLinePolicy, SessionOpen,
};
use crate::framework::{FrameworkError, SessionClient};
use crate::kitchen::SubmissionReceipt;
use crate::model::OrderDraft;

/// Client for interacting with the draft session actor.
///
/// This is the surface the UI event handlers call: one method per user
/// action, each addressed by table id. Submission gating and the sent-line
/// policy are enforced inside the session entity; this client only maps
/// errors and adds tracing.
#[derive(Clone)]
pub struct DraftClient {
    inner: SessionClient<DraftSession>,
}

impl DraftClient {
    pub fn new(inner: SessionClient<DraftSession>) -> Self {
        Self { inner }
    }

    /// Opens a fresh, empty draft for a table. Fails if the table already
    /// has an open session.
    #[instrument(skip(self))]
    pub async fn open_table(
        &self,
        table_id: &str,
        policy: SentLinePolicy,
    ) -> Result<(), DraftSessionError> {
        info!("Opening table session");
        self.inner
            .open(table_id.to_string(), SessionOpen { policy })
            .await
            .map_err(Self::map_error)
    }

    /// The current draft for a table, if a session is open.
    #[instrument(skip(self))]
    pub async fn draft(&self, table_id: &str) -> Result<Option<OrderDraft>, DraftSessionError> {
        let session = self.get(table_id.to_string()).await?;
        Ok(session.map(|s| s.draft))
    }

    /// Adds a menu selection to the table's draft.
    #[instrument(skip(self, selection))]
    pub async fn add_line(
        &self,
        table_id: &str,
        selection: LineSelection,
    ) -> Result<DraftStatus, DraftSessionError> {
        debug!(?selection, "add_line called");
        self.amend(table_id, DraftAmend::AddLine(selection)).await
    }

    #[instrument(skip(self))]
    pub async fn increment_line(
        &self,
        table_id: &str,
        index: usize,
    ) -> Result<DraftStatus, DraftSessionError> {
        self.amend(table_id, DraftAmend::IncrementLine(index)).await
    }

    #[instrument(skip(self))]
    pub async fn decrement_line(
        &self,
        table_id: &str,
        index: usize,
    ) -> Result<DraftStatus, DraftSessionError> {
        self.amend(table_id, DraftAmend::DecrementLine(index)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_line(
        &self,
        table_id: &str,
        index: usize,
    ) -> Result<DraftStatus, DraftSessionError> {
        self.amend(table_id, DraftAmend::RemoveLine(index)).await
    }

    /// Discards the draft and its acknowledgments, keeping the session open.
    #[instrument(skip(self))]
    pub async fn start_new_order(&self, table_id: &str) -> Result<DraftStatus, DraftSessionError> {
        self.amend(table_id, DraftAmend::StartNewOrder).await
    }

    /// Sends the whole draft to the kitchen.
    #[instrument(skip(self))]
    pub async fn send_full_order(
        &self,
        table_id: &str,
    ) -> Result<SubmissionReceipt, DraftSessionError> {
        info!("Sending full order to kitchen");
        self.inner
            .submit(table_id.to_string(), DraftSubmit::FullOrder)
            .await
            .map_err(Self::map_error)
    }

    /// Sends only the not-yet-acknowledged lines to the kitchen.
    #[instrument(skip(self))]
    pub async fn send_additional_items(
        &self,
        table_id: &str,
    ) -> Result<SubmissionReceipt, DraftSessionError> {
        info!("Sending additional items to kitchen");
        self.inner
            .submit(table_id.to_string(), DraftSubmit::AdditionalItems)
            .await
            .map_err(Self::map_error)
    }

    /// Ends the table's session, dropping the draft entirely.
    #[instrument(skip(self))]
    pub async fn close_table(&self, table_id: &str) -> Result<(), DraftSessionError> {
        info!("Closing table session");
        self.close(table_id.to_string()).await
    }

    async fn amend(
        &self,
        table_id: &str,
        amend: DraftAmend,
    ) -> Result<DraftStatus, DraftSessionError> {
        self.inner
            .amend(table_id.to_string(), amend)
            .await
            .map_err(Self::map_error)
    }

    fn map_error(e: FrameworkError) -> DraftSessionError {
        match e {
            FrameworkError::NotFound(id) => DraftSessionError::NotFound(id),
            FrameworkError::AlreadyOpen(id) => DraftSessionError::AlreadyOpen(id),
            FrameworkError::Custom(msg) => DraftSessionError::Rejected(msg),
            other => DraftSessionError::ActorCommunication(other.to_string()),
        }
    }
}

#[async_trait]
impl SessionHandle<DraftSession> for DraftClient {
    type Error = DraftSessionError;

    fn inner(&self) -> &SessionClient<DraftSession> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        DraftClient::map_error(e)
    }
}
