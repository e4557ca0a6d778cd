use crate::framework::{SessionEntity, FrameworkError, SessionClient};
use async_trait::async_trait;

/// Trait for session-specific clients to inherit standard operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations every session client needs, like `get` and `close`.
#[async_trait]
pub trait SessionHandle<T: SessionEntity>: Send + Sync {
    /// The session-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic SessionClient.
    fn inner(&self) -> &SessionClient<T>;

    /// Map framework errors to the specific session error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a session snapshot by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Close a session by id.
    #[tracing::instrument(skip(self))]
    async fn close(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().close(id).await.map_err(Self::map_error)
    }
}
