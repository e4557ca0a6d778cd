use tracing::{info, error};

use crate::clients::DraftClient;
use crate::kitchen::KitchenClient;

/// The runtime orchestrator for the order drafting system.
///
/// `DraftSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the session actor
/// - **Dependency Wiring**: Injecting the kitchen backend into the actor
///
/// # Architecture
///
/// A single session actor owns every open table draft; the kitchen backend
/// is passed in by the caller as a [`KitchenClient`] trait object, so the
/// same wiring works for production transports and test doubles alike.
///
/// # Example
///
/// ```ignore
/// let system = DraftSystem::new(kitchen);
///
/// system.draft_client.open_table("T1", SentLinePolicy::default()).await?;
/// system.draft_client.add_line("T1", selection).await?;
/// system.draft_client.send_full_order("T1").await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct DraftSystem {
    /// Client for interacting with the draft session actor
    pub draft_client: DraftClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DraftSystem {
    /// Creates a new `DraftSystem` with the session actor running.
    ///
    /// The given kitchen client is injected as the actor's context; every
    /// submission goes through it.
    pub fn new(kitchen: KitchenClient) -> Self {
        let (draft_actor, draft_client) = crate::draft_actor::new();

        let draft_handle = tokio::spawn(draft_actor.run(kitchen));

        Self {
            draft_client,
            handles: vec![draft_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes its channel; the actor detects the closed
    /// channel and exits its event loop. Any open drafts are discarded, they
    /// were never persistent to begin with.
    ///
    /// Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.draft_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
