//! # Core Session Framework
//!
//! This module defines the generic building blocks for the session actor.
//!
//! ## Key Types
//!
//! - [`SessionEntity`]: The trait that any session state type must implement.
//! - [`SessionActor`]: The generic actor that owns the open sessions.
//! - [`SessionClient`]: The generic client for communicating with the actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use async_trait::async_trait;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any session state type must implement to be managed by
/// [`SessionActor`].
///
/// # Architecture Note
/// By defining one contract for session state, the message loop is written
/// *once* and works for any session type. Associated types enforce payload
/// safety: a session's `Amend` messages can't be sent to a different kind of
/// session by accident.
///
/// # Sync vs. Async
/// Amendments ([`SessionEntity::apply_amend`]) are synchronous: they are local
/// bookkeeping that runs to completion without suspension. Submissions
/// ([`SessionEntity::handle_submit`]) are async because they reach an external
/// collaborator through the injected `Context`. Keeping the split explicit in
/// the trait means a session can never block its actor on I/O by mistake from
/// an amend path.
///
/// # Context Injection
/// Dependencies (e.g. the kitchen client) are injected into `run()`, not into
/// the constructor. This "late binding" keeps session construction pure and
/// lets tests swap the collaborator for a mock.
#[async_trait]
pub trait SessionEntity: Clone + Send + Sync + 'static {
    /// The key a session is opened under. Caller-supplied (e.g. a table id);
    /// the framework does not generate ids.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to open a new session.
    type OpenParams: Send + Sync + Debug;

    /// A synchronous, local mutation of the session state.
    type Amend: Send + Sync + Debug;

    /// The result returned after an amendment (typically a render snapshot).
    type AmendResult: Send + Sync + Debug;

    /// An operation that reaches the external collaborator.
    type Submit: Send + Sync + Debug;

    /// The result type returned by submissions.
    type SubmitResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Construct the session state for a newly opened session.
    fn open(id: Self::Id, params: Self::OpenParams) -> Result<Self, String>;

    /// Apply a local amendment. Runs to completion, no suspension.
    fn apply_amend(&mut self, amend: Self::Amend) -> Result<Self::AmendResult, String>;

    /// Handle a submission to the external collaborator. On error the
    /// session state must be left exactly as it was, so the caller can retry.
    async fn handle_submit(
        &mut self,
        submit: Self::Submit,
        ctx: &Self::Context,
    ) -> Result<Self::SubmitResult, String>;

    /// Called immediately before the session is dropped from the actor.
    async fn on_close(&self, _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the session framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Session already open: {0}")]
    AlreadyOpen(String),
    #[error("Custom error: {0}")]
    Custom(String),
}

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants cover a session's lifecycle: `Open` starts one under a
/// caller-supplied key, `Amend` mutates it locally, `Submit` pushes state out
/// to the external collaborator, `Close` ends it. `Get` reads a snapshot.
#[derive(Debug)]
pub enum SessionRequest<T: SessionEntity> {
    Open {
        id: T::Id,
        params: T::OpenParams,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Amend {
        id: T::Id,
        amend: T::Amend,
        respond_to: Response<T::AmendResult>,
    },
    Submit {
        id: T::Id,
        submit: T::Submit,
        respond_to: Response<T::SubmitResult>,
    },
    Close {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns all open sessions of one type.
///
/// # Concurrency Model
/// The actor processes its messages *sequentially* in a loop, so the session
/// store needs no `Mutex` or `RwLock`: exclusive ownership of state within
/// the task is the whole synchronization story. A `Submit` is awaited to
/// completion before the next message is taken, which also gives callers the
/// "at most one send in flight per actor" guarantee for free.
pub struct SessionActor<T: SessionEntity> {
    receiver: mpsc::Receiver<SessionRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: SessionEntity> SessionActor<T> {
    pub fn new(buffer_size: usize) -> (Self, SessionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = SessionClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel
    /// closes.
    ///
    /// The `context` argument is injected into every submit/close hook, so
    /// external dependencies can be wired up *after* the actor was created
    /// but *before* the loop starts.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "DraftSession" instead of the full path)
        let session_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(session_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::Open { id, params, respond_to } => {
                    debug!(session_type, %id, ?params, "Open");
                    if self.store.contains_key(&id) {
                        warn!(session_type, %id, "Already open");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyOpen(id.to_string())));
                        continue;
                    }
                    match T::open(id.clone(), params) {
                        Ok(session) => {
                            self.store.insert(id.clone(), session);
                            info!(session_type, %id, open = self.store.len(), "Opened");
                            let _ = respond_to.send(Ok(()));
                        }
                        Err(e) => {
                            warn!(session_type, %id, error = %e, "Open failed");
                            let _ = respond_to.send(Err(FrameworkError::Custom(e)));
                        }
                    }
                }
                SessionRequest::Get { id, respond_to } => {
                    let session = self.store.get(&id).cloned();
                    let found = session.is_some();
                    debug!(session_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(session));
                }
                SessionRequest::Amend { id, amend, respond_to } => {
                    debug!(session_type, %id, ?amend, "Amend");
                    if let Some(session) = self.store.get_mut(&id) {
                        match session.apply_amend(amend) {
                            Ok(result) => {
                                debug!(session_type, %id, "Amend ok");
                                let _ = respond_to.send(Ok(result));
                            }
                            Err(e) => {
                                warn!(session_type, %id, error = %e, "Amend failed");
                                let _ = respond_to.send(Err(FrameworkError::Custom(e)));
                            }
                        }
                    } else {
                        warn!(session_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                SessionRequest::Submit { id, submit, respond_to } => {
                    debug!(session_type, %id, ?submit, "Submit");
                    if let Some(session) = self.store.get_mut(&id) {
                        // Await the async hook
                        let result = session
                            .handle_submit(submit, &context)
                            .await
                            .map_err(FrameworkError::Custom);
                        match &result {
                            Ok(_) => info!(session_type, %id, "Submit ok"),
                            Err(e) => warn!(session_type, %id, error = %e, "Submit failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(session_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                SessionRequest::Close { id, respond_to } => {
                    debug!(session_type, %id, "Close");
                    if let Some(session) = self.store.get(&id) {
                        // Await the async hook
                        if let Err(e) = session.on_close(&context).await {
                            warn!(session_type, %id, error = %e, "on_close failed");
                            let _ = respond_to.send(Err(FrameworkError::Custom(e)));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(session_type, %id, open = self.store.len(), "Closed");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(session_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(session_type, open = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `SessionActor`.
#[derive(Clone)]
pub struct SessionClient<T: SessionEntity> {
    sender: mpsc::Sender<SessionRequest<T>>,
}

impl<T: SessionEntity> SessionClient<T> {
    pub fn new(sender: mpsc::Sender<SessionRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn open(&self, id: T::Id, params: T::OpenParams) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(SessionRequest::Open { id, params, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(SessionRequest::Get { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn amend(&self, id: T::Id, amend: T::Amend) -> Result<T::AmendResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(SessionRequest::Amend { id, amend, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn submit(&self, id: T::Id, submit: T::Submit) -> Result<T::SubmitResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(SessionRequest::Submit { id, submit, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn close(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(SessionRequest::Close { id, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
