//! Draft-session resource logic and entity implementation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{DraftSession, SentLinePolicy, SessionOpen};
pub use error::*;

use crate::clients::DraftClient;
use crate::framework::SessionActor;

/// Creates a new draft-session actor and its client.
///
/// Sessions are keyed by table id, supplied by the caller on open; no id
/// generation happens here.
pub fn new() -> (SessionActor<DraftSession>, DraftClient) {
    let (actor, generic_client) = SessionActor::new(32);
    let client = DraftClient::new(generic_client);

    (actor, client)
}
