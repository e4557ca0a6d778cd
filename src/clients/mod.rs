//! Type-safe wrappers around [`SessionClient`](crate::framework::SessionClient).

pub mod actor_client;
pub mod draft_client;

pub use actor_client::*;
pub use draft_client::*;
