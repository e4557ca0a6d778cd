//! System wiring and observability.

pub mod draft_system;
pub mod tracing;

pub use draft_system::DraftSystem;
pub use tracing::setup_tracing;
