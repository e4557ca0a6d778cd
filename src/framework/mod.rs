//! Generic actor framework for table-scoped sessions.
//!
//! This module provides the core building blocks for type-safe session
//! actors: each session is opened under a caller-supplied key, amended with
//! synchronous local operations, and submitted to an external collaborator
//! through an injected context.
//!
//! # Main Components
//!
//! - [`SessionEntity`] - Trait that session state types implement
//! - [`SessionActor`] - Generic actor that owns the open sessions
//! - [`SessionClient`] - Type-safe handle for talking to the actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full
//! actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
