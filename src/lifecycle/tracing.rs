//! # Observability & Tracing
//!
//! Structured logging for the whole system, built on the `tracing` crate.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown, and the number of open sessions
//! - **Session Operations**: Open, Get, Amend, Submit, Close
//! - **Submissions**: each kitchen call, with table id and outcome
//! - **Errors**: failure reasons with the table id attached
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo test
//!
//! # Show full amend/submit payloads
//! RUST_LOG=debug cargo test
//!
//! # Filter to the framework only
//! RUST_LOG=waiter_draft::framework=debug cargo test
//! ```
//!
//! Clients log their full payload **once** at entry with `debug!(?selection, ...)`;
//! everything after that stays compact, showing only the span hierarchy
//! (e.g. `add_line{table_id="T1"}`).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use session_type instead
        .compact() // Compact format shows spans inline (e.g. "add_line{table_id=\"T1\"}")
        .init();
}
