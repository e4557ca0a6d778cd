#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Waiter Draft
//!
//! > **Order-draft reconciliation for table service, as a session actor.**
//!
//! This crate manages the client-held set of order lines for a restaurant
//! table between kitchen submissions: which lines exist, which have already
//! been acknowledged by the kitchen, and whether "send full order" or "send
//! additional items" is currently allowed.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### A Pure Core, an Actor Shell
//!
//! The reconciliation logic itself ([`model::OrderDraft`]) is a plain
//! synchronous struct: add a line, merge duplicates by identity key, compare
//! against the acknowledged snapshot. It holds no globals, spawns nothing,
//! and logs nothing — every failure is a programming error returned
//! immediately.
//!
//! Around it, a generic session actor gives each table exclusive, sequential
//! access to its draft:
//! - **One actor, many sessions**: open drafts live in a single task's map,
//!   keyed by table id. No locks, because nothing else can touch them.
//! - **One submission in flight**: the actor awaits each kitchen call before
//!   taking the next message, so a send can never race an amendment.
//!
//! ### The Identity Key
//!
//! Two selections are the same orderable line iff their item code *and*
//! variant attribute contents match. Attribute maps compare by content, not
//! by the order the user picked options in — see [`model::LineKey`].
//!
//! ### Acknowledgment by Snapshot
//!
//! After every successful send, the draft copies its lines wholesale into an
//! acknowledged snapshot. "What still needs to go to the kitchen" is a set
//! difference against that snapshot, and a failed send leaves both sides
//! untouched so the caller can simply retry.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`model`])
//! Pure data: [`model::OrderLine`], [`model::OrderDraft`], and the typed
//! menu records that replace loosely-shaped backend payloads.
//!
//! ### 2. The Engine ([`framework`])
//! The generic [`SessionActor`](framework::SessionActor) and
//! [`SessionEntity`](framework::SessionEntity) trait: open/amend/submit/close
//! over a channel, with the external collaborator injected at `run()`.
//!
//! ### 3. The Implementation ([`draft_actor`])
//! [`DraftSession`](draft_actor::DraftSession) — the per-table session,
//! including the caller-chosen [`SentLinePolicy`](draft_actor::SentLinePolicy)
//! for amending lines the kitchen already has.
//!
//! ### 4. The Boundary ([`kitchen`])
//! The [`KitchenService`](kitchen::KitchenService) trait the real backend
//! hides behind, plus a scriptable mock for tests.
//!
//! ### 5. The Interface ([`clients`]) and Wiring ([`lifecycle`])
//! [`DraftClient`](clients::DraftClient) exposes one method per user action;
//! [`DraftSystem`](lifecycle::DraftSystem) spawns and shuts everything down.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use waiter_draft::draft_actor::{LineSelection, SentLinePolicy};
//! use waiter_draft::kitchen::mock::MockKitchen;
//! use waiter_draft::lifecycle::DraftSystem;
//!
//! let system = DraftSystem::new(Arc::new(MockKitchen::new()));
//! let client = &system.draft_client;
//!
//! client.open_table("T1", SentLinePolicy::default()).await?;
//! client.add_line("T1", LineSelection::new("COFFEE", "Coffee", 2.5, Default::default())).await?;
//! let receipt = client.send_full_order("T1").await?;
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=info cargo test
//! ```

pub mod clients;
pub mod draft_actor;
pub mod framework;
pub mod kitchen;
pub mod lifecycle;
pub mod model;
