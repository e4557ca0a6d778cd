//! Pure data structures for order drafting: lines, the draft itself, and the
//! typed menu records arriving from the backend.

pub mod line;
pub mod draft;
pub mod menu;

pub use line::*;
pub use draft::*;
pub use menu::*;
