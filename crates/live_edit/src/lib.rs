//! Live Edit - Element identity, edit log, and override replay
//!
//! Whenever a page is rendered, this crate assigns a stable identity to
//! every eligible element of the rendered surface and replays the property
//! overrides recorded for that page, so free-form visual edits survive
//! re-renders. User-committed property changes are captured into a
//! per-page, last-write-wins edit log the moment they happen.
//!
//! The edit log is deliberately independent of the template document's
//! undo/redo history: the document history is an operation-based snapshot
//! stack, while the edit log is a current-value store. Reloading published
//! content does not touch the edit log, and clearing a page's log is the
//! only way to fully undo its visual overrides. The two override systems
//! layer on the same page; this boundary is part of the public contract.
//!
//! The crate knows the owning page only by its string id; it has no
//! dependency on the template document model.

mod edit_log;
mod element;
mod engine;
mod error;
mod identity;

pub use edit_log::*;
pub use element::*;
pub use engine::*;
pub use error::*;
pub use identity::*;
