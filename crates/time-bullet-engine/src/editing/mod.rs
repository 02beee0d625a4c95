//! # Editing
//!
//! The narrow editor surface the rewriter works against.
//!
//! - **`access`**: the [`DocumentAccess`] trait (get/set line, get/set cursor)
//!   that any host editor implements
//! - **`edit`**: [`LineEdit`], a computed single-line replacement plus caret
//!   position, applied atomically through `DocumentAccess`
//! - **`document`**: [`Document`], an xi-rope backed implementation used by the
//!   terminal host and by tests
//!
//! The rewriter never sees a concrete editor: it reads lines and the cursor,
//! returns a `LineEdit`, and the edit writes itself back.

pub mod access;
pub mod document;
pub mod edit;

pub use access::{Cursor, DocumentAccess};
pub use document::{Document, Marker};
pub use edit::LineEdit;
