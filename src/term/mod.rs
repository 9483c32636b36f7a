//! Terminal presentation layer
//!
//! The view is pure (no I/O): it maps a [`SessionSnapshot`] to renderable
//! cells and status lines. The binary owns the actual terminal.
//!
//! [`SessionSnapshot`]: crate::core::SessionSnapshot

pub mod view;

pub use view::{board_rows, status_lines, CellView};
