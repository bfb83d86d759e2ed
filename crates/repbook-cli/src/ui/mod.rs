//! UI primitives for the Repbook CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String and number utilities (truncate, kg, bars)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{header, hint, simple_table, Column};
//!
//! let ui = ctx.ui_context(args.output.json);
//! if ui.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ui, "history", Some("fbw")));
//! println!("{}", simple_table(&ui, &columns, &rows));
//! println!("{}", hint(&ui, "repbook history delete fbw <position>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, receipt, simple_table,
    table, Column,
};

pub use format::{format_kg, truncate};
