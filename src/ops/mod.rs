//! High-level operations behind the command-line interface.
//!
//! This module provides user-facing operations that orchestrate the import
//! pipeline and the local store: rendering the review report, running a
//! locked import, and viewing what has been published.

pub mod import;
pub mod library;
pub mod lock;
pub mod preview;

// Re-export commonly used functions
pub use import::run_import;
pub use library::{history, list, show};
pub use lock::ImportLock;
pub use preview::{preview_json, render_preview, PreviewSummary};
