//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Markdown rendering with per-element classes
//! - Draft persistence
//! - Export of Markdown or HTML
//! - HTML syntax highlighting for the code view
//! - Link markup for the insert-link dialog

pub mod export;
pub mod highlight;
pub mod persistence;
pub mod render;
pub mod snippets;
