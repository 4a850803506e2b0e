//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Draft, StyleRegistry, ViewMode, Snippet, Settings, Messages)
//! - `services/` - Business operations (render, persistence, export, highlight, link markup)
//! - `controllers/` - Orchestration (EditorController)
//! - `infrastructure/` - External integrations (storage backends, FLTK buffer, error)
//! - `state.rs` - Main application coordinator (GUI only)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
#[cfg(feature = "gui")]
pub mod state;

// Re-exports for convenient external access
pub use controllers::editor::EditorController;
pub use domain::{
    AppSettings, Behavior, CaretSync, Draft, ElementTag, Message, Selection, Snippet,
    StyleRegistry, SyntaxTheme, UnknownTagError, ViewMode, ViewModeController,
};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use services::export::{ExportFile, export_current};
pub use services::persistence::DraftPersistence;
pub use services::render::{RenderOptions, Rendered, render};
pub use services::snippets::link_snippet;
