//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Draft text with its caret
//! - Style registry and element tags
//! - View modes and toolbar snippets
//! - Application settings
//! - Message types for the event system

pub mod draft;
pub mod messages;
pub mod sample;
pub mod settings;
pub mod snippet;
pub mod style_registry;
pub mod view_mode;

pub use draft::{Draft, Selection};
pub use messages::{CaretSync, Message};
pub use settings::{AppSettings, Behavior, SyntaxTheme};
pub use snippet::Snippet;
pub use style_registry::{ElementTag, StyleRegistry, UnknownTagError};
pub use view_mode::{ViewMode, ViewModeController};
