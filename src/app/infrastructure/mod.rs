//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Key-value storage backends
//! - FLTK buffer utilities
//! - Error types

#[cfg(feature = "gui")]
pub mod buffer;
pub mod error;
pub mod storage;
