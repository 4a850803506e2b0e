//! Controllers layer - orchestration and coordination.
//!
//! The editor controller ties the draft, the style registry, the view mode
//! and persistence together. It is the only entry point the UI talks to.

pub mod editor;
