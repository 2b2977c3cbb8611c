//! ui
//!
//! Diagnostic presentation.
//!
//! # Modules
//!
//! - [`report`] - Structured diagnostic lines and the `Render` seam
//! - [`dump`] - Line dumps of values and descriptors
//!
//! # Design
//!
//! The checking core only assembles line sequences. Turning them into
//! terminal text is delegated to a [`report::Render`] implementation.

pub mod dump;
pub mod report;
