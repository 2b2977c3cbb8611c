//! core
//!
//! Values, the descriptor protocol, and the process-wide state the engine
//! relies on.
//!
//! # Modules
//!
//! - [`value`] - Dynamic values and shared callables
//! - [`descriptor`] - The `TypeDescriptor` protocol and the `Type` handle
//! - [`errors`] - Type mismatch and invariant violation errors
//! - [`sampling`] - Shared random generator and sampling helpers
//! - [`window`] - The static-time verification window
//! - [`config`] - Settings schema and loading
//!
//! # Design Principles
//!
//! - Descriptors are immutable and freely shared
//! - The only mutable shared state is the write-once static-time flag
//! - The core assembles diagnostics but never formats them

pub mod config;
pub mod descriptor;
pub mod errors;
pub mod sampling;
pub mod value;
pub mod window;
