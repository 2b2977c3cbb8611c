//! Typeshape - composable runtime type descriptors and contracts
//!
//! Typeshape lets a program describe the shape of data and functions as
//! composable type descriptors, attach them to concrete values and callables,
//! and have conformance checked automatically: immediately for plain values,
//! and by bounded random sampling for functions. It also provides a
//! property-based invariant checker.
//!
//! # Architecture
//!
//! The codebase is layered:
//!
//! - [`core`] - Values, the descriptor protocol, sampling, the static-time
//!   window, errors, and settings
//! - [`types`] - Combinators that build descriptors from descriptors
//! - [`engine`] - `check`, `attach`, and `forall`
//! - [`ui`] - Diagnostic line model and the renderer seam
//!
//! # Correctness Notes
//!
//! 1. Descriptors are immutable and may be shared by any number of checks
//! 2. Function contracts are verified by sampling: passing is evidence, not
//!    proof, and the same holds for `forall`
//! 3. Contracts attached while the static-time window is open get the full
//!    verification budget; later attachments get a single call
//!
//! # Example
//!
//! ```
//! use typeshape::{attach, forall, types, ContractError, Function, Value};
//!
//! let add = attach(
//!     &types::function([types::number(), types::number()], types::number()),
//!     Function::pure(2, |args| {
//!         Value::from(args[0].as_f64().unwrap_or(0.0) + args[1].as_f64().unwrap_or(0.0))
//!     }),
//! )
//! .unwrap();
//!
//! forall(&[types::number(), types::number()], "add commutes", |v| {
//!     let ab = add.call(&[v[0].clone(), v[1].clone()])?;
//!     let ba = add.call(&[v[1].clone(), v[0].clone()])?;
//!     Ok::<bool, ContractError>(ab == ba)
//! })
//! .unwrap();
//! ```

pub mod core;
pub mod engine;
pub mod types;
pub mod ui;

pub use crate::core::descriptor::{Failure, SampleMode, Type, TypeDescriptor, Verdict, Wrap};
pub use crate::core::errors::{CallWitness, ContractError, Mismatch, Violation};
pub use crate::core::value::{Function, TermMeta, Value};
pub use engine::{attach, check, forall, forall_n, Holds};
pub use types::Param;
