//! engine
//!
//! Entry points that apply descriptors to values.
//!
//! # Operations
//!
//! - [`check`] - Immediate pass/fail verification with structured diagnostics
//! - [`attach`] - Instrument (for function contracts), verify, and return a term
//! - [`forall`] - Bounded search for a counterexample to a predicate
//!
//! # Invariants
//!
//! - Every failure is one of the two `ContractError` kinds
//! - Errors propagate synchronously; the engine never catches its own errors
//!   except to report a failing verification call as a failed contract

pub mod checker;
pub mod forall;

pub use checker::{attach, check};
pub use forall::{forall, forall_n, Holds};
