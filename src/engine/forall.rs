//! engine::forall
//!
//! Property-based invariant checking over sampled inputs.
//!
//! # Semantics
//!
//! `forall` draws up to `attempts` tuples, one compact sample per descriptor,
//! and applies the predicate to each. The first tuple the predicate rejects
//! becomes the counterexample of an invariant violation. Finding none within
//! the budget is success, which is evidence, not proof.

use tracing::debug;

use crate::core::config;
use crate::core::descriptor::{SampleMode, Type};
use crate::core::errors::{ContractError, Violation};
use crate::core::sampling;
use crate::core::value::Value;

/// Predicate outcomes `forall` understands.
///
/// Plain `bool` predicates are the common case. Predicates that call
/// instrumented functions return `Result<bool, ContractError>` so that
/// argument mismatches propagate.
pub trait Holds {
    fn holds(self) -> Result<bool, ContractError>;
}

impl Holds for bool {
    fn holds(self) -> Result<bool, ContractError> {
        Ok(self)
    }
}

impl Holds for Result<bool, ContractError> {
    fn holds(self) -> Result<bool, ContractError> {
        self
    }
}

/// Check `predicate` over the configured default number of sampled tuples.
///
/// # Errors
///
/// Returns `ContractError::InvariantViolation` with the first counterexample,
/// or any error the predicate itself raises.
///
/// # Example
///
/// ```
/// use typeshape::{forall, types};
///
/// let numbers = [types::number(), types::number()];
/// assert!(forall(&numbers, "addition commutes", |v| {
///     let (a, b) = (v[0].as_f64().unwrap(), v[1].as_f64().unwrap());
///     a + b == b + a
/// })
/// .is_ok());
/// ```
pub fn forall<P, H>(types: &[Type], description: &str, predicate: P) -> Result<(), ContractError>
where
    P: FnMut(&[Value]) -> H,
    H: Holds,
{
    forall_n(types, description, config::current().forall.attempts, predicate)
}

/// Check `predicate` over at most `attempts` sampled tuples.
pub fn forall_n<P, H>(
    types: &[Type],
    description: &str,
    attempts: usize,
    mut predicate: P,
) -> Result<(), ContractError>
where
    P: FnMut(&[Value]) -> H,
    H: Holds,
{
    let mut rng = sampling::rng();

    for attempt in 0..attempts {
        let args: Vec<Value> = types
            .iter()
            .map(|ty| ty.sample_with(&mut rng, SampleMode::Compact))
            .collect();

        if !predicate(&args).holds()? {
            debug!(invariant = description, attempt, "counterexample found");
            return Err(ContractError::InvariantViolation(Violation::new(
                types.iter().map(|ty| ty.name().to_string()).collect(),
                description,
                args,
            )));
        }
    }

    debug!(invariant = description, attempts, "no counterexample found");
    Ok(())
}
