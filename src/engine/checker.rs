//! engine::checker
//!
//! Immediate verification of values against descriptors.
//!
//! # Flow
//!
//! ```text
//! attach: [wrap if contract] -> [attach term metadata] -> check -> term
//! check:  test -> Pass    => Ok
//!              -> Fail    => synthesized diagnostic => TypeMismatch
//!              -> Detail  => descriptor's own lines  => TypeMismatch
//! ```
//!
//! # Invariants
//!
//! - Checking is synchronous and never mutates the descriptor.
//! - A function is wrapped at most once. Attaching an already instrumented
//!   function re-verifies it without wrapping it again.
//! - On failure no instrumented callable escapes: the error is returned
//!   instead.

use crate::core::descriptor::{Type, Verdict};
use crate::core::errors::{ContractError, Mismatch};
use crate::core::value::{Function, TermMeta, Value};
use crate::ui::dump::{show_type, show_value};
use crate::ui::report::{indent, Line, Span, Tone};

/// Verify `value` against `ty`.
///
/// # Errors
///
/// Returns `ContractError::TypeMismatch` carrying the diagnostic lines when
/// the value does not inhabit the type.
///
/// # Example
///
/// ```
/// use typeshape::{check, types, Value};
///
/// assert!(check(&types::uint8(), &Value::from(255)).is_ok());
/// assert!(check(&types::uint8(), &Value::from(256)).is_err());
/// ```
pub fn check(ty: &Type, value: &Value) -> Result<(), ContractError> {
    match ty.test(value) {
        Verdict::Pass => Ok(()),
        Verdict::Fail => Err(ContractError::TypeMismatch(Mismatch::new(
            ty.name(),
            value,
            expected_lines(ty, value),
        ))),
        Verdict::Detail(failure) => Err(ContractError::TypeMismatch(
            Mismatch::new(ty.name(), value, failure.lines).with_witness(failure.witness),
        )),
    }
}

/// Attach `ty` to `term` and verify it.
///
/// Functions are instrumented by function-contract descriptors and receive
/// term metadata pointing back at the raw function. Plain values are checked
/// and returned unchanged: they carry no metadata, since only [`Function`]s
/// have a slot for it.
///
/// # Errors
///
/// Returns `ContractError::TypeMismatch` if the term fails the descriptor,
/// including a failed randomized verification of a function contract.
///
/// # Example
///
/// ```
/// use typeshape::{attach, types, Function, Value};
///
/// let contract = types::function([types::number(), types::number()], types::number());
/// let bogus = Function::pure(2, |_| Value::from("oops"));
/// assert!(attach(&contract, bogus).is_err());
/// ```
pub fn attach(ty: &Type, term: impl Into<Value>) -> Result<Value, ContractError> {
    let term = match term.into() {
        Value::Function(raw) if raw.original().is_none() => Value::Function(instrument(ty, raw)),
        other => other,
    };
    check(ty, &term)?;
    Ok(term)
}

fn instrument(ty: &Type, raw: Function) -> Function {
    let mut meta = raw
        .meta()
        .cloned()
        .unwrap_or_else(|| TermMeta::anonymous(None));
    meta.original = Some(raw.clone());

    let instrumented = ty.wrap(raw.clone()).unwrap_or(raw);
    instrumented.with_meta(meta)
}

fn expected_lines(ty: &Type, value: &Value) -> Vec<Line> {
    let mut lines = vec![
        Line::spans(vec![
            Span::plain("Expected a value of type "),
            Span::new(Tone::TypeName, ty.name()),
            Span::plain("."),
        ]),
        Line::text("Instead, it got:"),
        Line::blank(),
    ];
    lines.extend(indent(show_value(value)));
    lines.push(Line::blank());
    lines.extend(show_type(ty));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[test]
    fn passing_value_is_silent() {
        assert!(check(&types::boolean(), &Value::from(true)).is_ok());
    }

    #[test]
    fn failing_value_gets_synthesized_diagnostic() {
        let err = check(&types::int8(), &Value::from(128)).unwrap_err();
        let ContractError::TypeMismatch(m) = err else {
            panic!("expected type mismatch");
        };
        assert_eq!(m.expected, "Int8");
        assert_eq!(m.actual, "128");
        assert!(m.lines[0].plain_text().contains("Int8"));
        assert!(m.witness.is_none());
    }

    #[test]
    fn attach_passes_plain_values_through() {
        let v = attach(&types::string(), "hello").unwrap();
        assert_eq!(v, Value::from("hello"));
    }

    #[test]
    fn attach_records_original_term() {
        let contract = types::function([types::number()], types::number());
        let raw = Function::pure(1, |a| a[0].clone()).named("identity");
        let attached = attach(&contract, raw.clone()).unwrap();
        let f = attached.as_function().unwrap();
        assert!(!f.ptr_eq(&raw));
        assert!(f.original().unwrap().ptr_eq(&raw));
        assert_eq!(f.name(), "identity");
    }

    #[test]
    fn reattaching_does_not_rewrap() {
        let contract = types::function([types::number()], types::number());
        let first = attach(&contract, Function::pure(1, |a| a[0].clone())).unwrap();
        let second = attach(&contract, first.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_contract_reports_return_violation() {
        let contract = types::function([types::number(), types::number()], types::number());
        let err = attach(&contract, Function::pure(2, |_| Value::from("oops"))).unwrap_err();
        let ContractError::TypeMismatch(m) = err else {
            panic!("expected type mismatch");
        };
        let witness = m.witness.expect("witness");
        assert_eq!(witness.returned, Value::from("oops"));
        assert!(witness.term.is_some());
        assert!(m.lines[0].plain_text().contains("Expected return type Number"));
    }
}
