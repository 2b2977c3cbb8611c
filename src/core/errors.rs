//! core::errors
//!
//! The two failure kinds of the checking engine.
//!
//! # Design
//!
//! - [`ContractError::TypeMismatch`] is raised by `check`, by `attach`, and by
//!   instrumented callables when an argument fails its slot.
//! - [`ContractError::InvariantViolation`] is raised by `forall` on the first
//!   counterexample it finds.
//!
//! Both carry structured data for programmatic inspection plus the assembled
//! diagnostic lines. `Display` renders those lines with the
//! [`PlainRenderer`](crate::ui::report::PlainRenderer); hosts that want
//! colored output call [`ContractError::report`] and use their own renderer.
//!
//! # Example
//!
//! ```
//! use typeshape::{check, types, Value};
//!
//! let err = check(&types::uint8(), &Value::from(256)).unwrap_err();
//! assert!(err.is_type_mismatch());
//! assert!(err.to_string().contains("Uint8"));
//! ```

use std::fmt;

use thiserror::Error;

use super::value::{Function, Value};
use crate::ui::dump::show_value;
use crate::ui::report::{indent, Line, PlainRenderer, Render, Span, Tone};

const RULE_WIDTH: usize = 58;

/// Errors raised by the checking engine.
#[derive(Debug, Clone, Error)]
pub enum ContractError {
    /// A value (or a sampled call result) failed its descriptor.
    #[error("{0}")]
    TypeMismatch(Mismatch),

    /// A quantified predicate failed for a sampled input tuple.
    #[error("{0}")]
    InvariantViolation(Violation),
}

impl ContractError {
    /// Check if this error is a type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ContractError::TypeMismatch(_))
    }

    /// Check if this error is an invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ContractError::InvariantViolation(_))
    }

    /// Full diagnostic report: headline, rule, then the detail lines.
    pub fn report(&self) -> Vec<Line> {
        match self {
            ContractError::TypeMismatch(m) => m.report(),
            ContractError::InvariantViolation(v) => v.report(),
        }
    }

    /// Detail lines without the headline.
    pub fn lines(&self) -> &[Line] {
        match self {
            ContractError::TypeMismatch(m) => &m.lines,
            ContractError::InvariantViolation(v) => &v.lines,
        }
    }
}

/// Evidence from a failed function-contract verification call.
#[derive(Debug, Clone)]
pub struct CallWitness {
    /// Display name of the return descriptor
    pub expected_return: String,
    /// What the candidate returned
    pub returned: Value,
    /// Arguments the candidate was called with
    pub arguments: Vec<Value>,
    /// The unwrapped function, when the candidate carried one
    pub term: Option<Function>,
}

/// Payload of [`ContractError::TypeMismatch`].
#[derive(Debug, Clone)]
pub struct Mismatch {
    /// Display name of the expected descriptor
    pub expected: String,
    /// Rendered dump of the offending value
    pub actual: String,
    /// Call evidence when the mismatch came from a function contract
    pub witness: Option<CallWitness>,
    /// Diagnostic lines
    pub lines: Vec<Line>,
}

impl Mismatch {
    /// Build a mismatch for `value`, rendering it for the `actual` field.
    pub fn new(expected: impl Into<String>, value: &Value, lines: Vec<Line>) -> Self {
        Self {
            expected: expected.into(),
            actual: dump(value),
            witness: None,
            lines,
        }
    }

    /// Attach call evidence.
    pub fn with_witness(mut self, witness: Option<CallWitness>) -> Self {
        self.witness = witness;
        self
    }

    /// Headline plus detail lines.
    pub fn report(&self) -> Vec<Line> {
        headline("typeshape: type mismatch.", &self.lines)
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}", PlainRenderer::default().render(&self.report()))
    }
}

/// Payload of [`ContractError::InvariantViolation`].
#[derive(Debug, Clone)]
pub struct Violation {
    /// Display names of the quantified descriptors
    pub types: Vec<String>,
    /// Human description of the predicate
    pub predicate: String,
    /// The input tuple the predicate rejected
    pub counterexample: Vec<Value>,
    /// Diagnostic lines
    pub lines: Vec<Line>,
}

impl Violation {
    /// Build a violation and its diagnostic lines.
    pub fn new(types: Vec<String>, predicate: impl Into<String>, counterexample: Vec<Value>) -> Self {
        let predicate = predicate.into();
        let mut lines = vec![
            Line::blank(),
            Line::text(format!(
                "For every [{}], the following invariant should hold:",
                types.join(", ")
            )),
            Line::blank(),
        ];
        lines.extend(indent(vec![Line::text(predicate.clone())]));
        lines.push(Line::blank());
        lines.push(Line::text("But it didn't hold for the following values:"));
        lines.push(Line::blank());
        for value in &counterexample {
            lines.extend(indent(show_value(value)));
            lines.push(Line::blank());
        }
        Self {
            types,
            predicate,
            counterexample,
            lines,
        }
    }

    /// Headline plus detail lines.
    pub fn report(&self) -> Vec<Line> {
        headline("typeshape: invariant violation.", &self.lines)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}", PlainRenderer::default().render(&self.report()))
    }
}

fn headline(title: &str, lines: &[Line]) -> Vec<Line> {
    let mut report = vec![
        Line::spans(vec![Span::new(Tone::Alert, title)]),
        Line::spans(vec![Span::new(Tone::Muted, "-".repeat(RULE_WIDTH))]),
    ];
    report.extend_from_slice(lines);
    report
}

fn dump(value: &Value) -> String {
    show_value(value)
        .iter()
        .map(|line| format!("{}{}", "  ".repeat(line.depth), line.plain_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_display_has_headline() {
        let err = ContractError::TypeMismatch(Mismatch::new(
            "Number",
            &Value::from("x"),
            vec![Line::text("expected Number")],
        ));
        let text = err.to_string();
        assert!(text.contains("type mismatch"));
        assert!(text.contains("expected Number"));
        assert!(err.is_type_mismatch());
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn mismatch_renders_actual_value() {
        let m = Mismatch::new("Number", &Value::from("x"), vec![]);
        assert_eq!(m.actual, "\"x\"");
    }

    #[test]
    fn violation_lists_types_and_values() {
        let v = Violation::new(
            vec!["Number".into(), "Number".into()],
            "sub commutes",
            vec![Value::from(1.5), Value::from(2)],
        );
        let text = ContractError::InvariantViolation(v).to_string();
        assert!(text.contains("[Number, Number]"));
        assert!(text.contains("sub commutes"));
        assert!(text.contains("1.5"));
    }
}
