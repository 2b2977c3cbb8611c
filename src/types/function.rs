//! types::function
//!
//! Function contracts: descriptors for callables.
//!
//! # Verification
//!
//! Testing a candidate callable is a bounded random search for a bad call:
//!
//! 1. Sample one value per argument slot (compact for the first
//!    `legible_iterations` calls, full afterwards).
//! 2. Call the candidate and test the result against the return slot.
//! 3. Stop at the first failing call and report it.
//!
//! The number of calls is `static_iterations` while the static-time window is
//! open and `dynamic_iterations` after it closes (see [`crate::core::window`]).
//! Passing is evidence, not proof.
//!
//! # Currying
//!
//! [`Wrap::wrap`] returns an instrumented callable backed by a
//! [`PartialApplication`]. Each call appends the new arguments (checking each
//! one against its slot, once) and either dispatches to the body when the
//! arity is reached or returns a new instrumented callable holding the
//! accumulated arguments. Return values are not re-checked at call time.
//!
//! # Example
//!
//! ```
//! use typeshape::{attach, types, Function, Value};
//!
//! let add = attach(
//!     &types::function([types::number(), types::number()], types::number()),
//!     Function::pure(2, |args| {
//!         Value::from(args[0].as_f64().unwrap_or(0.0) + args[1].as_f64().unwrap_or(0.0))
//!     }),
//! )
//! .unwrap();
//!
//! let add_one = add.call(&[Value::from(1)]).unwrap();
//! assert_eq!(add_one.call(&[Value::from(2)]).unwrap(), Value::from(3));
//! ```

use std::sync::Arc;

use rand::RngCore;
use tracing::debug;

use crate::core::config;
use crate::core::descriptor::{Failure, SampleMode, Type, TypeDescriptor, Verdict, Wrap};
use crate::core::errors::{CallWitness, ContractError, Mismatch};
use crate::core::sampling;
use crate::core::value::{Function, Value};
use crate::core::window;
use crate::engine::check;
use crate::ui::dump::{show_type, show_value};
use crate::ui::report::{indent, Line, Span, Tone};

const SLOT_LABELS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// An argument or return slot of a function contract.
#[derive(Debug, Clone)]
pub struct Param {
    ty: Type,
    label: Option<String>,
}

impl Param {
    /// An unlabeled slot.
    pub fn new(ty: Type) -> Self {
        Self { ty, label: None }
    }

    /// Give the slot a display label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl From<Type> for Param {
    fn from(ty: Type) -> Self {
        Param::new(ty)
    }
}

#[derive(Debug)]
struct Slot {
    ty: Type,
    label: String,
}

impl Slot {
    fn display(&self) -> String {
        format!("{}: {}", self.label, self.ty.name())
    }
}

#[derive(Debug)]
struct Signature {
    args: Vec<Slot>,
    ret: Slot,
    name: String,
}

impl Signature {
    fn new(args: Vec<Param>, ret: Param) -> Self {
        let mut next = 0;
        let mut label = |param: &Param| {
            param.label.clone().unwrap_or_else(|| {
                let label = SLOT_LABELS
                    .get(next)
                    .map_or_else(|| "_".to_string(), |c| (*c as char).to_string());
                next += 1;
                label
            })
        };

        let args: Vec<Slot> = args
            .into_iter()
            .map(|p| Slot {
                label: label(&p),
                ty: p.ty,
            })
            .collect();
        let ret = Slot {
            label: label(&ret),
            ty: ret.ty,
        };
        let name = format!(
            "({}) => ({})",
            args.iter().map(Slot::display).collect::<Vec<_>>().join(", "),
            ret.display()
        );
        Self { args, ret, name }
    }

    fn arity(&self) -> usize {
        self.args.len()
    }
}

struct FnContract {
    signature: Arc<Signature>,
}

impl FnContract {
    fn not_callable(value: &Value) -> Failure {
        let mut lines = vec![
            Line::text(format!("Expected Function, got {}:", value.kind())),
            Line::blank(),
        ];
        lines.extend(show_value(value));
        Failure::lines(lines)
    }

    fn call_lines(&self, candidate: &Function, args: &[Value]) -> Vec<Line> {
        let term = candidate.original().unwrap_or(candidate).clone();
        let mut lines = vec![
            Line::blank(),
            Line::text("When calling the function:"),
            Line::blank(),
        ];
        lines.extend(indent(show_value(&Value::Function(term))));
        lines.push(Line::blank());
        lines.push(Line::text("With the arguments:"));
        lines.push(Line::blank());
        for arg in args {
            lines.extend(indent(show_value(arg)));
        }
        lines
    }

    fn bad_return(&self, candidate: &Function, args: Vec<Value>, returned: Value) -> Failure {
        let ret = &self.signature.ret.ty;
        let mut lines = vec![
            Line::spans(vec![
                Span::plain("Expected return type "),
                Span::new(Tone::TypeName, ret.name()),
                Span::plain(". Got:"),
            ]),
            Line::blank(),
        ];
        lines.extend(indent(show_value(&returned)));
        lines.extend(self.call_lines(candidate, &args));
        lines.push(Line::blank());
        lines.extend(show_type(ret));

        Failure {
            lines,
            witness: Some(CallWitness {
                expected_return: ret.name().to_string(),
                returned,
                arguments: args,
                term: candidate.original().cloned(),
            }),
        }
    }

    fn raised(&self, candidate: &Function, args: &[Value], err: &ContractError) -> Failure {
        let mut lines = vec![Line::text("The function raised an error instead of returning:")];
        lines.push(Line::blank());
        lines.extend(indent(err.report()));
        lines.extend(self.call_lines(candidate, args));
        Failure::lines(lines)
    }
}

impl TypeDescriptor for FnContract {
    fn form(&self) -> String {
        let args: Vec<String> = self.signature.args.iter().map(|s| s.ty.form()).collect();
        format!(
            "a function that receives {} and returns {}",
            if args.is_empty() {
                "nothing".to_string()
            } else {
                args.join(", ")
            },
            self.signature.ret.ty.form()
        )
    }

    fn test(&self, value: &Value) -> Verdict {
        let Some(candidate) = value.as_function() else {
            return Verdict::Detail(Self::not_callable(value));
        };

        let settings = &config::current().verification;
        let budget = window::iterations(settings);
        let mut rng = sampling::rng();

        for attempt in 0..budget {
            let mode = if attempt < settings.legible_iterations {
                SampleMode::Compact
            } else {
                SampleMode::Full
            };
            let args: Vec<Value> = self
                .signature
                .args
                .iter()
                .map(|slot| slot.ty.sample_with(&mut rng, mode))
                .collect();

            match candidate.call(&args) {
                Ok(returned) if self.signature.ret.ty.accepts(&returned) => {}
                Ok(returned) => {
                    debug!(contract = %self.signature.name, attempt, "function contract violated");
                    return Verdict::Detail(self.bad_return(candidate, args, returned));
                }
                Err(err) => {
                    debug!(contract = %self.signature.name, attempt, "function raised during verification");
                    return Verdict::Detail(self.raised(candidate, &args, &err));
                }
            }
        }

        debug!(contract = %self.signature.name, calls = budget, "function contract verified");
        Verdict::Pass
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        let returned = self.signature.ret.ty.sample_with(rng, mode);
        Value::Function(Function::new(self.signature.arity(), move |_| {
            Ok(returned.clone())
        }))
    }

    fn as_wrap(&self) -> Option<&dyn Wrap> {
        Some(self)
    }
}

impl Wrap for FnContract {
    fn wrap(&self, raw: Function) -> Function {
        PartialApplication::new(Arc::clone(&self.signature), raw).into_function()
    }
}

/// Accumulator behind an instrumented callable.
///
/// State is the list of arguments supplied so far. The single transition
/// appends newly supplied arguments, checking each against its slot, then
/// either dispatches to the target (arity reached) or yields a new partial
/// application.
#[derive(Clone)]
pub struct PartialApplication {
    signature: Arc<Signature>,
    target: Function,
    accumulated: Vec<Value>,
}

impl PartialApplication {
    fn new(signature: Arc<Signature>, target: Function) -> Self {
        Self {
            signature,
            target,
            accumulated: Vec::new(),
        }
    }

    /// Declared arity of the contract.
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    /// Arguments supplied so far.
    pub fn accumulated(&self) -> &[Value] {
        &self.accumulated
    }

    /// Supply more arguments.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch for the first argument that fails its slot, or
    /// when more arguments are supplied than the contract declares. Errors
    /// raised by the target propagate unchanged.
    pub fn apply(&self, args: &[Value]) -> Result<Value, ContractError> {
        let arity = self.arity();
        let supplied = self.accumulated.len();

        if supplied + args.len() > arity {
            let given = Value::Array(args.to_vec());
            return Err(ContractError::TypeMismatch(Mismatch::new(
                self.signature.name.clone(),
                &given,
                vec![Line::text(format!(
                    "Expected at most {} more argument(s), got {}.",
                    arity - supplied,
                    args.len()
                ))],
            )));
        }

        for (offset, arg) in args.iter().enumerate() {
            check(&self.signature.args[supplied + offset].ty, arg)?;
        }

        let mut accumulated = self.accumulated.clone();
        accumulated.extend_from_slice(args);

        if accumulated.len() == arity {
            self.target.call(&accumulated)
        } else {
            let next = PartialApplication {
                signature: Arc::clone(&self.signature),
                target: self.target.clone(),
                accumulated,
            };
            Ok(Value::Function(next.into_function()))
        }
    }

    fn into_function(self) -> Function {
        let remaining = self.arity() - self.accumulated.len();
        Function::new(remaining, move |args| self.apply(args))
    }
}

/// A function contract from argument slots to a return slot.
///
/// Unlabeled slots are labeled `a`, `b`, `c`… in order, the return slot
/// included.
///
/// # Example
///
/// ```
/// use typeshape::{types, Param};
///
/// let concat = types::function(
///     [Param::new(types::string()).labeled("head"), types::string().into()],
///     types::string(),
/// );
/// assert_eq!(concat.name(), "(head: String, a: String) => (b: String)");
/// ```
pub fn function<I, P, R>(args: I, ret: R) -> Type
where
    I: IntoIterator<Item = P>,
    P: Into<Param>,
    R: Into<Param>,
{
    let args: Vec<Param> = args.into_iter().map(Into::into).collect();
    let signature = Signature::new(args, ret.into());
    let name = signature.name.clone();
    let description = format!(
        "a `Function` from `{}` to `{}`",
        signature
            .args
            .iter()
            .map(|s| s.ty.name().to_string())
            .collect::<Vec<_>>()
            .join(", "),
        signature.ret.ty.name()
    );
    Type::new(FnContract {
        signature: Arc::new(signature),
    })
    .named(name)
    .describe(description)
}
