//! core::descriptor
//!
//! The type descriptor protocol.
//!
//! # Protocol
//!
//! A descriptor is anything implementing [`TypeDescriptor`]:
//!
//! - `form` - human-readable description of valid inhabitants
//! - `test` - pure predicate, optionally returning structured failure detail
//! - `sample` - generates an inhabitant in [`SampleMode::Compact`] or
//!   [`SampleMode::Full`]
//!
//! Function contracts additionally implement [`Wrap`], exposed through
//! [`TypeDescriptor::as_wrap`].
//!
//! [`Type`] is the shared handle the rest of the crate passes around. It pairs
//! a descriptor with a display name and description.
//!
//! # Invariants
//!
//! - Descriptors are immutable once built. Renaming a [`Type`] produces a new
//!   handle over the same descriptor.
//! - Self-consistency: `ty.test(&ty.sample(mode))` is expected to pass for
//!   every mode. The library relies on it but does not enforce it.
//!
//! # Example
//!
//! ```
//! use rand::RngCore;
//! use typeshape::core::descriptor::{SampleMode, Type, TypeDescriptor, Verdict};
//! use typeshape::Value;
//!
//! /// Strings ending in ".rs".
//! struct RustFile;
//!
//! impl TypeDescriptor for RustFile {
//!     fn form(&self) -> String {
//!         "a string ending in `.rs`".into()
//!     }
//!     fn test(&self, value: &Value) -> Verdict {
//!         value.as_str().is_some_and(|s| s.ends_with(".rs")).into()
//!     }
//!     fn sample(&self, _rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
//!         Value::from("main.rs")
//!     }
//! }
//!
//! let ty = Type::new(RustFile).named("RustFile");
//! assert!(ty.accepts(&Value::from("lib.rs")));
//! assert!(!ty.accepts(&Value::from("lib.py")));
//! ```

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use super::errors::CallWitness;
use super::sampling;
use super::value::{Function, Value};
use super::window;
use crate::ui::report::Line;

/// How a sampler should shape its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleMode {
    /// Small, human-legible values
    Compact,
    /// Broad coverage of the inhabitant space
    Full,
}

/// Structured failure detail produced by a descriptor's test.
#[derive(Debug, Clone, Default)]
pub struct Failure {
    /// Diagnostic lines, used verbatim by the checker
    pub lines: Vec<Line>,
    /// Call evidence from function-contract verification
    pub witness: Option<CallWitness>,
}

impl Failure {
    /// Failure detail made of lines only.
    pub fn lines(lines: Vec<Line>) -> Self {
        Self {
            lines,
            witness: None,
        }
    }
}

/// Result of testing a value against a descriptor.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// The value inhabits the type
    Pass,
    /// The value does not; the checker synthesizes the diagnostic
    Fail,
    /// The value does not; the descriptor supplied its own diagnostic
    Detail(Failure),
}

impl Verdict {
    /// Whether the value passed.
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

/// The minimal capability set of a type descriptor.
pub trait TypeDescriptor: Send + Sync {
    /// Human-readable description of valid inhabitants.
    fn form(&self) -> String;

    /// Decide whether `value` inhabits the type.
    fn test(&self, value: &Value) -> Verdict;

    /// Generate an inhabitant.
    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value;

    /// The wrapping capability, for descriptors that instrument callables.
    fn as_wrap(&self) -> Option<&dyn Wrap> {
        None
    }
}

/// Optional capability: install checking behavior around a raw callable.
pub trait Wrap: TypeDescriptor {
    /// Return an instrumented version of `raw`.
    fn wrap(&self, raw: Function) -> Function;
}

/// Shared, named handle to a descriptor.
#[derive(Clone)]
pub struct Type {
    descriptor: Arc<dyn TypeDescriptor>,
    name: Arc<str>,
    description: Arc<str>,
}

impl Type {
    /// Wrap a descriptor. Name and description default to `"anon"` and
    /// `"no description"`.
    ///
    /// The first descriptor built opens the static-time window.
    pub fn new(descriptor: impl TypeDescriptor + 'static) -> Self {
        window::start();
        Self {
            descriptor: Arc::new(descriptor),
            name: Arc::from("anon"),
            description: Arc::from("no description"),
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl AsRef<str>) -> Self {
        self.name = Arc::from(name.as_ref());
        self
    }

    /// Set the description.
    pub fn describe(mut self, description: impl AsRef<str>) -> Self {
        self.description = Arc::from(description.as_ref());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn form(&self) -> String {
        self.descriptor.form()
    }

    pub fn test(&self, value: &Value) -> Verdict {
        self.descriptor.test(value)
    }

    /// Shorthand for `test(value).passed()`.
    pub fn accepts(&self, value: &Value) -> bool {
        self.test(value).passed()
    }

    /// Sample with the shared sampling generator.
    pub fn sample(&self, mode: SampleMode) -> Value {
        self.descriptor.sample(&mut sampling::rng(), mode)
    }

    /// Sample with an explicit generator.
    pub fn sample_with(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        self.descriptor.sample(rng, mode)
    }

    /// Instrument `raw` if this descriptor can wrap; `None` otherwise.
    pub fn wrap(&self, raw: Function) -> Option<Function> {
        self.descriptor.as_wrap().map(|w| w.wrap(raw))
    }

    /// Whether this descriptor instruments callables.
    pub fn is_wrapping(&self) -> bool {
        self.descriptor.as_wrap().is_some()
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
