//! core::value
//!
//! Dynamic values checked by type descriptors.
//!
//! # Types
//!
//! - [`Value`] - JSON-shaped data plus callables
//! - [`Function`] - A shared callable with a declared arity and optional
//!   term metadata
//! - [`TermMeta`] - Back-reference metadata attached on first check
//!
//! # Invariants
//!
//! - Values are plain data; descriptors never mutate them.
//! - Term metadata is diagnostic only. It never participates in equality.
//!
//! # Example
//!
//! ```
//! use typeshape::{Function, Value};
//!
//! let add = Function::pure(2, |args| {
//!     Value::from(args[0].as_f64().unwrap_or(0.0) + args[1].as_f64().unwrap_or(0.0))
//! });
//! let sum = add.call(&[Value::from(1), Value::from(2)]).unwrap();
//! assert_eq!(sum, Value::from(3));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{ContractError, Mismatch};
use crate::ui::report::Line;

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// A boolean
    Bool(bool),
    /// A double-precision number (may be NaN)
    Number(f64),
    /// A string
    String(String),
    /// An ordered sequence
    Array(Vec<Value>),
    /// A string-keyed record
    Object(BTreeMap<String, Value>),
    /// A callable
    Function(Function),
}

impl Value {
    /// Build an object from key/value pairs.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array from anything convertible into values.
    pub fn array<T, I>(items: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Call this value as a function.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the value is not callable, or whatever the
    /// callable itself raises.
    pub fn call(&self, args: &[Value]) -> Result<Value, ContractError> {
        match self {
            Value::Function(f) => f.call(args),
            other => Err(ContractError::TypeMismatch(Mismatch::new(
                "Function",
                other,
                vec![Line::text(format!(
                    "Expected Function, got {}.",
                    other.kind()
                ))],
            ))),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*n as i64)
                } else if n.is_finite() {
                    serializer.serialize_f64(*n)
                } else {
                    serializer.serialize_str(&n.to_string())
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(fields) => fields.serialize(serializer),
            Value::Function(f) => serializer.serialize_str(&f.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

type Body = dyn Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync;

/// A shared callable.
///
/// Cloning is cheap; clones share the body and metadata.
#[derive(Clone)]
pub struct Function {
    body: Arc<Body>,
    arity: usize,
    meta: Option<Arc<TermMeta>>,
}

/// Metadata attached to a function the first time a descriptor checks it.
#[derive(Debug, Clone)]
pub struct TermMeta {
    /// Display name (defaults to `"anon"`)
    pub name: String,
    /// Human description (defaults to `"no description"`)
    pub description: String,
    /// The function as it was before instrumentation
    pub original: Option<Function>,
}

impl TermMeta {
    /// Default metadata pointing back at `original`.
    pub fn anonymous(original: Option<Function>) -> Self {
        Self {
            name: "anon".to_string(),
            description: "no description".to_string(),
            original,
        }
    }
}

impl Function {
    /// Create a fallible function of the given arity.
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ContractError> + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
            arity,
            meta: None,
        }
    }

    /// Create an infallible function of the given arity.
    pub fn pure<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::new(arity, move |args| Ok(body(args)))
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Result<Value, ContractError> {
        (self.body)(args)
    }

    /// Declared number of parameters.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Metadata, if a descriptor has checked this function.
    pub fn meta(&self) -> Option<&TermMeta> {
        self.meta.as_deref()
    }

    /// The uninstrumented function, if this one wraps another.
    pub fn original(&self) -> Option<&Function> {
        self.meta().and_then(|m| m.original.as_ref())
    }

    /// Display name from metadata, or `"anon"`.
    pub fn name(&self) -> &str {
        self.meta().map_or("anon", |m| m.name.as_str())
    }

    /// Set the display name (creates metadata when absent).
    pub fn named(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.map_meta(|m| m.name = name)
    }

    /// Set the description (creates metadata when absent).
    pub fn describe(self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.map_meta(|m| m.description = description)
    }

    /// Whether two handles share the same body.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    pub(crate) fn with_meta(mut self, meta: TermMeta) -> Self {
        self.meta = Some(Arc::new(meta));
        self
    }

    fn map_meta(mut self, edit: impl FnOnce(&mut TermMeta)) -> Self {
        let mut meta = self
            .meta
            .as_deref()
            .cloned()
            .unwrap_or_else(|| TermMeta::anonymous(None));
        edit(&mut meta);
        self.meta = Some(Arc::new(meta));
        self
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("arity", &self.arity)
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}/{}>", self.name(), self.arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(1).kind(), "number");
        assert_eq!(Value::from("a").kind(), "string");
        assert_eq!(Value::array([1, 2]).kind(), "array");
        assert_eq!(Value::object([("a", Value::Null)]).kind(), "object");
    }

    #[test]
    fn json_conversion() {
        let json: serde_json::Value = serde_json::from_str(r#"{"a":[1,true,null]}"#).unwrap();
        let value = Value::from(json);
        assert_eq!(
            value,
            Value::object([(
                "a",
                Value::Array(vec![Value::from(1), Value::from(true), Value::Null])
            )])
        );
    }

    #[test]
    fn integers_serialize_without_fraction() {
        assert_eq!(serde_json::to_string(&Value::from(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Value::from(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&Value::Number(f64::NAN)).unwrap(),
            "\"NaN\""
        );
    }

    #[test]
    fn function_equality_is_identity() {
        let f = Function::pure(0, |_| Value::Null);
        let g = Function::pure(0, |_| Value::Null);
        assert_eq!(Value::from(f.clone()), Value::from(f.clone()));
        assert_ne!(Value::from(f), Value::from(g));
    }

    #[test]
    fn naming_creates_metadata() {
        let f = Function::pure(1, |args| args[0].clone()).named("id");
        assert_eq!(f.name(), "id");
        assert_eq!(f.meta().unwrap().description, "no description");
        assert!(f.original().is_none());
    }

    #[test]
    fn calling_a_non_function_is_a_mismatch() {
        let err = Value::from(3).call(&[]).unwrap_err();
        assert!(err.is_type_mismatch());
    }
}
