//! types::aggregate
//!
//! Structs, arrays, fixed-length vectors, pairs, and JSON-keyed maps.
//!
//! # Invariants
//!
//! - A composite passes only if every child passes. Tests stop at the first
//!   failing child.
//! - Sampling samples each child independently.
//!
//! # Limitations
//!
//! [`map`] always samples the empty object. Non-empty map sampling is not
//! provided; a warning is logged the first time it happens.

use std::collections::BTreeMap;
use std::sync::Once;

use rand::RngCore;
use tracing::warn;

use crate::core::descriptor::{SampleMode, Type, TypeDescriptor, Verdict};
use crate::core::sampling::below;
use crate::core::value::Value;

static MAP_SAMPLE_NOTICE: Once = Once::new();

struct Structure {
    fields: Vec<(String, Type)>,
}

impl TypeDescriptor for Structure {
    fn form(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(field, ty)| format!("`{}` ({})", field, ty.form()))
            .collect();
        format!("an object with the fields {}", fields.join(", "))
    }

    // An absent field is not `null`: it fails even for `maybe` fields.
    fn test(&self, value: &Value) -> Verdict {
        let Some(object) = value.as_object() else {
            return Verdict::Fail;
        };
        self.fields
            .iter()
            .all(|(field, ty)| object.get(field).is_some_and(|v| ty.accepts(v)))
            .into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(field, ty)| (field.clone(), ty.sample_with(rng, mode)))
                .collect(),
        )
    }
}

/// An object with the given typed fields.
///
/// Only the listed fields are tested; extra fields are ignored. Every listed
/// field must be present: a [`maybe`](crate::types::maybe) field accepts an
/// explicit `null` but not an omitted key.
///
/// # Example
///
/// ```
/// use typeshape::{types, Value};
///
/// let player = types::structure([
///     ("atk", types::number()),
///     ("bag", types::array(types::string())),
/// ])
/// .named("Player");
///
/// let p = Value::object([
///     ("atk", Value::from(10)),
///     ("bag", Value::array(["rope"])),
/// ]);
/// assert!(player.accepts(&p));
/// ```
pub fn structure<I, K>(fields: I) -> Type
where
    I: IntoIterator<Item = (K, Type)>,
    K: Into<String>,
{
    let fields: Vec<(String, Type)> = fields.into_iter().map(|(k, t)| (k.into(), t)).collect();
    let name = format!(
        "Struct({{{}}})",
        fields
            .iter()
            .map(|(field, ty)| format!("{}:{}", field, ty.name()))
            .collect::<Vec<_>>()
            .join(",")
    );
    let description = format!(
        "a struct with the fields {}",
        fields
            .iter()
            .map(|(field, ty)| format!("`{}` (`{}`)", field, ty.name()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Type::new(Structure { fields })
        .named(name)
        .describe(description)
}

struct ArrayOf {
    element: Type,
}

impl TypeDescriptor for ArrayOf {
    fn form(&self) -> String {
        format!(
            "an array of `{}`s, where `{}` is {}",
            self.element.name(),
            self.element.name(),
            self.element.form()
        )
    }

    fn test(&self, value: &Value) -> Verdict {
        value
            .as_array()
            .is_some_and(|items| items.iter().all(|x| self.element.accepts(x)))
            .into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        let len = match mode {
            SampleMode::Compact => below(rng, 8),
            SampleMode::Full => below(rng, 64),
        };
        Value::Array((0..len).map(|_| self.element.sample_with(rng, mode)).collect())
    }
}

/// A variable-length array whose elements all inhabit `element`.
pub fn array(element: Type) -> Type {
    let name = format!("Array({})", element.name());
    let description = format!("an `Array` of `{}`s", element.name());
    Type::new(ArrayOf { element })
        .named(name)
        .describe(description)
}

struct Vector {
    len: usize,
    element: Type,
}

impl TypeDescriptor for Vector {
    fn form(&self) -> String {
        format!(
            "an array with exactly {} `{}`s, where `{}` is {}",
            self.len,
            self.element.name(),
            self.element.name(),
            self.element.form()
        )
    }

    fn test(&self, value: &Value) -> Verdict {
        value
            .as_array()
            .is_some_and(|items| {
                items.len() == self.len && items.iter().all(|x| self.element.accepts(x))
            })
            .into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        Value::Array(
            (0..self.len)
                .map(|_| self.element.sample_with(rng, mode))
                .collect(),
        )
    }
}

/// An array of exactly `len` elements, all inhabiting `element`.
pub fn vector(len: usize, element: Type) -> Type {
    let name = format!("Vector({},{})", len, element.name());
    let description = format!("a `Vector` of {} `{}`s", len, element.name());
    Type::new(Vector { len, element })
        .named(name)
        .describe(description)
}

struct Pair {
    first: Type,
    second: Type,
}

impl TypeDescriptor for Pair {
    fn form(&self) -> String {
        format!(
            "an array with {} and {}",
            self.first.form(),
            self.second.form()
        )
    }

    fn test(&self, value: &Value) -> Verdict {
        match value.as_array() {
            Some([a, b]) => (self.first.accepts(a) && self.second.accepts(b)).into(),
            _ => Verdict::Fail,
        }
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        let a = self.first.sample_with(rng, mode);
        let b = self.second.sample_with(rng, mode);
        Value::Array(vec![a, b])
    }
}

/// A two-element array with heterogeneous slots.
pub fn pair(first: Type, second: Type) -> Type {
    let name = format!("Pair({},{})", first.name(), second.name());
    let description = format!("a `Pair` of `{}` and `{}`", first.name(), second.name());
    Type::new(Pair { first, second })
        .named(name)
        .describe(description)
}

struct MapOf {
    key: Type,
    value: Type,
}

impl MapOf {
    fn entry_ok(&self, key: &str, value: &Value) -> bool {
        match serde_json::from_str::<serde_json::Value>(key) {
            Ok(decoded) => self.key.accepts(&Value::from(decoded)) && self.value.accepts(value),
            Err(_) => false,
        }
    }
}

impl TypeDescriptor for MapOf {
    fn form(&self) -> String {
        format!(
            "an object whose keys are the JSON serialization of `{}`s and whose values are `{}`s, \
             where `{}` is {} and `{}` is {}",
            self.key.name(),
            self.value.name(),
            self.value.name(),
            self.value.form(),
            self.key.name(),
            self.key.form()
        )
    }

    fn test(&self, value: &Value) -> Verdict {
        value
            .as_object()
            .is_some_and(|entries| entries.iter().all(|(k, v)| self.entry_ok(k, v)))
            .into()
    }

    fn sample(&self, _rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        MAP_SAMPLE_NOTICE.call_once(|| {
            warn!(
                key = self.key.name(),
                value = self.value.name(),
                "map sampling is not implemented; sampling the empty map"
            );
        });
        Value::Object(BTreeMap::new())
    }
}

/// An object whose keys are JSON encodings of `key` inhabitants and whose
/// values inhabit `value`.
///
/// # Example
///
/// ```
/// use typeshape::{types, Value};
///
/// let scores = types::map(types::uint8(), types::string());
/// assert!(scores.accepts(&Value::object([("1", Value::from("one"))])));
/// assert!(!scores.accepts(&Value::object([("one", Value::from("one"))])));
/// ```
pub fn map(key: Type, value: Type) -> Type {
    let name = format!("Map({},{})", key.name(), value.name());
    let description = format!("a map from `{}`s to `{}`s", key.name(), value.name());
    Type::new(MapOf { key, value })
        .named(name)
        .describe(description)
}
