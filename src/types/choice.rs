//! types::choice
//!
//! Enumerations, optional values, and unions.

use rand::RngCore;
use tracing::warn;

use crate::core::descriptor::{SampleMode, Type, TypeDescriptor, Verdict};
use crate::core::sampling::{chance, pick};
use crate::core::value::Value;

/// Probability that `maybe` samples `null`.
const NULL_BIAS: f64 = 0.2;

struct Enumeration {
    tags: Vec<String>,
}

impl TypeDescriptor for Enumeration {
    fn form(&self) -> String {
        let quoted: Vec<String> = self
            .tags
            .iter()
            .map(|tag| serde_json::to_string(tag).unwrap_or_else(|_| tag.clone()))
            .collect();
        format!("a string on the set [{}]", quoted.join(", "))
    }

    fn test(&self, value: &Value) -> Verdict {
        value
            .as_str()
            .is_some_and(|s| self.tags.iter().any(|tag| tag == s))
            .into()
    }

    fn sample(&self, rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        match pick(rng, &self.tags) {
            Some(tag) => Value::String(tag.clone()),
            None => {
                warn!("sampling an empty enumeration, which has no inhabitants");
                Value::Null
            }
        }
    }
}

/// One of a fixed set of string tags.
///
/// # Example
///
/// ```
/// use typeshape::{types, Value};
///
/// let weapon = types::enumeration(["Sword", "Lance", "Axe"]).named("Weapon");
/// assert!(weapon.accepts(&Value::from("Axe")));
/// assert!(!weapon.accepts(&Value::from("Bow")));
/// ```
pub fn enumeration<I, S>(tags: I) -> Type
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    let name = format!("Enum({})", tags.join(","));
    let description = format!("an enum of {} values ({})", tags.len(), tags.join(", "));
    Type::new(Enumeration { tags })
        .named(name)
        .describe(description)
}

struct Maybe {
    inner: Type,
}

impl TypeDescriptor for Maybe {
    fn form(&self) -> String {
        format!("either {} or null", self.inner.form())
    }

    fn test(&self, value: &Value) -> Verdict {
        (value.is_null() || self.inner.accepts(value)).into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        if chance(rng, NULL_BIAS) {
            Value::Null
        } else {
            self.inner.sample_with(rng, mode)
        }
    }
}

/// `null` or an inhabitant of `inner`.
pub fn maybe(inner: Type) -> Type {
    let name = format!("Maybe({})", inner.name());
    let description = format!("maybe a {}", inner.name());
    Type::new(Maybe { inner })
        .named(name)
        .describe(description)
}

struct Either {
    left: Type,
    right: Type,
}

impl TypeDescriptor for Either {
    fn form(&self) -> String {
        format!("either {} or {}", self.left.form(), self.right.form())
    }

    fn test(&self, value: &Value) -> Verdict {
        (self.left.accepts(value) || self.right.accepts(value)).into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        if chance(rng, 0.5) {
            self.left.sample_with(rng, mode)
        } else {
            self.right.sample_with(rng, mode)
        }
    }
}

/// An inhabitant of either `left` or `right`.
pub fn either(left: Type, right: Type) -> Type {
    let name = format!("Either({},{})", left.name(), right.name());
    let description = format!("either a {} or a {}", left.name(), right.name());
    Type::new(Either { left, right })
        .named(name)
        .describe(description)
}
