//! types::primitives
//!
//! Boolean and numeric descriptors.
//!
//! # Ranges
//!
//! | Descriptor          | Accepts                                  |
//! |---------------------|------------------------------------------|
//! | `number`            | any number except NaN                    |
//! | `int(n)`            | integers in `[-2^(n-1), 2^(n-1))`        |
//! | `uint(n)`           | integers in `[0, 2^n)`                   |
//! | `between(lo, hi)`   | numbers in `[lo, hi]`                    |
//! | `int_between(lo,hi)`| 32-bit integers in `[lo, hi]`            |
//!
//! # Degenerate parameters
//!
//! - `int(0)` and `uint(0)` accept only `0`.
//! - Widths above 1023 bits test against an unbounded range (any finite
//!   integer) and sample from the 1023-bit range.
//! - `between` and `int_between` with `lo > hi` (after intersecting with the
//!   32-bit range for `int_between`) have no inhabitants. They sample `null`
//!   and log a warning, like an empty enumeration.

use rand::RngCore;
use tracing::warn;

use crate::core::descriptor::{SampleMode, Type, TypeDescriptor, Verdict};
use crate::core::sampling::{below, unit};
use crate::core::value::Value;

fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(n) if !n.is_nan())
}

fn is_integer(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.is_finite() && n.floor() == *n => Some(*n),
        _ => None,
    }
}

struct BooleanType;

impl TypeDescriptor for BooleanType {
    fn form(&self) -> String {
        "a boolean (`true` or `false`)".into()
    }

    fn test(&self, value: &Value) -> Verdict {
        matches!(value, Value::Bool(_)).into()
    }

    fn sample(&self, rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        Value::Bool(unit(rng) > 0.5)
    }
}

/// `true` or `false`.
pub fn boolean() -> Type {
    Type::new(BooleanType)
        .named("Boolean")
        .describe("a boolean")
}

struct NumberType;

impl TypeDescriptor for NumberType {
    fn form(&self) -> String {
        "a double-precision floating-point number other than NaN".into()
    }

    fn test(&self, value: &Value) -> Verdict {
        is_number(value).into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        let magnitude = 2f64.powi(below(rng, 32) as i32);
        let r = (unit(rng) - 0.5) * magnitude;
        match mode {
            SampleMode::Compact => Value::Number(((r % 1024.0) * 100.0).trunc() / 100.0),
            SampleMode::Full => Value::Number(r),
        }
    }
}

/// Any number except NaN.
pub fn number() -> Type {
    Type::new(NumberType)
        .named("Number")
        .describe("a double-precision floating-point real number")
}

/// Widest integer span whose power of two is finite.
const MAX_FINITE_BITS: u32 = 1023;

fn span(bits: u32) -> f64 {
    2f64.powi(bits.min(MAX_FINITE_BITS + 1) as i32)
}

/// Uniform integer in `[first, first + count)`.
fn integer_in(rng: &mut dyn RngCore, first: f64, count: f64) -> f64 {
    first + (unit(rng) * count).floor()
}

fn empty_range(name: &str) -> Value {
    warn!(range = name, "sampling an empty range, which has no inhabitants");
    Value::Null
}

struct Integer {
    bits: u32,
    signed: bool,
}

impl Integer {
    fn range(&self, span: f64) -> (f64, f64) {
        if self.signed {
            (-span / 2.0, span / 2.0)
        } else {
            (0.0, span)
        }
    }
}

impl TypeDescriptor for Integer {
    fn form(&self) -> String {
        if self.signed {
            format!("a non-decimal number with {} bits", self.bits)
        } else {
            format!("a non-decimal non-negative number with {} bits", self.bits)
        }
    }

    fn test(&self, value: &Value) -> Verdict {
        let (lo, hi) = self.range(span(self.bits));
        is_integer(value).is_some_and(|n| lo <= n && n < hi).into()
    }

    // Draws from the integers inside the tested range, so zero-width types
    // sample `0`.
    fn sample(&self, rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        let (lo, hi) = self.range(span(self.bits.min(MAX_FINITE_BITS)));
        let first = lo.ceil();
        Value::Number(integer_in(rng, first, (hi - first).ceil()))
    }
}

/// Signed integer of `bits` width.
pub fn int(bits: u32) -> Type {
    Type::new(Integer { bits, signed: true })
        .named(format!("Int({})", bits))
        .describe(format!("a {}-bit integer number", bits))
}

/// Unsigned integer of `bits` width.
pub fn uint(bits: u32) -> Type {
    Type::new(Integer {
        bits,
        signed: false,
    })
    .named(format!("Uint({})", bits))
    .describe(format!("a {}-bit non-negative integer number", bits))
}

pub fn int8() -> Type {
    int(8).named("Int8")
}

pub fn int16() -> Type {
    int(16).named("Int16")
}

pub fn int32() -> Type {
    int(32).named("Int32")
}

pub fn uint8() -> Type {
    uint(8).named("Uint8")
}

pub fn uint16() -> Type {
    uint(16).named("Uint16")
}

pub fn uint32() -> Type {
    uint(32).named("Uint32")
}

struct Between {
    from: f64,
    to: f64,
}

impl TypeDescriptor for Between {
    fn form(&self) -> String {
        format!("a number from {} to {}", self.from, self.to)
    }

    fn test(&self, value: &Value) -> Verdict {
        (is_number(value)
            && value
                .as_f64()
                .is_some_and(|n| self.from <= n && n <= self.to))
        .into()
    }

    fn sample(&self, rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        if self.from.is_nan() || self.to.is_nan() || self.from > self.to {
            return empty_range("Between");
        }
        Value::Number(self.from + (self.to - self.from) * unit(rng))
    }
}

/// A number in the closed range `[from, to]`.
pub fn between(from: f64, to: f64) -> Type {
    Type::new(Between { from, to })
        .named(format!("Between({},{})", from, to))
        .describe(format!("a number from {} to {}", from, to))
}

struct IntBetween {
    from: i64,
    to: i64,
    int32: Integer,
}

impl TypeDescriptor for IntBetween {
    fn form(&self) -> String {
        format!("a non-decimal number from {} to {}", self.from, self.to)
    }

    fn test(&self, value: &Value) -> Verdict {
        let in_range = value
            .as_f64()
            .is_some_and(|n| self.from as f64 <= n && n <= self.to as f64);
        (self.int32.test(value).passed() && in_range).into()
    }

    fn sample(&self, rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        let (lo, hi) = self.int32.range(span(32));
        let from = (self.from as f64).max(lo);
        let to = (self.to as f64).min(hi - 1.0);
        if from > to {
            return empty_range("IntBetween");
        }
        let offset = ((to - from) * unit(rng)).trunc();
        Value::Number(from + offset)
    }
}

/// A 32-bit integer in the closed range `[from, to]`.
pub fn int_between(from: i64, to: i64) -> Type {
    Type::new(IntBetween {
        from,
        to,
        int32: Integer {
            bits: 32,
            signed: true,
        },
    })
    .named(format!("IntBetween({},{})", from, to))
    .describe(format!("an integer number from {} to {}", from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_rejects_nan_and_non_numbers() {
        let n = number();
        assert!(n.accepts(&Value::from(1.5)));
        assert!(n.accepts(&Value::Number(f64::INFINITY)));
        assert!(!n.accepts(&Value::Number(f64::NAN)));
        assert!(!n.accepts(&Value::from("1")));
    }

    #[test]
    fn uint8_bounds() {
        let t = uint(8);
        assert!(t.accepts(&Value::from(255)));
        assert!(t.accepts(&Value::from(0)));
        assert!(!t.accepts(&Value::from(256)));
        assert!(!t.accepts(&Value::from(-1)));
        assert!(!t.accepts(&Value::from(1.5)));
    }

    #[test]
    fn int8_bounds() {
        let t = int(8);
        assert!(t.accepts(&Value::from(-128)));
        assert!(t.accepts(&Value::from(127)));
        assert!(!t.accepts(&Value::from(128)));
        assert!(!t.accepts(&Value::from(-129)));
    }

    #[test]
    fn aliases_keep_semantics() {
        assert_eq!(uint16().name(), "Uint16");
        assert!(uint16().accepts(&Value::from(65535)));
        assert!(!uint16().accepts(&Value::from(65536)));
        assert!(int32().accepts(&Value::from(-2_147_483_648_i64)));
        assert!(!int32().accepts(&Value::from(2_147_483_648_i64)));
    }

    #[test]
    fn between_is_closed() {
        let t = between(1.3, 1.7);
        assert_eq!(t.name(), "Between(1.3,1.7)");
        assert!(t.accepts(&Value::from(1.3)));
        assert!(t.accepts(&Value::from(1.7)));
        assert!(!t.accepts(&Value::from(1.71)));
    }

    #[test]
    fn int_between_requires_integers() {
        let t = int_between(16, 19);
        assert!(t.accepts(&Value::from(16)));
        assert!(t.accepts(&Value::from(19)));
        assert!(!t.accepts(&Value::from(17.5)));
        assert!(!t.accepts(&Value::from(20)));
    }

    #[test]
    fn zero_width_integers_hold_only_zero() {
        for ty in [int(0), uint(0)] {
            assert!(ty.accepts(&Value::from(0)));
            assert!(!ty.accepts(&Value::from(-1)));
            assert!(!ty.accepts(&Value::from(1)));
            for _ in 0..100 {
                assert_eq!(ty.sample(SampleMode::Full), Value::from(0));
            }
        }
    }

    #[test]
    fn huge_widths_sample_finite_integers() {
        for ty in [int(1023), int(1024), int(4096), uint(2000)] {
            for _ in 0..100 {
                let x = ty.sample(SampleMode::Full);
                assert!(x.as_f64().unwrap().is_finite());
                assert!(ty.accepts(&x), "{} rejected {:?}", ty.name(), x);
            }
        }
    }

    #[test]
    fn int_between_samples_inside_the_32_bit_range() {
        let t = int_between(i64::MIN, i64::MAX);
        for _ in 0..200 {
            assert!(t.accepts(&t.sample(SampleMode::Full)));
        }
        let top = int_between(2_147_483_647, i64::MAX);
        assert_eq!(top.sample(SampleMode::Full), Value::from(2_147_483_647_i64));
    }

    #[test]
    fn reversed_ranges_are_empty() {
        let t = int_between(5, 2);
        for n in -10..10 {
            assert!(!t.accepts(&Value::from(n)));
        }
        assert!(t.sample(SampleMode::Compact).is_null());

        let b = between(2.0, 1.0);
        assert!(!b.accepts(&Value::from(1.5)));
        assert!(b.sample(SampleMode::Compact).is_null());

        assert!(int_between(3_000_000_000, 4_000_000_000)
            .sample(SampleMode::Full)
            .is_null());
    }

    #[test]
    fn compact_numbers_have_two_decimals() {
        let n = number();
        for _ in 0..200 {
            let x = n.sample(SampleMode::Compact).as_f64().unwrap();
            assert!(x.abs() < 1024.0);
            assert!(((x * 100.0).round() - x * 100.0).abs() < 1e-6);
        }
    }
}
