//! types::strings
//!
//! String-shaped descriptors: arbitrary strings, hex byte strings, and
//! ISO-8601 date strings.
//!
//! # Known defect
//!
//! [`date`] does not satisfy the self-consistency law. Its test expects an
//! ISO-8601 string, but its sampler renders timestamps in the human-readable
//! `Www Mmm dd yyyy hh:mm:ss GMT+zzzz` form. This is kept as is and covered by
//! a test; do not rely on `date()` samples passing `date()`'s own test.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;

use crate::core::descriptor::{SampleMode, Type, TypeDescriptor, Verdict};
use crate::core::sampling::{below, printable, syllable, unit};
use crate::core::value::Value;

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-[01]\d-[0-3]\dT[0-2]\d:[0-5]\d:[0-5]\d\.\d+([+-][0-2]\d:[0-5]\d|Z)")
        .expect("ISO-8601 date pattern")
});

struct StringType;

impl TypeDescriptor for StringType {
    fn form(&self) -> String {
        "a plain string".into()
    }

    fn test(&self, value: &Value) -> Verdict {
        matches!(value, Value::String(_)).into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        let text = match mode {
            SampleMode::Compact => {
                let count = below(rng, 6);
                (0..count).map(|_| syllable(rng)).collect()
            }
            SampleMode::Full => {
                let count = below(rng, 64);
                (0..count).map(|_| printable(rng)).collect()
            }
        };
        Value::String(text)
    }
}

/// Any string.
pub fn string() -> Type {
    Type::new(StringType)
        .named("String")
        .describe("an UTF-8 string")
}

struct BytesType;

impl TypeDescriptor for BytesType {
    fn form(&self) -> String {
        "a string containing an even number of lowercase hex (`0123456789abcdef`) characters"
            .into()
    }

    fn test(&self, value: &Value) -> Verdict {
        value
            .as_str()
            .is_some_and(|s| s.len() % 2 == 0 && s.bytes().all(|b| HEX_DIGITS.contains(&b)))
            .into()
    }

    fn sample(&self, rng: &mut dyn RngCore, mode: SampleMode) -> Value {
        let pairs = match mode {
            SampleMode::Compact => below(rng, 4),
            SampleMode::Full => below(rng, 512),
        };
        let text = (0..pairs * 2)
            .map(|_| HEX_DIGITS[below(rng, HEX_DIGITS.len())] as char)
            .collect();
        Value::String(text)
    }
}

/// A hex-encoded byte string.
pub fn bytes() -> Type {
    Type::new(BytesType)
        .named("Bytes")
        .describe("a byte-string")
}

struct DateType;

impl TypeDescriptor for DateType {
    fn form(&self) -> String {
        "a plain string containing an ISO-8601 date".into()
    }

    fn test(&self, value: &Value) -> Verdict {
        value.as_str().is_some_and(|s| ISO_DATE.is_match(s)).into()
    }

    // Renders in the human-readable form, not ISO-8601; see the module docs.
    fn sample(&self, rng: &mut dyn RngCore, _mode: SampleMode) -> Value {
        let now = Utc::now().timestamp_millis() as f64;
        let millis = (now * (0.5 + unit(rng))) as i64;
        DateTime::<Utc>::from_timestamp_millis(millis).map_or(Value::Null, |at| {
            Value::String(at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string())
        })
    }
}

/// An ISO-8601 date string (pattern match only, not calendar-validated).
pub fn date() -> Type {
    Type::new(DateType).named("Date").describe("an UTF-8 date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_requires_even_lowercase_hex() {
        let b = bytes();
        assert!(b.accepts(&Value::from("")));
        assert!(b.accepts(&Value::from("00ff")));
        assert!(!b.accepts(&Value::from("0ff")));
        assert!(!b.accepts(&Value::from("00FF")));
        assert!(!b.accepts(&Value::from("zz")));
        assert!(!b.accepts(&Value::from(12)));
    }

    #[test]
    fn date_matches_iso_pattern_only() {
        let d = date();
        assert!(d.accepts(&Value::from("2017-03-04T12:30:00.000Z")));
        assert!(d.accepts(&Value::from("2017-03-04T12:30:00.5+02:00")));
        // Pattern match, not calendar validation.
        assert!(d.accepts(&Value::from("2017-19-39T29:30:00.0Z")));
        assert!(!d.accepts(&Value::from("2017-03-04")));
        assert!(!d.accepts(&Value::from(1_488_630_600)));
    }

    #[test]
    fn date_sample_is_not_iso() {
        let d = date();
        let sample = d.sample(SampleMode::Full);
        let text = sample.as_str().unwrap();
        assert!(text.contains("GMT"));
        assert!(!d.accepts(&sample));
    }

    #[test]
    fn compact_strings_are_syllables() {
        let s = string();
        for _ in 0..100 {
            let v = s.sample(SampleMode::Compact);
            let text = v.as_str().unwrap();
            assert!(text.len() <= 10);
            assert_eq!(text.len() % 2, 0);
        }
    }
}
