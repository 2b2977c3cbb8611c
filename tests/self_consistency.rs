//! Sample/test agreement for every built-in descriptor.
//!
//! For each descriptor `T`, every value produced by `T.sample(mode)` must be
//! accepted by `T.test`, in both sampling modes.
//!
//! # Known Exception
//!
//! `date` samples a human-readable timestamp that its own ISO-8601 test
//! rejects. That is covered by a dedicated test below so a fix shows up as
//! a deliberate change.

use typeshape::{types, SampleMode, Type, Value};

const SAMPLES: usize = 1000;

fn catalog() -> Vec<Type> {
    vec![
        types::boolean(),
        types::number(),
        types::int(1),
        types::int(12),
        types::int(53),
        types::uint(1),
        types::uint(20),
        types::uint(53),
        types::int8(),
        types::int16(),
        types::int32(),
        types::uint8(),
        types::uint16(),
        types::uint32(),
        types::between(-0.5, 0.5),
        types::between(10.0, 1_000_000.0),
        types::int_between(-3, 3),
        types::int_between(0, 0),
        types::string(),
        types::bytes(),
        types::enumeration(["Red", "Green", "Blue"]),
        types::maybe(types::uint8()),
        types::either(types::string(), types::int32()),
        types::array(types::boolean()),
        types::array(types::array(types::int8())),
        types::vector(0, types::number()),
        types::vector(3, types::string()),
        types::pair(types::uint8(), types::maybe(types::string())),
        types::map(types::string(), types::number()),
        types::structure([
            ("id", types::uint32()),
            ("label", types::string()),
            ("tags", types::array(types::enumeration(["a", "b"]))),
            ("parent", types::maybe(types::uint32())),
        ]),
    ]
}

fn assert_self_consistent(ty: &Type, mode: SampleMode, count: usize) {
    for _ in 0..count {
        let value = ty.sample(mode);
        assert!(
            ty.accepts(&value),
            "{} rejected its own {:?} sample: {:?}",
            ty.name(),
            mode,
            value
        );
    }
}

#[test]
fn compact_samples_inhabit_their_type() {
    for ty in catalog() {
        assert_self_consistent(&ty, SampleMode::Compact, SAMPLES);
    }
}

#[test]
fn full_samples_inhabit_their_type() {
    for ty in catalog() {
        assert_self_consistent(&ty, SampleMode::Full, SAMPLES);
    }
}

#[test]
fn function_contract_samples_inhabit_their_type() {
    // Each test of a contract makes many verification calls, so fewer samples.
    let contract = types::function([types::number(), types::string()], types::uint8());
    assert_self_consistent(&contract, SampleMode::Compact, 20);
    assert_self_consistent(&contract, SampleMode::Full, 20);
}

#[test]
fn compact_samples_stay_small() {
    for _ in 0..SAMPLES {
        let n = types::number().sample(SampleMode::Compact);
        assert!(n.as_f64().unwrap().abs() < 1024.0);

        let s = types::string().sample(SampleMode::Compact);
        assert!(s.as_str().unwrap().len() <= 12);

        let b = types::bytes().sample(SampleMode::Compact);
        assert!(b.as_str().unwrap().len() <= 6);

        let a = types::array(types::boolean()).sample(SampleMode::Compact);
        assert!(a.as_array().unwrap().len() < 8);
    }
}

#[test]
fn date_sample_does_not_match_date_test() {
    let date = types::date();
    let sample = date.sample(SampleMode::Compact);

    assert!(sample.as_str().is_some());
    assert!(!date.accepts(&sample));
    assert!(date.accepts(&Value::from("2017-03-09T12:34:56.789Z")));
}

#[test]
fn map_samples_are_empty() {
    let m = types::map(types::string(), types::number());
    for mode in [SampleMode::Compact, SampleMode::Full] {
        assert_eq!(m.sample(mode), Value::object(Vec::<(String, Value)>::new()));
    }
}
