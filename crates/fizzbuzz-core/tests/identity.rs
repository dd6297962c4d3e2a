#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fizzbuzz_core::identity::{decode, encode};
use fizzbuzz_core::{FizzBuzzError, ParameterSet};

#[test]
fn decode_restores_encoded_sets() {
    let sets = [
        ParameterSet::new(3, 5, 100, "fizz", "buzz").unwrap(),
        ParameterSet::new(1, 1, 0, "a", "a").unwrap(),
        ParameterSet::new(7, 2, -42, "x y", "é&=").unwrap(),
        ParameterSet::new(i64::MAX, 9, i64::MIN, "min", "max").unwrap(),
    ];

    for p in sets {
        let key = encode(&p);
        assert_eq!(decode(&key).unwrap(), p, "key={key}");
    }
}

#[test]
fn too_few_fields_is_rejected() {
    for key in ["", "3", "3-5-100", "3-5-100-fizz"] {
        match decode(key) {
            Err(FizzBuzzError::Serialization { field, .. }) => assert_eq!(field, "key", "key={key}"),
            other => panic!("key={key}: unexpected {other:?}"),
        }
    }
}

#[test]
fn unparsable_field_is_named() {
    let cases = [
        ("x-5-100-fizz-buzz", "int1"),
        ("3-y-100-fizz-buzz", "int2"),
        ("3-5-z-fizz-buzz", "limit"),
        ("3-5-1-2-fizz-buzz", "limit"),
    ];
    for (key, expected) in cases {
        match decode(key) {
            Err(FizzBuzzError::Serialization { field, .. }) => assert_eq!(field, expected, "key={key}"),
            other => panic!("key={key}: unexpected {other:?}"),
        }
    }
}
