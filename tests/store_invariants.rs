//! Store invariant tests
//!
//! Mutations are atomic: they fully succeed, or they fail and leave the
//! prior state untouched. Defaults and overrides always conform to the
//! owning variable's type.

use shotvars::codec::{self, CodecError, VarType, VarValue};
use shotvars::store::{StoreError, VariableStore};

/// A failed default edit must not change the stored value.
#[test]
fn test_failed_default_update_is_a_no_op() {
    let mut store = VariableStore::new();
    store.add_variable("speed", VarType::Float, "3.5").unwrap();

    let result = store.update_default("speed", "abc");
    assert_eq!(
        result,
        Err(StoreError::Codec(CodecError::InvalidNumber("abc".into())))
    );
    assert_eq!(store.get("speed").unwrap().default(), &VarValue::Float(3.5));
}

/// An out-of-range color override must not touch the override map.
#[test]
fn test_failed_color_override_is_a_no_op() {
    let mut store = VariableStore::new();
    store.add_variable("tint", VarType::Color, "255, 0, 0").unwrap();
    assert_eq!(
        store.get("tint").unwrap().default(),
        &VarValue::Color([255, 0, 0])
    );

    store.set_override("tint", "shot01", "0,0,0").unwrap();
    let result = store.set_override("tint", "shot01", "0,0,300");
    assert_eq!(
        result,
        Err(StoreError::Codec(CodecError::ColorComponentOutOfRange(300)))
    );

    let overrides = store.overrides("tint").unwrap();
    assert_eq!(
        overrides,
        vec![("shot01".to_string(), VarValue::Color([0, 0, 0]))]
    );
}

/// Re-adding an existing name fails and keeps the original entry.
#[test]
fn test_duplicate_add_keeps_original() {
    let mut store = VariableStore::new();
    store.add_variable("fps", VarType::Integer, "24").unwrap();

    assert_eq!(
        store.add_variable("fps", VarType::Float, "25.0"),
        Err(StoreError::DuplicateName("fps".into()))
    );
    let fps = store.get("fps").unwrap();
    assert_eq!(fps.var_type(), VarType::Integer);
    assert_eq!(fps.default(), &VarValue::Integer(24));
}

/// Deleting a variable drops every override with it.
#[test]
fn test_delete_cascades_to_overrides() {
    let mut store = VariableStore::new();
    store.add_variable("tint", VarType::Color, "255,0,0").unwrap();
    store.set_override("tint", "shot01", "0,0,0").unwrap();
    store.set_override("tint", "shot02", "10,20,30").unwrap();

    store.delete_variable("tint").unwrap();

    // The variable is gone, so its former shots resolve to unknown-variable;
    // re-adding under the same name starts from an empty override map.
    assert_eq!(
        store.delete_override("tint", "shot01"),
        Err(StoreError::UnknownVariable("tint".into()))
    );
    store.add_variable("tint", VarType::Color, "0,0,0").unwrap();
    assert!(store.overrides("tint").unwrap().is_empty());
    assert_eq!(
        store.delete_override("tint", "shot02"),
        Err(StoreError::UnknownOverride {
            variable: "tint".into(),
            shot: "shot02".into()
        })
    );
}

/// Every valid value survives a format/parse round trip.
#[test]
fn test_codec_round_trip_across_types() {
    let values = [
        VarValue::String("two words".into()),
        VarValue::Integer(0),
        VarValue::Integer(i64::MIN),
        VarValue::Float(-123.456),
        VarValue::Boolean(true),
        VarValue::Color([0, 255, 17]),
        VarValue::Vector([-1.5, 0.0, 9.75]),
    ];
    for value in values {
        let text = codec::format(&value);
        let parsed = codec::parse(value.var_type(), &text).unwrap();
        assert_eq!(parsed, value, "round trip through {:?}", text);
    }
}
