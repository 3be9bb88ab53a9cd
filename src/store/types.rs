//! Variable and snapshot definitions plus their persisted JSON form
//!
//! The persisted layout is a single object keyed by variable name:
//!
//! ```json
//! {
//!   "variables": {
//!     "tint": {
//!       "type": "color",
//!       "default": [255, 0, 0],
//!       "overrides": { "shot01": [0, 0, 0] }
//!     }
//!   }
//! }
//! ```
//!
//! Variable order and override order follow insertion order, in memory and
//! on disk.

use serde_json::{json, Map, Value};

use super::errors::{StoreError, StoreResult};
use crate::codec::{VarType, VarValue};

/// A named, typed variable with a default value and per-shot overrides.
///
/// The type is fixed at creation; the default and every override always
/// conform to it. Instances are only mutated through
/// [`VariableStore`](super::VariableStore) operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(super) name: String,
    pub(super) var_type: VarType,
    pub(super) default: VarValue,
    pub(super) overrides: Vec<(String, VarValue)>,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn var_type(&self) -> VarType {
        self.var_type
    }

    pub fn default(&self) -> &VarValue {
        &self.default
    }

    /// Overrides in insertion order; each shot id appears at most once.
    pub fn overrides(&self) -> &[(String, VarValue)] {
        &self.overrides
    }

    /// Looks up the override for one shot.
    pub fn override_for(&self, shot_id: &str) -> Option<&VarValue> {
        self.overrides
            .iter()
            .find(|(shot, _)| shot == shot_id)
            .map(|(_, value)| value)
    }
}

/// The full variable set at a point in time - the unit of persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub(super) variables: Vec<Variable>,
}

impl Snapshot {
    /// Variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Renders the snapshot in its persisted JSON form.
    pub fn to_json(&self) -> Value {
        let mut variables = Map::new();
        for variable in &self.variables {
            let mut overrides = Map::new();
            for (shot, value) in &variable.overrides {
                overrides.insert(shot.clone(), value.to_json());
            }

            let mut entry = Map::new();
            entry.insert("type".into(), json!(variable.var_type));
            entry.insert("default".into(), variable.default.to_json());
            entry.insert("overrides".into(), Value::Object(overrides));
            variables.insert(variable.name.clone(), Value::Object(entry));
        }

        let mut root = Map::new();
        root.insert("variables".into(), Value::Object(variables));
        Value::Object(root)
    }

    /// Decodes a persisted snapshot.
    ///
    /// A missing `variables` key yields an empty snapshot. Structural
    /// problems fail with [`StoreError::MalformedSnapshot`]; values that do
    /// not decode under their declared type fail with the matching codec
    /// error.
    pub fn from_json(value: &Value) -> StoreResult<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| StoreError::MalformedSnapshot("top level must be an object".into()))?;

        let entries = match root.get("variables") {
            None => return Ok(Snapshot::default()),
            Some(v) => v.as_object().ok_or_else(|| {
                StoreError::MalformedSnapshot("'variables' must be an object".into())
            })?,
        };

        let mut variables = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            variables.push(decode_variable(name, entry)?);
        }
        Ok(Snapshot { variables })
    }
}

fn decode_variable(name: &str, entry: &Value) -> StoreResult<Variable> {
    let fields = entry.as_object().ok_or_else(|| {
        StoreError::MalformedSnapshot(format!("variable '{}' must be an object", name))
    })?;

    let type_field = fields.get("type").ok_or_else(|| {
        StoreError::MalformedSnapshot(format!("variable '{}' is missing 'type'", name))
    })?;
    let var_type: VarType = serde_json::from_value(type_field.clone()).map_err(|_| {
        StoreError::MalformedSnapshot(format!("variable '{}' has unknown type {}", name, type_field))
    })?;

    let default_field = fields.get("default").ok_or_else(|| {
        StoreError::MalformedSnapshot(format!("variable '{}' is missing 'default'", name))
    })?;
    let default = VarValue::from_json(var_type, default_field)?;

    let mut overrides = Vec::new();
    if let Some(raw) = fields.get("overrides") {
        let entries = raw.as_object().ok_or_else(|| {
            StoreError::MalformedSnapshot(format!("overrides of '{}' must be an object", name))
        })?;
        for (shot, value) in entries {
            overrides.push((shot.clone(), VarValue::from_json(var_type, value)?));
        }
    }

    Ok(Variable {
        name: name.to_string(),
        var_type,
        default,
        overrides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VariableStore;

    fn sample_snapshot() -> Snapshot {
        let mut store = VariableStore::new();
        store
            .add_variable("speed", VarType::Float, "3.5")
            .unwrap();
        store
            .add_variable("tint", VarType::Color, "255, 0, 0")
            .unwrap();
        store.set_override("tint", "shot01", "0, 0, 0").unwrap();
        store
            .add_variable("comment", VarType::String, "wip")
            .unwrap();
        store.snapshot()
    }

    #[test]
    fn test_wire_round_trip() {
        let snapshot = sample_snapshot();
        let json = snapshot.to_json();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_wire_layout() {
        let json = sample_snapshot().to_json();
        assert_eq!(json["variables"]["speed"]["type"], "float");
        assert_eq!(json["variables"]["speed"]["default"], 3.5);
        assert_eq!(json["variables"]["tint"]["default"], json!([255, 0, 0]));
        assert_eq!(
            json["variables"]["tint"]["overrides"]["shot01"],
            json!([0, 0, 0])
        );
    }

    #[test]
    fn test_variable_order_preserved() {
        let json = sample_snapshot().to_json();
        let names: Vec<&String> = json["variables"].as_object().unwrap().keys().collect();
        assert_eq!(names, ["speed", "tint", "comment"]);
    }

    #[test]
    fn test_missing_variables_key_is_empty() {
        assert!(Snapshot::from_json(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_missing_overrides_key_tolerated() {
        let json = json!({
            "variables": {
                "speed": { "type": "float", "default": 1.0 }
            }
        });
        let snapshot = Snapshot::from_json(&json).unwrap();
        assert!(snapshot.variables()[0].overrides().is_empty());
    }

    #[test]
    fn test_malformed_documents_rejected() {
        assert!(Snapshot::from_json(&json!([])).is_err());
        assert!(Snapshot::from_json(&json!({ "variables": 3 })).is_err());
        assert!(Snapshot::from_json(&json!({ "variables": { "x": 3 } })).is_err());
        assert!(Snapshot::from_json(&json!({
            "variables": { "x": { "type": "rgb", "default": 1 } }
        }))
        .is_err());
        assert!(Snapshot::from_json(&json!({
            "variables": { "x": { "type": "integer" } }
        }))
        .is_err());
    }

    #[test]
    fn test_value_type_mismatch_rejected() {
        let json = json!({
            "variables": {
                "tint": { "type": "color", "default": [0, 0, 300], "overrides": {} }
            }
        });
        assert!(matches!(
            Snapshot::from_json(&json),
            Err(StoreError::Codec(_))
        ));
    }
}
