//! Storage friendly presentation of an entity's property map.

use std::fmt::Display;

use serde_json::{Map, Value};

use super::json_ld::JsonLdValue;
use super::vocab;

/// The property map of one entity: property URI (or JSON-LD keyword) to
/// JSON value. Unknown properties round-trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityValues(Map<String, Value>);

impl EntityValues {
    pub fn new() -> EntityValues {
        EntityValues(Map::new())
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str(vocab::ID)
    }
    pub fn annal_id(&self) -> Option<&str> {
        self.get_str(vocab::ANNAL_ID)
    }
    pub fn type_id(&self) -> Option<&str> {
        self.get_str(vocab::ANNAL_TYPE_ID)
    }
    pub fn label(&self) -> Option<&str> {
        self.get_str(vocab::RDFS_LABEL)
    }

    pub fn type_is(&self, ty: &str) -> bool {
        self.to_value().type_is(ty)
    }
    pub fn has_props(&self, props: &[&str]) -> bool {
        props.iter().all(|&key| self.0.contains_key(key))
    }

    pub fn get(&self, prop: &str) -> Option<&Value> {
        self.0.get(prop)
    }
    pub fn get_str(&self, prop: &str) -> Option<&str> {
        self.0.get(prop).and_then(Value::as_str)
    }

    /// Insert `value` only when `prop` is absent.
    pub fn augment(mut self, prop: &str, value: Value) -> EntityValues {
        if !self.0.contains_key(prop) {
            self.0.insert(prop.to_string(), value);
        }
        self
    }

    /// Insert `value`, replacing any prior one.
    pub fn replace(mut self, prop: &str, value: Value) -> EntityValues {
        self.0.insert(prop.to_string(), value);
        self
    }

    /// Merge `map` over the current properties; its entries win.
    pub fn augment_with(mut self, map: Map<String, Value>) -> EntityValues {
        self.0.extend(map);
        self
    }

    /// Make sure `@type` is an array containing `ty`. A caller-supplied
    /// string type is promoted to a one-element array first.
    pub fn ensure_type(mut self, ty: &str) -> EntityValues {
        let types = match self.0.remove(vocab::TYPE) {
            None => vec![Value::String(ty.to_string())],
            Some(Value::String(existing)) => {
                let mut types = vec![Value::String(existing)];
                if types[0] != ty {
                    types.push(Value::String(ty.to_string()));
                }
                types
            }
            Some(Value::Array(mut types)) => {
                if !types.iter().any(|v| v.as_str().is_some_and(|s| s == ty)) {
                    types.push(Value::String(ty.to_string()));
                }
                types
            }
            Some(other) => vec![other, Value::String(ty.to_string())],
        };
        self.0.insert(vocab::TYPE.to_string(), Value::Array(types));
        self
    }

    pub fn insert(&mut self, prop: &str, value: Value) {
        self.0.insert(prop.to_string(), value);
    }
    pub fn remove(&mut self, prop: &str) -> Option<Value> {
        self.0.remove(prop)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for EntityValues {
    fn from(map: Map<String, Value>) -> Self {
        EntityValues(map)
    }
}

impl From<Value> for EntityValues {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => EntityValues(map),
            // Anything but a JSON object should have been rejected by the
            // codec; map strays to an empty property set.
            _ => EntityValues(Map::new()),
        }
    }
}

impl From<EntityValues> for Value {
    fn from(values: EntityValues) -> Self {
        Value::Object(values.0)
    }
}

impl Display for EntityValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Value::Object(self.0.clone()).fmt(f)
    }
}
