use serde_json::Value;

/// Validate JSON values with JSON-LD semantics.
pub trait JsonLdValue {
    /// JSON-LD `@type` includes `ld_type`.
    fn type_is(&self, ld_type: &str) -> bool;
    /// Check required properties.
    fn has_props(&self, props: &[&str]) -> bool;
    /// The value is either a string, or an array of strings.
    fn is_string_array(&self) -> bool;
    /// Update the `@id` property.
    fn set_id(&mut self, id: &str);
}

impl JsonLdValue for Value {
    fn type_is(&self, ld_type: &str) -> bool {
        match self.get("@type") {
            Some(Value::String(ty)) => ty == ld_type,
            Some(Value::Array(types)) => types
                .iter()
                .any(|v| v.as_str().is_some_and(|s| s == ld_type)),
            _ => false,
        }
    }
    fn has_props(&self, props: &[&str]) -> bool {
        if let Some(map) = self.as_object() {
            return props.iter().all(|&key| map.contains_key(key));
        }
        false
    }
    fn is_string_array(&self) -> bool {
        if self.is_string() {
            return true;
        }
        if let Some(array) = self.as_array() {
            return array.iter().all(|v| v.is_string());
        }
        false
    }
    fn set_id(&mut self, id: &str) {
        if let Some(map) = self.as_object_mut() {
            map.insert("@id".to_string(), Value::String(id.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::JsonLdValue;

    #[test]
    fn type_matches_string_and_array() {
        let single = json!({"@type": "annal:Collection"});
        assert!(single.type_is("annal:Collection"));
        assert!(!single.type_is("annal:Site"));

        let multi = json!({"@type": ["annal:RecordType", "annal:EntityRoot"]});
        assert!(multi.type_is("annal:RecordType"));
        assert!(multi.type_is("annal:EntityRoot"));
        assert!(!multi.type_is("annal:Collection"));
    }

    #[test]
    fn props_and_string_arrays() {
        let value = json!({"@id": "c/coll1/", "rdfs:label": "C1", "tags": ["a", "b"]});
        assert!(value.has_props(&["@id", "rdfs:label"]));
        assert!(!value.has_props(&["@id", "annal:id"]));
        assert!(value.get("tags").unwrap().is_string_array());
        assert!(!json!([1, 2]).is_string_array());
    }

    #[test]
    fn set_id_replaces() {
        let mut value = json!({"@id": "old/"});
        value.set_id("c/coll1/");
        assert_eq!(value.get("@id").unwrap(), "c/coll1/");
    }
}
