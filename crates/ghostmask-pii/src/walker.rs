//! Redaction of structured JSON documents

use crate::counts::RedactionCounts;
use crate::engine::{RedactionEngine, Redactor};
use serde_json::Value;

impl Redactor {
    /// Redact every string leaf of `value` in place.
    ///
    /// Object keys, numbers, booleans and null are left untouched.
    pub fn redact_value_into(&self, value: &mut Value, counts: &mut RedactionCounts) {
        match value {
            Value::String(text) => *text = self.redact_into(text, counts),
            Value::Array(items) => {
                for item in items {
                    self.redact_value_into(item, counts);
                }
            }
            Value::Object(map) => {
                for item in map.values_mut() {
                    self.redact_value_into(item, counts);
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

impl RedactionEngine {
    /// Redact every string leaf of `value` in place, accumulating counts
    pub fn redact_value(&mut self, value: &mut Value) {
        self.redactor.redact_value_into(value, &mut self.counts);
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::RedactionConfig;
    use crate::redactor::RedactionMode;
    use crate::RedactionEngine;
    use serde_json::json;

    #[test]
    fn test_redacts_nested_strings() {
        let mut engine =
            RedactionEngine::new(&RedactionConfig::new(RedactionMode::Tag)).unwrap();

        let mut doc = json!({
            "user": {
                "email": "ab@example.com",
                "contacts": ["cd@example.com", "no pii here"]
            },
            "note": "server 10.1.2.3"
        });
        engine.redact_value(&mut doc);

        assert_eq!(
            doc,
            json!({
                "user": {
                    "email": "<EMAIL>",
                    "contacts": ["<EMAIL>", "no pii here"]
                },
                "note": "server <IPV4>"
            })
        );
        assert_eq!(engine.snapshot_counts()["email"], 2);
        assert_eq!(engine.snapshot_counts()["ipv4"], 1);
    }

    #[test]
    fn test_non_string_leaves_are_untouched() {
        let mut engine =
            RedactionEngine::new(&RedactionConfig::new(RedactionMode::Tag)).unwrap();

        let mut doc = json!({
            "phone": 5551234567u64,
            "active": true,
            "score": 1.5,
            "missing": null,
            "nested": [[4539148803436467u64]]
        });
        let original = doc.clone();
        engine.redact_value(&mut doc);

        assert_eq!(doc, original);
        assert!(engine.snapshot_counts().is_empty());
    }

    #[test]
    fn test_object_keys_are_not_redacted() {
        let mut engine =
            RedactionEngine::new(&RedactionConfig::new(RedactionMode::Tag)).unwrap();

        let mut doc = json!({ "ab@example.com": "value" });
        engine.redact_value(&mut doc);

        assert_eq!(doc, json!({ "ab@example.com": "value" }));
    }

    #[test]
    fn test_top_level_string() {
        let mut engine = RedactionEngine::new(&RedactionConfig::default()).unwrap();

        let mut doc = json!("mail ab@example.com");
        engine.redact_value(&mut doc);

        assert_eq!(doc, json!("mail a*@example.com"));
    }
}
