//! Standalone text payloads for sharing a variant between installs.

use serde::Deserialize;

use crate::{Assignments, Guest, Table, Variant};

/// Wire shape of a shared variant. `guests` is the legacy field from payloads
/// that snapshotted the roster too; it is accepted and ignored.
#[derive(Debug, Deserialize)]
struct SharePayload {
    name: String,
    tables: Vec<Table>,
    assignments: Assignments,
    #[serde(default)]
    #[allow(dead_code)]
    guests: Option<Vec<Guest>>,
}

/// Serialize a variant to a standalone payload.
pub fn export_variant(variant: &Variant) -> String {
    // Variant serializes to exactly the modern payload shape.
    serde_json::to_string_pretty(variant).unwrap_or_else(|_| "{}".to_string())
}

/// Parse a shared payload back into a variant. Every required field must be
/// present and well-formed; otherwise the payload is rejected and nothing
/// is mutated.
pub fn import_variant(payload: &str) -> Result<Variant, String> {
    let parsed: SharePayload =
        serde_json::from_str(payload).map_err(|e| format!("invalid payload: {}", e))?;
    if parsed.name.trim().is_empty() {
        return Err("invalid payload: blank variant name".to_string());
    }
    Ok(Variant {
        name: parsed.name,
        tables: parsed.tables,
        assignments: parsed.assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableShape;
    use std::collections::HashMap;

    fn sample_variant() -> Variant {
        Variant {
            name: "plan-a".to_string(),
            tables: vec![Table {
                id: "table-1".to_string(),
                shape: TableShape::Rectangle,
                capacity: 8,
            }],
            assignments: HashMap::from([(
                "table-1".to_string(),
                HashMap::from([("seat-1".to_string(), "g1".to_string())]),
            )]),
        }
    }

    #[test]
    fn export_then_import_round_trips() {
        let variant = sample_variant();
        let payload = export_variant(&variant);
        let restored = import_variant(&payload).unwrap();
        assert_eq!(restored, variant);
    }

    #[test]
    fn import_rejects_payload_missing_tables() {
        let payload = r#"{"name":"plan-a","assignments":{}}"#;
        assert!(import_variant(payload).is_err());
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(import_variant("not json").is_err());
        assert!(import_variant(r#"{"name":"x","tables":{},"assignments":{}}"#).is_err());
    }

    #[test]
    fn import_tolerates_legacy_guests_field() {
        let payload = r#"{
            "name": "legacy",
            "tables": [],
            "assignments": {},
            "guests": [{"id":"g1","name":"Ada","category":"guest-common-friends"}]
        }"#;
        let variant = import_variant(payload).unwrap();
        assert_eq!(variant.name, "legacy");
        assert!(variant.tables.is_empty());
    }
}
