//! Raw competency dataset loading.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument};

use competency_shared::{ConverterError, Result};

/// Top-level key of the human-readable label table.
pub const LABEL_LOOKUP: &str = "label_lookup";

/// Read and parse the raw dataset at `path`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_dataset(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConverterError::read(path, e))?;

    let dataset: Value = serde_json::from_str(&content)
        .map_err(|e| ConverterError::parse(format!("invalid JSON in {}: {e}", path.display())))?;

    info!(bytes = content.len(), "loaded raw dataset");
    Ok(dataset)
}

/// Remove the top-level `label_lookup` entry so traversal does not treat it as data.
///
/// Returns the removed table. When it is absent this fails with
/// [`ConverterError::MissingField`] if `required`, and is a no-op otherwise.
/// The order of the remaining top-level entries is preserved.
pub fn strip_label_lookup(dataset: &mut Value, required: bool) -> Result<Option<Value>> {
    let removed = dataset
        .as_object_mut()
        .and_then(|root| root.shift_remove(LABEL_LOOKUP));

    match removed {
        Some(lookup) => {
            debug!(
                entries = lookup.as_object().map_or(0, |table| table.len()),
                "removed label lookup table"
            );
            Ok(Some(lookup))
        }
        None if required => Err(ConverterError::missing_field(LABEL_LOOKUP, "dataset root")),
        None => {
            debug!("no label lookup table present");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cc-dataset-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn strip_removes_lookup_and_keeps_order() {
        let mut dataset = json!({
            "Informatik": {},
            "label_lookup": {"11": "Erinnern"},
            "Mathematik": {},
            "Physik": {}
        });

        let lookup = strip_label_lookup(&mut dataset, true).unwrap();
        assert_eq!(lookup, Some(json!({"11": "Erinnern"})));

        let keys: Vec<&str> = dataset
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["Informatik", "Mathematik", "Physik"]);
    }

    #[test]
    fn strip_missing_lookup_strict_and_lenient() {
        let mut dataset = json!({"Informatik": {}});

        let err = strip_label_lookup(&mut dataset, true).unwrap_err();
        assert!(matches!(err, ConverterError::MissingField { ref field, .. } if field == LABEL_LOOKUP));

        assert_eq!(strip_label_lookup(&mut dataset, false).unwrap(), None);
        assert_eq!(dataset, json!({"Informatik": {}}));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = temp_dir();
        let err = load_dataset(&tmp.join("competency_dataset.json")).unwrap_err();
        assert!(matches!(err, ConverterError::NotFound { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let tmp = temp_dir();
        let path = tmp.join("competency_dataset.json");
        std::fs::write(&path, "{\"Informatik\": ").unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, ConverterError::Parse { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_preserves_document_order() {
        let tmp = temp_dir();
        let path = tmp.join("competency_dataset.json");
        std::fs::write(&path, r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();

        let dataset = load_dataset(&path).unwrap();
        let keys: Vec<&String> = dataset.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
