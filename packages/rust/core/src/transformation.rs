//! Transformation view: original sentence → concatenated transformed sentences.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use competency_shared::{ConverterError, Result, TransformationRecord};

use crate::extract::extract;

/// Depth of the sentence records (one level above the translation variants).
pub const TRANSFORMATION_DEPTH: usize = 3;

/// Key holding the sentence before transformation.
pub const TEXT_BEFORE: &str = "text_before";

/// Key holding a variant's transformed sentence.
pub const TEXT_TRANSFORMED: &str = "text_transformed";

/// Build one transformation pair per sentence record, in traversal order.
///
/// Every key of a sentence record other than `text_before` is a translation
/// variant; their `text_transformed` values are joined with a single space.
#[instrument(skip_all)]
pub fn build_transformations(dataset: &Value) -> Result<Vec<TransformationRecord>> {
    let records = extract(dataset, TRANSFORMATION_DEPTH)
        .enumerate()
        .map(|(index, sentence)| transformation_pair(index, sentence))
        .collect::<Result<Vec<_>>>()?;

    debug!(records = records.len(), "transformation pairs built");
    Ok(records)
}

fn transformation_pair(index: usize, sentence: &Map<String, Value>) -> Result<TransformationRecord> {
    let original = sentence
        .get(TEXT_BEFORE)
        .and_then(Value::as_str)
        .ok_or_else(|| ConverterError::missing_field(TEXT_BEFORE, format!("sentence record #{index}")))?;

    let variants = sentence
        .iter()
        .filter(|(key, _)| key.as_str() != TEXT_BEFORE)
        .map(|(key, variant)| {
            variant
                .get(TEXT_TRANSFORMED)
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ConverterError::missing_field(
                        TEXT_TRANSFORMED,
                        format!("variant '{key}' of sentence record #{index}"),
                    )
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TransformationRecord(original.to_string(), variants.join(" ")))
}
