//! Classification view: transformed sentence → selected label ids.

use serde_json::Value;
use tracing::{debug, instrument};

use competency_shared::{ClassificationRecord, ConverterError, LabelSelection, Language, Result};

use crate::extract::extract;
use crate::labels::{is_selected, label_ids};
use crate::transformation::TRANSFORMATION_DEPTH;

/// Depth of the translation-variant records.
pub const CLASSIFICATION_DEPTH: usize = TRANSFORMATION_DEPTH + 1;

/// Key holding a variant's labels.
pub const LABEL: &str = "label";

/// Build one classification pair per translation variant, in traversal order.
///
/// The sentence text comes from `text_en` for [`Language::En`] and from
/// `text_transformed` otherwise. Label ids outside `include_labels` are
/// dropped (order and duplicates of the rest are kept), and a variant left
/// with no labels produces no record.
#[instrument(skip_all, fields(include_labels = %include_labels, lang = %lang))]
pub fn build_classifications(
    dataset: &Value,
    include_labels: &LabelSelection,
    lang: Language,
) -> Result<Vec<ClassificationRecord>> {
    let text_field = lang.text_field();
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (index, variant) in extract(dataset, CLASSIFICATION_DEPTH).enumerate() {
        let context = format!("sentence variant #{index}");

        let text = variant
            .get(text_field)
            .and_then(Value::as_str)
            .ok_or_else(|| ConverterError::missing_field(text_field, &context))?;
        let label = variant
            .get(LABEL)
            .ok_or_else(|| ConverterError::missing_field(LABEL, &context))?;

        let labels: Vec<i64> = label_ids(label, &context)?
            .into_iter()
            .filter(|id| is_selected(*id, include_labels))
            .collect();

        if labels.is_empty() {
            dropped += 1;
            continue;
        }
        records.push(ClassificationRecord(text.to_string(), labels));
    }

    debug!(records = records.len(), dropped, "classification pairs built");
    Ok(records)
}
