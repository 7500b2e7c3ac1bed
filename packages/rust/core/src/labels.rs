//! Label classification: group membership and label id extraction.

use serde_json::Value;

use competency_shared::{ConverterError, LabelGroup, LabelSelection, Result};

/// Key of a label entry holding the numeric id.
pub const LABEL_ID: &str = "label_id";

/// Whether `label_id` belongs to the group named `group_name`.
///
/// Unknown group names fail with [`ConverterError::InvalidArgument`].
pub fn belongs_to_group(label_id: i64, group_name: &str) -> Result<bool> {
    let group: LabelGroup = group_name.parse()?;
    Ok(group.contains(label_id))
}

/// Whether `label_id` falls into at least one enabled group.
pub fn is_selected(label_id: i64, enabled: &LabelSelection) -> bool {
    enabled.iter().any(|group| group.contains(label_id))
}

/// [`is_selected`] over group names as they come from user input.
pub fn is_selected_by_name<'n>(
    label_id: i64,
    group_names: impl IntoIterator<Item = &'n str>,
) -> Result<bool> {
    let enabled = group_names
        .into_iter()
        .map(str::parse::<LabelGroup>)
        .collect::<Result<LabelSelection>>()?;
    Ok(is_selected(label_id, &enabled))
}

/// Read the label ids of a sentence's `label` field, in order.
///
/// The field is either a list of label mappings, each contributing one id,
/// or a single label mapping. Only the first entry of each mapping is read:
/// `[{"Analysieren": {"label_id": 14}}, {"...": {"label_id": 103}}]` → `[14, 103]`.
pub fn label_ids(label: &Value, context: &str) -> Result<Vec<i64>> {
    match label {
        Value::Array(entries) => entries
            .iter()
            .map(|entry| first_label_id(entry, context))
            .collect(),
        Value::Object(_) => Ok(vec![first_label_id(label, context)?]),
        _ => Err(ConverterError::missing_field(LABEL_ID, context)),
    }
}

/// The `label_id` must be a JSON integer; `12.0` is rejected.
fn first_label_id(entry: &Value, context: &str) -> Result<i64> {
    entry
        .as_object()
        .and_then(|map| map.values().next())
        .and_then(|first| first.get(LABEL_ID))
        .and_then(Value::as_i64)
        .ok_or_else(|| ConverterError::missing_field(LABEL_ID, context))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const INTERVALS: [(&str, i64, i64); 5] = [
        ("non_op", -1, 0),
        ("process", 10, 16),
        ("knowledge", 100, 104),
        ("inductive", 1000, 1077),
        ("non_cog", 10000, 100033),
    ];

    fn probe_ids() -> Vec<i64> {
        let mut ids: Vec<i64> = (-5..=20).collect();
        ids.extend(95..=110);
        ids.extend(995..=1085);
        ids.extend([9_999, 10_000, 10_001, 50_000, 100_032, 100_033, 100_034, 1_000_000]);
        ids
    }

    #[test]
    fn single_group_matches_interval() {
        for (name, lower, upper) in INTERVALS {
            let group: LabelGroup = name.parse().expect("known group");
            let selection: LabelSelection = [group].into_iter().collect();
            for id in probe_ids() {
                let expected = lower < id && id <= upper;
                assert_eq!(is_selected(id, &selection), expected, "{name} / {id}");
                assert_eq!(belongs_to_group(id, name).expect("known group"), expected);
            }
        }
    }

    #[test]
    fn ids_outside_every_interval_are_never_selected() {
        let all = LabelSelection::all();
        for id in [-1, 1, 10, 17, 100, 105, 1000, 1078, 10000, 100034] {
            assert!(!is_selected(id, &all), "{id}");
        }
        let empty: LabelSelection = std::iter::empty().collect();
        assert!(!is_selected(14, &empty));
    }

    #[test]
    fn groups_are_pairwise_disjoint() {
        for id in probe_ids() {
            let matches = LabelGroup::ALL
                .into_iter()
                .filter(|group| group.contains(id))
                .count();
            assert!(matches <= 1, "{id} matched {matches} groups");
        }
    }

    #[test]
    fn unknown_group_name_is_invalid_argument() {
        let err = belongs_to_group(12, "affective").unwrap_err();
        assert!(matches!(err, ConverterError::InvalidArgument { .. }));

        let err = is_selected_by_name(12, ["process", "affective"]).unwrap_err();
        assert!(matches!(err, ConverterError::InvalidArgument { .. }));
    }

    #[test]
    fn selection_by_name() {
        assert!(is_selected_by_name(12, ["process"]).expect("valid"));
        assert!(!is_selected_by_name(12, ["non_op"]).expect("valid"));
        assert!(is_selected_by_name(0, ["knowledge", "non_op"]).expect("valid"));
    }

    #[test]
    fn label_ids_from_list_of_entries() {
        let label = json!([
            {"Analysieren": {"label_id": 14}},
            {"Konzeptuelles Wissen": {"label_id": 102, "extra": true}}
        ]);
        assert_eq!(label_ids(&label, "test").expect("ids"), vec![14, 102]);
        assert!(label_ids(&json!([]), "test").expect("ids").is_empty());
    }

    #[test]
    fn label_ids_from_single_mapping_reads_first_entry() {
        let label = json!({
            "Anwenden": {"label_id": 13},
            "Erinnern": {"label_id": 11}
        });
        assert_eq!(label_ids(&label, "test").expect("ids"), vec![13]);
    }

    #[test]
    fn label_ids_missing_id_is_missing_field() {
        let err = label_ids(&json!([{"Analysieren": {"name": "x"}}]), "variant #0").unwrap_err();
        assert!(matches!(err, ConverterError::MissingField { .. }));
        assert!(err.to_string().contains("variant #0"));

        assert!(label_ids(&json!("14"), "test").is_err());
        assert!(label_ids(&json!([{"Anwenden": {"label_id": 12.0}}]), "test").is_err());
        assert!(label_ids(&json!({}), "test").is_err());
    }
}
