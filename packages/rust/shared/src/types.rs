//! Core domain types for competency dataset conversion.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConverterError, Result};

// ---------------------------------------------------------------------------
// LabelGroup
// ---------------------------------------------------------------------------

/// A named category of label ids, defined by an integer interval.
///
/// Each group covers `lower < id <= upper`. Intervals never overlap, so an id
/// belongs to at most one group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LabelGroup {
    /// Not operationalized (`id == 0`).
    NonOp,
    /// Cognitive process dimensions (`10 < id <= 16`).
    Process,
    /// Knowledge dimensions (`100 < id <= 104`).
    Knowledge,
    /// Inductive categories (`1000 < id <= 1077`).
    Inductive,
    /// Non-cognitive competencies (`10000 < id <= 100033`).
    NonCog,
}

impl LabelGroup {
    /// All groups, in table order.
    pub const ALL: [LabelGroup; 5] = [
        LabelGroup::NonOp,
        LabelGroup::Process,
        LabelGroup::Knowledge,
        LabelGroup::Inductive,
        LabelGroup::NonCog,
    ];

    /// Exclusive lower and inclusive upper bound of the group's id interval.
    pub const fn bounds(self) -> (i64, i64) {
        match self {
            LabelGroup::NonOp => (-1, 0),
            LabelGroup::Process => (10, 16),
            LabelGroup::Knowledge => (100, 104),
            LabelGroup::Inductive => (1000, 1077),
            LabelGroup::NonCog => (10000, 100033),
        }
    }

    /// Whether `label_id` falls inside this group's interval.
    pub fn contains(self, label_id: i64) -> bool {
        let (lower, upper) = self.bounds();
        lower < label_id && label_id <= upper
    }

    /// The group containing `label_id`, if any.
    pub fn of(label_id: i64) -> Option<LabelGroup> {
        Self::ALL.into_iter().find(|group| group.contains(label_id))
    }

    /// Config/CLI name of the group.
    pub fn as_str(self) -> &'static str {
        match self {
            LabelGroup::NonOp => "non_op",
            LabelGroup::Process => "process",
            LabelGroup::Knowledge => "knowledge",
            LabelGroup::Inductive => "inductive",
            LabelGroup::NonCog => "non_cog",
        }
    }

    /// Human-readable description of the category.
    pub fn description(self) -> &'static str {
        match self {
            LabelGroup::NonOp => "not operationalized",
            LabelGroup::Process => "cognitive process dimensions",
            LabelGroup::Knowledge => "knowledge dimensions",
            LabelGroup::Inductive => "inductive categories",
            LabelGroup::NonCog => "non-cognitive competency",
        }
    }
}

impl fmt::Display for LabelGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelGroup {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s.trim())
            .ok_or_else(|| {
                ConverterError::invalid_argument(format!(
                    "unknown label group '{s}': expected one of non_op, process, knowledge, inductive, non_cog"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// LabelSelection
// ---------------------------------------------------------------------------

/// The set of label groups enabled for classification output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSelection(BTreeSet<LabelGroup>);

impl LabelSelection {
    /// Selection with every group enabled.
    pub fn all() -> Self {
        Self(LabelGroup::ALL.into_iter().collect())
    }

    /// Parse a comma-separated list of group names, e.g. `"process,knowledge"`.
    pub fn parse_list(list: &str) -> Result<Self> {
        list.split(',')
            .filter(|name| !name.trim().is_empty())
            .map(str::parse::<LabelGroup>)
            .collect::<Result<BTreeSet<_>>>()
            .map(Self)
    }

    /// Whether `group` is enabled.
    pub fn contains(&self, group: LabelGroup) -> bool {
        self.0.contains(&group)
    }

    /// Enabled groups in table order.
    pub fn iter(&self) -> impl Iterator<Item = LabelGroup> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LabelSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<LabelGroup> for LabelSelection {
    fn from_iter<I: IntoIterator<Item = LabelGroup>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for LabelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(LabelGroup::as_str).collect();
        f.write_str(&names.join(","))
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Sentence language used for classification text.
///
/// Exactly `"EN"` selects the English text; any other value, including
/// `"en"`, means German.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    En,
    #[default]
    De,
}

impl Language {
    /// Name of the sentence field holding text in this language.
    pub fn text_field(self) -> &'static str {
        match self {
            Language::En => "text_en",
            Language::De => "text_transformed",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::De => "DE",
        }
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        if s == "EN" {
            Language::En
        } else {
            Language::De
        }
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::from(s.as_str())
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// `[original_text, transformed_text]` entry of `transformed_dataset.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRecord(pub String, pub String);

impl TransformationRecord {
    /// Sentence before transformation.
    pub fn original(&self) -> &str {
        &self.0
    }

    /// All transformed sentences, space-joined.
    pub fn transformed(&self) -> &str {
        &self.1
    }
}

/// `[sentence_text, [label_id, ...]]` entry of `classification_dataset.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord(pub String, pub Vec<i64>);

impl ClassificationRecord {
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Accepted label ids, in discovery order.
    pub fn labels(&self) -> &[i64] {
        &self.1
    }
}
