//! Persisted survey rows.
//!
//! Column names match the `responses` table exactly.

use serde::{Deserialize, Deserializer, Serialize};

use crate::survey::{LifecycleStage, LiteracyLevel, TrainingMethod, Unit};
use crate::types::{ResponseId, Timestamp};

/// Table the survey writes to.
pub const RESPONSES_TABLE: &str = "responses";

/// Column rows are ordered by when listing.
pub const SUBMITTED_AT_COLUMN: &str = "submitted_at";

// ---------------------------------------------------------------------------
// Entity struct (row read back from the store)
// ---------------------------------------------------------------------------

/// A row from the `responses` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub name: String,
    pub unit: Unit,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reporting_reality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unused_reports: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blindspot: String,
    #[serde(default)]
    pub confidence: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distrust_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub urgent_periods: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub magic_wand: String,
    #[serde(default)]
    pub literacy_level: Option<LiteracyLevel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub training_methods: Vec<TrainingMethod>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub underused_tools: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lifecycle_role: Vec<LifecycleStage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lifecycle_data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_contact: String,
    pub submitted_at: Timestamp,
}

impl SurveyResponse {
    pub fn has_stage(&self, stage: LifecycleStage) -> bool {
        self.lifecycle_role.contains(&stage)
    }
}

// ---------------------------------------------------------------------------
// Insert payload
// ---------------------------------------------------------------------------

/// A row to insert into `responses`. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSurveyResponse {
    pub name: String,
    pub unit: Unit,
    pub reporting_reality: String,
    pub unused_reports: String,
    pub blindspot: String,
    pub confidence: Option<u8>,
    pub distrust_source: String,
    pub urgent_periods: String,
    pub magic_wand: String,
    pub literacy_level: Option<LiteracyLevel>,
    pub training_methods: Vec<TrainingMethod>,
    pub underused_tools: String,
    pub lifecycle_role: Vec<LifecycleStage>,
    pub lifecycle_data: String,
    pub data_contact: String,
    pub submitted_at: Timestamp,
}

impl NewSurveyResponse {
    /// Attach a store-assigned id, producing the row as it would be read back.
    pub fn into_persisted(self, id: ResponseId) -> SurveyResponse {
        SurveyResponse {
            id,
            name: self.name,
            unit: self.unit,
            reporting_reality: self.reporting_reality,
            unused_reports: self.unused_reports,
            blindspot: self.blindspot,
            confidence: self.confidence,
            distrust_source: self.distrust_source,
            urgent_periods: self.urgent_periods,
            magic_wand: self.magic_wand,
            literacy_level: self.literacy_level,
            training_methods: self.training_methods,
            underused_tools: self.underused_tools,
            lifecycle_role: self.lifecycle_role,
            lifecycle_data: self.lifecycle_data,
            data_contact: self.data_contact,
            submitted_at: self.submitted_at,
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trimmed text, or `None` when blank.
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_arrays_and_text_read_as_empty() {
        let row: SurveyResponse = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Dana",
            "unit": "Registrar",
            "blindspot": null,
            "confidence": null,
            "literacy_level": null,
            "training_methods": null,
            "lifecycle_role": null,
            "submitted_at": "2026-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.unit, Unit::Registrar);
        assert!(row.blindspot.is_empty());
        assert!(row.magic_wand.is_empty());
        assert!(row.training_methods.is_empty());
        assert!(row.lifecycle_role.is_empty());
        assert_eq!(row.confidence, None);
    }

    #[test]
    fn tags_read_from_store_strings() {
        let row: SurveyResponse = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Sam",
            "unit": "Financial Aid",
            "confidence": 4,
            "literacy_level": "2",
            "training_methods": ["peer", "trial"],
            "lifecycle_role": ["year_round", "return"],
            "submitted_at": "2026-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.literacy_level, Some(LiteracyLevel::ReadsReports));
        assert_eq!(
            row.training_methods,
            vec![TrainingMethod::Peer, TrainingMethod::Trial]
        );
        assert!(row.has_stage(LifecycleStage::YearRound));
        assert!(!row.has_stage(LifecycleStage::Transition));
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  idea "), Some("idea"));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }
}
