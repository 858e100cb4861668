//! Survey form state: field edits, multi-select toggles and submission.
//!
//! Submission is split into [`FormState::begin_submit`] and
//! [`FormState::finish_submit`] so a caller holding the form behind a lock
//! can release it while the insert is in flight. [`FormState::submit`]
//! composes the two for callers that own the form outright.

use serde::{Deserialize, Serialize};

use crate::acknowledgement::Acknowledgement;
use crate::error::CoreError;
use crate::response::{non_blank, NewSurveyResponse};
use crate::store::ResponseStore;
use crate::survey::{normalize_confidence, LifecycleStage, LiteracyLevel, TrainingMethod, Unit};
use crate::types::Timestamp;

/// Shown when name or unit is missing at submit time.
pub const MISSING_IDENTITY_MESSAGE: &str = "Please enter your name and unit before submitting.";

/// Shown when the record store rejects or fails an insert.
pub const SAVE_FAILED_MESSAGE: &str =
    "Something went wrong saving your response. Please try again.";

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// The respondent's answers as they are being filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyForm {
    pub name: String,
    pub unit: Option<Unit>,
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
}

impl SurveyForm {
    /// Check the required fields, returning the trimmed name and the unit.
    pub fn identity(&self) -> Result<(String, Unit), CoreError> {
        match (non_blank(&self.name), self.unit) {
            (Some(name), Some(unit)) => Ok((name.to_string(), unit)),
            _ => Err(CoreError::Validation(MISSING_IDENTITY_MESSAGE.to_string())),
        }
    }

    /// Map the form onto the `responses` row schema.
    pub fn to_row(&self, submitted_at: Timestamp) -> Result<NewSurveyResponse, CoreError> {
        let (name, unit) = self.identity()?;
        let confidence = match self.confidence {
            Some(raw) => normalize_confidence(raw)?,
            None => None,
        };

        Ok(NewSurveyResponse {
            name,
            unit,
            reporting_reality: self.reporting_reality.clone(),
            unused_reports: self.unused_reports.clone(),
            blindspot: self.blindspot.clone(),
            confidence,
            distrust_source: self.distrust_source.clone(),
            urgent_periods: self.urgent_periods.clone(),
            magic_wand: self.magic_wand.clone(),
            literacy_level: self.literacy_level,
            training_methods: self.training_methods.clone(),
            underused_tools: self.underused_tools.clone(),
            lifecycle_role: self.lifecycle_role.clone(),
            lifecycle_data: self.lifecycle_data.clone(),
            data_contact: self.data_contact.clone(),
            submitted_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Replace a single field. Serialized as `{ "field": ..., "value": ... }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Name(String),
    Unit(Option<Unit>),
    ReportingReality(String),
    UnusedReports(String),
    Blindspot(String),
    /// `0` clears the rating.
    Confidence(u8),
    DistrustSource(String),
    UrgentPeriods(String),
    MagicWand(String),
    LiteracyLevel(Option<LiteracyLevel>),
    TrainingMethods(Vec<TrainingMethod>),
    UnderusedTools(String),
    LifecycleRole(Vec<LifecycleStage>),
    LifecycleData(String),
    DataContact(String),
}

/// Flip one value in a multi-select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ArrayToggle {
    TrainingMethods(TrainingMethod),
    LifecycleRole(LifecycleStage),
}

/// Remove `value` if present, otherwise append it.
fn toggle_value<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Insert payload handed out by [`FormState::begin_submit`].
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub row: NewSurveyResponse,
}

impl PendingSubmission {
    pub fn acknowledgement(&self) -> Acknowledgement {
        Acknowledgement::new(self.row.name.clone(), self.row.unit)
    }
}

/// Result of a full submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Row inserted; carries who submitted for the thank-you view.
    Saved(Acknowledgement),
    /// Required fields missing; the store was not contacted.
    Rejected,
    /// The store call failed; the form is intact for another attempt.
    Failed,
    /// A submission is already in flight.
    Busy,
}

/// The form record plus UI-only flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub form: SurveyForm,
    pub submitting: bool,
    pub error: Option<String>,
    pub intro_shown: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            form: SurveyForm::default(),
            submitting: false,
            error: None,
            intro_shown: true,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave the intro screen.
    pub fn begin(&mut self) {
        self.intro_shown = false;
    }

    pub fn update(&mut self, update: FieldUpdate) -> Result<(), CoreError> {
        let form = &mut self.form;
        match update {
            FieldUpdate::Name(v) => form.name = v,
            FieldUpdate::Unit(v) => form.unit = v,
            FieldUpdate::ReportingReality(v) => form.reporting_reality = v,
            FieldUpdate::UnusedReports(v) => form.unused_reports = v,
            FieldUpdate::Blindspot(v) => form.blindspot = v,
            FieldUpdate::Confidence(raw) => form.confidence = normalize_confidence(raw)?,
            FieldUpdate::DistrustSource(v) => form.distrust_source = v,
            FieldUpdate::UrgentPeriods(v) => form.urgent_periods = v,
            FieldUpdate::MagicWand(v) => form.magic_wand = v,
            FieldUpdate::LiteracyLevel(v) => form.literacy_level = v,
            FieldUpdate::TrainingMethods(v) => form.training_methods = v,
            FieldUpdate::UnderusedTools(v) => form.underused_tools = v,
            FieldUpdate::LifecycleRole(v) => form.lifecycle_role = v,
            FieldUpdate::LifecycleData(v) => form.lifecycle_data = v,
            FieldUpdate::DataContact(v) => form.data_contact = v,
        }
        Ok(())
    }

    pub fn toggle(&mut self, toggle: ArrayToggle) {
        match toggle {
            ArrayToggle::TrainingMethods(v) => toggle_value(&mut self.form.training_methods, v),
            ArrayToggle::LifecycleRole(v) => toggle_value(&mut self.form.lifecycle_role, v),
        }
    }

    /// Validate and mark the form as submitting.
    ///
    /// Returns `Validation` (with the inline error set) when name or unit is
    /// missing, and `Conflict` when a submission is already in flight.
    pub fn begin_submit(&mut self, now: Timestamp) -> Result<PendingSubmission, CoreError> {
        if self.submitting {
            return Err(CoreError::Conflict(
                "A submission is already in progress".to_string(),
            ));
        }

        let row = match self.form.to_row(now) {
            Ok(row) => row,
            Err(e) => {
                self.error = Some(match &e {
                    CoreError::Validation(msg) => msg.clone(),
                    other => other.to_string(),
                });
                return Err(e);
            }
        };

        self.submitting = true;
        self.error = None;
        Ok(PendingSubmission { row })
    }

    /// Record the store's answer for a pending submission.
    ///
    /// A saved submission starts the form over from a blank draft with the
    /// intro showing; a failed one keeps every answer.
    pub fn finish_submit(
        &mut self,
        pending: &PendingSubmission,
        result: Result<(), CoreError>,
    ) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(unit = %pending.row.unit, "Survey response saved");
                *self = FormState::new();
                SubmitOutcome::Saved(pending.acknowledgement())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    unit = %pending.row.unit,
                    "Failed to save survey response",
                );
                self.error = Some(SAVE_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate, insert once, and settle the flags.
    pub async fn submit(&mut self, store: &dyn ResponseStore, now: Timestamp) -> SubmitOutcome {
        let pending = match self.begin_submit(now) {
            Ok(p) => p,
            Err(CoreError::Conflict(_)) => return SubmitOutcome::Busy,
            Err(_) => return SubmitOutcome::Rejected,
        };
        let result = store.insert_response(&pending.row).await;
        self.finish_submit(&pending, result)
    }
}
