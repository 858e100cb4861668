//! Confirmation screen shown after a successful submission.

use serde::Serialize;

use crate::survey::Unit;

/// Who just submitted. Carried from the form into the thank-you view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub name: String,
    pub unit: Unit,
}

/// Rendered copy for the thank-you view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcknowledgementView {
    pub name: String,
    pub unit: Unit,
    pub headline: String,
    pub message: String,
}

impl Acknowledgement {
    pub fn new(name: impl Into<String>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            unit,
        }
    }

    /// First whitespace-separated token of the name.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn render(&self) -> AcknowledgementView {
        AcknowledgementView {
            name: self.name.clone(),
            unit: self.unit,
            headline: format!("Thank you, {}.", self.first_name()),
            message: format!(
                "Your responses for {} are in. They will be used to prepare for our \
                 one-on-one conversation.",
                self.unit
            ),
        }
    }
}
