//! Fixed survey enumerations and their display labels.
//!
//! Declaration order of every `ALL` slice is the display order used by the
//! form and by every dashboard grouping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Organizational unit a respondent answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "Admissions")]
    Admissions,
    #[serde(rename = "Business Services")]
    BusinessServices,
    #[serde(rename = "Center for Pre-College Programs")]
    PreCollegePrograms,
    #[serde(rename = "Financial Aid")]
    FinancialAid,
    #[serde(rename = "One-Stop")]
    OneStop,
    #[serde(rename = "Registrar")]
    Registrar,
}

impl Unit {
    pub const ALL: [Unit; 6] = [
        Unit::Admissions,
        Unit::BusinessServices,
        Unit::PreCollegePrograms,
        Unit::FinancialAid,
        Unit::OneStop,
        Unit::Registrar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Admissions => "Admissions",
            Unit::BusinessServices => "Business Services",
            Unit::PreCollegePrograms => "Center for Pre-College Programs",
            Unit::FinancialAid => "Financial Aid",
            Unit::OneStop => "One-Stop",
            Unit::Registrar => "Registrar",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|u| u.name() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown unit '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

pub const MIN_CONFIDENCE: u8 = 1;
pub const MAX_CONFIDENCE: u8 = 5;

/// Label and emoji for each confidence rating, indexed by `rating - 1`.
const CONFIDENCE_SCALE: [(&str, &str); 5] = [
    ("We're flying blind", "😬"),
    ("It's rough — we question a lot of what we see", "😟"),
    ("Functional but we have doubts", "😐"),
    ("Pretty solid — we trust it mostly", "🙂"),
    ("We trust our data fully", "✅"),
];

/// Normalize a raw confidence rating. `0` means "not answered".
pub fn normalize_confidence(raw: u8) -> Result<Option<u8>, CoreError> {
    match raw {
        0 => Ok(None),
        MIN_CONFIDENCE..=MAX_CONFIDENCE => Ok(Some(raw)),
        _ => Err(CoreError::Validation(format!(
            "Confidence must be between {MIN_CONFIDENCE} and {MAX_CONFIDENCE}, got {raw}"
        ))),
    }
}

pub fn confidence_label(rating: u8) -> Option<&'static str> {
    let idx = usize::from(rating.checked_sub(1)?);
    CONFIDENCE_SCALE.get(idx).map(|(label, _)| *label)
}

pub fn confidence_emoji(rating: u8) -> Option<&'static str> {
    let idx = usize::from(rating.checked_sub(1)?);
    CONFIDENCE_SCALE.get(idx).map(|(_, emoji)| *emoji)
}

// ---------------------------------------------------------------------------
// Literacy
// ---------------------------------------------------------------------------

/// Self-rated data literacy of a unit's staff. Stored as `"1"`..`"5"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteracyLevel {
    #[serde(rename = "1")]
    NeedsSupport,
    #[serde(rename = "2")]
    ReadsReports,
    #[serde(rename = "3")]
    Functional,
    #[serde(rename = "4")]
    Confident,
    #[serde(rename = "5")]
    Advanced,
}

impl LiteracyLevel {
    pub const ALL: [LiteracyLevel; 5] = [
        LiteracyLevel::NeedsSupport,
        LiteracyLevel::ReadsReports,
        LiteracyLevel::Functional,
        LiteracyLevel::Confident,
        LiteracyLevel::Advanced,
    ];

    pub fn value(self) -> &'static str {
        match self {
            LiteracyLevel::NeedsSupport => "1",
            LiteracyLevel::ReadsReports => "2",
            LiteracyLevel::Functional => "3",
            LiteracyLevel::Confident => "4",
            LiteracyLevel::Advanced => "5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LiteracyLevel::NeedsSupport => {
                "Needs significant support — most staff avoid data tools without help"
            }
            LiteracyLevel::ReadsReports => {
                "Can read reports but struggles to interpret or act on them independently"
            }
            LiteracyLevel::Functional => {
                "Functional — team uses existing reports but rarely explores beyond them"
            }
            LiteracyLevel::Confident => {
                "Confident — most staff can use dashboards and tools independently"
            }
            LiteracyLevel::Advanced => {
                "Advanced — some staff build their own queries or extend existing tools"
            }
        }
    }

    /// Levels 1 and 2 are flagged on the dashboard.
    pub fn is_low(self) -> bool {
        matches!(self, LiteracyLevel::NeedsSupport | LiteracyLevel::ReadsReports)
    }
}

// ---------------------------------------------------------------------------
// Lifecycle stages
// ---------------------------------------------------------------------------

/// Which part of the student journey a unit's work touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    PreCollege,
    PreEnroll,
    Transition,
    YearRound,
    Return,
    All,
}

impl LifecycleStage {
    /// Every selectable option, including the catch-all.
    pub const ALL: [LifecycleStage; 6] = [
        LifecycleStage::PreCollege,
        LifecycleStage::PreEnroll,
        LifecycleStage::Transition,
        LifecycleStage::YearRound,
        LifecycleStage::Return,
        LifecycleStage::All,
    ];

    /// The named stages shown in the lifecycle overlap grid.
    pub const NAMED: [LifecycleStage; 5] = [
        LifecycleStage::PreCollege,
        LifecycleStage::PreEnroll,
        LifecycleStage::Transition,
        LifecycleStage::YearRound,
        LifecycleStage::Return,
    ];

    pub fn value(self) -> &'static str {
        match self {
            LifecycleStage::PreCollege => "pre_college",
            LifecycleStage::PreEnroll => "pre_enroll",
            LifecycleStage::Transition => "transition",
            LifecycleStage::YearRound => "year_round",
            LifecycleStage::Return => "return",
            LifecycleStage::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LifecycleStage::PreCollege => {
                "Before students apply — working with middle and high school students \
                 (grades 7–12) through the Center for Pre-College Programs who may one day \
                 enroll at RU-N"
            }
            LifecycleStage::PreEnroll => {
                "During the application and admission process — recruitment, admission, or \
                 early engagement with prospective students"
            }
            LifecycleStage::Transition => {
                "At key transition points — deposit, orientation, first registration"
            }
            LifecycleStage::YearRound => {
                "Year-round — ongoing support that directly affects whether students stay \
                 enrolled"
            }
            LifecycleStage::Return => {
                "At re-enrollment — when students decide whether to come back each term"
            }
            LifecycleStage::All => {
                "All of the above — our work touches students at multiple lifecycle stages"
            }
        }
    }

    /// Short heading for the dashboard overlap grid.
    pub fn short_label(self) -> &'static str {
        match self {
            LifecycleStage::PreCollege => "Pre-College",
            LifecycleStage::PreEnroll => "Pre-Enrollment",
            LifecycleStage::Transition => "Transition",
            LifecycleStage::YearRound => "Year-Round",
            LifecycleStage::Return => "Re-Enrollment",
            LifecycleStage::All => "All Stages",
        }
    }
}

// ---------------------------------------------------------------------------
// Training methods
// ---------------------------------------------------------------------------

/// How staff learn to work with data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingMethod {
    Formal,
    Peer,
    Trial,
    Vendor,
    None,
}

impl TrainingMethod {
    pub const ALL: [TrainingMethod; 5] = [
        TrainingMethod::Formal,
        TrainingMethod::Peer,
        TrainingMethod::Trial,
        TrainingMethod::Vendor,
        TrainingMethod::None,
    ];

    pub fn value(self) -> &'static str {
        match self {
            TrainingMethod::Formal => "formal",
            TrainingMethod::Peer => "peer",
            TrainingMethod::Trial => "trial",
            TrainingMethod::Vendor => "vendor",
            TrainingMethod::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrainingMethod::Formal => "Formal training or courses",
            TrainingMethod::Peer => "Learning from colleagues",
            TrainingMethod::Trial => "Trial and error — mostly self-taught",
            TrainingMethod::Vendor => "Vendor support or documentation",
            TrainingMethod::None => "No structured approach",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A `value`/`label` pair for a selectable option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionItem {
    pub value: &'static str,
    pub label: &'static str,
}

/// One point on the confidence scale.
#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceOption {
    pub value: u8,
    pub label: &'static str,
    pub emoji: &'static str,
}

/// Intro screen copy.
#[derive(Debug, Clone, Serialize)]
pub struct IntroCopy {
    pub tag: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub question_count: u8,
    pub estimated_minutes: &'static str,
}

/// Heading above the form once the intro is dismissed.
#[derive(Debug, Clone, Serialize)]
pub struct FormHeader {
    pub tag: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

/// How a field is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    /// One value from an option list.
    Select,
    /// Several values from an option list.
    MultiSelect,
    /// The 1-5 confidence scale.
    Scale,
}

/// One input inside a section. `field` is the form field it writes.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionField {
    pub field: &'static str,
    pub kind: FieldKind,
    pub label: Option<&'static str>,
    pub placeholder: Option<&'static str>,
}

/// A block of the form: the identity block or one numbered question.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySection {
    /// `"01"`..`"07"`; `None` for the identity block.
    pub number: Option<&'static str>,
    pub title: &'static str,
    pub hint: Option<&'static str>,
    pub fields: Vec<QuestionField>,
}

fn field(
    field: &'static str,
    kind: FieldKind,
    label: Option<&'static str>,
    placeholder: Option<&'static str>,
) -> QuestionField {
    QuestionField {
        field,
        kind,
        label,
        placeholder,
    }
}

fn sections() -> Vec<SurveySection> {
    use FieldKind::*;

    vec![
        SurveySection {
            number: None,
            title: "About You",
            hint: None,
            fields: vec![
                field("name", Text, Some("Your Name"), Some("First and last name")),
                field("unit", Select, Some("Your Unit"), Some("Select your unit…")),
            ],
        },
        SurveySection {
            number: Some("01"),
            title: "What reports or data does your team currently rely on — and what does \
                    a typical reporting week or month look like for you?",
            hint: Some(
                "Include the systems you pull from, how often, and who the reports are for. \
                 Don't worry about being exhaustive — just describe what's most central to \
                 your work.",
            ),
            fields: vec![
                field(
                    "reporting_reality",
                    LongText,
                    None,
                    Some(
                        "e.g. We pull weekly enrollment reports from Salesforce and share them \
                         with our director on Mondays. Most of it is manual — exported to Excel \
                         and formatted by hand…",
                    ),
                ),
                field(
                    "unused_reports",
                    Text,
                    Some("Are there reports your team produces that you're not sure anyone actually uses?"),
                    Some("Optional — name any that come to mind"),
                ),
            ],
        },
        SurveySection {
            number: Some("02"),
            title: "What's a question about your students or operations that you wish you \
                    could answer with data, but currently can't?",
            hint: Some(
                "Think about decisions you make on instinct because the numbers aren't \
                 available or aren't trusted.",
            ),
            fields: vec![field("blindspot", LongText, None, None)],
        },
        SurveySection {
            number: Some("03"),
            title: "How confident are you in the data your team works with today?",
            hint: Some("Pick the point on the scale that best matches how it feels day to day."),
            fields: vec![
                field("confidence", Scale, None, None),
                field(
                    "distrust_source",
                    Text,
                    Some("Is there a source or report you've learned not to trust? What makes it unreliable?"),
                    Some("Optional"),
                ),
            ],
        },
        SurveySection {
            number: Some("04"),
            title: "When during the year does your team most urgently need data, and what do \
                    you need in those moments?",
            hint: Some(
                "Think about your cycle: application deadlines, census, aid packaging, \
                 registration windows.",
            ),
            fields: vec![field("urgent_periods", LongText, None, None)],
        },
        SurveySection {
            number: Some("05"),
            title: "If you could wave a magic wand and have one report, tool or answer \
                    tomorrow, what would it be?",
            hint: Some("Dream freely. Feasibility is my problem, not yours."),
            fields: vec![field("magic_wand", LongText, None, None)],
        },
        SurveySection {
            number: Some("06"),
            title: "How comfortable is your team with data, and how do they usually pick up \
                    new tools?",
            hint: None,
            fields: vec![
                field("literacy_level", Select, Some("Team data comfort"), None),
                field(
                    "training_methods",
                    MultiSelect,
                    Some("How does your team typically learn data tools? Select all that apply."),
                    None,
                ),
                field(
                    "underused_tools",
                    Text,
                    Some("Are there tools or licenses you have access to but don't fully use?"),
                    Some("Optional"),
                ),
            ],
        },
        SurveySection {
            number: Some("07"),
            title: "Where does your unit touch the student lifecycle, and what data would help \
                    you at those points?",
            hint: None,
            fields: vec![
                field(
                    "lifecycle_role",
                    MultiSelect,
                    Some("Which stages does your unit work in? Select all that apply."),
                    None,
                ),
                field(
                    "lifecycle_data",
                    LongText,
                    Some("What data would help you most at those stages?"),
                    None,
                ),
                field(
                    "data_contact",
                    Text,
                    Some("Who on your team is the best day-to-day contact for data questions?"),
                    Some("Name and role"),
                ),
            ],
        },
    ]
}

/// Everything a client needs to render the survey form.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyCatalog {
    pub intro: IntroCopy,
    pub header: FormHeader,
    pub sections: Vec<SurveySection>,
    pub units: Vec<&'static str>,
    pub confidence: Vec<ConfidenceOption>,
    pub literacy_levels: Vec<OptionItem>,
    pub lifecycle_stages: Vec<OptionItem>,
    pub training_methods: Vec<OptionItem>,
}

impl SurveyCatalog {
    pub fn build() -> Self {
        Self {
            intro: IntroCopy {
                tag: "ENROLLMENT MANAGEMENT · DATA & ANALYTICS",
                title: "Before We Meet",
                subtitle: "A thought starter from your Director of Data Analytics",
                question_count: 7,
                estimated_minutes: "6–8 minutes",
            },
            header: FormHeader {
                tag: "ENROLLMENT MANAGEMENT · DATA NEEDS ASSESSMENT",
                title: "Pre-Meeting Thought Starter",
                subtitle: "Responses are shared only with the Director of Data Analytics to \
                           prepare for your conversation.",
            },
            sections: sections(),
            units: Unit::ALL.iter().map(|u| u.name()).collect(),
            confidence: (MIN_CONFIDENCE..=MAX_CONFIDENCE)
                .map(|value| ConfidenceOption {
                    value,
                    label: confidence_label(value).unwrap_or_default(),
                    emoji: confidence_emoji(value).unwrap_or_default(),
                })
                .collect(),
            literacy_levels: LiteracyLevel::ALL
                .iter()
                .map(|l| OptionItem {
                    value: l.value(),
                    label: l.label(),
                })
                .collect(),
            lifecycle_stages: LifecycleStage::ALL
                .iter()
                .map(|s| OptionItem {
                    value: s.value(),
                    label: s.label(),
                })
                .collect(),
            training_methods: TrainingMethod::ALL
                .iter()
                .map(|t| OptionItem {
                    value: t.value(),
                    label: t.label(),
                })
                .collect(),
        }
    }
}
