//! Dashboard aggregation over the fetched response rows.
//!
//! Everything here is a pure function of the row slice and is recomputed on
//! every request. Groupings follow the declaration order of units, literacy
//! levels and lifecycle stages, never the order rows arrive in.

use serde::Serialize;

use crate::response::{non_blank, SurveyResponse};
use crate::survey::{confidence_label, LifecycleStage, LiteracyLevel, Unit};

/// Ratings at or below this are flagged as low confidence.
pub const LOW_CONFIDENCE_MAX: u8 = 2;

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// A named predicate over a response row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    LowConfidence,
    LowLiteracy,
    YearRound,
    UnderusedTools,
    MagicWand,
    DistrustSource,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::LowConfidence,
        Signal::LowLiteracy,
        Signal::YearRound,
        Signal::UnderusedTools,
        Signal::MagicWand,
        Signal::DistrustSource,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Signal::LowConfidence => "Low data confidence",
            Signal::LowLiteracy => "Low data literacy",
            Signal::YearRound => "Year-round retention impact",
            Signal::UnderusedTools => "Has underused tools",
            Signal::MagicWand => "Named a magic-wand fix",
            Signal::DistrustSource => "Named a distrusted source",
        }
    }

    pub fn matches(self, row: &SurveyResponse) -> bool {
        match self {
            Signal::LowConfidence => row.confidence.is_some_and(|c| c <= LOW_CONFIDENCE_MAX),
            Signal::LowLiteracy => row.literacy_level.is_some_and(LiteracyLevel::is_low),
            Signal::YearRound => row.has_stage(LifecycleStage::YearRound),
            Signal::UnderusedTools => non_blank(&row.underused_tools).is_some(),
            Signal::MagicWand => non_blank(&row.magic_wand).is_some(),
            Signal::DistrustSource => non_blank(&row.distrust_source).is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Confidence reported by one unit, or `None` for "no data".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitConfidence {
    pub unit: Unit,
    pub confidence: Option<u8>,
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteracyBucket {
    pub level: LiteracyLevel,
    pub label: &'static str,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageOverlap {
    pub stage: LifecycleStage,
    pub label: &'static str,
    pub count: usize,
    pub total: usize,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalGroup {
    pub signal: Signal,
    pub label: &'static str,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitText {
    pub unit: Unit,
    pub text: String,
}

/// The full derived dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub total_responses: usize,
    pub submitted_units: usize,
    pub unit_confidence: Vec<UnitConfidence>,
    /// `None` when no row carries a confidence rating.
    pub average_confidence: Option<f64>,
    pub pending_units: Vec<Unit>,
    pub literacy: Vec<LiteracyBucket>,
    pub lifecycle_overlap: Vec<StageOverlap>,
    pub signals: Vec<SignalGroup>,
    pub magic_wands: Vec<UnitText>,
    pub blindspots: Vec<UnitText>,
}

impl Dashboard {
    pub fn from_rows(rows: &[SurveyResponse]) -> Self {
        let pending = pending_units(rows);
        Self {
            total_responses: rows.len(),
            submitted_units: Unit::ALL.len() - pending.len(),
            unit_confidence: unit_confidence(rows),
            average_confidence: average_confidence(rows),
            pending_units: pending,
            literacy: literacy_distribution(rows),
            lifecycle_overlap: lifecycle_overlap(rows),
            signals: signal_groups(rows),
            magic_wands: text_rollup(rows, |r| &r.magic_wand),
            blindspots: text_rollup(rows, |r| &r.blindspot),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Most recent row for `unit`. Duplicate submissions resolve to the newest.
pub fn latest_for_unit(rows: &[SurveyResponse], unit: Unit) -> Option<&SurveyResponse> {
    rows.iter()
        .filter(|r| r.unit == unit)
        .max_by_key(|r| r.submitted_at)
}

pub fn unit_confidence(rows: &[SurveyResponse]) -> Vec<UnitConfidence> {
    Unit::ALL
        .iter()
        .map(|&unit| {
            let confidence = latest_for_unit(rows, unit).and_then(|r| r.confidence);
            UnitConfidence {
                unit,
                confidence,
                label: confidence.and_then(confidence_label),
            }
        })
        .collect()
}

/// Mean of every non-null confidence across all rows.
pub fn average_confidence(rows: &[SurveyResponse]) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.confidence)
        .map(f64::from)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn pending_units(rows: &[SurveyResponse]) -> Vec<Unit> {
    Unit::ALL
        .iter()
        .copied()
        .filter(|unit| !rows.iter().any(|r| r.unit == *unit))
        .collect()
}

/// Units of the rows matching `pred`, in unit declaration order.
fn units_where(rows: &[SurveyResponse], pred: impl Fn(&SurveyResponse) -> bool) -> Vec<Unit> {
    let mut units: Vec<Unit> = rows.iter().filter(|&r| pred(r)).map(|r| r.unit).collect();
    units.sort();
    units
}

pub fn literacy_distribution(rows: &[SurveyResponse]) -> Vec<LiteracyBucket> {
    LiteracyLevel::ALL
        .iter()
        .map(|&level| LiteracyBucket {
            level,
            label: level.label(),
            units: units_where(rows, |r| r.literacy_level == Some(level)),
        })
        .collect()
}

pub fn lifecycle_overlap(rows: &[SurveyResponse]) -> Vec<StageOverlap> {
    LifecycleStage::NAMED
        .iter()
        .map(|&stage| {
            let units = units_where(rows, |r| r.has_stage(stage));
            StageOverlap {
                stage,
                label: stage.short_label(),
                count: units.len(),
                total: rows.len(),
                units,
            }
        })
        .collect()
}

pub fn signal_groups(rows: &[SurveyResponse]) -> Vec<SignalGroup> {
    Signal::ALL
        .iter()
        .map(|&signal| SignalGroup {
            signal,
            label: signal.label(),
            units: units_where(rows, |r| signal.matches(r)),
        })
        .collect()
}

fn text_rollup(rows: &[SurveyResponse], field: impl Fn(&SurveyResponse) -> &String) -> Vec<UnitText> {
    let mut entries: Vec<UnitText> = rows
        .iter()
        .filter_map(|r| {
            non_blank(field(r)).map(|text| UnitText {
                unit: r.unit,
                text: text.to_string(),
            })
        })
        .collect();
    // Stable sort keeps newest-first order within a unit.
    entries.sort_by_key(|e| e.unit);
    entries
}
