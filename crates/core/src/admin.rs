//! Admin list state: fetched rows, unit filter and single-row expansion.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::response::SurveyResponse;
use crate::store::ResponseStore;
use crate::survey::Unit;

const ALL_FILTER: &str = "All";

/// Which rows the admin list shows. Serialized as `"All"` or a unit name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnitFilter {
    #[default]
    All,
    Unit(Unit),
}

impl UnitFilter {
    pub fn matches(self, row: &SurveyResponse) -> bool {
        match self {
            UnitFilter::All => true,
            UnitFilter::Unit(unit) => row.unit == unit,
        }
    }

    /// Parse `"All"` or a unit name.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw == ALL_FILTER {
            Ok(UnitFilter::All)
        } else {
            Ok(UnitFilter::Unit(raw.parse()?))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitFilter::All => ALL_FILTER,
            UnitFilter::Unit(unit) => unit.name(),
        }
    }
}

impl Serialize for UnitFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UnitFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        UnitFilter::parse(&raw).map_err(de::Error::custom)
    }
}

/// One row as the admin list shows it.
#[derive(Debug, Clone, Serialize)]
pub struct AdminRow {
    pub index: usize,
    pub expanded: bool,
    #[serde(flatten)]
    pub response: SurveyResponse,
}

/// Admin list state. Rows are fetched once when the list is first shown;
/// filter and expansion changes never touch the store.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    rows: Vec<SurveyResponse>,
    loaded: bool,
    filter: UnitFilter,
    selected: Option<usize>,
}

impl AdminList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn rows(&self) -> &[SurveyResponse] {
        &self.rows
    }

    pub fn filter(&self) -> UnitFilter {
        self.filter
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Fetch all rows. A store error is logged and yields an empty list.
    pub async fn refresh(&mut self, store: &dyn ResponseStore) {
        let result = store.list_responses().await;
        self.apply_fetch(result);
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<SurveyResponse>, CoreError>) {
        self.rows = match result {
            Ok(rows) => {
                tracing::debug!(count = rows.len(), "Loaded survey responses");
                rows
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load survey responses");
                Vec::new()
            }
        };
        self.loaded = true;
        self.selected = None;
    }

    /// Change the filter. Collapses any expanded row since indices refer to
    /// the filtered list.
    pub fn set_filter(&mut self, filter: UnitFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.selected = None;
        }
    }

    /// Expand the row at `index` in the visible list, or collapse it if it is
    /// already expanded. At most one row is expanded at a time.
    pub fn toggle_row(&mut self, index: usize) -> Result<(), CoreError> {
        let visible = self.visible_count();
        if index >= visible {
            return Err(CoreError::NotFound {
                entity: "Response row",
                id: index.to_string(),
            });
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        Ok(())
    }

    fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| self.filter.matches(r)).count()
    }

    /// Rows passing the filter, newest first, with expansion state.
    pub fn visible(&self) -> Vec<AdminRow> {
        self.rows
            .iter()
            .filter(|r| self.filter.matches(r))
            .enumerate()
            .map(|(index, response)| AdminRow {
                index,
                expanded: self.selected == Some(index),
                response: response.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn row(id: i64, unit: Unit) -> SurveyResponse {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Person {id}"),
            "unit": unit,
            "submitted_at": "2026-03-01T12:00:00Z"
        }))
        .unwrap()
    }

    fn loaded(rows: Vec<SurveyResponse>) -> AdminList {
        let mut list = AdminList::new();
        list.apply_fetch(Ok(rows));
        list
    }

    #[test]
    fn fetch_error_yields_empty_list() {
        let mut list = AdminList::new();
        list.apply_fetch(Err(CoreError::Store("timeout".into())));
        assert!(list.is_loaded());
        assert!(list.visible().is_empty());
    }

    #[test]
    fn filter_limits_visible_rows() {
        let mut list = loaded(vec![
            row(3, Unit::Registrar),
            row(2, Unit::FinancialAid),
            row(1, Unit::Registrar),
        ]);
        assert_eq!(list.visible().len(), 3);

        list.set_filter(UnitFilter::Unit(Unit::Registrar));
        let ids: Vec<i64> = list.visible().iter().map(|r| r.response.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn selecting_expanded_row_collapses_it() {
        let mut list = loaded(vec![row(1, Unit::Admissions), row(2, Unit::OneStop)]);
        list.toggle_row(0).unwrap();
        assert_eq!(list.selected(), Some(0));
        list.toggle_row(0).unwrap();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn selecting_another_row_moves_expansion() {
        let mut list = loaded(vec![row(1, Unit::Admissions), row(2, Unit::OneStop)]);
        list.toggle_row(0).unwrap();
        list.toggle_row(1).unwrap();

        let expanded: Vec<bool> = list.visible().iter().map(|r| r.expanded).collect();
        assert_eq!(expanded, vec![false, true]);
    }

    #[test]
    fn toggle_out_of_range_is_not_found() {
        let mut list = loaded(vec![row(1, Unit::Admissions)]);
        assert_matches!(list.toggle_row(4), Err(CoreError::NotFound { .. }));
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn changing_filter_collapses_selection() {
        let mut list = loaded(vec![row(1, Unit::Admissions), row(2, Unit::OneStop)]);
        list.toggle_row(1).unwrap();
        list.set_filter(UnitFilter::Unit(Unit::OneStop));
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn filter_parses_all_and_units() {
        assert_eq!(UnitFilter::parse("All").unwrap(), UnitFilter::All);
        assert_eq!(
            UnitFilter::parse("Registrar").unwrap(),
            UnitFilter::Unit(Unit::Registrar)
        );
        assert!(UnitFilter::parse("Payroll").is_err());
    }

    #[test]
    fn filter_json_uses_plain_strings() {
        assert_eq!(serde_json::to_string(&UnitFilter::All).unwrap(), "\"All\"");
        let parsed: UnitFilter = serde_json::from_str("\"One-Stop\"").unwrap();
        assert_eq!(parsed, UnitFilter::Unit(Unit::OneStop));
        let parsed: UnitFilter = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(parsed, UnitFilter::All);
    }
}
