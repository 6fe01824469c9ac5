//! Check cycle data: persisted markers, extraction results and outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Last-seen update marker per source name.
///
/// Markers are opaque strings compared only for equality. A `BTreeMap` keeps
/// the persisted file ordering stable between saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckState(BTreeMap<String, String>);

impl CheckState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Stores `marker` for `name`. Returns `true` when it differs from the
    /// previously stored value (including when there was none).
    pub fn record(&mut self, name: &str, marker: &str) -> bool {
        if self.marker(name) == Some(marker) {
            return false;
        }
        self.0.insert(name.to_string(), marker.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CheckState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// What the extractor found in one document. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub update_marker: Option<String>,
    pub display_name: Option<String>,
}

impl Extraction {
    /// Display name, or `fallback` (the source name) when none was found
    pub fn display_name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.display_name.as_deref().unwrap_or(fallback)
    }
}

/// Per-source result of one check cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Changed(String),
    Unchanged(String),
    FetchFailed,
    MarkerNotFound,
}

/// Cycle result condensed for a human reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckSummary {
    /// Display names of every changed source, in registry order
    Updated(Vec<String>),
    /// At least one source was compared and none changed
    NoChanges,
    /// No source could be compared (all failed or registry empty)
    NothingChecked,
}

impl CheckSummary {
    pub fn from_outcomes(outcomes: &[CheckOutcome]) -> Self {
        let updated: Vec<String> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                CheckOutcome::Changed(name) => Some(name.clone()),
                _ => None,
            })
            .collect();

        if !updated.is_empty() {
            CheckSummary::Updated(updated)
        } else if outcomes.iter().any(|o| matches!(o, CheckOutcome::Unchanged(_))) {
            CheckSummary::NoChanges
        } else {
            CheckSummary::NothingChecked
        }
    }
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckSummary::Updated(names) => write!(f, "✅ Updates found: {}", names.join(", ")),
            CheckSummary::NoChanges => f.write_str("ℹ️ No updates found."),
            CheckSummary::NothingChecked => f.write_str("⚠️ Could not check any source."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_reports_first_observation_as_change() {
        let mut state = CheckState::new();
        assert!(state.record("SiteA", "2024-01-01"));
        assert_eq!(state.marker("SiteA"), Some("2024-01-01"));
    }

    #[test]
    fn test_record_same_marker_is_not_a_change() {
        let mut state: CheckState = [("SiteA", "2024-01-01")].into_iter().collect();
        assert!(!state.record("SiteA", "2024-01-01"));
        assert!(state.record("SiteA", "01.01.2024"));
        assert_eq!(state.marker("SiteA"), Some("01.01.2024"));
    }

    #[test]
    fn test_state_serializes_as_flat_object() {
        let state: CheckState = [("b", "2"), ("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn test_display_name_fallback() {
        let extraction = Extraction {
            update_marker: Some("x".to_string()),
            display_name: None,
        };
        assert_eq!(extraction.display_name_or("SiteA"), "SiteA");
    }

    #[test]
    fn test_summary_lists_changed_names_in_order() {
        let outcomes = vec![
            CheckOutcome::Changed("B".to_string()),
            CheckOutcome::FetchFailed,
            CheckOutcome::Unchanged("C".to_string()),
            CheckOutcome::Changed("A".to_string()),
        ];
        assert_eq!(
            CheckSummary::from_outcomes(&outcomes),
            CheckSummary::Updated(vec!["B".to_string(), "A".to_string()])
        );
    }

    #[test]
    fn test_summary_no_changes_and_nothing_checked() {
        let unchanged = vec![CheckOutcome::Unchanged("A".to_string()), CheckOutcome::FetchFailed];
        assert_eq!(CheckSummary::from_outcomes(&unchanged), CheckSummary::NoChanges);

        let failed = vec![CheckOutcome::FetchFailed, CheckOutcome::MarkerNotFound];
        assert_eq!(CheckSummary::from_outcomes(&failed), CheckSummary::NothingChecked);
        assert_eq!(CheckSummary::from_outcomes(&[]), CheckSummary::NothingChecked);
    }

    #[test]
    fn test_summary_text() {
        let updated = CheckSummary::Updated(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(updated.to_string(), "✅ Updates found: A, B");
        assert_eq!(CheckSummary::NoChanges.to_string(), "ℹ️ No updates found.");
        assert_eq!(CheckSummary::NothingChecked.to_string(), "⚠️ Could not check any source.");
    }
}
