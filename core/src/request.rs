//! Input records and request parameters

use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;

/// A single domain record to be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Position in the loaded input file
    pub index: usize,

    /// Serialized record text, sent to the service as-is
    pub source: String,
}

impl InputRecord {
    /// Create a new record
    pub fn new(index: usize, source: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
        }
    }
}

/// Immutable, fully materialized set of input records
///
/// Cloning is cheap: every clone shares the same backing slice, so all
/// workers read the same records without copying them.
#[derive(Debug, Clone)]
pub struct InputSet {
    records: Arc<[InputRecord]>,
}

impl InputSet {
    /// Create an input set from already indexed records
    pub fn new(records: Vec<InputRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Create an input set from raw sources, indexed in order
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = sources
            .into_iter()
            .enumerate()
            .map(|(idx, source)| InputRecord::new(idx, source))
            .collect::<Vec<_>>();
        Self::new(records)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by position
    pub fn get(&self, position: usize) -> Option<&InputRecord> {
        self.records.get(position)
    }

    /// Iterate over records in load order
    pub fn iter(&self) -> impl Iterator<Item = &InputRecord> {
        self.records.iter()
    }
}

impl Index<usize> for InputSet {
    type Output = InputRecord;

    fn index(&self, position: usize) -> &Self::Output {
        &self.records[position]
    }
}

/// Fixed filter parameters sent with every chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFilter {
    /// Date the legislation is checked against (service format, e.g. `2017-05-01`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Category names to restrict the check to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl CheckFilter {
    /// Filter with no restrictions
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the check date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the category list
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_set_from_sources_indexes_in_order() {
        let input = InputSet::from_sources(["CCO", "c1ccccc1", "CN"]);
        assert_eq!(input.len(), 3);
        assert_eq!(input[0].index, 0);
        assert_eq!(input[2].source, "CN");
        assert!(input.get(3).is_none());
    }

    #[test]
    fn test_input_set_clone_shares_records() {
        let input = InputSet::from_sources(["CCO"]);
        let clone = input.clone();
        assert!(Arc::ptr_eq(&input.records, &clone.records));
    }

    #[test]
    fn test_empty_input_set() {
        let input = InputSet::new(Vec::new());
        assert!(input.is_empty());
        assert_eq!(input.iter().count(), 0);
    }

    #[test]
    fn test_check_filter_builder() {
        let filter = CheckFilter::none()
            .with_date("2017-05-01")
            .with_categories(["Narcotics", "Explosives"]);

        assert_eq!(filter.date.as_deref(), Some("2017-05-01"));
        assert_eq!(filter.categories.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_check_filter_skips_unset_fields() {
        let json = serde_json::to_string(&CheckFilter::none()).unwrap();
        assert_eq!(json, "{}");
    }
}
