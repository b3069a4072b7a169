//! Service responses and per-record classification

use serde::{Deserialize, Serialize};

/// One legislation match reported by the service for a record
///
/// Only `error` drives classification; the remaining fields are carried
/// through for diagnostics. Field names follow the service's wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRecord {
    /// The service could not check the record
    pub error: bool,

    /// Error detail when `error` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Legislation category that matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    /// Name of the matched controlled substance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mol_name: Option<String>,

    /// Links to the relevant legislation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legislative_links: Option<String>,

    /// Example structure of the matched class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    /// Echo of the submitted record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// CAS registry numbers
    #[serde(rename = "casNubmers", alias = "casNumbers", skip_serializing_if = "Vec::is_empty")]
    pub cas_numbers: Vec<String>,

    /// DEA controlled substance numbers
    #[serde(rename = "deaNubmers", alias = "deaNumbers", skip_serializing_if = "Vec::is_empty")]
    pub dea_numbers: Vec<String>,
}

impl MatchRecord {
    /// A successful match
    pub fn hit() -> Self {
        Self::default()
    }

    /// An error entry
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Decoded response for one chunk: one match list per submitted record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkResponse {
    /// Match lists in submission order
    pub results: Vec<Vec<MatchRecord>>,
}

impl ChunkResponse {
    /// Wrap decoded match lists
    pub fn new(results: Vec<Vec<MatchRecord>>) -> Self {
        Self { results }
    }

    /// Number of records the response covers
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the response covers no records
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Outcome of checking a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// No legislation matched
    Passed,
    /// The service reported an error for the record
    Error,
    /// One or more legislations matched; carries the number of matches
    Hit(usize),
}

impl Classification {
    /// Classify one record's match list
    ///
    /// Order is fixed: an empty list passes, otherwise only the first
    /// entry's error flag is consulted, otherwise the list is a hit sized
    /// by its length.
    pub fn of(matches: &[MatchRecord]) -> Self {
        match matches.first() {
            None => Classification::Passed,
            Some(first) if first.error => Classification::Error,
            Some(_) => Classification::Hit(matches.len()),
        }
    }
}

/// Per-chunk classification counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Records that passed
    pub passed: usize,

    /// Records the service failed to check
    pub error: usize,

    /// Match count of every hit record, in response order
    pub hits: Vec<usize>,
}

impl ClassificationResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every record of a decoded response
    pub fn from_response(response: &ChunkResponse) -> Self {
        let mut result = Self::new();
        for matches in &response.results {
            result.register(Classification::of(matches));
        }
        result
    }

    /// Add one classified record
    pub fn register(&mut self, classification: Classification) {
        match classification {
            Classification::Passed => self.passed += 1,
            Classification::Error => self.error += 1,
            Classification::Hit(size) => self.hits.push(size),
        }
    }

    /// Number of hit records
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Total matches across all hit records
    pub fn hit_size(&self) -> usize {
        self.hits.iter().sum()
    }

    /// Number of classified records
    pub fn total(&self) -> usize {
        self.passed + self.error + self.hit_count()
    }
}
