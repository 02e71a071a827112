//! Core types for Animalfacts

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// One animal as returned by the upstream API
///
/// Opaque to the fetcher: keys and values are passed through verbatim.
pub type AnimalRecord = Map<String, Value>;

/// A validated lookup query
///
/// Can only be built from a name that is non-empty after trimming, so a
/// fetch never goes out with a blank `name` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnimalQuery {
    name: String,
}

impl AnimalQuery {
    /// Build a query from user input, trimming surrounding whitespace
    pub fn new(name: impl AsRef<str>) -> Result<Self, QueryError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self {
            name: trimmed.to_string(),
        })
    }

    /// The trimmed animal name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for AnimalQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AnimalQuery {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnimalQuery> for String {
    fn from(query: AnimalQuery) -> Self {
        query.name
    }
}

impl std::fmt::Display for AnimalQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Successful outcome of a fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// One or more records, in upstream order
    Found(Vec<AnimalRecord>),
    /// Valid response with zero matches
    EmptyMatch,
}

impl FetchOutcome {
    /// Build an outcome from a normalized record list
    pub fn from_records(records: Vec<AnimalRecord>) -> Self {
        if records.is_empty() {
            FetchOutcome::EmptyMatch
        } else {
            FetchOutcome::Found(records)
        }
    }

    /// Flatten into a record list (empty for `EmptyMatch`)
    pub fn into_records(self) -> Vec<AnimalRecord> {
        match self {
            FetchOutcome::Found(records) => records,
            FetchOutcome::EmptyMatch => Vec::new(),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            FetchOutcome::Found(records) => records.len(),
            FetchOutcome::EmptyMatch => 0,
        }
    }

    /// True for `EmptyMatch`
    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::EmptyMatch)
    }
}
