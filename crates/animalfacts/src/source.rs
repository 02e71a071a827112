//! Animal data sources
//!
//! Design: a source turns one [`AnimalQuery`] into a [`FetchOutcome`] with a
//! typed error. Callers that only want records use the provided
//! [`AnimalSource::fetch_records`], which logs failures and collapses them
//! into an empty list.

use crate::error::FetchError;
use crate::types::{AnimalQuery, AnimalRecord, FetchOutcome};
use async_trait::async_trait;
use tracing::{error, warn};

/// Trait for anything that can look up animal records
#[async_trait]
pub trait AnimalSource: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Look up records for the query
    ///
    /// Issues at most one upstream request. Never retries.
    async fn fetch(&self, query: &AnimalQuery) -> Result<FetchOutcome, FetchError>;

    /// Look up records, treating every failure as "no records"
    ///
    /// Empty matches are logged at warn level, failures at error level.
    /// The two are indistinguishable in the return value.
    async fn fetch_records(&self, query: &AnimalQuery) -> Vec<AnimalRecord> {
        match self.fetch(query).await {
            Ok(FetchOutcome::Found(records)) => records,
            Ok(FetchOutcome::EmptyMatch) => {
                warn!(source = self.name(), animal = %query, "No data found for the specified animal");
                Vec::new()
            }
            Err(err @ FetchError::HttpStatus { .. }) => {
                error!(source = self.name(), animal = %query, "{}", err);
                Vec::new()
            }
            Err(err) => {
                error!(source = self.name(), animal = %query, "Request error occurred: {}", err);
                Vec::new()
            }
        }
    }
}
