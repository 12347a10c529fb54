pub mod catalog;
pub mod ingest;
pub mod rows;

pub use catalog::{Catalog, ProductEntry, ProductSummary, TechniqueEntry, ValidationIssue};
pub use ingest::{read_decoration_feed, read_product_feed, FeedFormat};
pub use rows::{ColorSelection, DecorationPriceRow, PriceDependence, ProductTierRow};

/// Catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The feed itself could not be read or parsed as delimited records.
    #[error("failed to read {feed} feed: {source}")]
    Feed {
        feed: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A single field failed to decode; the record and field are named so the
    /// offending cell can be fixed in the source.
    #[error("{feed} feed, record {record}, field {field}: {reason}")]
    Field {
        feed: &'static str,
        record: usize,
        field: &'static str,
        reason: String,
    },

    /// Structural invariant violations found at load time. Every offending
    /// row is listed; nothing is silently dropped.
    #[error("catalog validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
