//! # CDI Data
//!
//! Static data provider for the dashboard.
//!
//! Sample collections ship as YAML fixtures embedded in the binary. They
//! are parsed once at startup through the strict domain types (unknown
//! fields and unknown enum spellings are rejected, with a field path in the
//! error) and then invariant-checked: unique ids, `resolved <= findings`,
//! bounded percentages. A fixture that fails either step is a startup
//! error, never a runtime condition: after [`DashboardStore::load`]
//! returns, every collection is immutable and known-good.

mod store;
mod validate;

pub use store::DashboardStore;

/// Errors raised while loading the embedded sample collections.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to parse {fixture} fixture at {path}: {source}")]
    Parse {
        fixture: &'static str,
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    #[error("invalid record {id} in {collection}: {reason}")]
    InvalidRecord {
        collection: &'static str,
        id: String,
        reason: String,
    },
}

pub type DataResult<T> = std::result::Result<T, DataError>;
