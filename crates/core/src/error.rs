#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("unknown sort order: {0} (expected \"asc\" or \"desc\")")]
    UnknownSortOrder(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
