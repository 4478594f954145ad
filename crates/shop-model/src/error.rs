use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical header: {0}")]
    UnknownHeader(String),
    #[error("duplicate pricing rule for category: {0}")]
    DuplicateCategory(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
