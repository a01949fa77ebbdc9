use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CloudError {
    /// Width or height of a requested rectangle is zero or negative.
    #[error("size has non positive parts")]
    InvalidSize { width: i32, height: i32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
