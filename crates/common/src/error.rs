use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Identifier already registered: {0}")]
    DuplicateIdentifier(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, Error>;
