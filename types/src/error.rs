//! Errors raised while constructing or parsing shared types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid guid: {0}")]
    InvalidGuid(String),
}
