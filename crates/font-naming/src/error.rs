use std::result;

/// Errors produced while parsing a `Family:Style` argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("'{0}' must be in 'Font Family:Weight' format.")]
    MissingSeparator(String),

    #[error("'{0}' has an empty font family.")]
    EmptyFamily(String),

    #[error("'{0}' has an empty style.")]
    EmptyStyle(String),
}

pub type Result<T> = result::Result<T, Error>;
