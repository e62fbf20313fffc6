//! Error types for CFF name rewriting.

use std::result;

/// Errors that can occur while reading or rewriting a CFF table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("CFF data truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("unsupported CFF major version {0}")]
    UnsupportedVersion(u8),

    #[error("invalid CFF header size {0}")]
    InvalidHeaderSize(u8),

    #[error("invalid INDEX offset size {0}")]
    InvalidOffSize(u8),

    #[error("malformed INDEX at offset {offset}")]
    InvalidIndex { offset: usize },

    #[error("INDEX holds too many objects ({0})")]
    TooManyObjects(usize),

    #[error("expected exactly one font in the CFF FontSet, found {0}")]
    FontCount(usize),

    #[error("malformed DICT data: {0}")]
    InvalidDict(&'static str),

    #[error("DICT operator {operator} has unexpected operands")]
    UnexpectedOperands { operator: u16 },

    #[error("DICT operator {operator} points at {offset}, inside the header block")]
    OffsetBeforeTail { operator: u16, offset: i64 },

    #[error("relocated offset {0} does not fit a DICT integer")]
    OffsetOverflow(i64),

    #[error("string '{0}' cannot be encoded as Latin-1")]
    NonLatin1(String),

    #[error("String INDEX is full")]
    TooManyStrings,
}

pub type Result<T> = result::Result<T, Error>;
