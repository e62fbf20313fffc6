use std::{path::PathBuf, result};

/// Failures that end a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed argument list or a missing input file.
    #[error("{0}")]
    Usage(String),

    /// A `Family:Style` argument that cannot be parsed.
    #[error("{0}")]
    Spec(#[from] fontname_font_naming::Error),

    /// The input exists but is not a usable font.
    #[error("unable to load font '{}'. {cause:#}", path.display())]
    Load { path: PathBuf, cause: anyhow::Error },

    /// The renamed font could not be built or written.
    #[error("unable to save new font file '{}'. {cause:#}", path.display())]
    Save { path: PathBuf, cause: anyhow::Error },
}

impl Error {
    /// Whether the error comes from the argument list rather than a font.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::Spec(_))
    }
}

pub type Result<T> = result::Result<T, Error>;
