//! fontname CLI library.

pub mod cli;
pub mod error;
pub mod io;
pub mod pairs;
pub mod rename;

pub use error::{Error, Result};
pub use pairs::{Pair, parse_pairs};
pub use rename::{RenameOutcome, Renamer};

// Re-export from the naming crate for convenience
pub use fontname_font_naming::{CffUpdate, DerivedNames, NameSpec, derive_names};
