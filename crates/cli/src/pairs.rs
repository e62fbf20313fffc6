//! Splitting the argument list into `(Family:Style, font)` pairs.

use std::path::PathBuf;

use fontname_font_naming::NameSpec;

use crate::{
    error::{Error, Result},
    io::FontFile,
};

/// One requested rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub spec: NameSpec,
    pub path: PathBuf,
}

/// Validate the whole argument list before any font is touched.
///
/// Fails when the count is odd or below two, when a spec is malformed, or
/// when a path is not an existing regular file.
pub fn parse_pairs<S: AsRef<str>>(args: &[S]) -> Result<Vec<Pair>> {
    if args.len() < 2 || args.len() % 2 != 0 {
        return Err(Error::Usage(
            "arguments must be pairs of \"Font Family:Weight\" and font path.".into(),
        ));
    }

    args.chunks_exact(2)
        .map(|pair| -> Result<Pair> {
            let spec: NameSpec = pair[0].as_ref().parse()?;
            let path = PathBuf::from(pair[1].as_ref());
            if !FontFile::new(&path).exists() {
                return Err(Error::Usage(format!(
                    "the path '{}' does not appear to be a valid file path.",
                    path.display()
                )));
            }
            Ok(Pair { spec, path })
        })
        .collect()
}
