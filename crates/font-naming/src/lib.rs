//! Family and style naming for OpenType fonts.
//!
//! [`derive_names`] turns a [`NameSpec`] into the strings written to the name
//! table, the CFF table and the output filename. It is pure; the functions that
//! touch font data live on [`DerivedNames`].

mod error;

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{debug, warn};
use read_fonts::{FontRef, types::Tag};
use write_fonts::{FontBuilder, tables::name::Name};

use fontname_font_cff::CffNames;
use fontname_font_ops::map_name_records;

pub use error::{Error, Result};

/// Name table IDs.
pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_SUBFAMILY: u16 = 2;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_POSTSCRIPT: u16 = 6;
pub const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;

const CFF: Tag = Tag::new(b"CFF ");

/// A requested family and style, parsed from `"Family:Style"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSpec {
    family: String,
    style: String,
}

impl NameSpec {
    /// Create a spec from already separated parts. Both are trimmed and must be non-empty.
    pub fn new(family: &str, style: &str) -> Result<Self> {
        let (family, style) = (family.trim(), style.trim());
        let raw = || format!("{family}:{style}");
        if family.is_empty() {
            return Err(Error::EmptyFamily(raw()));
        }
        if style.is_empty() {
            return Err(Error::EmptyStyle(raw()));
        }
        Ok(Self { family: family.to_string(), style: style.to_string() })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> &str {
        &self.style
    }
}

impl FromStr for NameSpec {
    type Err = Error;

    /// Split on the first `:`; later colons belong to the style.
    fn from_str(s: &str) -> Result<Self> {
        let (family, style) = s.split_once(':').ok_or_else(|| Error::MissingSeparator(s.into()))?;
        Self::new(family, style).map_err(|e| match e {
            Error::EmptyFamily(_) => Error::EmptyFamily(s.into()),
            Error::EmptyStyle(_) => Error::EmptyStyle(s.into()),
            other => other,
        })
    }
}

impl fmt::Display for NameSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.style)
    }
}

/// The strings written into a font for one [`NameSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// Family with spaces removed.
    pub postscript_family: String,
    /// Name ID 1.
    pub family: String,
    /// Name ID 2.
    pub style: String,
    /// Name ID 4: `"{family} {style}"`.
    pub full_name: String,
    /// Name ID 6: `"{postscript_family}-{style without spaces}"`.
    pub postscript_name: String,
    /// Name ID 16.
    pub typographic_family: String,
}

/// Derive every name string from `spec`.
pub fn derive_names(spec: &NameSpec) -> DerivedNames {
    let postscript_family = spec.family.replace(' ', "");
    let postscript_name = format!("{postscript_family}-{}", spec.style.replace(' ', ""));

    DerivedNames {
        postscript_family,
        family: spec.family.clone(),
        style: spec.style.clone(),
        full_name: format!("{} {}", spec.family, spec.style),
        postscript_name,
        typographic_family: spec.family.clone(),
    }
}

/// Outcome of updating the optional CFF table.
#[derive(Debug)]
pub enum CffUpdate {
    /// The font has no `CFF ` table.
    Absent,
    /// The CFF names were rewritten.
    Updated,
    /// The CFF table could not be rewritten; the original table is kept.
    Failed(fontname_font_cff::Error),
}

impl DerivedNames {
    /// The replacement for a name record, or `None` if the ID is left alone.
    pub fn for_name_id(&self, name_id: u16) -> Option<&str> {
        match name_id {
            NAME_ID_FAMILY => Some(self.family.as_str()),
            NAME_ID_SUBFAMILY => Some(self.style.as_str()),
            NAME_ID_FULL_NAME => Some(self.full_name.as_str()),
            NAME_ID_POSTSCRIPT => Some(self.postscript_name.as_str()),
            NAME_ID_TYPOGRAPHIC_FAMILY => Some(self.typographic_family.as_str()),
            _ => None,
        }
    }

    /// The CFF naming fields for these names.
    pub fn cff_names(&self) -> CffNames {
        CffNames::new(&self.postscript_name)
            .with_family_name(&self.family)
            .with_full_name(&self.full_name)
    }

    /// Output filename: the PostScript name plus the input's extension, if any.
    ///
    /// The extension keeps its case; only the final one is used.
    pub fn output_file_name(&self, input: &Path) -> PathBuf {
        let mut name = OsString::from(&self.postscript_name);
        if let Some(ext) = input.extension() {
            name.push(".");
            name.push(ext);
        }
        PathBuf::from(name)
    }

    /// Build a name table from `font` with the targeted records rewritten.
    pub fn name_table(&self, font: &FontRef) -> anyhow::Result<Name> {
        let mut updated = 0;
        let name = map_name_records(font, |name_id, _current| {
            let replacement = self.for_name_id(name_id).map(str::to_string);
            updated += usize::from(replacement.is_some());
            replacement
        })?;
        debug!("'{}': rewrote {updated} name records", self.postscript_name);
        Ok(name)
    }

    /// Rewrite the CFF names of `font` into `builder`, if the font has a CFF table.
    ///
    /// Failures are returned, not raised: the name table update stands either way.
    pub fn apply_cff(&self, font: &FontRef, builder: &mut FontBuilder) -> CffUpdate {
        let Some(data) = font.table_data(CFF) else {
            return CffUpdate::Absent;
        };

        match fontname_font_cff::set_names(data.as_bytes(), &self.cff_names()) {
            Ok(patched) => {
                builder.add_raw(CFF, patched);
                CffUpdate::Updated
            }
            Err(e) => {
                warn!("'{}': keeping original CFF table: {e}", self.postscript_name);
                CffUpdate::Failed(e)
            }
        }
    }
}
