//! Generic font table manipulation utilities.

use anyhow::{Context, Result};
use log::warn;
use read_fonts::{
    FontRef, TableProvider,
    tables::name::Encoding,
    types::NameId,
};
use write_fonts::{
    FontBuilder,
    tables::name::{LangTagRecord, Name, NameRecord},
};

/// Start a builder that already contains every table of `font`, byte for byte.
///
/// Tables added to the returned builder afterwards replace the copied ones.
pub fn copy_tables<'a>(font: &FontRef<'a>) -> FontBuilder<'a> {
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    builder
}

/// Map name table records using a transformation function.
///
/// The mapper receives `(name_id, current_string)` and returns:
/// - `Some(new_string)` to replace the record's string
/// - `None` to keep the current string unchanged
///
/// Platform, encoding and language ids of every record are preserved, and so
/// are the language-tag records of a version 1 table.
///
/// An owned name table only holds decoded text, so some records cannot be
/// carried over and are dropped with a warning instead of being kept byte for
/// byte:
/// - records in an encoding other than Unicode or Mac Roman (for example Mac
///   Japanese), which can be neither decoded nor re-encoded; the mapper is not
///   called for them
/// - records whose string lies outside the storage area, when the mapper has
///   no replacement for them (the mapper sees an empty string)
pub fn map_name_records(
    font: &FontRef,
    mut mapper: impl FnMut(u16, &str) -> Option<String>,
) -> Result<Name> {
    let name = font.name().context("font has no name table")?;
    let mut new_records = Vec::new();

    for record in name.name_record() {
        let name_id = record.name_id().to_u16();
        let skip = |reason: &str| {
            warn!(
                "dropping name record {name_id} (platform {}, encoding {}, language {}): {reason}",
                record.platform_id(),
                record.encoding_id(),
                record.language_id()
            )
        };

        if Encoding::new(record.platform_id(), record.encoding_id()) == Encoding::Unknown {
            skip("unsupported encoding");
            continue;
        }

        let current = record
            .string(name.string_data())
            .ok()
            .map(|s| s.chars().collect::<String>());

        let new_string = match (mapper(name_id, current.as_deref().unwrap_or_default()), current) {
            (Some(replacement), _) => replacement,
            (None, Some(current)) => current,
            (None, None) => {
                skip("string data out of bounds");
                continue;
            }
        };

        new_records.push(NameRecord::new(
            record.platform_id(),
            record.encoding_id(),
            record.language_id(),
            NameId::new(name_id),
            new_string.into(),
        ));
    }

    let lang_tag_record = name
        .lang_tag_record()
        .map(|records| {
            records
                .iter()
                .map(|record| -> Result<LangTagRecord> {
                    let tag = record
                        .lang_tag(name.string_data())
                        .context("language tag out of bounds")?;
                    Ok(LangTagRecord::new(tag.chars().collect::<String>().into()))
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let mut table = Name::new(new_records);
    table.lang_tag_record = lang_tag_record;
    Ok(table)
}
