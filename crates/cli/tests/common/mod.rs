//! Fonts built in-test: a name table plus, optionally, a minimal CFF table.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use read_fonts::{
    FontRef, TableProvider,
    types::{NameId, Tag},
};
use write_fonts::{
    FontBuilder,
    tables::name::{Name, NameRecord},
};

pub const CFF: Tag = Tag::new(b"CFF ");

fn record(platform: u16, encoding: u16, language: u16, id: u16, s: &str) -> NameRecord {
    NameRecord::new(platform, encoding, language, NameId::new(id), s.to_string().into())
}

fn name_table(family: &str, style: &str) -> Name {
    let full = format!("{family} {style}");
    let ps = format!("{}-{}", family.replace(' ', ""), style.replace(' ', ""));
    let mut records = Vec::new();
    for (platform, encoding, language) in [(1, 0, 0), (3, 1, 0x409)] {
        records.push(record(platform, encoding, language, 0, "Copyright 2019 Test Authors"));
        records.push(record(platform, encoding, language, 1, family));
        records.push(record(platform, encoding, language, 2, style));
        records.push(record(platform, encoding, language, 3, "1.000;TEST;Unique"));
        records.push(record(platform, encoding, language, 4, &full));
        records.push(record(platform, encoding, language, 5, "Version 1.000"));
        records.push(record(platform, encoding, language, 6, &ps));
    }
    records.push(record(3, 1, 0x409, 16, family));
    records.push(record(3, 1, 0x409, 17, style));
    Name::new(records)
}

/// A glyph-less font with a fully populated name table.
pub fn truetype_font(family: &str, style: &str) -> Vec<u8> {
    let mut builder = FontBuilder::new();
    builder.add_table(&name_table(family, style)).unwrap();
    builder.add_raw(Tag::new(b"glyf"), vec![0u8; 4]);
    builder.build()
}

/// The same font with a `CFF ` table carrying matching names.
pub fn cff_font(family: &str, style: &str) -> Vec<u8> {
    let full = format!("{family} {style}");
    let ps = format!("{}-{}", family.replace(' ', ""), style.replace(' ', ""));
    let mut builder = FontBuilder::new();
    builder.add_table(&name_table(family, style)).unwrap();
    builder.add_raw(CFF, cff_table(&ps, family, &full));
    builder.build()
}

/// Font with a table claiming to be CFF that cannot be parsed.
pub fn broken_cff_font(family: &str, style: &str) -> Vec<u8> {
    let mut builder = FontBuilder::new();
    builder.add_table(&name_table(family, style)).unwrap();
    builder.add_raw(CFF, vec![1u8, 0, 4, 1, 0xFF]);
    builder.build()
}

/// INDEX with one-byte offsets; test data stays well below 255 bytes.
fn index(items: &[&[u8]]) -> Vec<u8> {
    let mut out = (items.len() as u16).to_be_bytes().to_vec();
    if items.is_empty() {
        return out;
    }
    out.push(1);
    let mut offset = 1u8;
    out.push(offset);
    for item in items {
        offset += item.len() as u8;
        out.push(offset);
    }
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

fn long_int(value: usize) -> Vec<u8> {
    let mut out = vec![29];
    out.extend_from_slice(&(value as i32).to_be_bytes());
    out
}

/// Single-font CFF: FullName = SID 391, FamilyName = SID 392, one `.notdef`
/// glyph, a Private DICT with defaultWidthX.
pub fn cff_table(font_name: &str, family: &str, full: &str) -> Vec<u8> {
    let header = [1u8, 0, 4, 1];
    let names = index(&[font_name.as_bytes()]);
    let strings = index(&[full.as_bytes(), family.as_bytes()]);
    let global_subrs = index(&[]);
    let char_strings = index(&[[139u8, 14].as_slice()]);
    let private = [139u8, 20];

    let top = |char_strings_at: usize, private_at: usize| {
        let mut dict = vec![248, 27, 2, 248, 28, 3];
        dict.extend(long_int(char_strings_at));
        dict.push(17);
        dict.push(139 + private.len() as u8);
        dict.extend(long_int(private_at));
        dict.push(18);
        dict
    };
    let top_index_len = index(&[top(0, 0).as_slice()]).len();
    let char_strings_at =
        header.len() + names.len() + top_index_len + strings.len() + global_subrs.len();
    let private_at = char_strings_at + char_strings.len();

    let mut out = header.to_vec();
    out.extend(names);
    out.extend(index(&[top(char_strings_at, private_at).as_slice()]));
    out.extend(strings);
    out.extend(global_subrs);
    out.extend(char_strings);
    out.extend(private);
    out
}

/// Decoded strings of every record with `name_id`.
pub fn name_strings(data: &[u8], name_id: u16) -> Vec<String> {
    let font = FontRef::new(data).unwrap();
    let name = font.name().unwrap();
    name.name_record()
        .iter()
        .filter(|r| r.name_id().to_u16() == name_id)
        .map(|r| r.string(name.string_data()).unwrap().chars().collect())
        .collect()
}

pub fn cff_bytes(data: &[u8]) -> Vec<u8> {
    let font = FontRef::new(data).unwrap();
    font.table_data(CFF).unwrap().as_bytes().to_vec()
}

pub fn write_font(dir: &Path, file_name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, data).unwrap();
    path
}
