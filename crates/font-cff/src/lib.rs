//! # CFF names
//!
//! Read and rewrite the naming fields of a CFF (version 1) table: the Name
//! INDEX entry, and the `FamilyName` and `FullName` strings of the Top DICT.
//!
//! Rewriting only rebuilds the block at the front of the table (header, Name
//! INDEX, Top DICT INDEX, String INDEX, Global Subr INDEX). Everything after it
//! is copied unchanged and the Top DICT offsets that point into it are shifted
//! by the size difference. For CID-keyed fonts the FDArray is re-emitted at the
//! end of the table so the Private DICT offsets of its Font DICTs can be shifted
//! as well.
//!
//! ## Example
//!
//! ```no_run
//! use fontname_font_cff::{CffNames, set_names};
//!
//! let cff = std::fs::read("table.cff").unwrap();
//! let names = CffNames::new("OpenSans-Bold")
//!     .with_family_name("Open Sans")
//!     .with_full_name("Open Sans Bold");
//! let patched = set_names(&cff, &names).unwrap();
//! ```

mod dict;
mod error;
mod index;

use log::debug;
use read_fonts::tables::postscript::STANDARD_STRINGS;

use dict::{Entry, Operand};
use index::{Index, write_index};

pub use error::{Error, Result};

/// Number of predefined standard strings; custom SIDs start here.
const STANDARD_STRING_COUNT: usize = STANDARD_STRINGS.len();

/// Highest SID a CFF string may have.
const MAX_SID: usize = 64999;

/// The naming fields of a single-font CFF table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CffNames {
    /// The font's entry in the Name INDEX.
    pub font_name: String,
    /// Top DICT `FamilyName`; `None` when absent (or left untouched when writing).
    pub family_name: Option<String>,
    /// Top DICT `FullName`; `None` when absent (or left untouched when writing).
    pub full_name: Option<String>,
}

impl CffNames {
    pub fn new(font_name: impl Into<String>) -> Self {
        Self { font_name: font_name.into(), ..Default::default() }
    }

    pub fn with_family_name(mut self, family_name: impl Into<String>) -> Self {
        self.family_name = Some(family_name.into());
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

/// The structures at the front of a CFF table.
struct Layout<'a> {
    header: &'a [u8],
    names: Index<'a>,
    top_dicts: Index<'a>,
    strings: Index<'a>,
    global_subrs: Index<'a>,
}

impl<'a> Layout<'a> {
    fn parse(data: &'a [u8]) -> Result<Self> {
        let major = *data.first().ok_or(Error::Truncated { offset: 0 })?;
        if major != 1 {
            return Err(Error::UnsupportedVersion(major));
        }
        let hdr_size = *data.get(2).ok_or(Error::Truncated { offset: 2 })?;
        if hdr_size < 4 || hdr_size as usize > data.len() {
            return Err(Error::InvalidHeaderSize(hdr_size));
        }

        let header = &data[..hdr_size as usize];
        let names = Index::parse(data, header.len())?;
        let top_dicts = Index::parse(data, names.end)?;
        let strings = Index::parse(data, top_dicts.end)?;
        let global_subrs = Index::parse(data, strings.end)?;

        if top_dicts.items.len() != 1 || names.items.len() != 1 {
            return Err(Error::FontCount(top_dicts.items.len().max(names.items.len())));
        }

        Ok(Self { header, names, top_dicts, strings, global_subrs })
    }

    /// Offset of the first byte after the Global Subr INDEX.
    fn tail_start(&self) -> usize {
        self.global_subrs.end
    }

    fn string(&self, sid: i32) -> Option<String> {
        let idx = usize::try_from(sid).ok()?.checked_sub(STANDARD_STRING_COUNT);
        match idx {
            Some(idx) => self.strings.items.get(idx).map(|s| latin1_decode(s)),
            None => STANDARD_STRINGS.get(usize::try_from(sid).ok()?).map(|s| s.to_string()),
        }
    }
}

/// Read the naming fields of a CFF table.
pub fn read_names(data: &[u8]) -> Result<CffNames> {
    let layout = Layout::parse(data)?;
    let entries = dict::parse(layout.top_dicts.items[0])?;
    let lookup = |operator: u16| -> Result<Option<String>> {
        match entries.iter().find(|e| e.operator == operator) {
            Some(entry) => Ok(layout.string(entry.integer(0)?)),
            None => Ok(None),
        }
    };

    Ok(CffNames {
        font_name: latin1_decode(layout.names.items[0]),
        family_name: lookup(dict::FAMILY_NAME)?,
        full_name: lookup(dict::FULL_NAME)?,
    })
}

/// Rewrite the naming fields of a CFF table, returning the new table data.
///
/// `font_name` always replaces the single Name INDEX entry; `family_name` and
/// `full_name` are only written when set. New strings are appended to the String
/// INDEX unless a standard string or an identical custom string already exists.
pub fn set_names(data: &[u8], names: &CffNames) -> Result<Vec<u8>> {
    let layout = Layout::parse(data)?;
    let mut entries = dict::parse(layout.top_dicts.items[0])?;
    let mut strings: Vec<Vec<u8>> = layout.strings.items.iter().map(|s| s.to_vec()).collect();

    if let Some(family_name) = &names.family_name {
        let sid = intern(&mut strings, family_name)?;
        set_operand(&mut entries, dict::FAMILY_NAME, sid);
    }
    if let Some(full_name) = &names.full_name {
        let sid = intern(&mut strings, full_name)?;
        set_operand(&mut entries, dict::FULL_NAME, sid);
    }

    let name_index = write_index(&[latin1_encode(&names.font_name)?])?;
    let string_index = write_index(&strings)?;
    let global_subrs = &data[layout.strings.end..layout.tail_start()];
    let tail = &data[layout.tail_start()..];

    // Relocated offsets use fixed-width operands, so the Top DICT size is known
    // before the shift is.
    let probe = relocate(&entries, 0, 0, layout.tail_start())?;
    let top_dict_len = write_index(&[dict::encode(&probe)])?.len();
    let front_len = layout.header.len()
        + name_index.len()
        + top_dict_len
        + string_index.len()
        + global_subrs.len();
    let delta = front_len as i64 - layout.tail_start() as i64;

    let fd_array = entries
        .iter()
        .find(|e| e.operator == dict::FD_ARRAY)
        .map(|entry| shifted_fd_array(data, entry, delta, layout.tail_start()))
        .transpose()?;
    let fd_array_pos = front_len + tail.len();

    let top_dict = dict::encode(&relocate(&entries, delta, fd_array_pos, layout.tail_start())?);
    let top_dict_index = write_index(&[top_dict])?;
    debug_assert_eq!(top_dict_index.len(), top_dict_len);

    debug!(
        "rewriting {}CFF names: front block {} -> {front_len} bytes, {} strings",
        if entries.iter().any(|e| e.operator == dict::ROS) { "CID-keyed " } else { "" },
        layout.tail_start(),
        strings.len()
    );

    let mut out = Vec::with_capacity(fd_array_pos + fd_array.as_ref().map_or(0, Vec::len));
    out.extend_from_slice(layout.header);
    out.extend_from_slice(&name_index);
    out.extend_from_slice(&top_dict_index);
    out.extend_from_slice(&string_index);
    out.extend_from_slice(global_subrs);
    out.extend_from_slice(tail);
    if let Some(fd_array) = fd_array {
        out.extend_from_slice(&fd_array);
    }
    Ok(out)
}

/// Return the SID of `value`, appending it to the String INDEX if needed.
///
/// Standard strings keep their predefined SID.
fn intern(strings: &mut Vec<Vec<u8>>, value: &str) -> Result<i32> {
    if let Some(sid) = STANDARD_STRINGS.iter().position(|s| *s == value) {
        return Ok(sid as i32);
    }
    let encoded = latin1_encode(value)?;
    let idx = match strings.iter().position(|s| *s == encoded) {
        Some(idx) => idx,
        None => {
            strings.push(encoded);
            strings.len() - 1
        }
    };
    let sid = STANDARD_STRING_COUNT + idx;
    if sid > MAX_SID {
        return Err(Error::TooManyStrings);
    }
    Ok(sid as i32)
}

fn set_operand(entries: &mut Vec<Entry>, operator: u16, sid: i32) {
    let operands = vec![Operand::Integer(sid)];
    match entries.iter_mut().find(|e| e.operator == operator) {
        Some(entry) => entry.operands = operands,
        None => entries.push(Entry::new(operator, operands)),
    }
}

/// Copy Top DICT entries with every absolute offset shifted by `delta` and the
/// FDArray pointed at `fd_array_pos`.
fn relocate(
    entries: &[Entry],
    delta: i64,
    fd_array_pos: usize,
    tail_start: usize,
) -> Result<Vec<Entry>> {
    entries
        .iter()
        .map(|entry| -> Result<Entry> {
            let mut entry = entry.clone();
            match entry.operator {
                // Values 0..=2 select predefined charsets.
                dict::CHARSET if entry.integer(0)? > 2 => {
                    entry.operands[0] = shift(&entry, 0, delta, tail_start)?;
                }
                // Values 0 and 1 select predefined encodings.
                dict::ENCODING if entry.integer(0)? > 1 => {
                    entry.operands[0] = shift(&entry, 0, delta, tail_start)?;
                }
                dict::CHAR_STRINGS | dict::FD_SELECT => {
                    entry.operands[0] = shift(&entry, 0, delta, tail_start)?;
                }
                dict::PRIVATE => {
                    entry.operands[1] = shift(&entry, 1, delta, tail_start)?;
                }
                dict::FD_ARRAY => {
                    let pos = i32::try_from(fd_array_pos)
                        .map_err(|_| Error::OffsetOverflow(fd_array_pos as i64))?;
                    entry.operands = vec![Operand::LongInteger(pos)];
                }
                _ => {}
            }
            Ok(entry)
        })
        .collect()
}

fn shift(entry: &Entry, idx: usize, delta: i64, tail_start: usize) -> Result<Operand> {
    let offset = entry.integer(idx)? as i64;
    if offset < tail_start as i64 {
        return Err(Error::OffsetBeforeTail { operator: entry.operator, offset });
    }
    let moved = offset + delta;
    i32::try_from(moved).map(Operand::LongInteger).map_err(|_| Error::OffsetOverflow(moved))
}

/// Rebuild the FDArray INDEX with each Font DICT's Private offset shifted.
fn shifted_fd_array(data: &[u8], entry: &Entry, delta: i64, tail_start: usize) -> Result<Vec<u8>> {
    let start = entry.integer(0)? as i64;
    if start < tail_start as i64 {
        return Err(Error::OffsetBeforeTail { operator: entry.operator, offset: start });
    }
    let fd_array = Index::parse(data, start as usize)?;
    let font_dicts = fd_array
        .items
        .iter()
        .map(|font_dict| -> Result<Vec<u8>> {
            let entries = dict::parse(font_dict)?;
            Ok(dict::encode(&relocate(&entries, delta, 0, tail_start)?))
        })
        .collect::<Result<Vec<_>>>()?;
    write_index(&font_dicts)
}

fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn latin1_encode(value: &str) -> Result<Vec<u8>> {
    value
        .chars()
        .map(|c| u8::try_from(c).map_err(|_| Error::NonLatin1(value.to_string())))
        .collect()
}
