//! CFF DICT tokenizing and encoding.
//!
//! Only integers are interpreted. Real operands are carried through as their
//! original nibble bytes so untouched entries re-encode byte for byte.

use crate::{Error, Result};

pub(crate) const FULL_NAME: u16 = 2;
pub(crate) const FAMILY_NAME: u16 = 3;
pub(crate) const CHARSET: u16 = 15;
pub(crate) const ENCODING: u16 = 16;
pub(crate) const CHAR_STRINGS: u16 = 17;
pub(crate) const PRIVATE: u16 = 18;
pub(crate) const ROS: u16 = 1230;
pub(crate) const FD_ARRAY: u16 = 1236;
pub(crate) const FD_SELECT: u16 = 1237;

const ESCAPE: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    /// An integer in its shortest encoding.
    Integer(i32),
    /// An integer always encoded in five bytes, so its size never depends on its value.
    LongInteger(i32),
    /// Encoded real number, including the leading `30` byte.
    Real(Vec<u8>),
}

impl Operand {
    pub fn integer(&self) -> Option<i32> {
        match self {
            Operand::Integer(v) | Operand::LongInteger(v) => Some(*v),
            Operand::Real(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    /// One-byte operators as-is; escaped operators as `1200 + second byte`.
    pub operator: u16,
    pub operands: Vec<Operand>,
}

impl Entry {
    pub fn new(operator: u16, operands: Vec<Operand>) -> Self {
        Self { operator, operands }
    }

    /// The integer operand at `idx`, failing on reals and missing operands.
    pub fn integer(&self, idx: usize) -> Result<i32> {
        self.operands
            .get(idx)
            .and_then(Operand::integer)
            .ok_or(Error::UnexpectedOperands { operator: self.operator })
    }
}

/// Tokenize a DICT into entries in their original order.
pub(crate) fn parse(data: &[u8]) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut operands = Vec::new();
    let mut pos = 0;

    while let Some(&b0) = data.get(pos) {
        pos += 1;
        match b0 {
            ESCAPE => {
                let b1 = *data.get(pos).ok_or(Error::InvalidDict("escape at end of data"))?;
                pos += 1;
                entries.push(Entry::new(1200 + b1 as u16, std::mem::take(&mut operands)));
            }
            0..=21 => entries.push(Entry::new(b0 as u16, std::mem::take(&mut operands))),
            28 => {
                let b = data.get(pos..pos + 2).ok_or(Error::InvalidDict("truncated shortint"))?;
                pos += 2;
                operands.push(Operand::Integer(i16::from_be_bytes([b[0], b[1]]) as i32));
            }
            29 => {
                let b = data.get(pos..pos + 4).ok_or(Error::InvalidDict("truncated longint"))?;
                pos += 4;
                operands.push(Operand::Integer(i32::from_be_bytes([b[0], b[1], b[2], b[3]])));
            }
            30 => {
                let start = pos - 1;
                loop {
                    let b = *data.get(pos).ok_or(Error::InvalidDict("unterminated real"))?;
                    pos += 1;
                    if b >> 4 == 0xF || b & 0xF == 0xF {
                        break;
                    }
                }
                operands.push(Operand::Real(data[start..pos].to_vec()));
            }
            32..=246 => operands.push(Operand::Integer(b0 as i32 - 139)),
            247..=254 => {
                let b1 = *data.get(pos).ok_or(Error::InvalidDict("truncated integer"))? as i32;
                pos += 1;
                let value = if b0 <= 250 {
                    (b0 as i32 - 247) * 256 + b1 + 108
                } else {
                    -(b0 as i32 - 251) * 256 - b1 - 108
                };
                operands.push(Operand::Integer(value));
            }
            _ => return Err(Error::InvalidDict("reserved byte")),
        }
    }

    if !operands.is_empty() {
        return Err(Error::InvalidDict("operands without operator"));
    }
    Ok(entries)
}

/// Encode entries back into DICT data.
pub(crate) fn encode(entries: &[Entry]) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in entries {
        for operand in &entry.operands {
            match operand {
                Operand::Integer(v) => push_integer(&mut out, *v),
                Operand::LongInteger(v) => {
                    out.push(29);
                    out.extend_from_slice(&v.to_be_bytes());
                }
                Operand::Real(bytes) => out.extend_from_slice(bytes),
            }
        }
        if entry.operator >= 1200 {
            out.push(ESCAPE);
            out.push((entry.operator - 1200) as u8);
        } else {
            out.push(entry.operator as u8);
        }
    }
    out
}

fn push_integer(out: &mut Vec<u8>, value: i32) {
    match value {
        -107..=107 => out.push((value + 139) as u8),
        108..=1131 => {
            let v = value - 108;
            out.push((v >> 8) as u8 + 247);
            out.push((v & 0xFF) as u8);
        }
        -1131..=-108 => {
            let v = -value - 108;
            out.push((v >> 8) as u8 + 251);
            out.push((v & 0xFF) as u8);
        }
        -32768..=32767 => {
            out.push(28);
            out.extend_from_slice(&(value as i16).to_be_bytes());
        }
        _ => {
            out.push(29);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(value: i32) -> Vec<u8> {
        encode(&[Entry::new(CHAR_STRINGS, vec![Operand::Integer(value)])])
    }

    #[test]
    fn test_integer_encodings() {
        assert_eq!(single(0), vec![139, 17]);
        assert_eq!(single(100), vec![239, 17]);
        assert_eq!(single(1000), vec![250, 124, 17]);
        assert_eq!(single(-1000), vec![254, 124, 17]);
        assert_eq!(single(10000), vec![28, 0x27, 0x10, 17]);
        assert_eq!(single(100000), vec![29, 0x00, 0x01, 0x86, 0xA0, 17]);
    }

    #[test]
    fn test_integers_parse_back() {
        for value in [-100000, -32768, -1131, -108, -107, 0, 107, 108, 1131, 1132, 32767, 70000] {
            let entries = parse(&single(value)).unwrap();
            assert_eq!(entries, vec![Entry::new(CHAR_STRINGS, vec![Operand::Integer(value)])]);
        }
    }

    #[test]
    fn test_long_integer_is_five_bytes() {
        let data = encode(&[Entry::new(PRIVATE, vec![Operand::Integer(40), Operand::LongInteger(3)])]);
        assert_eq!(data, vec![179, 29, 0, 0, 0, 3, 18]);
    }

    #[test]
    fn test_escaped_operator() {
        let data = [139, 140, 141, 12, 30];
        let entries = parse(&data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operator, ROS);
        assert_eq!(encode(&entries), data.to_vec());
    }

    #[test]
    fn test_real_operand_is_preserved() {
        // FontMatrix [0.001 0 0 0.001 0 0]
        let data = [
            30, 0x0A, 0x00, 0x1F, 139, 139, 30, 0x0A, 0x00, 0x1F, 139, 139, 12, 7,
        ];
        let entries = parse(&data).unwrap();
        assert_eq!(entries[0].operator, 1207);
        assert_eq!(entries[0].operands[0], Operand::Real(vec![30, 0x0A, 0x00, 0x1F]));
        assert!(entries[0].integer(0).is_err());
        assert_eq!(encode(&entries), data.to_vec());
    }

    #[test]
    fn test_dangling_operands() {
        assert!(parse(&[139, 140]).is_err());
    }

    #[test]
    fn test_reserved_byte() {
        assert!(parse(&[255]).is_err());
    }
}
