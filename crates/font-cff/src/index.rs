//! CFF INDEX reading and writing.

use crate::{Error, Result};

/// A parsed INDEX: borrowed object data plus the offset just past its end.
#[derive(Debug, Clone)]
pub(crate) struct Index<'a> {
    pub items: Vec<&'a [u8]>,
    pub end: usize,
}

impl<'a> Index<'a> {
    /// Parse the INDEX that starts at `start`.
    pub fn parse(data: &'a [u8], start: usize) -> Result<Self> {
        let count = read_u16(data, start)? as usize;
        if count == 0 {
            return Ok(Self { items: Vec::new(), end: start + 2 });
        }

        let off_size = *data.get(start + 2).ok_or(Error::Truncated { offset: start + 2 })?;
        if !(1..=4).contains(&off_size) {
            return Err(Error::InvalidOffSize(off_size));
        }
        let off_size = off_size as usize;

        let offsets_start = start + 3;
        let offsets = (0..=count)
            .map(|i| read_offset(data, offsets_start + i * off_size, off_size))
            .collect::<Result<Vec<_>>>()?;

        // Offsets are 1-based relative to the byte preceding the object data.
        let base = offsets_start + (count + 1) * off_size - 1;
        let mut items = Vec::with_capacity(count);
        for pair in offsets.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if lo == 0 || hi < lo {
                return Err(Error::InvalidIndex { offset: start });
            }
            let item = data
                .get(base + lo..base + hi)
                .ok_or(Error::Truncated { offset: base + hi })?;
            items.push(item);
        }

        Ok(Self { items, end: base + offsets[count] })
    }
}

/// Serialize `items` as an INDEX using the smallest sufficient offset size.
pub(crate) fn write_index<T: AsRef<[u8]>>(items: &[T]) -> Result<Vec<u8>> {
    let count = u16::try_from(items.len()).map_err(|_| Error::TooManyObjects(items.len()))?;
    let mut out = count.to_be_bytes().to_vec();
    if items.is_empty() {
        return Ok(out);
    }

    let total: usize = items.iter().map(|item| item.as_ref().len()).sum();
    let off_size = match total + 1 {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    };
    out.push(off_size as u8);

    let mut offset = 1;
    push_offset(&mut out, offset, off_size);
    for item in items {
        offset += item.as_ref().len();
        push_offset(&mut out, offset, off_size);
    }
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
    Ok(out)
}

pub(crate) fn read_u16(data: &[u8], at: usize) -> Result<u16> {
    data.get(at..at + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or(Error::Truncated { offset: at })
}

fn read_offset(data: &[u8], at: usize, off_size: usize) -> Result<usize> {
    let bytes = data.get(at..at + off_size).ok_or(Error::Truncated { offset: at })?;
    Ok(bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize))
}

fn push_offset(out: &mut Vec<u8>, offset: usize, off_size: usize) {
    let bytes = (offset as u32).to_be_bytes();
    out.extend_from_slice(&bytes[4 - off_size..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let bytes = write_index::<&[u8]>(&[]).unwrap();
        assert_eq!(bytes, vec![0, 0]);
        let index = Index::parse(&bytes, 0).unwrap();
        assert!(index.items.is_empty());
        assert_eq!(index.end, 2);
    }

    #[test]
    fn test_write_index_layout() {
        let bytes = write_index(&[b"ab".as_slice(), b"c".as_slice()]).unwrap();
        assert_eq!(bytes, vec![0, 2, 1, 1, 3, 4, b'a', b'b', b'c']);
    }

    #[test]
    fn test_parse_index_at_offset() {
        let mut data = vec![0xAA, 0xBB];
        data.extend(write_index(&[b"Name".as_slice()]).unwrap());
        data.push(0xCC);
        let index = Index::parse(&data, 2).unwrap();
        assert_eq!(index.items, vec![b"Name".as_slice()]);
        assert_eq!(data[index.end], 0xCC);
    }

    #[test]
    fn test_large_index_uses_wider_offsets() {
        let big = vec![7u8; 300];
        let bytes = write_index(&[big.as_slice()]).unwrap();
        assert_eq!(bytes[2], 2);
        let index = Index::parse(&bytes, 0).unwrap();
        assert_eq!(index.items[0].len(), 300);
        assert_eq!(index.end, bytes.len());
    }

    #[test]
    fn test_truncated_index() {
        let mut bytes = write_index(&[b"abcdef".as_slice()]).unwrap();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(Index::parse(&bytes, 0), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_invalid_off_size() {
        let bytes = [0, 1, 5, 0, 0];
        assert!(matches!(Index::parse(&bytes, 0), Err(Error::InvalidOffSize(5))));
    }
}
