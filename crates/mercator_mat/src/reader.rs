use std::io::Read;

use crate::error::MatError;
use crate::format::{
    ENDIAN_INDICATOR, HEADER_TEXT_LEN, MAT_VERSION, MI_INT8, MI_INT32, MI_MATRIX, MI_UINT32,
    MX_UINT32_CLASS, padded,
};

/// One variable read back from an artifact, converted to row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatArray {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<u32>,
}

pub fn read_all<R: Read>(mut reader: R) -> Result<Vec<MatArray>, MatError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse(&bytes)
}

/// Parses a whole MAT file. Accepts only the subset [`crate::writer`]
/// emits: little-endian, uncompressed, two-dimensional uint32 arrays.
pub fn parse(bytes: &[u8]) -> Result<Vec<MatArray>, MatError> {
    let mut scanner = Scanner::new(bytes);
    parse_header(&mut scanner)?;

    let mut arrays = Vec::new();
    while !scanner.is_done() {
        let element = read_element(&mut scanner)?;
        arrays.push(parse_matrix_element(element)?);
    }

    Ok(arrays)
}

struct Scanner<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Scanner<'a> {
    fn new(bytes: &'a [u8]) -> Scanner<'a> {
        Scanner { bytes, offset: 0 }
    }

    fn is_done(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], MatError> {
        let slice = self
            .offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(self.offset..end))
            .ok_or(MatError::Truncated {
                offset: self.offset,
            })?;

        self.offset += len;
        Ok(slice)
    }

    fn take_u32(&mut self) -> Result<u32, MatError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take_i32(&mut self) -> Result<i32, MatError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

fn parse_header(scanner: &mut Scanner) -> Result<(), MatError> {
    let text = scanner.take(HEADER_TEXT_LEN)?;
    if !text.starts_with(b"MATLAB 5.0 MAT-file") {
        return Err(MatError::Header("missing MATLAB 5.0 signature"));
    }

    // subsystem data offset, unused
    scanner.take(8)?;

    let version = scanner.take(2)?;
    if u16::from_le_bytes([version[0], version[1]]) != MAT_VERSION {
        return Err(MatError::Header("unsupported MAT-file version"));
    }

    let endian = scanner.take(2)?;
    if endian != ENDIAN_INDICATOR {
        return Err(MatError::Header("big-endian MAT files are not supported"));
    }

    Ok(())
}

struct RawElement<'a> {
    mi_type: u32,
    data: &'a [u8],
}

/// Reads one tagged element, small or regular form. A non-zero upper half
/// of the first word marks the small form, with the length packed beside
/// the type and the data inline.
fn read_element<'a>(scanner: &mut Scanner<'a>) -> Result<RawElement<'a>, MatError> {
    let word = scanner.take_u32()?;
    let small_len = (word >> 16) as usize;

    if small_len != 0 {
        if small_len > 4 {
            return Err(MatError::Element("small element longer than 4 bytes"));
        }
        let data = scanner.take(4)?;
        return Ok(RawElement {
            mi_type: word & 0xFFFF,
            data: &data[..small_len],
        });
    }

    let nbytes = scanner.take_u32()? as usize;
    let data = scanner.take(nbytes)?;
    scanner.take(padded(nbytes) - nbytes)?;

    Ok(RawElement { mi_type: word, data })
}

fn parse_matrix_element(element: RawElement) -> Result<MatArray, MatError> {
    if element.mi_type != MI_MATRIX {
        return Err(MatError::UnsupportedElement {
            mi_type: element.mi_type,
        });
    }

    let mut scanner = Scanner::new(element.data);

    let flags = read_element(&mut scanner)?;
    if flags.mi_type != MI_UINT32 || flags.data.len() != 8 {
        return Err(MatError::Element("malformed array flags"));
    }
    let class = u32::from_le_bytes([flags.data[0], flags.data[1], flags.data[2], flags.data[3]])
        & 0xFF;
    if class != MX_UINT32_CLASS {
        return Err(MatError::UnsupportedClass { class });
    }

    let dimensions = read_element(&mut scanner)?;
    if dimensions.mi_type != MI_INT32 || dimensions.data.len() != 8 {
        return Err(MatError::Element("expected two 32-bit dimensions"));
    }
    let mut dimensions = Scanner::new(dimensions.data);
    let rows = dimensions.take_i32()?;
    let cols = dimensions.take_i32()?;
    if rows < 0 || cols < 0 {
        return Err(MatError::Element("negative dimension"));
    }
    let rows = rows as usize;
    let cols = cols as usize;

    let name = read_element(&mut scanner)?;
    if name.mi_type != MI_INT8 {
        return Err(MatError::Element("expected the array name"));
    }
    let name = String::from_utf8(name.data.to_vec())
        .map_err(|_| MatError::Element("array name is not UTF-8"))?;

    let data = read_element(&mut scanner)?;
    if data.mi_type != MI_UINT32 {
        return Err(MatError::UnsupportedElement {
            mi_type: data.mi_type,
        });
    }
    let expected = rows
        .checked_mul(cols)
        .and_then(|count| count.checked_mul(4))
        .ok_or(MatError::Element("dimension overflow"))?;
    if data.data.len() != expected {
        return Err(MatError::Element("data length does not match dimensions"));
    }

    // stored column-major, hand back row-major
    let mut column_major = Vec::with_capacity(rows * cols);
    for chunk in data.data.chunks_exact(4) {
        column_major.push(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    let mut values = vec![0u32; rows * cols];
    for col in 0..cols {
        for row in 0..rows {
            values[row * cols + col] = column_major[col * rows + row];
        }
    }

    Ok(MatArray {
        name,
        rows,
        cols,
        values,
    })
}
