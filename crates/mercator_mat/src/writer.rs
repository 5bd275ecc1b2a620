use std::io::Write;

use crate::error::MatError;
use crate::format::{
    ENDIAN_INDICATOR, HEADER_LEN, HEADER_TEXT_LEN, MAT_VERSION, MI_INT8, MI_INT32, MI_MATRIX,
    MI_UINT32, MX_UINT32_CLASS, NAME_LEN_MAX, padded,
};

/// Description text in the artifact header. Fixed so repeated runs over the
/// same inputs produce byte-identical files.
const HEADER_TEXT: &str = "MATLAB 5.0 MAT-file, written by mercator";

/// Writes uint32 matrix variables in the MAT-file level 5 layout.
///
/// Only the subset this pipeline needs is supported: little-endian,
/// uncompressed, two-dimensional uint32 arrays.
pub struct MatWriter<W: Write> {
    writer: W,
}

impl<W: Write> MatWriter<W> {
    /// Writes the 128-byte header immediately.
    pub fn new(mut writer: W) -> Result<MatWriter<W>, MatError> {
        // text field space-padded, subsystem offset left zeroed, version, "IM"
        let mut header = [0u8; HEADER_LEN];
        header[..HEADER_TEXT_LEN].fill(b' ');
        header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT.as_bytes());
        header[HEADER_LEN - 4..HEADER_LEN - 2].copy_from_slice(&MAT_VERSION.to_le_bytes());
        header[HEADER_LEN - 2..].copy_from_slice(ENDIAN_INDICATOR);

        writer.write_all(&header)?;

        Ok(MatWriter { writer })
    }

    /// Writes `values` as one matrix variable. Input is row-major with
    /// `rows * cols` entries; the MAT format stores entries column-major, so
    /// the data is transposed on the way out.
    pub fn write_u32_matrix(
        &mut self,
        name: &str,
        rows: usize,
        cols: usize,
        values: &[u32],
    ) -> Result<(), MatError> {
        validate_name(name)?;

        if rows.checked_mul(cols) != Some(values.len()) {
            return Err(MatError::Shape {
                name: name.to_owned(),
                rows,
                cols,
                found: values.len(),
            });
        }

        let rows_i32 = i32::try_from(rows).map_err(|_| MatError::Dimension(rows))?;
        let cols_i32 = i32::try_from(cols).map_err(|_| MatError::Dimension(cols))?;

        if u32::try_from(values.len() * 4).is_err() {
            return Err(MatError::Oversize(name.to_owned()));
        }

        let mut buf = Vec::with_capacity(48 + padded(values.len() * 4));

        // array flags: class in the low byte, no logical/global/complex bits
        push_tag(&mut buf, MI_UINT32, 8);
        buf.extend_from_slice(&MX_UINT32_CLASS.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());

        push_tag(&mut buf, MI_INT32, 8);
        buf.extend_from_slice(&rows_i32.to_le_bytes());
        buf.extend_from_slice(&cols_i32.to_le_bytes());

        push_element(&mut buf, MI_INT8, name.as_bytes());

        let mut data = Vec::with_capacity(values.len() * 4);
        for col in 0..cols {
            for row in 0..rows {
                data.extend_from_slice(&values[row * cols + col].to_le_bytes());
            }
        }
        push_element(&mut buf, MI_UINT32, &data);

        let total = u32::try_from(buf.len()).map_err(|_| MatError::Oversize(name.to_owned()))?;
        self.writer.write_all(&MI_MATRIX.to_le_bytes())?;
        self.writer.write_all(&total.to_le_bytes())?;
        self.writer.write_all(&buf)?;

        Ok(())
    }

    /// Writes a single value as a 1x1 matrix, which is how MATLAB stores
    /// scalars.
    pub fn write_u32_scalar(&mut self, name: &str, value: u32) -> Result<(), MatError> {
        self.write_u32_matrix(name, 1, 1, &[value])
    }

    pub fn finish(mut self) -> Result<W, MatError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn push_tag(buf: &mut Vec<u8>, mi_type: u32, nbytes: u32) {
    buf.extend_from_slice(&mi_type.to_le_bytes());
    buf.extend_from_slice(&nbytes.to_le_bytes());
}

/// Subelement with tag and zero padding to the 8-byte boundary. One to four
/// bytes of data use the packed small-element form.
fn push_element(buf: &mut Vec<u8>, mi_type: u32, data: &[u8]) {
    if !data.is_empty() && data.len() <= 4 {
        let word = mi_type | ((data.len() as u32) << 16);
        buf.extend_from_slice(&word.to_le_bytes());
        buf.extend_from_slice(data);
        buf.resize(buf.len() + 4 - data.len(), 0);
        return;
    }

    push_tag(buf, mi_type, data.len() as u32);
    buf.extend_from_slice(data);
    let pad = padded(data.len()) - data.len();
    buf.resize(buf.len() + pad, 0);
}

/// MATLAB variable names start with a letter, continue with letters, digits
/// or underscores, and stay within `namelengthmax`.
fn validate_name(name: &str) -> Result<(), MatError> {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !starts_with_letter || !rest_ok || name.len() > NAME_LEN_MAX {
        return Err(MatError::VariableName(name.to_owned()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_matrix(name: &str, rows: usize, cols: usize, values: &[u32]) -> Vec<u8> {
        let mut writer = MatWriter::new(Vec::new()).unwrap();
        writer.write_u32_matrix(name, rows, cols, values).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn header_is_fixed_128_bytes() {
        let bytes = MatWriter::new(Vec::new()).unwrap().finish().unwrap();

        assert_eq!(bytes.len(), HEADER_LEN);
        assert!(bytes.starts_with(b"MATLAB 5.0 MAT-file"));
        assert!(bytes[..HEADER_TEXT_LEN].ends_with(b"    "));
        assert_eq!(&bytes[116..124], &[0u8; 8]);
        assert_eq!(&bytes[124..126], &[0x00, 0x01]);
        assert_eq!(&bytes[126..128], b"IM");
    }

    #[test]
    fn matrix_element_layout_matches_the_level_5_format() {
        let bytes = write_matrix("Dist_Matrix", 2, 2, &[0, 10, 20, 0]);
        let element = &bytes[HEADER_LEN..];

        // miMATRIX tag carrying the byte count of all subelements
        assert_eq!(&element[0..4], &14u32.to_le_bytes());
        assert_eq!(&element[4..8], &80u32.to_le_bytes());

        // array flags: miUINT32, 8 bytes, uint32 class
        assert_eq!(&element[8..12], &6u32.to_le_bytes());
        assert_eq!(&element[12..16], &8u32.to_le_bytes());
        assert_eq!(&element[16..20], &13u32.to_le_bytes());
        assert_eq!(&element[20..24], &0u32.to_le_bytes());

        // dimensions: miINT32, 2 x 2
        assert_eq!(&element[24..28], &5u32.to_le_bytes());
        assert_eq!(&element[28..32], &8u32.to_le_bytes());
        assert_eq!(&element[32..36], &2i32.to_le_bytes());
        assert_eq!(&element[36..40], &2i32.to_le_bytes());

        // name: miINT8, 11 bytes zero-padded to 16
        assert_eq!(&element[40..44], &1u32.to_le_bytes());
        assert_eq!(&element[44..48], &11u32.to_le_bytes());
        assert_eq!(&element[48..59], b"Dist_Matrix");
        assert_eq!(&element[59..64], &[0u8; 5]);
    }

    #[test]
    fn matrix_data_is_written_column_major() {
        let bytes = write_matrix("M", 2, 2, &[0, 10, 20, 0]);

        // last subelement: miUINT32 tag then the four entries
        let data = &bytes[bytes.len() - 24..];
        assert_eq!(&data[0..4], &6u32.to_le_bytes());
        assert_eq!(&data[4..8], &16u32.to_le_bytes());
        assert_eq!(&data[8..12], &0u32.to_le_bytes());
        assert_eq!(&data[12..16], &20u32.to_le_bytes());
        assert_eq!(&data[16..20], &10u32.to_le_bytes());
        assert_eq!(&data[20..24], &0u32.to_le_bytes());
    }

    #[test]
    fn scalar_data_uses_the_small_element_form() {
        let mut writer = MatWriter::new(Vec::new()).unwrap();
        writer.write_u32_scalar("Num_Places", 3).unwrap();
        let bytes = writer.finish().unwrap();

        // packed tag: type and length share one word, value fills the rest
        let data = &bytes[bytes.len() - 8..];
        assert_eq!(&data[0..2], &6u16.to_le_bytes());
        assert_eq!(&data[2..4], &4u16.to_le_bytes());
        assert_eq!(&data[4..8], &3u32.to_le_bytes());
    }

    #[test]
    fn wrong_value_count_is_rejected() {
        let mut writer = MatWriter::new(Vec::new()).unwrap();

        match writer.write_u32_matrix("M", 2, 2, &[1, 2, 3]).unwrap_err() {
            MatError::Shape {
                name,
                rows,
                cols,
                found,
            } => {
                assert_eq!(name, "M");
                assert_eq!((rows, cols), (2, 2));
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_variable_names_are_rejected() {
        let mut writer = MatWriter::new(Vec::new()).unwrap();

        for name in ["", "2fast", "has space", "dash-ed", "_leading"] {
            let err = writer.write_u32_matrix(name, 1, 1, &[0]).unwrap_err();
            assert!(matches!(err, MatError::VariableName(_)), "{name:?}");
        }

        let too_long = "a".repeat(64);
        let err = writer.write_u32_matrix(&too_long, 1, 1, &[0]).unwrap_err();
        assert!(matches!(err, MatError::VariableName(_)));

        writer.write_u32_matrix("x_1", 1, 1, &[0]).unwrap();
    }

    #[test]
    fn empty_matrix_writes_zero_length_data() {
        let bytes = write_matrix("Empty", 0, 0, &[]);
        let element = &bytes[HEADER_LEN..];

        // 0 x 0 dimensions, data subelement is a bare tag
        assert_eq!(&element[32..36], &0i32.to_le_bytes());
        assert_eq!(&element[36..40], &0i32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 8..bytes.len() - 4], &6u32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 4..], &0u32.to_le_bytes());
    }

    #[test]
    fn writes_are_deterministic() {
        let first = write_matrix("Dist_Matrix", 2, 2, &[0, 1, 2, 3]);
        let second = write_matrix("Dist_Matrix", 2, 2, &[0, 1, 2, 3]);

        assert_eq!(first, second);
    }
}
