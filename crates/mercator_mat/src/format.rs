//! Constants for the MAT-file level 5 binary layout, little-endian only.

pub const HEADER_LEN: usize = 128;
pub const HEADER_TEXT_LEN: usize = 116;
pub const MAT_VERSION: u16 = 0x0100;
pub const ENDIAN_INDICATOR: &[u8; 2] = b"IM";

pub const MI_INT8: u32 = 1;
pub const MI_INT32: u32 = 5;
pub const MI_UINT32: u32 = 6;
pub const MI_MATRIX: u32 = 14;

pub const MX_UINT32_CLASS: u32 = 13;

/// MATLAB's `namelengthmax`.
pub const NAME_LEN_MAX: usize = 63;

/// Rounds a byte count up to the 8-byte element alignment.
pub fn padded(len: usize) -> usize {
    len.div_ceil(8) * 8
}
