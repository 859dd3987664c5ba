/*
# Bytes Reader Module

 Helpers for pulling fixed-width fields out of STL blocks.
 STL blocks are byte aligned, so everything here works on whole bytes: filling
 a block buffer from a `Read`, slicing ASCII fields out of the GSI block, and
 decoding the little-endian / digit-string numbers the format uses.

 Key components:
 - Stream reader: `read_block()` (short reads are reported, not errors)
 - Slice readers: `read_u16_le()`, `read_field()` with position tracking
 - Field decoders: `ascii_field()`, `parse_decimal()`, `digit_value()`
*/

use std::io::{self, Read};

/// Mask for the `n` least significant bits.
pub fn mask(n: u32) -> u32 {
    if n == 32 {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}

/// Fill `buf` from `r`, stopping early only at end of input.
///
/// Returns the number of bytes actually read, so callers can tell a clean
/// end of input (0) from a truncated block (anything short of `buf.len()`).
pub fn read_block<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total_read = 0;
    while total_read < buf.len() {
        match r.read(&mut buf[total_read..]) {
            Ok(0) => break, // EOF
            Ok(n) => total_read += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total_read)
}

/// Read a 16-bit little endian value from a byte slice advancing the position.
pub fn read_u16_le(data: &[u8], pos: &mut usize) -> Option<u16> {
    if *pos + 2 > data.len() {
        return None;
    }
    let v = u16::from_le_bytes([data[*pos], data[*pos + 1]]);
    *pos += 2;
    Some(v)
}

/// Slice `len` bytes out of `data` advancing the position.
pub fn read_field<'a>(data: &'a [u8], pos: &mut usize, len: usize) -> Option<&'a [u8]> {
    if *pos + len > data.len() {
        return None;
    }
    let field = &data[*pos..*pos + len];
    *pos += len;
    Some(field)
}

/// Interpret a fixed-width field as ASCII, keeping the padding intact.
pub fn ascii_field(field: &[u8]) -> String {
    field
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

/// Parse a space or NUL padded decimal field such as `"00042"`.
pub fn parse_decimal(field: &[u8]) -> Option<u32> {
    let text = std::str::from_utf8(field).ok()?;
    text.trim_matches(|c: char| c == ' ' || c == '\0')
        .parse::<u32>()
        .ok()
}

/// Value of a single digit byte from its low nibble, capped at 9.
pub fn digit_value(b: u8) -> u32 {
    (b as u32 & mask(4)).min(9)
}
