//! RTTTL header parsing
//!
//! Extracts the `d=`, `o=` and `b=` defaults from `name:d=4,o=5,b=112:` and finds
//! where the note list starts. The name segment is skipped: scanning starts at the
//! first `=`. All scans stop at the end of the text.

use crate::duration::{bit_reverse8, is_duration_class};
use crate::error::RtttlError;

/// Song defaults read from the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    /// Default duration class, already bit-reversed into a weight.
    pub default_duration_class: u8,
    pub default_octave: u8,
    pub bpm: u16,
    /// Byte offset of the first note, just past the second `:`.
    pub first_note_offset: usize,
}

/// Parse the header of an RTTTL definition.
pub fn parse_header(text: &str) -> Result<Header, RtttlError> {
    let bytes = text.as_bytes();

    let duration_at = find_after(bytes, 0, b'=', "default duration")?;
    let duration = read_header_value(bytes, duration_at, "default duration")?;
    if !is_duration_class(duration) {
        return Err(malformed(
            duration_at,
            format!("default duration {} is not a power of two", duration),
        ));
    }

    let octave_at = find_after(bytes, duration_at, b'=', "default octave")?;
    let octave = read_header_value(bytes, octave_at, "default octave")?;
    let default_octave = u8::try_from(octave)
        .map_err(|_| malformed(octave_at, format!("default octave {} is too large", octave)))?;

    let bpm_at = find_after(bytes, octave_at, b'=', "BPM")?;
    let bpm = read_header_value(bytes, bpm_at, "BPM")?;
    let bpm = match u16::try_from(bpm) {
        Ok(0) => return Err(malformed(bpm_at, "BPM must be greater than 0".to_string())),
        Ok(bpm) => bpm,
        Err(_) => return Err(malformed(bpm_at, format!("BPM {} is too large", bpm))),
    };

    let first_note_offset = find_after(bytes, bpm_at, b':', "note list")?;

    Ok(Header {
        default_duration_class: bit_reverse8(duration as u8),
        default_octave,
        bpm,
        first_note_offset,
    })
}

/// Read a run of ASCII digits starting at `pos`, skipping leading whitespace.
///
/// Returns the digit slice (possibly empty) and the offset just past it.
pub(crate) fn read_digits(bytes: &[u8], pos: usize) -> (&str, usize) {
    let mut start = pos;
    while start < bytes.len() && bytes[start].is_ascii_whitespace() {
        start += 1;
    }
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    // Only ASCII digits were consumed, so the slice is valid UTF-8
    let digits = std::str::from_utf8(&bytes[start..end]).unwrap_or_default();
    (digits, end)
}

/// Offset just past the first `delim` at or after `from`.
fn find_after(bytes: &[u8], from: usize, delim: u8, field: &str) -> Result<usize, RtttlError> {
    bytes
        .get(from..)
        .and_then(|rest| rest.iter().position(|&b| b == delim))
        .map(|i| from + i + 1)
        .ok_or_else(|| {
            malformed(
                bytes.len(),
                format!("expected '{}' before {}", delim as char, field),
            )
        })
}

fn read_header_value(bytes: &[u8], pos: usize, field: &str) -> Result<u32, RtttlError> {
    let (digits, _) = read_digits(bytes, pos);
    if digits.is_empty() {
        return Err(malformed(pos, format!("expected a number for {}", field)));
    }
    digits
        .parse()
        .map_err(|_| malformed(pos, format!("{} {} is too large", field, digits)))
}

fn malformed(offset: usize, message: String) -> RtttlError {
    RtttlError::MalformedHeader { offset, message }
}
