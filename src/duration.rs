//! Duration class encoding
//!
//! RTTTL durations are note fractions: 1 = whole, 2 = half, 4 = quarter and so on.
//! Reversing the bits of a power-of-two class turns it into a weight proportional to
//! the note length (`1 -> 128`, `2 -> 64`, `4 -> 32`, ...), counted in units of the
//! shortest representable note. Multiplying by the song's `ms_per_unit` gives
//! milliseconds.

/// Reverse the bit order of a byte (bit 0 <-> bit 7, bit 1 <-> bit 6, ...).
///
/// # Examples
/// ```
/// use rtttl::bit_reverse8;
///
/// assert_eq!(bit_reverse8(4), 32);
/// assert_eq!(bit_reverse8(1), 128);
/// ```
pub fn bit_reverse8(b: u8) -> u8 {
    b.reverse_bits()
}

/// True when `value` is a power of two small enough to be a duration class.
pub fn is_duration_class(value: u32) -> bool {
    value.is_power_of_two() && value <= u8::MAX as u32
}

/// Resolve a note's duration in milliseconds.
///
/// `duration_digits` is the explicit duration class from the token; `None` or `0`
/// falls back to `default_duration_class`, which is stored already reversed.
/// A dotted note is extended by half its length, once.
pub fn resolve_duration_ms(
    duration_digits: Option<u8>,
    default_duration_class: u8,
    ms_per_unit: f32,
    dotted: bool,
) -> f32 {
    let weight = match duration_digits {
        Some(d) if d != 0 => bit_reverse8(d),
        _ => default_duration_class,
    };

    let base = weight as f32 * ms_per_unit;
    if dotted {
        base + base / 2.0
    } else {
        base
    }
}
