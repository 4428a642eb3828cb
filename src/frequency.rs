//! Piano key to frequency resolution
//!
//! Keys are numbered from A0 = 1 upwards with A4 = 49 = 440 Hz. Key 0 is the
//! "no pitch" sentinel used for rests.

use crate::error::RtttlError;

/// Highest piano key in the table.
pub const MAX_KEY: i32 = 92;

/// `round(440 * 2^((n - 49) / 12))` for every key `n` in `1..=92`, with `0` at index 0.
static FREQUENCIES: [u16; 93] = [
    0, 28, 29, 31, 33, 35, 37, 39, 41, 44, 46, 49, 52, 55, 58, 62, 65, 69, 73, 78, 82, 87, 92,
    98, 104, 110, 117, 123, 131, 139, 147, 156, 165, 175, 185, 196, 208, 220, 233, 247, 262, 277,
    294, 311, 330, 349, 370, 392, 415, 440, 466, 494, 523, 554, 587, 622, 659, 698, 740, 784,
    831, 880, 932, 988, 1047, 1109, 1175, 1245, 1319, 1397, 1480, 1568, 1661, 1760, 1865, 1976,
    2093, 2217, 2349, 2489, 2637, 2794, 2960, 3136, 3322, 3520, 3729, 3951, 4186, 4435, 4699,
    4978, 5274,
];

/// Look up the frequency in Hz of a piano key.
///
/// # Examples
/// ```
/// use rtttl::frequency_of;
///
/// assert_eq!(frequency_of(49).unwrap(), 440); // A4
/// assert_eq!(frequency_of(0).unwrap(), 0);    // rest
/// assert!(frequency_of(93).is_err());
/// ```
pub fn frequency_of(key: i32) -> Result<u16, RtttlError> {
    usize::try_from(key)
        .ok()
        .and_then(|i| FREQUENCIES.get(i))
        .copied()
        .ok_or(RtttlError::RangeExceeded { key })
}
