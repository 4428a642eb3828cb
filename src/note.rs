//! Note token parsing and decoding
//!
//! A note token looks like `[duration] letter [# | . | #.] [octave]`, e.g. `32f#6`,
//! `8a.6`, `p` or `16d#.`. Decoding resolves a token against its song's defaults into
//! a [`NoteEvent`] that a tone generator can play directly.

use serde::Serialize;
use tracing::trace;

use crate::duration::{is_duration_class, resolve_duration_ms};
use crate::error::RtttlError;
use crate::frequency::{frequency_of, MAX_KEY};
use crate::header::read_digits;
use crate::song::SongDescriptor;

/// One note token, split into its parts but not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteToken {
    /// Explicit duration class, if the token starts with digits.
    pub duration: Option<u32>,
    /// Note letter, uppercased. `P` is a rest.
    pub letter: char,
    pub sharp: bool,
    pub dotted: bool,
    /// Explicit octave, if the token ends with digits.
    pub octave: Option<u32>,
}

impl NoteToken {
    /// Split a single token (no surrounding commas) into its parts.
    ///
    /// `index` is only used for error reporting.
    ///
    /// # Examples
    /// ```
    /// use rtttl::NoteToken;
    ///
    /// let token = NoteToken::parse("16f#.6", 1).unwrap();
    /// assert_eq!(token.duration, Some(16));
    /// assert_eq!(token.letter, 'F');
    /// assert!(token.sharp && token.dotted);
    /// assert_eq!(token.octave, Some(6));
    /// ```
    pub fn parse(token: &str, index: usize) -> Result<Self, RtttlError> {
        let bytes = token.as_bytes();

        let (duration_digits, pos) = read_digits(bytes, 0);
        let duration = parse_number(duration_digits);

        let letter_pos = bytes[pos..]
            .iter()
            .position(|b| b.is_ascii_alphabetic())
            .map(|i| pos + i)
            .ok_or_else(|| RtttlError::MalformedToken {
                index,
                message: format!("no note letter in '{}'", token.trim()),
            })?;
        let letter = bytes[letter_pos].to_ascii_uppercase() as char;

        // One modifier slot, except that a sharp may itself be followed by a dot
        let mut pos = letter_pos + 1;
        let mut sharp = false;
        let mut dotted = false;
        match bytes.get(pos) {
            Some(b'#') => {
                sharp = true;
                pos += 1;
                if bytes.get(pos) == Some(&b'.') {
                    dotted = true;
                    pos += 1;
                }
            }
            Some(b'.') => {
                dotted = true;
                pos += 1;
            }
            _ => {}
        }

        let (octave_digits, _) = read_digits(bytes, pos);
        let octave = parse_number(octave_digits);

        Ok(Self {
            duration,
            letter,
            sharp,
            dotted,
            octave,
        })
    }

    pub fn is_rest(&self) -> bool {
        self.letter == 'P'
    }
}

/// A fully resolved note, ready for a tone generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    /// 1-based position in the song.
    pub index: usize,
    pub letter: char,
    pub sharp: bool,
    pub dotted: bool,
    /// Explicit octave, or the song default.
    pub octave: u8,
    pub duration_ms: f32,
    /// 0 for rests.
    pub frequency_hz: u16,
}

impl NoteEvent {
    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// Semitone class within an octave: C = 1 through B = 12, 0 for rests.
///
/// Letters outside A-G have no pitch.
pub fn pitch_class(letter: char, sharp: bool) -> i32 {
    let base = match letter.to_ascii_uppercase() {
        'C' => 1,
        'D' => 3,
        'E' => 5,
        'F' => 6,
        'G' => 8,
        'A' => 10,
        'B' => 12,
        _ => return 0,
    };
    if sharp {
        base + 1
    } else {
        base
    }
}

/// Decode the 1-based note `index` of `song`.
///
/// # Examples
/// ```
/// use rtttl::{load, decode_note};
///
/// let song = load("x:d=4,o=5,b=112:32b,32p,c6").unwrap();
/// let note = decode_note(&song, 3).unwrap();
/// assert_eq!(note.letter, 'C');
/// assert_eq!(note.octave, 6);
/// assert_eq!(note.frequency_hz, 1047);
/// ```
pub fn decode_note(song: &SongDescriptor<'_>, index: usize) -> Result<NoteEvent, RtttlError> {
    let token = NoteToken::parse(song.token(index)?, index)?;

    let duration = match token.duration {
        Some(value) if value != 0 => {
            if !is_duration_class(value) {
                return Err(RtttlError::InvalidDuration { index, value });
            }
            Some(value as u8)
        }
        _ => None,
    };

    let duration_ms = resolve_duration_ms(
        duration,
        song.default_duration_class(),
        song.ms_per_unit(),
        token.dotted,
    );

    let explicit_octave = token.octave.filter(|&o| o != 0);
    let class = pitch_class(token.letter, token.sharp);
    let (octave, frequency_hz) = if class == 0 {
        // Rests carry no pitch, so their octave digits are never range checked
        let octave = explicit_octave
            .and_then(|o| u8::try_from(o).ok())
            .unwrap_or(song.default_octave());
        (octave, 0)
    } else {
        let octave = explicit_octave.unwrap_or(song.default_octave() as u32);
        let key = class as i64 + 12 * octave as i64 - 9;
        if !(1..=MAX_KEY as i64).contains(&key) {
            return Err(RtttlError::RangeExceeded {
                key: i32::try_from(key).unwrap_or(i32::MAX),
            });
        }
        // In range, so the octave is at most 8
        (octave as u8, frequency_of(key as i32)?)
    };

    let note = NoteEvent {
        index,
        letter: token.letter,
        sharp: token.sharp,
        dotted: token.dotted,
        octave,
        duration_ms,
        frequency_hz,
    };
    trace!(?note, "decoded note");
    Ok(note)
}

/// Digits that overflow a `u32` saturate, so oversized values fail range checks later.
fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}
