//! Loaded songs and note lookup
//!
//! A [`SongDescriptor`] holds the header defaults of one RTTTL definition together
//! with the byte offset of every note token, computed once when the song is loaded.

use tracing::debug;

use crate::error::RtttlError;
use crate::header::parse_header;
use crate::note::{decode_note, NoteEvent};

/// Number of commas an RTTTL header carries between its three `key=value` fields.
const HEADER_COMMAS: usize = 2;

/// Parsed header state for one loaded tune.
///
/// Borrows the song text; the text is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct SongDescriptor<'a> {
    text: &'a str,
    default_duration_class: u8,
    default_octave: u8,
    bpm: u16,
    first_note_offset: usize,
    note_count: usize,
    ms_per_unit: f32,
    /// Start offset of each note token, in song order.
    note_offsets: Vec<usize>,
}

impl<'a> SongDescriptor<'a> {
    /// Parse the header of `text` and index its notes.
    ///
    /// # Examples
    /// ```
    /// use rtttl::SongDescriptor;
    ///
    /// let song = SongDescriptor::load("x:d=4,o=5,b=112:32b,32p,32b6").unwrap();
    /// assert_eq!(song.note_count(), 3);
    /// assert_eq!(song.bpm(), 112);
    /// ```
    pub fn load(text: &'a str) -> Result<Self, RtttlError> {
        let header = parse_header(text)?;
        let first_note_offset = header.first_note_offset;

        let header_commas = text[..first_note_offset].matches(',').count();
        if header_commas != HEADER_COMMAS {
            return Err(RtttlError::MalformedHeader {
                offset: first_note_offset,
                message: format!(
                    "expected {} commas in header, found {}",
                    HEADER_COMMAS, header_commas
                ),
            });
        }

        let note_count = text.matches(',').count() - 1;

        let mut note_offsets = Vec::with_capacity(note_count);
        note_offsets.push(first_note_offset);
        note_offsets.extend(
            text[first_note_offset..]
                .match_indices(',')
                .map(|(i, _)| first_note_offset + i + 1),
        );

        let song = Self {
            text,
            default_duration_class: header.default_duration_class,
            default_octave: header.default_octave,
            bpm: header.bpm,
            first_note_offset,
            note_count,
            ms_per_unit: 60000.0 / (512.0 * header.bpm as f32),
            note_offsets,
        };

        debug!(
            name = song.name(),
            bpm = song.bpm,
            default_octave = song.default_octave,
            default_duration_class = song.default_duration_class,
            note_count = song.note_count,
            "loaded song"
        );

        Ok(song)
    }

    /// The full RTTTL definition.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Song name: the text before the first `:`.
    pub fn name(&self) -> &'a str {
        self.text.split(':').next().unwrap_or_default().trim()
    }

    /// Default duration class, bit-reversed into a weight.
    pub fn default_duration_class(&self) -> u8 {
        self.default_duration_class
    }

    pub fn default_octave(&self) -> u8 {
        self.default_octave
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    pub fn first_note_offset(&self) -> usize {
        self.first_note_offset
    }

    pub fn note_count(&self) -> usize {
        self.note_count
    }

    /// Duration in milliseconds of the smallest note unit: `60000 / (512 * bpm)`.
    pub fn ms_per_unit(&self) -> f32 {
        self.ms_per_unit
    }

    /// Byte offset of the 1-based note `index` within the text.
    pub fn locate(&self, index: usize) -> Result<usize, RtttlError> {
        if index == 0 || index > self.note_count {
            return Err(RtttlError::InvalidIndex {
                index,
                note_count: self.note_count,
            });
        }
        Ok(self.note_offsets[index - 1])
    }

    /// The raw token of note `index`, up to the next comma or the end of the text.
    pub fn token(&self, index: usize) -> Result<&'a str, RtttlError> {
        let start = self.locate(index)?;
        let rest = &self.text[start..];
        let end = rest.find(',').unwrap_or(rest.len());
        Ok(&rest[..end])
    }

    /// Decode note `index` (1-based).
    pub fn note(&self, index: usize) -> Result<NoteEvent, RtttlError> {
        decode_note(self, index)
    }

    /// Decode every note in order.
    pub fn notes(&self) -> impl Iterator<Item = Result<NoteEvent, RtttlError>> + '_ {
        (1..=self.note_count).map(move |index| decode_note(self, index))
    }

    /// Sum of all note durations in milliseconds.
    pub fn total_duration_ms(&self) -> Result<f32, RtttlError> {
        self.notes()
            .try_fold(0.0_f32, |total, note| -> Result<f32, RtttlError> {
                Ok(total + note?.duration_ms)
            })
    }
}

/// Load a song from its RTTTL text.
pub fn load(text: &str) -> Result<SongDescriptor<'_>, RtttlError> {
    SongDescriptor::load(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACMAN_INTRO: &str = "pacman:d=4,o=5,b=112:32b,32p,32b6";

    #[test]
    fn test_note_count() {
        let song = load(PACMAN_INTRO).unwrap();
        assert_eq!(song.note_count(), 3);
    }

    #[test]
    fn test_song_fields() {
        let song = load(PACMAN_INTRO).unwrap();
        assert_eq!(song.name(), "pacman");
        assert_eq!(song.default_duration_class(), 32);
        assert_eq!(song.default_octave(), 5);
        assert_eq!(song.bpm(), 112);
        assert_eq!(song.first_note_offset(), 21);
        assert_eq!(song.ms_per_unit(), 60000.0 / (512.0 * 112.0));
    }

    #[test]
    fn test_locate_first_note() {
        let song = load(PACMAN_INTRO).unwrap();
        assert_eq!(song.locate(1).unwrap(), song.first_note_offset());
    }

    #[test]
    fn test_locate_follows_commas() {
        let song = load(PACMAN_INTRO).unwrap();
        assert_eq!(song.locate(2).unwrap(), 25);
        assert_eq!(song.locate(3).unwrap(), 29);
        assert_eq!(song.token(1).unwrap(), "32b");
        assert_eq!(song.token(2).unwrap(), "32p");
        assert_eq!(song.token(3).unwrap(), "32b6");
    }

    #[test]
    fn test_locate_invalid_index() {
        let song = load(PACMAN_INTRO).unwrap();
        assert_eq!(
            song.locate(0),
            Err(RtttlError::InvalidIndex { index: 0, note_count: 3 })
        );
        assert_eq!(
            song.locate(4),
            Err(RtttlError::InvalidIndex { index: 4, note_count: 3 })
        );
    }

    #[test]
    fn test_header_with_extra_comma() {
        let result = load("x:d=4,o=5,,b=112:c,d");
        assert!(matches!(result, Err(RtttlError::MalformedHeader { .. })));
    }

    #[test]
    fn test_total_duration() {
        let song = load("x:d=4,o=5,b=120:c,d,e").unwrap();
        let expected = 3.0 * 32.0 * song.ms_per_unit();
        assert!((song.total_duration_ms().unwrap() - expected).abs() < 1e-3);
    }
}
