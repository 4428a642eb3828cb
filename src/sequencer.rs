//! Cyclic playback cursor over a loaded song
//!
//! The sequencer steps through a song one note at a time and wraps back to the first
//! note after the last, so a caller can keep calling [`Sequencer::advance`] to loop a
//! tune forever. Scheduling (waiting `duration_ms` between notes) is up to the caller.
//!
//! ## Example
//! ```rust
//! use rtttl::{load, Sequencer};
//!
//! let song = load("x:d=4,o=5,b=112:c,d").unwrap();
//! let mut sequencer = Sequencer::new(song);
//!
//! assert_eq!(sequencer.advance().unwrap().letter, 'C');
//! assert_eq!(sequencer.advance().unwrap().letter, 'D');
//! assert_eq!(sequencer.advance().unwrap().letter, 'C'); // wrapped
//! ```

use tracing::warn;

use crate::error::RtttlError;
use crate::note::{decode_note, NoteEvent};
use crate::song::SongDescriptor;

/// Where the cursor currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Nothing played yet.
    Unstarted,
    /// Positioned on the 1-based note.
    AtNote(usize),
}

/// A song paired with its playback cursor.
#[derive(Debug, Clone)]
pub struct Sequencer<'a> {
    song: SongDescriptor<'a>,
    /// 0 until the first advance, then `1..=note_count`.
    position: usize,
}

impl<'a> Sequencer<'a> {
    pub fn new(song: SongDescriptor<'a>) -> Self {
        Self { song, position: 0 }
    }

    pub fn song(&self) -> &SongDescriptor<'a> {
        &self.song
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> CursorState {
        match self.position {
            0 => CursorState::Unstarted,
            k => CursorState::AtNote(k),
        }
    }

    /// Move to the next note, wrapping after the last, and decode it.
    ///
    /// The cursor moves even when the new note fails to decode, so advancing again
    /// skips past a bad note.
    pub fn advance(&mut self) -> Result<NoteEvent, RtttlError> {
        self.position = if self.position == 0 || self.position >= self.song.note_count() {
            1
        } else {
            self.position + 1
        };

        decode_note(&self.song, self.position).inspect_err(|e| {
            warn!(position = self.position, error = %e, "failed to decode note");
        })
    }

    /// Jump to note `index` and decode it. An invalid index leaves the cursor unchanged.
    pub fn seek(&mut self, index: usize) -> Result<NoteEvent, RtttlError> {
        self.song.locate(index)?;
        self.position = index;
        decode_note(&self.song, index)
    }

    /// The note under the cursor, or `None` before the first advance.
    pub fn current(&self) -> Option<Result<NoteEvent, RtttlError>> {
        match self.state() {
            CursorState::Unstarted => None,
            CursorState::AtNote(k) => Some(decode_note(&self.song, k)),
        }
    }

    /// Return to the unstarted state.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::load;

    const SONG: &str = "x:d=4,o=5,b=112:32b,32p,32b6";

    #[test]
    fn test_starts_unstarted() {
        let sequencer = Sequencer::new(load(SONG).unwrap());
        assert_eq!(sequencer.state(), CursorState::Unstarted);
        assert_eq!(sequencer.position(), 0);
        assert!(sequencer.current().is_none());
    }

    #[test]
    fn test_advance_steps_through_notes() {
        let mut sequencer = Sequencer::new(load(SONG).unwrap());
        let first = sequencer.advance().unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(sequencer.state(), CursorState::AtNote(1));

        let second = sequencer.advance().unwrap();
        assert_eq!(second.index, 2);
        assert_eq!(second.frequency_hz, 0);

        let third = sequencer.advance().unwrap();
        assert_eq!(third.index, 3);
        assert_eq!(third.octave, 6);
        assert_eq!(sequencer.state(), CursorState::AtNote(3));
    }

    #[test]
    fn test_wraps_after_last_note() {
        let mut sequencer = Sequencer::new(load(SONG).unwrap());
        for _ in 0..3 {
            sequencer.advance().unwrap();
        }
        let wrapped = sequencer.advance().unwrap();
        assert_eq!(wrapped.index, 1);
        assert_eq!(sequencer.state(), CursorState::AtNote(1));
    }

    #[test]
    fn test_seek_then_advance() {
        let mut sequencer = Sequencer::new(load(SONG).unwrap());
        let note = sequencer.seek(3).unwrap();
        assert_eq!(note.index, 3);
        assert_eq!(sequencer.advance().unwrap().index, 1);
    }

    #[test]
    fn test_seek_invalid_keeps_cursor() {
        let mut sequencer = Sequencer::new(load(SONG).unwrap());
        sequencer.advance().unwrap();
        assert!(matches!(
            sequencer.seek(9),
            Err(RtttlError::InvalidIndex { index: 9, note_count: 3 })
        ));
        assert_eq!(sequencer.position(), 1);
    }

    #[test]
    fn test_current_and_reset() {
        let mut sequencer = Sequencer::new(load(SONG).unwrap());
        sequencer.advance().unwrap();
        sequencer.advance().unwrap();
        assert_eq!(sequencer.current().unwrap().unwrap().index, 2);
        sequencer.reset();
        assert_eq!(sequencer.state(), CursorState::Unstarted);
        assert_eq!(sequencer.advance().unwrap().index, 1);
    }

    #[test]
    fn test_bad_note_can_be_skipped() {
        let mut sequencer = Sequencer::new(load("x:d=4,o=5,b=112:c,,e").unwrap());
        assert!(sequencer.advance().is_ok());
        assert!(matches!(
            sequencer.advance(),
            Err(RtttlError::MalformedToken { index: 2, .. })
        ));
        assert_eq!(sequencer.advance().unwrap().letter, 'E');
    }
}
