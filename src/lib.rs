pub mod duration;
pub mod error;
pub mod frequency;
pub mod header;
pub mod note;
pub mod sequencer;
pub mod song;
pub mod songbook;

pub use duration::{bit_reverse8, resolve_duration_ms};
pub use error::*;
pub use frequency::frequency_of;
pub use note::{decode_note, NoteEvent, NoteToken};
pub use sequencer::{CursorState, Sequencer};
pub use song::{load, SongDescriptor};
pub use songbook::{SongEntry, Songbook};

/// Decode every note of an RTTTL definition.
/// This is the main entry point for one-shot decoding.
pub fn decode(text: &str) -> Result<Vec<NoteEvent>, RtttlError> {
    load(text)?.notes().collect()
}
