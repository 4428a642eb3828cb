//! # Error Types
//!
//! This module defines all error types for the RTTTL decoder.
//!
//! Errors carry enough location information (byte offset or note index) to point at
//! the offending part of the song text.
//!
//! ## Error Types
//! - `MalformedHeader` - Missing `=`/`:` delimiter or bad value in the song header
//! - `InvalidIndex` - Note index is 0 or past the end of the song
//! - `RangeExceeded` - Resolved piano key is outside the frequency table
//! - `MalformedToken` - Note token has no letter
//! - `InvalidDuration` - Duration digits are not a power of two
//! - `SongbookError` - Invalid YAML songbook
//! - `UnknownTrack` - Track number outside the songbook
//!
//! ## Usage
//! ```rust
//! use rtttl::{load, RtttlError};
//!
//! match load("no header here") {
//!     Ok(song) => println!("{} notes", song.note_count()),
//!     Err(RtttlError::MalformedHeader { offset, message }) => {
//!         eprintln!("Bad header at byte {}: {}", offset, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RtttlError {
    /// Header error with the byte offset where scanning stopped.
    ///
    /// # Example
    /// ```
    /// # use rtttl::RtttlError;
    /// let err = RtttlError::MalformedHeader {
    ///     offset: 12,
    ///     message: "expected '=' for BPM".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Malformed header at byte 12: expected '=' for BPM");
    /// ```
    #[error("Malformed header at byte {offset}: {message}")]
    MalformedHeader { offset: usize, message: String },

    /// Note index outside `1..=note_count`.
    #[error("Invalid note index {index}: song has {note_count} notes")]
    InvalidIndex { index: usize, note_count: usize },

    /// Piano key number with no entry in the frequency table.
    #[error("Piano key {key} is outside the frequency table")]
    RangeExceeded { key: i32 },

    /// Note token that could not be decoded.
    #[error("Malformed token at note {index}: {message}")]
    MalformedToken { index: usize, message: String },

    /// Explicit duration that is not a power-of-two duration class.
    #[error("Invalid duration class {value} at note {index}")]
    InvalidDuration { index: usize, value: u32 },

    /// Invalid songbook error.
    ///
    /// Occurs when a YAML songbook is malformed or one of its songs does not load.
    #[error("Invalid songbook: {0}")]
    SongbookError(String),

    /// Track number outside the songbook.
    ///
    /// Tracks are numbered from 1, so track 0 is always unknown.
    ///
    /// # Example
    /// ```
    /// # use rtttl::RtttlError;
    /// let err = RtttlError::UnknownTrack { track: 4, count: 3 };
    /// assert_eq!(err.to_string(), "Unknown track 4: songbook has 3 songs");
    /// ```
    #[error("Unknown track {track}: songbook has {count} songs")]
    UnknownTrack { track: usize, count: usize },
}
