//! Songbooks: named RTTTL tunes selectable by track number
//!
//! A songbook can be built in or read from YAML:
//!
//! ```yaml
//! songs:
//!   - name: scale
//!     rtttl: "scale:d=4,o=5,b=120:c,d,e,f,g,a,b,c6"
//! ```
//!
//! Tracks are numbered from 1 in file order.

use serde::Deserialize;

use crate::error::RtttlError;
use crate::song::SongDescriptor;

const PACMAN: &str = "pacman:d=4,o=5,b=112:32b,32p,32b6,32p,32f#6,32p,\
32d#6,32p,32b6,32f#6,16p,16d#6,16p,32c6,32p,32c7,32p,32g6,32p,32e6,32p,32c7,\
32g6,16p,16e6,16p,32b,32p,32b6,32p,32f#6,32p,32d#6,32p,32b6,32f#6,16p,16d#6,\
16p,32d#6,32e6,32f6,32p,32f6,32f#6,32g6,32p,32g6,32g#6,32a6,32p,32b.6";

const PACMAN_INTERMISSION: &str = "pacinter:d=4,o=5,b=160:8f#6,8f#6,8f#6,16d#6,16c#6,\
16f#6,8f#6,8a.6,8p,8f#6,8f#6,8f#6,16d#6,16c#6,16f#6,8f#6,8d#.6,8p,8f#6,8f#6,\
8f#6,16d#6,16c#6,16f#6,8f#6,8a6,8b6,8c7,8b6,8a6,8f#6,8a.6,8f#6,8p,8f#6,8f#6,\
8f#6,16d#6,16c#6,16f#6,8f#6,8a.6,8p,8f#6,8f#6,8f#6,16d#6,16c#6,16f#6,8f#6,\
8d#.6,8p,8f#6,8f#6,8f#6,16d#6,16c#6,16f#6,8f#6,8a6,8b6,8c7,8b6,8a6,8f#6,\
8a.6,8f#6";

const SMB_DEATH: &str = "smbdeath:d=4,o=5,b=90:32c6,32c6,32c6,8p,16b,16f6,16p,\
16f6,16f.6,16e.6,16d6,16c6,16p,16e,16p,16c";

/// One named song.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SongEntry {
    pub name: String,
    pub rtttl: String,
}

/// Raw YAML layout, validated into a [`Songbook`].
#[derive(Deserialize, Debug, Default)]
struct RawSongbook {
    #[serde(default)]
    songs: Vec<SongEntry>,
}

/// An ordered collection of songs.
#[derive(Debug, Clone, PartialEq)]
pub struct Songbook {
    songs: Vec<SongEntry>,
}

impl Songbook {
    /// The tunes that ship with the crate: `pacman`, `pacinter` and `smbdeath`.
    pub fn builtin() -> Self {
        let songs = [
            ("pacman", PACMAN),
            ("pacinter", PACMAN_INTERMISSION),
            ("smbdeath", SMB_DEATH),
        ]
        .into_iter()
        .map(|(name, rtttl)| SongEntry {
            name: name.to_string(),
            rtttl: rtttl.to_string(),
        })
        .collect();
        Self { songs }
    }

    /// Read a songbook from YAML, checking that every song has a valid header.
    ///
    /// # Examples
    /// ```
    /// use rtttl::Songbook;
    ///
    /// let book = Songbook::from_yaml(r#"
    /// songs:
    ///   - name: scale
    ///     rtttl: "scale:d=4,o=5,b=120:c,d,e,f,g,a,b,c6"
    /// "#).unwrap();
    /// assert_eq!(book.len(), 1);
    /// assert_eq!(book.load_track(1).unwrap().note_count(), 8);
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, RtttlError> {
        let raw: RawSongbook = serde_yaml::from_str(content)
            .map_err(|e| RtttlError::SongbookError(e.to_string()))?;

        if raw.songs.is_empty() {
            return Err(RtttlError::SongbookError(
                "songbook contains no songs".to_string(),
            ));
        }

        for entry in &raw.songs {
            SongDescriptor::load(&entry.rtttl).map_err(|e| {
                RtttlError::SongbookError(format!("song '{}': {}", entry.name, e))
            })?;
        }

        Ok(Self { songs: raw.songs })
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[SongEntry] {
        &self.songs
    }

    /// The song at 1-based `track`.
    pub fn track(&self, track: usize) -> Result<&SongEntry, RtttlError> {
        track
            .checked_sub(1)
            .and_then(|i| self.songs.get(i))
            .ok_or(RtttlError::UnknownTrack {
                track,
                count: self.songs.len(),
            })
    }

    /// Find a song by name.
    pub fn find(&self, name: &str) -> Option<&SongEntry> {
        self.songs.iter().find(|entry| entry.name == name)
    }

    /// Load the song at 1-based `track`.
    pub fn load_track(&self, track: usize) -> Result<SongDescriptor<'_>, RtttlError> {
        SongDescriptor::load(&self.track(track)?.rtttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tracks() {
        let book = Songbook::builtin();
        assert_eq!(book.len(), 3);
        assert_eq!(book.track(1).unwrap().name, "pacman");
        assert_eq!(book.track(2).unwrap().name, "pacinter");
        assert_eq!(book.track(3).unwrap().name, "smbdeath");
    }

    #[test]
    fn test_builtin_songs_decode() {
        let book = Songbook::builtin();
        for track in 1..=book.len() {
            let song = book.load_track(track).unwrap();
            for note in song.notes() {
                note.unwrap();
            }
        }
    }

    #[test]
    fn test_builtin_note_counts() {
        let book = Songbook::builtin();
        assert_eq!(book.load_track(1).unwrap().note_count(), 52);
        assert_eq!(book.load_track(2).unwrap().note_count(), 67);
        assert_eq!(book.load_track(3).unwrap().note_count(), 16);
    }

    #[test]
    fn test_unknown_track() {
        let book = Songbook::builtin();
        assert_eq!(
            book.track(0).unwrap_err(),
            RtttlError::UnknownTrack { track: 0, count: 3 }
        );
        assert_eq!(
            book.track(4).unwrap_err(),
            RtttlError::UnknownTrack { track: 4, count: 3 }
        );
    }

    #[test]
    fn test_find_by_name() {
        let book = Songbook::builtin();
        assert!(book.find("smbdeath").is_some());
        assert!(book.find("tetris").is_none());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
songs:
  - name: beep
    rtttl: "beep:d=8,o=6,b=200:c,p,c"
  - name: boop
    rtttl: "boop:d=4,o=4,b=100:g"
"#;
        let book = Songbook::from_yaml(yaml).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.track(2).unwrap().name, "boop");
        assert_eq!(book.load_track(1).unwrap().note_count(), 3);
    }

    #[test]
    fn test_from_yaml_empty() {
        assert!(matches!(
            Songbook::from_yaml("songs: []"),
            Err(RtttlError::SongbookError(_))
        ));
    }

    #[test]
    fn test_from_yaml_bad_song() {
        let yaml = r#"
songs:
  - name: broken
    rtttl: "no header"
"#;
        match Songbook::from_yaml(yaml) {
            Err(RtttlError::SongbookError(message)) => assert!(message.contains("broken")),
            other => panic!("expected SongbookError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_yaml_invalid_yaml() {
        assert!(matches!(
            Songbook::from_yaml("songs: [unclosed"),
            Err(RtttlError::SongbookError(_))
        ));
    }
}
