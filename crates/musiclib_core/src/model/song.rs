//! Song record.
//!
//! # Invariants
//! - `musician_id` is required; `album_id` and `genre_id` are optional.
//! - Any set reference must point to an existing record.

use super::album::AlbumId;
use super::genre::GenreId;
use super::musician::MusicianId;

/// Store-assigned song identity.
pub type SongId = i64;

/// Song fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    /// Playing time in whole seconds.
    pub duration_secs: u32,
    pub musician_id: MusicianId,
    pub album_id: Option<AlbumId>,
    pub genre_id: Option<GenreId>,
}

/// Persisted song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub duration_secs: u32,
    pub musician_id: MusicianId,
    pub album_id: Option<AlbumId>,
    pub genre_id: Option<GenreId>,
}

impl Song {
    /// Attaches a store-assigned id to unsaved fields.
    pub fn from_new(id: SongId, new: NewSong) -> Self {
        Self {
            id,
            title: new.title,
            duration_secs: new.duration_secs,
            musician_id: new.musician_id,
            album_id: new.album_id,
            genre_id: new.genre_id,
        }
    }
}
