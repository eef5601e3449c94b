//! Album record.
//!
//! # Invariants
//! - `musician_id` is required and must reference an existing musician.

use super::musician::MusicianId;
use chrono::NaiveDate;

/// Store-assigned album identity.
pub type AlbumId = i64;

/// Album fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub title: String,
    pub release_date: NaiveDate,
    pub musician_id: MusicianId,
}

/// Persisted album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub release_date: NaiveDate,
    pub musician_id: MusicianId,
}

impl Album {
    /// Attaches a store-assigned id to unsaved fields.
    pub fn from_new(id: AlbumId, new: NewAlbum) -> Self {
        Self {
            id,
            title: new.title,
            release_date: new.release_date,
            musician_id: new.musician_id,
        }
    }
}
