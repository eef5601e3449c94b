use super::album::AlbumSummary;
use super::genre::GenreView;
use super::musician::MusicianView;
use crate::model::album::AlbumId;
use crate::model::genre::GenreId;
use crate::model::musician::MusicianId;
use crate::model::song::SongId;
use serde::{Deserialize, Serialize};

/// Song creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongCreate {
    pub title: String,
    pub duration_secs: Option<u32>,
    pub musician_id: Option<MusicianId>,
    pub album_id: Option<AlbumId>,
    pub genre_id: Option<GenreId>,
}

/// Song edit form; full replacement of the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongEdit {
    pub id: Option<SongId>,
    pub title: String,
    pub duration_secs: Option<u32>,
    pub musician_id: Option<MusicianId>,
    pub album_id: Option<AlbumId>,
    pub genre_id: Option<GenreId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongView {
    pub id: SongId,
    pub title: String,
    pub duration_secs: u32,
    pub musician: MusicianView,
    pub album: Option<AlbumSummary>,
    pub genre: Option<GenreView>,
}

impl From<&SongView> for SongEdit {
    fn from(value: &SongView) -> Self {
        Self {
            id: Some(value.id),
            title: value.title.clone(),
            duration_secs: Some(value.duration_secs),
            musician_id: Some(value.musician.id),
            album_id: value.album.as_ref().map(|album| album.id),
            genre_id: value.genre.as_ref().map(|genre| genre.id),
        }
    }
}
