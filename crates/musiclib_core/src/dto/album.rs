use super::form_date;
use super::musician::MusicianView;
use crate::model::album::AlbumId;
use crate::model::musician::MusicianId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Album creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumCreate {
    pub title: String,
    #[serde(with = "form_date")]
    pub release_date: Option<NaiveDate>,
    pub musician_id: Option<MusicianId>,
}

/// Album edit form; full replacement of the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumEdit {
    pub id: Option<AlbumId>,
    pub title: String,
    #[serde(with = "form_date")]
    pub release_date: Option<NaiveDate>,
    pub musician_id: Option<MusicianId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumView {
    pub id: AlbumId,
    pub title: String,
    pub release_date: NaiveDate,
    pub musician: MusicianView,
}

/// Album reference embedded in song views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub title: String,
}

impl From<&AlbumView> for AlbumEdit {
    fn from(value: &AlbumView) -> Self {
        Self {
            id: Some(value.id),
            title: value.title.clone(),
            release_date: Some(value.release_date),
            musician_id: Some(value.musician.id),
        }
    }
}
