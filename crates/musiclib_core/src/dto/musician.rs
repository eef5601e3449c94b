use crate::model::musician::{Musician, MusicianId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicianCreate {
    pub name: String,
    pub biography: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicianEdit {
    pub id: Option<MusicianId>,
    pub name: String,
    pub biography: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicianView {
    pub id: MusicianId,
    pub name: String,
    pub biography: Option<String>,
}

impl From<Musician> for MusicianView {
    fn from(value: Musician) -> Self {
        Self {
            id: value.id,
            name: value.name,
            biography: value.biography,
        }
    }
}

impl From<&MusicianView> for MusicianEdit {
    fn from(value: &MusicianView) -> Self {
        Self {
            id: Some(value.id),
            name: value.name.clone(),
            biography: value.biography.clone(),
        }
    }
}
