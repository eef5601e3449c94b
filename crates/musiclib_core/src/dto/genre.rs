use crate::model::genre::{Genre, GenreId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreEdit {
    pub id: Option<GenreId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreView {
    pub id: GenreId,
    pub name: String,
}

impl From<Genre> for GenreView {
    fn from(value: Genre) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<&GenreView> for GenreEdit {
    fn from(value: &GenreView) -> Self {
        Self {
            id: Some(value.id),
            name: value.name.clone(),
        }
    }
}
