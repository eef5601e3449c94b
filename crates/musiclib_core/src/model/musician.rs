//! Musician record.

/// Store-assigned musician identity.
pub type MusicianId = i64;

/// Musician fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMusician {
    pub name: String,
    pub biography: Option<String>,
}

/// Persisted musician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Musician {
    pub id: MusicianId,
    pub name: String,
    pub biography: Option<String>,
}

impl Musician {
    /// Attaches a store-assigned id to unsaved fields.
    pub fn from_new(id: MusicianId, new: NewMusician) -> Self {
        Self {
            id,
            name: new.name,
            biography: new.biography,
        }
    }
}
