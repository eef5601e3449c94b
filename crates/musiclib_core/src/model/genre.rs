//! Genre record.
//!
//! Genre names are unique ignoring ASCII case; the store rejects duplicates.

/// Store-assigned genre identity.
pub type GenreId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    pub fn from_new(id: GenreId, new: NewGenre) -> Self {
        Self { id, name: new.name }
    }
}
