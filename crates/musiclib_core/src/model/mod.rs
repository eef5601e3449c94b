//! Catalog domain model.
//!
//! # Responsibility
//! - Define the stored shape of musicians, genres, albums and songs.
//! - Separate unsaved records (`New*`) from persisted ones carrying an id.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned surrogate id.
//! - An id is assigned once at creation and never changes or gets reused.
//! - Relationships are stored as ids of the referenced records.

pub mod album;
pub mod genre;
pub mod musician;
pub mod song;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Entity type discriminator used in error reporting and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Musician,
    Genre,
    Album,
    Song,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Musician => "musician",
            Self::Genre => "genre",
            Self::Album => "album",
            Self::Song => "song",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
