//! External-facing payloads and display representations.
//!
//! # Responsibility
//! - `*Create` / `*Edit` payloads carry user-supplied form state; every field
//!   may be blank so a rejected form can be re-rendered with what was typed.
//! - `*View` records are the display shape handed to view rendering.
//!
//! # Invariants
//! - Only facades translate between these types and stored entities.
//! - An `*Edit` payload's `id` is assigned by the caller from the request
//!   path, never trusted from the submitted body.

pub mod album;
pub mod form_date;
pub mod genre;
pub mod musician;
pub mod song;

pub use album::{AlbumCreate, AlbumEdit, AlbumSummary, AlbumView};
pub use genre::{GenreCreate, GenreEdit, GenreView};
pub use musician::{MusicianCreate, MusicianEdit, MusicianView};
pub use song::{SongCreate, SongEdit, SongView};
