//! Core domain logic for the music catalog.
//! Store bootstrap, repositories, facades and the request workflow live here;
//! front ends only supply connections and render outcomes.

pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod workflow;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::album::{Album, AlbumId, NewAlbum};
pub use model::genre::{Genre, GenreId, NewGenre};
pub use model::musician::{Musician, MusicianId, NewMusician};
pub use model::song::{NewSong, Song, SongId};
pub use model::EntityKind;
pub use repo::{RepoError, RepoResult};
pub use service::{
    AlbumFacade, CatalogFacade, GenreFacade, MusicianFacade, ServiceError, ServiceResult,
    SongFacade,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
