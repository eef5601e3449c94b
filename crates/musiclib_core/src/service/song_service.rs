//! Song facade.
//!
//! # Invariants
//! - Musician is required; album and genre references are optional but must
//!   exist when set.

use super::album_service::ensure_musician_reference;
use super::musician_service::load_musician_view;
use super::{require_field, require_reference, CatalogFacade, ServiceError, ServiceResult};
use crate::db::begin_write;
use crate::dto::album::AlbumSummary;
use crate::dto::genre::GenreView;
use crate::dto::song::{SongCreate, SongEdit, SongView};
use crate::model::album::AlbumId;
use crate::model::genre::GenreId;
use crate::model::musician::MusicianId;
use crate::model::song::{NewSong, Song, SongId};
use crate::model::EntityKind;
use crate::repo::{
    AlbumRepository, GenreRepository, SongRepository, SqliteAlbumRepository,
    SqliteGenreRepository, SqliteMusicianRepository, SqliteSongRepository,
};
use log::info;
use rusqlite::Connection;

/// Song use-cases over one connection.
pub struct SongFacade<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SongFacade<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn find_by_musician(&self, musician_id: MusicianId) -> ServiceResult<Vec<SongView>> {
        let songs = SqliteSongRepository::new(self.conn).find_by_musician(musician_id)?;
        self.to_views(songs)
    }

    pub fn find_by_album(&self, album_id: AlbumId) -> ServiceResult<Vec<SongView>> {
        let songs = SqliteSongRepository::new(self.conn).find_by_album(album_id)?;
        self.to_views(songs)
    }

    pub fn find_by_genre(&self, genre_id: GenreId) -> ServiceResult<Vec<SongView>> {
        let songs = SqliteSongRepository::new(self.conn).find_by_genre(genre_id)?;
        self.to_views(songs)
    }

    /// Lists songs whose title contains `pattern`, ignoring case.
    pub fn find_by_title(&self, pattern: &str) -> ServiceResult<Vec<SongView>> {
        let songs = SqliteSongRepository::new(self.conn).find_by_title(pattern)?;
        self.to_views(songs)
    }

    fn to_views(&self, songs: Vec<Song>) -> ServiceResult<Vec<SongView>> {
        songs
            .into_iter()
            .map(|song| song_view(self.conn, song))
            .collect()
    }
}

impl CatalogFacade for SongFacade<'_> {
    type Create = SongCreate;
    type Edit = SongEdit;
    type View = SongView;

    fn create(&self, payload: &SongCreate) -> ServiceResult<SongId> {
        let duration_secs = require_field(payload.duration_secs, "duration_secs")?;
        let musician_id = require_field(payload.musician_id, "musician_id")?;

        let tx = begin_write(self.conn)?;
        ensure_references(&tx, musician_id, payload.album_id, payload.genre_id)?;
        let id = SqliteSongRepository::new(&tx).create(&NewSong {
            title: payload.title.clone(),
            duration_secs,
            musician_id,
            album_id: payload.album_id,
            genre_id: payload.genre_id,
        })?;
        tx.commit()?;

        info!("event=song_create module=service status=ok id={id} musician_id={musician_id}");
        Ok(id)
    }

    fn update(&self, payload: &SongEdit) -> ServiceResult<()> {
        let id = payload
            .id
            .ok_or(ServiceError::MissingIdentity(EntityKind::Song))?;
        let duration_secs = require_field(payload.duration_secs, "duration_secs")?;
        let musician_id = require_field(payload.musician_id, "musician_id")?;

        let tx = begin_write(self.conn)?;
        let songs = SqliteSongRepository::new(&tx);
        if songs.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Song,
                id,
            });
        }
        ensure_references(&tx, musician_id, payload.album_id, payload.genre_id)?;
        songs.update(&Song {
            id,
            title: payload.title.clone(),
            duration_secs,
            musician_id,
            album_id: payload.album_id,
            genre_id: payload.genre_id,
        })?;
        tx.commit()?;

        info!("event=song_update module=service status=ok id={id}");
        Ok(())
    }

    fn delete(&self, id: SongId) -> ServiceResult<()> {
        let tx = begin_write(self.conn)?;
        let songs = SqliteSongRepository::new(&tx);
        if songs.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Song,
                id,
            });
        }
        songs.delete(id)?;
        tx.commit()?;

        info!("event=song_delete module=service status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: SongId) -> ServiceResult<Option<SongView>> {
        match SqliteSongRepository::new(self.conn).find_by_id(id)? {
            Some(song) => Ok(Some(song_view(self.conn, song)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> ServiceResult<Vec<SongView>> {
        let songs = SqliteSongRepository::new(self.conn).find_all()?;
        self.to_views(songs)
    }
}

fn ensure_references(
    conn: &Connection,
    musician_id: MusicianId,
    album_id: Option<AlbumId>,
    genre_id: Option<GenreId>,
) -> ServiceResult<()> {
    ensure_musician_reference(&SqliteMusicianRepository::new(conn), musician_id)?;

    if let Some(album_id) = album_id {
        require_reference(
            SqliteAlbumRepository::new(conn).find_by_id(album_id)?,
            EntityKind::Album,
            album_id,
            "album_id",
        )?;
    }

    if let Some(genre_id) = genre_id {
        require_reference(
            SqliteGenreRepository::new(conn).find_by_id(genre_id)?,
            EntityKind::Genre,
            genre_id,
            "genre_id",
        )?;
    }

    Ok(())
}

fn song_view(conn: &Connection, song: Song) -> ServiceResult<SongView> {
    let musician = load_musician_view(&SqliteMusicianRepository::new(conn), song.musician_id)?;

    let album = match song.album_id {
        Some(album_id) => {
            let album = SqliteAlbumRepository::new(conn)
                .find_by_id(album_id)?
                .ok_or(ServiceError::InconsistentState(
                    "referenced album missing from store",
                ))?;
            Some(AlbumSummary {
                id: album.id,
                title: album.title,
            })
        }
        None => None,
    };

    let genre = match song.genre_id {
        Some(genre_id) => Some(GenreView::from(
            SqliteGenreRepository::new(conn)
                .find_by_id(genre_id)?
                .ok_or(ServiceError::InconsistentState(
                    "referenced genre missing from store",
                ))?,
        )),
        None => None,
    };

    Ok(SongView {
        id: song.id,
        title: song.title,
        duration_secs: song.duration_secs,
        musician,
        album,
        genre,
    })
}
