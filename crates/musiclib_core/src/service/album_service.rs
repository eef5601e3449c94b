//! Album facade.

use super::musician_service::load_musician_view;
use super::{require_field, require_reference, CatalogFacade, ServiceError, ServiceResult};
use crate::db::begin_write;
use crate::dto::album::{AlbumCreate, AlbumEdit, AlbumView};
use crate::model::album::{Album, AlbumId, NewAlbum};
use crate::model::musician::MusicianId;
use crate::model::EntityKind;
use crate::repo::{
    AlbumRepository, MusicianRepository, SqliteAlbumRepository, SqliteMusicianRepository,
};
use log::info;
use rusqlite::Connection;

/// Album use-cases over one connection.
pub struct AlbumFacade<'conn> {
    conn: &'conn Connection,
}

impl<'conn> AlbumFacade<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn find_by_musician(&self, musician_id: MusicianId) -> ServiceResult<Vec<AlbumView>> {
        let albums = SqliteAlbumRepository::new(self.conn).find_by_musician(musician_id)?;
        self.to_views(albums)
    }

    pub fn find_by_title(&self, pattern: &str) -> ServiceResult<Vec<AlbumView>> {
        let albums = SqliteAlbumRepository::new(self.conn).find_by_title(pattern)?;
        self.to_views(albums)
    }

    fn to_views(&self, albums: Vec<Album>) -> ServiceResult<Vec<AlbumView>> {
        let musicians = SqliteMusicianRepository::new(self.conn);
        albums
            .into_iter()
            .map(|album| album_view(&musicians, album))
            .collect()
    }
}

impl CatalogFacade for AlbumFacade<'_> {
    type Create = AlbumCreate;
    type Edit = AlbumEdit;
    type View = AlbumView;

    fn create(&self, payload: &AlbumCreate) -> ServiceResult<AlbumId> {
        let release_date = require_field(payload.release_date, "release_date")?;
        let musician_id = require_field(payload.musician_id, "musician_id")?;

        let tx = begin_write(self.conn)?;
        ensure_musician_reference(&SqliteMusicianRepository::new(&tx), musician_id)?;
        let id = SqliteAlbumRepository::new(&tx).create(&NewAlbum {
            title: payload.title.clone(),
            release_date,
            musician_id,
        })?;
        tx.commit()?;

        info!("event=album_create module=service status=ok id={id} musician_id={musician_id}");
        Ok(id)
    }

    fn update(&self, payload: &AlbumEdit) -> ServiceResult<()> {
        let id = payload
            .id
            .ok_or(ServiceError::MissingIdentity(EntityKind::Album))?;
        let release_date = require_field(payload.release_date, "release_date")?;
        let musician_id = require_field(payload.musician_id, "musician_id")?;

        let tx = begin_write(self.conn)?;
        let albums = SqliteAlbumRepository::new(&tx);
        if albums.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Album,
                id,
            });
        }
        ensure_musician_reference(&SqliteMusicianRepository::new(&tx), musician_id)?;
        albums.update(&Album {
            id,
            title: payload.title.clone(),
            release_date,
            musician_id,
        })?;
        tx.commit()?;

        info!("event=album_update module=service status=ok id={id}");
        Ok(())
    }

    fn delete(&self, id: AlbumId) -> ServiceResult<()> {
        let tx = begin_write(self.conn)?;
        let albums = SqliteAlbumRepository::new(&tx);
        if albums.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Album,
                id,
            });
        }
        albums.delete(id)?;
        tx.commit()?;

        info!("event=album_delete module=service status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: AlbumId) -> ServiceResult<Option<AlbumView>> {
        match SqliteAlbumRepository::new(self.conn).find_by_id(id)? {
            Some(album) => Ok(Some(album_view(
                &SqliteMusicianRepository::new(self.conn),
                album,
            )?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> ServiceResult<Vec<AlbumView>> {
        let albums = SqliteAlbumRepository::new(self.conn).find_all()?;
        self.to_views(albums)
    }
}

fn album_view(musicians: &impl MusicianRepository, album: Album) -> ServiceResult<AlbumView> {
    let musician = load_musician_view(musicians, album.musician_id)?;
    Ok(AlbumView {
        id: album.id,
        title: album.title,
        release_date: album.release_date,
        musician,
    })
}

pub(crate) fn ensure_musician_reference(
    musicians: &impl MusicianRepository,
    musician_id: MusicianId,
) -> ServiceResult<()> {
    require_reference(
        musicians.find_by_id(musician_id)?,
        EntityKind::Musician,
        musician_id,
        "musician_id",
    )
    .map(|_| ())
}
