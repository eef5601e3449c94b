//! Genre facade.

use super::{CatalogFacade, ServiceError, ServiceResult};
use crate::db::begin_write;
use crate::dto::genre::{GenreCreate, GenreEdit, GenreView};
use crate::model::genre::{Genre, GenreId, NewGenre};
use crate::model::EntityKind;
use crate::repo::{GenreRepository, SqliteGenreRepository};
use log::info;
use rusqlite::Connection;

/// Genre use-cases over one connection.
pub struct GenreFacade<'conn> {
    conn: &'conn Connection,
}

impl<'conn> GenreFacade<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn find_by_name(&self, pattern: &str) -> ServiceResult<Vec<GenreView>> {
        let genres = SqliteGenreRepository::new(self.conn).find_by_name(pattern)?;
        Ok(genres.into_iter().map(GenreView::from).collect())
    }
}

impl CatalogFacade for GenreFacade<'_> {
    type Create = GenreCreate;
    type Edit = GenreEdit;
    type View = GenreView;

    fn create(&self, payload: &GenreCreate) -> ServiceResult<GenreId> {
        let tx = begin_write(self.conn)?;
        let id = SqliteGenreRepository::new(&tx)
            .create(&NewGenre {
                name: payload.name.clone(),
            })
            .map_err(name_conflict)?;
        tx.commit()?;

        info!("event=genre_create module=service status=ok id={id}");
        Ok(id)
    }

    fn update(&self, payload: &GenreEdit) -> ServiceResult<()> {
        let id = payload
            .id
            .ok_or(ServiceError::MissingIdentity(EntityKind::Genre))?;
        let tx = begin_write(self.conn)?;
        let repo = SqliteGenreRepository::new(&tx);
        if repo.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Genre,
                id,
            });
        }
        repo.update(&Genre {
            id,
            name: payload.name.clone(),
        })
        .map_err(name_conflict)?;
        tx.commit()?;

        info!("event=genre_update module=service status=ok id={id}");
        Ok(())
    }

    fn delete(&self, id: GenreId) -> ServiceResult<()> {
        let tx = begin_write(self.conn)?;
        let repo = SqliteGenreRepository::new(&tx);
        if repo.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: EntityKind::Genre,
                id,
            });
        }
        repo.delete(id)?;
        tx.commit()?;

        info!("event=genre_delete module=service status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: GenreId) -> ServiceResult<Option<GenreView>> {
        let genre = SqliteGenreRepository::new(self.conn).find_by_id(id)?;
        Ok(genre.map(GenreView::from))
    }

    fn find_all(&self) -> ServiceResult<Vec<GenreView>> {
        let genres = SqliteGenreRepository::new(self.conn).find_all()?;
        Ok(genres.into_iter().map(GenreView::from).collect())
    }
}

/// The only constraint a genre write can break is the unique name.
fn name_conflict(err: crate::repo::RepoError) -> ServiceError {
    match ServiceError::from(err) {
        ServiceError::ConstraintViolation { message, .. } => ServiceError::ConstraintViolation {
            field: Some("name"),
            message,
        },
        other => other,
    }
}
