//! Musician facade.

use super::{CatalogFacade, ServiceError, ServiceResult};
use crate::db::begin_write;
use crate::dto::musician::{MusicianCreate, MusicianEdit, MusicianView};
use crate::model::musician::{Musician, MusicianId, NewMusician};
use crate::model::EntityKind;
use crate::repo::{MusicianRepository, SqliteMusicianRepository};
use log::{debug, info};
use rusqlite::Connection;

/// Musician use-cases over one connection.
pub struct MusicianFacade<'conn> {
    conn: &'conn Connection,
}

impl<'conn> MusicianFacade<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists musicians whose name contains `pattern`, ignoring case.
    pub fn find_by_name(&self, pattern: &str) -> ServiceResult<Vec<MusicianView>> {
        let musicians = SqliteMusicianRepository::new(self.conn).find_by_name(pattern)?;
        Ok(musicians.into_iter().map(MusicianView::from).collect())
    }
}

impl CatalogFacade for MusicianFacade<'_> {
    type Create = MusicianCreate;
    type Edit = MusicianEdit;
    type View = MusicianView;

    fn create(&self, payload: &MusicianCreate) -> ServiceResult<MusicianId> {
        let tx = begin_write(self.conn)?;
        let id = SqliteMusicianRepository::new(&tx).create(&NewMusician {
            name: payload.name.clone(),
            biography: payload.biography.clone(),
        })?;
        tx.commit()?;

        info!("event=musician_create module=service status=ok id={id}");
        Ok(id)
    }

    fn update(&self, payload: &MusicianEdit) -> ServiceResult<()> {
        let id = payload
            .id
            .ok_or(ServiceError::MissingIdentity(EntityKind::Musician))?;
        let tx = begin_write(self.conn)?;
        let repo = SqliteMusicianRepository::new(&tx);
        ensure_musician(&repo, id)?;
        repo.update(&Musician {
            id,
            name: payload.name.clone(),
            biography: payload.biography.clone(),
        })?;
        tx.commit()?;

        info!("event=musician_update module=service status=ok id={id}");
        Ok(())
    }

    fn delete(&self, id: MusicianId) -> ServiceResult<()> {
        let tx = begin_write(self.conn)?;
        let repo = SqliteMusicianRepository::new(&tx);
        ensure_musician(&repo, id)?;
        repo.delete(id)?;
        tx.commit()?;

        info!("event=musician_delete module=service status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: MusicianId) -> ServiceResult<Option<MusicianView>> {
        debug!("event=musician_find module=service id={id}");
        let musician = SqliteMusicianRepository::new(self.conn).find_by_id(id)?;
        Ok(musician.map(MusicianView::from))
    }

    fn find_all(&self) -> ServiceResult<Vec<MusicianView>> {
        let musicians = SqliteMusicianRepository::new(self.conn).find_all()?;
        Ok(musicians.into_iter().map(MusicianView::from).collect())
    }
}

/// Loads a musician view for embedding in album/song views.
pub(crate) fn load_musician_view(
    repo: &impl MusicianRepository,
    id: MusicianId,
) -> ServiceResult<MusicianView> {
    repo.find_by_id(id)?
        .map(MusicianView::from)
        .ok_or(ServiceError::InconsistentState(
            "referenced musician missing from store",
        ))
}

fn ensure_musician(repo: &impl MusicianRepository, id: MusicianId) -> ServiceResult<()> {
    match repo.find_by_id(id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound {
            entity: EntityKind::Musician,
            id,
        }),
    }
}
