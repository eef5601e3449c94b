//! Musician repository contract and SQLite implementation.

use super::{
    contains_pattern, map_delete_error, map_read_error, map_write_error, query_all, RepoError,
    RepoResult,
};
use crate::db::FOLD_CASE_FN;
use crate::model::musician::{Musician, MusicianId, NewMusician};
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const MUSICIAN_SELECT_SQL: &str = "SELECT id, name, biography FROM musicians";

/// Repository interface for musician persistence.
pub trait MusicianRepository {
    fn create(&self, musician: &NewMusician) -> RepoResult<MusicianId>;
    fn update(&self, musician: &Musician) -> RepoResult<()>;
    /// Fails with `ReferentialConflict` while albums or songs reference the musician.
    fn delete(&self, id: MusicianId) -> RepoResult<()>;
    fn find_by_id(&self, id: MusicianId) -> RepoResult<Option<Musician>>;
    fn find_by_name(&self, pattern: &str) -> RepoResult<Vec<Musician>>;
    fn find_all(&self) -> RepoResult<Vec<Musician>>;
}

/// SQLite-backed musician repository.
pub struct SqliteMusicianRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMusicianRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MusicianRepository for SqliteMusicianRepository<'_> {
    fn create(&self, musician: &NewMusician) -> RepoResult<MusicianId> {
        self.conn
            .execute(
                "INSERT INTO musicians (name, biography) VALUES (?1, ?2);",
                params![musician.name.as_str(), musician.biography.as_deref()],
            )
            .map_err(|err| map_write_error(EntityKind::Musician, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, musician: &Musician) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE musicians SET name = ?1, biography = ?2 WHERE id = ?3;",
                params![
                    musician.name.as_str(),
                    musician.biography.as_deref(),
                    musician.id,
                ],
            )
            .map_err(|err| map_write_error(EntityKind::Musician, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Musician,
                id: musician.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: MusicianId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM musicians WHERE id = ?1;", [id])
            .map_err(|err| map_delete_error(EntityKind::Musician, id, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Musician,
                id,
            });
        }

        Ok(())
    }

    fn find_by_id(&self, id: MusicianId) -> RepoResult<Option<Musician>> {
        let musician = self
            .conn
            .query_row(
                &format!("{MUSICIAN_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_musician_row,
            )
            .optional()
            .map_err(|err| map_read_error(EntityKind::Musician, err))?;
        Ok(musician)
    }

    fn find_by_name(&self, pattern: &str) -> RepoResult<Vec<Musician>> {
        query_all(
            self.conn,
            &format!(
                "{MUSICIAN_SELECT_SQL}
                 WHERE {FOLD_CASE_FN}(name) LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC;"
            ),
            [contains_pattern(pattern)],
            read_musician_row,
        )
    }

    fn find_all(&self) -> RepoResult<Vec<Musician>> {
        query_all(
            self.conn,
            &format!("{MUSICIAN_SELECT_SQL} ORDER BY id ASC;"),
            params![],
            read_musician_row,
        )
    }
}

fn read_musician_row(row: &Row<'_>) -> RepoResult<Musician> {
    parse_musician_row(row).map_err(|err| map_read_error(EntityKind::Musician, err))
}

fn parse_musician_row(row: &Row<'_>) -> rusqlite::Result<Musician> {
    Ok(Musician {
        id: row.get("id")?,
        name: row.get("name")?,
        biography: row.get("biography")?,
    })
}
