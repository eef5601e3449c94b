//! Genre repository contract and SQLite implementation.
//!
//! Creating or renaming a genre to an existing name (ignoring ASCII case)
//! fails with `ConstraintViolation`.

use super::{
    contains_pattern, map_delete_error, map_read_error, map_write_error, query_all, RepoError,
    RepoResult,
};
use crate::db::FOLD_CASE_FN;
use crate::model::genre::{Genre, GenreId, NewGenre};
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const GENRE_SELECT_SQL: &str = "SELECT id, name FROM genres";

/// Repository interface for genre persistence.
pub trait GenreRepository {
    fn create(&self, genre: &NewGenre) -> RepoResult<GenreId>;
    fn update(&self, genre: &Genre) -> RepoResult<()>;
    /// Fails with `ReferentialConflict` while songs still reference the genre.
    fn delete(&self, id: GenreId) -> RepoResult<()>;
    fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    fn find_by_name(&self, pattern: &str) -> RepoResult<Vec<Genre>>;
    fn find_all(&self) -> RepoResult<Vec<Genre>>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn create(&self, genre: &NewGenre) -> RepoResult<GenreId> {
        self.conn
            .execute(
                "INSERT INTO genres (name) VALUES (?1);",
                [genre.name.as_str()],
            )
            .map_err(|err| map_write_error(EntityKind::Genre, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, genre: &Genre) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE genres SET name = ?1 WHERE id = ?2;",
                params![genre.name.as_str(), genre.id],
            )
            .map_err(|err| map_write_error(EntityKind::Genre, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Genre,
                id: genre.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: GenreId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM genres WHERE id = ?1;", [id])
            .map_err(|err| map_delete_error(EntityKind::Genre, id, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Genre,
                id,
            });
        }

        Ok(())
    }

    fn find_by_id(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        let genre = self
            .conn
            .query_row(
                &format!("{GENRE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_genre_row,
            )
            .optional()
            .map_err(|err| map_read_error(EntityKind::Genre, err))?;
        Ok(genre)
    }

    fn find_by_name(&self, pattern: &str) -> RepoResult<Vec<Genre>> {
        query_all(
            self.conn,
            &format!(
                "{GENRE_SELECT_SQL}
                 WHERE {FOLD_CASE_FN}(name) LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC;"
            ),
            [contains_pattern(pattern)],
            read_genre_row,
        )
    }

    fn find_all(&self) -> RepoResult<Vec<Genre>> {
        query_all(
            self.conn,
            &format!("{GENRE_SELECT_SQL} ORDER BY id ASC;"),
            params![],
            read_genre_row,
        )
    }
}

fn read_genre_row(row: &Row<'_>) -> RepoResult<Genre> {
    parse_genre_row(row).map_err(|err| map_read_error(EntityKind::Genre, err))
}

fn parse_genre_row(row: &Row<'_>) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
