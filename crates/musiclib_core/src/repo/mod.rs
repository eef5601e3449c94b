//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define typed CRUD plus entity-specific lookups per catalog entity.
//! - Isolate SQLite query details from facade/workflow orchestration.
//! - Classify store failures into semantic errors.
//!
//! # Invariants
//! - `find_by_id` signals absence with `Ok(None)`, never with an error.
//! - Update/delete of an unknown id fails with `NotFound` and mutates nothing.
//! - Repositories never cascade; referential rules are the store's.
//! - Sequence results are ordered by id (insertion order).

pub mod album_repo;
pub mod genre_repo;
pub mod musician_repo;
pub mod song_repo;

use crate::db::DbError;
use crate::model::EntityKind;
use rusqlite::{Connection, ErrorCode, Params, Row};
use thiserror::Error;

pub use album_repo::{AlbumRepository, SqliteAlbumRepository};
pub use genre_repo::{GenreRepository, SqliteGenreRepository};
pub use musician_repo::{MusicianRepository, SqliteMusicianRepository};
pub use song_repo::{SongRepository, SqliteSongRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Transport/bootstrap failure of the store. Not recoverable locally.
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    /// A write would break a required reference, uniqueness or not-null rule.
    #[error("{entity} write rejected by store constraint: {message}")]
    ConstraintViolation { entity: EntityKind, message: String },
    /// A delete is blocked because other records still reference the target.
    #[error("{entity} {id} is still referenced by other records")]
    ReferentialConflict { entity: EntityKind, id: i64 },
    #[error("invalid persisted {entity} data: {message}")]
    InvalidData { entity: EntityKind, message: String },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Escape character used by every pattern finder.
pub const LIKE_ESCAPE: char = '\\';

/// Builds a `%pattern%` LIKE operand for a case-insensitive substring match.
///
/// The pattern is folded the same way as the `fold_case` SQL function, and
/// LIKE metacharacters inside it are escaped so they match literally.
pub fn contains_pattern(pattern: &str) -> String {
    let folded = pattern.to_lowercase();
    let mut operand = String::with_capacity(folded.len() + 2);
    operand.push('%');
    for ch in folded.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            operand.push(LIKE_ESCAPE);
        }
        operand.push(ch);
    }
    operand.push('%');
    operand
}

/// Classifies a failed insert/update.
pub(crate) fn map_write_error(entity: EntityKind, err: rusqlite::Error) -> RepoError {
    if is_constraint_violation(&err) {
        RepoError::ConstraintViolation {
            entity,
            message: err.to_string(),
        }
    } else {
        err.into()
    }
}

/// Classifies a failed delete.
///
/// The only constraints a delete can break are foreign keys. SQLite reports
/// `ON DELETE RESTRICT` as `SQLITE_CONSTRAINT_TRIGGER` and a deferred or
/// `NO ACTION` key as `SQLITE_CONSTRAINT_FOREIGNKEY`; both are conflicts.
pub(crate) fn map_delete_error(entity: EntityKind, id: i64, err: rusqlite::Error) -> RepoError {
    if is_constraint_violation(&err) {
        RepoError::ReferentialConflict { entity, id }
    } else {
        err.into()
    }
}

/// Classifies a failed read: undecodable columns become `InvalidData`.
pub(crate) fn map_read_error(entity: EntityKind, err: rusqlite::Error) -> RepoError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::InvalidColumnType(..) => RepoError::InvalidData {
            entity,
            message: err.to_string(),
        },
        other => other.into(),
    }
}

/// Runs a row-returning query and maps every row.
pub(crate) fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    mut map: impl FnMut(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(map(row)?);
    }
    Ok(items)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _) if inner.code == ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::{contains_pattern, map_delete_error, RepoError};
    use crate::db::open_db_in_memory;
    use crate::model::EntityKind;

    #[test]
    fn contains_pattern_wraps_with_wildcards() {
        assert_eq!(contains_pattern("bass"), "%bass%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn contains_pattern_folds_case_and_escapes_metacharacters() {
        assert_eq!(contains_pattern("ÉTÉ"), "%été%");
        assert_eq!(contains_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[test]
    fn restricted_delete_is_classified_as_referential_conflict() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        conn.execute_batch(
            "INSERT INTO musicians (id, name) VALUES (1, 'Ada');
             INSERT INTO albums (title, release_date, musician_id)
             VALUES ('Debut', '2001-02-03', 1);",
        )
        .expect("seed rows should insert");

        let err = conn
            .execute("DELETE FROM musicians WHERE id = 1;", [])
            .expect_err("restricted delete must fail");

        assert!(matches!(
            map_delete_error(EntityKind::Musician, 1, err),
            RepoError::ReferentialConflict {
                entity: EntityKind::Musician,
                id: 1
            }
        ));
    }
}
