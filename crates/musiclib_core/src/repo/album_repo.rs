//! Album repository contract and SQLite implementation.

use super::{
    contains_pattern, map_delete_error, map_read_error, map_write_error, query_all, RepoError,
    RepoResult,
};
use crate::db::FOLD_CASE_FN;
use crate::model::album::{Album, AlbumId, NewAlbum};
use crate::model::musician::MusicianId;
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const ALBUM_SELECT_SQL: &str = "SELECT
    id,
    title,
    release_date,
    musician_id
FROM albums";

/// Repository interface for album persistence.
pub trait AlbumRepository {
    fn create(&self, album: &NewAlbum) -> RepoResult<AlbumId>;
    fn update(&self, album: &Album) -> RepoResult<()>;
    /// Fails with `ReferentialConflict` while songs still reference the album.
    fn delete(&self, id: AlbumId) -> RepoResult<()>;
    fn find_by_id(&self, id: AlbumId) -> RepoResult<Option<Album>>;
    fn find_by_musician(&self, musician_id: MusicianId) -> RepoResult<Vec<Album>>;
    fn find_by_title(&self, pattern: &str) -> RepoResult<Vec<Album>>;
    fn find_all(&self) -> RepoResult<Vec<Album>>;
}

/// SQLite-backed album repository.
pub struct SqliteAlbumRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAlbumRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AlbumRepository for SqliteAlbumRepository<'_> {
    fn create(&self, album: &NewAlbum) -> RepoResult<AlbumId> {
        self.conn
            .execute(
                "INSERT INTO albums (title, release_date, musician_id) VALUES (?1, ?2, ?3);",
                params![album.title.as_str(), album.release_date, album.musician_id],
            )
            .map_err(|err| map_write_error(EntityKind::Album, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, album: &Album) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE albums
                 SET
                    title = ?1,
                    release_date = ?2,
                    musician_id = ?3
                 WHERE id = ?4;",
                params![
                    album.title.as_str(),
                    album.release_date,
                    album.musician_id,
                    album.id,
                ],
            )
            .map_err(|err| map_write_error(EntityKind::Album, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Album,
                id: album.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: AlbumId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM albums WHERE id = ?1;", [id])
            .map_err(|err| map_delete_error(EntityKind::Album, id, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Album,
                id,
            });
        }

        Ok(())
    }

    fn find_by_id(&self, id: AlbumId) -> RepoResult<Option<Album>> {
        let album = self
            .conn
            .query_row(
                &format!("{ALBUM_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_album_row,
            )
            .optional()
            .map_err(|err| map_read_error(EntityKind::Album, err))?;
        Ok(album)
    }

    fn find_by_musician(&self, musician_id: MusicianId) -> RepoResult<Vec<Album>> {
        query_all(
            self.conn,
            &format!("{ALBUM_SELECT_SQL} WHERE musician_id = ?1 ORDER BY id ASC;"),
            [musician_id],
            read_album_row,
        )
    }

    fn find_by_title(&self, pattern: &str) -> RepoResult<Vec<Album>> {
        query_all(
            self.conn,
            &format!(
                "{ALBUM_SELECT_SQL}
                 WHERE {FOLD_CASE_FN}(title) LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC;"
            ),
            [contains_pattern(pattern)],
            read_album_row,
        )
    }

    fn find_all(&self) -> RepoResult<Vec<Album>> {
        query_all(
            self.conn,
            &format!("{ALBUM_SELECT_SQL} ORDER BY id ASC;"),
            params![],
            read_album_row,
        )
    }
}

fn read_album_row(row: &Row<'_>) -> RepoResult<Album> {
    parse_album_row(row).map_err(|err| map_read_error(EntityKind::Album, err))
}

fn parse_album_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get("id")?,
        title: row.get("title")?,
        release_date: row.get("release_date")?,
        musician_id: row.get("musician_id")?,
    })
}
