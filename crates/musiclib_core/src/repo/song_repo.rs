//! Song repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `songs` plus relationship and title lookups.
//!
//! # Invariants
//! - Relationship finders are exact-match on the referenced id.
//! - `find_by_title` is a case-insensitive substring match; an empty
//!   pattern matches every song.

use super::{
    contains_pattern, map_delete_error, map_read_error, map_write_error, query_all, RepoError,
    RepoResult,
};
use crate::db::FOLD_CASE_FN;
use crate::model::album::AlbumId;
use crate::model::genre::GenreId;
use crate::model::musician::MusicianId;
use crate::model::song::{NewSong, Song, SongId};
use crate::model::EntityKind;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SONG_SELECT_SQL: &str = "SELECT
    id,
    title,
    duration_secs,
    musician_id,
    album_id,
    genre_id
FROM songs";

/// Repository interface for song persistence.
pub trait SongRepository {
    fn create(&self, song: &NewSong) -> RepoResult<SongId>;
    /// Replaces the full stored record identified by `song.id`.
    fn update(&self, song: &Song) -> RepoResult<()>;
    fn delete(&self, id: SongId) -> RepoResult<()>;
    fn find_by_id(&self, id: SongId) -> RepoResult<Option<Song>>;
    fn find_by_musician(&self, musician_id: MusicianId) -> RepoResult<Vec<Song>>;
    fn find_by_album(&self, album_id: AlbumId) -> RepoResult<Vec<Song>>;
    fn find_by_genre(&self, genre_id: GenreId) -> RepoResult<Vec<Song>>;
    fn find_by_title(&self, pattern: &str) -> RepoResult<Vec<Song>>;
    fn find_all(&self) -> RepoResult<Vec<Song>>;
}

/// SQLite-backed song repository.
pub struct SqliteSongRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSongRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SongRepository for SqliteSongRepository<'_> {
    fn create(&self, song: &NewSong) -> RepoResult<SongId> {
        self.conn
            .execute(
                "INSERT INTO songs (title, duration_secs, musician_id, album_id, genre_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    song.title.as_str(),
                    song.duration_secs,
                    song.musician_id,
                    song.album_id,
                    song.genre_id,
                ],
            )
            .map_err(|err| map_write_error(EntityKind::Song, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, song: &Song) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE songs
                 SET
                    title = ?1,
                    duration_secs = ?2,
                    musician_id = ?3,
                    album_id = ?4,
                    genre_id = ?5
                 WHERE id = ?6;",
                params![
                    song.title.as_str(),
                    song.duration_secs,
                    song.musician_id,
                    song.album_id,
                    song.genre_id,
                    song.id,
                ],
            )
            .map_err(|err| map_write_error(EntityKind::Song, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Song,
                id: song.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: SongId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM songs WHERE id = ?1;", [id])
            .map_err(|err| map_delete_error(EntityKind::Song, id, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Song,
                id,
            });
        }

        Ok(())
    }

    fn find_by_id(&self, id: SongId) -> RepoResult<Option<Song>> {
        let song = self
            .conn
            .query_row(
                &format!("{SONG_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_song_row,
            )
            .optional()
            .map_err(|err| map_read_error(EntityKind::Song, err))?;
        Ok(song)
    }

    fn find_by_musician(&self, musician_id: MusicianId) -> RepoResult<Vec<Song>> {
        query_all(
            self.conn,
            &format!("{SONG_SELECT_SQL} WHERE musician_id = ?1 ORDER BY id ASC;"),
            [musician_id],
            read_song_row,
        )
    }

    fn find_by_album(&self, album_id: AlbumId) -> RepoResult<Vec<Song>> {
        query_all(
            self.conn,
            &format!("{SONG_SELECT_SQL} WHERE album_id = ?1 ORDER BY id ASC;"),
            [album_id],
            read_song_row,
        )
    }

    fn find_by_genre(&self, genre_id: GenreId) -> RepoResult<Vec<Song>> {
        query_all(
            self.conn,
            &format!("{SONG_SELECT_SQL} WHERE genre_id = ?1 ORDER BY id ASC;"),
            [genre_id],
            read_song_row,
        )
    }

    fn find_by_title(&self, pattern: &str) -> RepoResult<Vec<Song>> {
        query_all(
            self.conn,
            &format!(
                "{SONG_SELECT_SQL}
                 WHERE {FOLD_CASE_FN}(title) LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC;"
            ),
            [contains_pattern(pattern)],
            read_song_row,
        )
    }

    fn find_all(&self) -> RepoResult<Vec<Song>> {
        query_all(
            self.conn,
            &format!("{SONG_SELECT_SQL} ORDER BY id ASC;"),
            params![],
            read_song_row,
        )
    }
}

fn read_song_row(row: &Row<'_>) -> RepoResult<Song> {
    parse_song_row(row).map_err(|err| map_read_error(EntityKind::Song, err))
}

fn parse_song_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get("id")?,
        title: row.get("title")?,
        duration_secs: row.get("duration_secs")?,
        musician_id: row.get("musician_id")?,
        album_id: row.get("album_id")?,
        genre_id: row.get("genre_id")?,
    })
}
