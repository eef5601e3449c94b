use chrono::NaiveDate;
use musiclib_core::db::open_db_in_memory;
use musiclib_core::model::album::NewAlbum;
use musiclib_core::model::genre::{Genre, NewGenre};
use musiclib_core::model::musician::NewMusician;
use musiclib_core::model::song::{NewSong, Song};
use musiclib_core::model::EntityKind;
use musiclib_core::repo::{
    AlbumRepository, GenreRepository, MusicianRepository, RepoError, SongRepository,
    SqliteAlbumRepository, SqliteGenreRepository, SqliteMusicianRepository, SqliteSongRepository,
};
use rusqlite::Connection;

fn add_musician(conn: &Connection, name: &str) -> i64 {
    SqliteMusicianRepository::new(conn)
        .create(&NewMusician {
            name: name.to_string(),
            biography: None,
        })
        .unwrap()
}

fn add_album(conn: &Connection, title: &str, musician_id: i64) -> i64 {
    SqliteAlbumRepository::new(conn)
        .create(&NewAlbum {
            title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2001, 2, 3).unwrap(),
            musician_id,
        })
        .unwrap()
}

fn new_song(title: &str, musician_id: i64) -> NewSong {
    NewSong {
        title: title.to_string(),
        duration_secs: 180,
        musician_id,
        album_id: None,
        genre_id: None,
    }
}

#[test]
fn song_create_and_find_by_id_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let album_id = add_album(&conn, "Debut", musician_id);
    let repo = SqliteSongRepository::new(&conn);

    let mut song = new_song("Intro", musician_id);
    song.album_id = Some(album_id);
    let id = repo.create(&song).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, Song::from_new(id, song));
}

#[test]
fn find_by_id_for_unknown_identity_is_absent() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(SqliteSongRepository::new(&conn).find_by_id(999).unwrap(), None);
    assert_eq!(SqliteAlbumRepository::new(&conn).find_by_id(999).unwrap(), None);
    assert_eq!(SqliteMusicianRepository::new(&conn).find_by_id(999).unwrap(), None);
    assert_eq!(SqliteGenreRepository::new(&conn).find_by_id(999).unwrap(), None);
}

#[test]
fn identities_are_never_reissued_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let repo = SqliteSongRepository::new(&conn);

    let first = repo.create(&new_song("Intro", musician_id)).unwrap();
    repo.delete(first).unwrap();
    let second = repo.create(&new_song("Outro", musician_id)).unwrap();

    assert!(second > first);
    assert_eq!(repo.find_by_id(first).unwrap(), None);
}

#[test]
fn create_with_dangling_reference_is_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSongRepository::new(&conn);

    let err = repo.create(&new_song("Orphan", 42)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::ConstraintViolation {
            entity: EntityKind::Song,
            ..
        }
    ));
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn update_replaces_full_record() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let other_id = add_musician(&conn, "Grace");
    let genre_id = SqliteGenreRepository::new(&conn)
        .create(&NewGenre {
            name: "Jazz".to_string(),
        })
        .unwrap();
    let repo = SqliteSongRepository::new(&conn);
    let id = repo.create(&new_song("Intro", musician_id)).unwrap();

    let replacement = Song {
        id,
        title: "Intro (Live)".to_string(),
        duration_secs: 240,
        musician_id: other_id,
        album_id: None,
        genre_id: Some(genre_id),
    };
    repo.update(&replacement).unwrap();

    assert_eq!(repo.find_by_id(id).unwrap(), Some(replacement));
}

#[test]
fn update_and_delete_of_unknown_identity_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let repo = SqliteSongRepository::new(&conn);
    let kept = repo.create(&new_song("Intro", musician_id)).unwrap();

    let ghost = Song::from_new(77, new_song("Ghost", musician_id));
    assert!(matches!(
        repo.update(&ghost).unwrap_err(),
        RepoError::NotFound { id: 77, .. }
    ));
    assert!(matches!(
        repo.delete(77).unwrap_err(),
        RepoError::NotFound { id: 77, .. }
    ));
    assert_eq!(repo.find_all().unwrap().len(), 1);
    assert!(repo.find_by_id(kept).unwrap().is_some());
}

#[test]
fn relationship_finders_return_matches_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let ada = add_musician(&conn, "Ada");
    let grace = add_musician(&conn, "Grace");
    let album_id = add_album(&conn, "Debut", ada);
    let genre_id = SqliteGenreRepository::new(&conn)
        .create(&NewGenre {
            name: "Jazz".to_string(),
        })
        .unwrap();
    let repo = SqliteSongRepository::new(&conn);

    let mut first = new_song("One", ada);
    first.album_id = Some(album_id);
    first.genre_id = Some(genre_id);
    let first_id = repo.create(&first).unwrap();
    let other_id = repo.create(&new_song("Two", grace)).unwrap();
    let mut third = new_song("Three", ada);
    third.genre_id = Some(genre_id);
    let third_id = repo.create(&third).unwrap();

    let ids = |songs: Vec<Song>| songs.into_iter().map(|song| song.id).collect::<Vec<_>>();
    assert_eq!(ids(repo.find_by_musician(ada).unwrap()), [first_id, third_id]);
    assert_eq!(ids(repo.find_by_musician(grace).unwrap()), [other_id]);
    assert_eq!(ids(repo.find_by_album(album_id).unwrap()), [first_id]);
    assert_eq!(ids(repo.find_by_genre(genre_id).unwrap()), [first_id, third_id]);
    assert!(repo.find_by_musician(999).unwrap().is_empty());
}

#[test]
fn find_by_title_is_case_insensitive_substring_match() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let repo = SqliteSongRepository::new(&conn);
    for title in ["Bassline", "Double Bass", "bass", "Treble", "ÉTÉ Indien"] {
        repo.create(&new_song(title, musician_id)).unwrap();
    }

    let titles = |pattern: &str| {
        repo.find_by_title(pattern)
            .unwrap()
            .into_iter()
            .map(|song| song.title)
            .collect::<Vec<_>>()
    };
    assert_eq!(titles("bass"), ["Bassline", "Double Bass", "bass"]);
    assert_eq!(titles("BASS"), ["Bassline", "Double Bass", "bass"]);
    assert_eq!(titles("été"), ["ÉTÉ Indien"]);
    assert_eq!(titles("").len(), 5);
    assert!(titles("cello").is_empty());
}

#[test]
fn find_by_title_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let repo = SqliteSongRepository::new(&conn);
    for title in ["100% Pure", "100 Pure", "snake_case", "snakeXcase"] {
        repo.create(&new_song(title, musician_id)).unwrap();
    }

    let found = repo.find_by_title("100%").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Pure");

    let found = repo.find_by_title("e_c").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "snake_case");
}

#[test]
fn deleting_referenced_musician_is_referential_conflict() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    add_album(&conn, "Debut", musician_id);
    let musicians = SqliteMusicianRepository::new(&conn);

    let err = musicians.delete(musician_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::ReferentialConflict {
            entity: EntityKind::Musician,
            ..
        }
    ));
    assert!(musicians.find_by_id(musician_id).unwrap().is_some());
}

#[test]
fn album_finders_filter_by_musician_and_title() {
    let conn = open_db_in_memory().unwrap();
    let ada = add_musician(&conn, "Ada");
    let grace = add_musician(&conn, "Grace");
    let debut = add_album(&conn, "Debut", ada);
    let sequel = add_album(&conn, "Debut Again", grace);
    let repo = SqliteAlbumRepository::new(&conn);

    let by_musician = repo.find_by_musician(grace).unwrap();
    assert_eq!(by_musician.len(), 1);
    assert_eq!(by_musician[0].id, sequel);

    let by_title = repo
        .find_by_title("DEBUT")
        .unwrap()
        .into_iter()
        .map(|album| album.id)
        .collect::<Vec<_>>();
    assert_eq!(by_title, [debut, sequel]);
    assert_eq!(
        repo.find_by_id(debut).unwrap().unwrap().release_date,
        NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()
    );
}

#[test]
fn genre_names_are_unique_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGenreRepository::new(&conn);
    let jazz = repo
        .create(&NewGenre {
            name: "Jazz".to_string(),
        })
        .unwrap();
    let rock = repo
        .create(&NewGenre {
            name: "Rock".to_string(),
        })
        .unwrap();

    assert!(matches!(
        repo.create(&NewGenre {
            name: "JAZZ".to_string()
        })
        .unwrap_err(),
        RepoError::ConstraintViolation { .. }
    ));
    assert!(matches!(
        repo.update(&Genre {
            id: rock,
            name: "jazz".to_string()
        })
        .unwrap_err(),
        RepoError::ConstraintViolation { .. }
    ));

    let found = repo.find_by_name("az").unwrap();
    assert_eq!(found, [Genre { id: jazz, name: "Jazz".to_string() }]);
}

#[test]
fn genre_name_uniqueness_folds_beyond_ascii() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGenreRepository::new(&conn);
    repo.create(&NewGenre {
        name: "Électro".to_string(),
    })
    .unwrap();

    assert!(matches!(
        repo.create(&NewGenre {
            name: "électro".to_string()
        })
        .unwrap_err(),
        RepoError::ConstraintViolation { .. }
    ));
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn musician_find_by_name_matches_substrings() {
    let conn = open_db_in_memory().unwrap();
    add_musician(&conn, "Ada Lovelace");
    add_musician(&conn, "Grace Hopper");
    let repo = SqliteMusicianRepository::new(&conn);

    let found = repo.find_by_name("LOVE").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ada Lovelace");
    assert_eq!(repo.find_all().unwrap().len(), 2);
}
