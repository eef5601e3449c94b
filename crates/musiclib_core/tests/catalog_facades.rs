use chrono::NaiveDate;
use musiclib_core::db::open_db_in_memory;
use musiclib_core::dto::{
    AlbumCreate, AlbumEdit, GenreCreate, GenreEdit, MusicianCreate, MusicianEdit, SongCreate,
    SongEdit,
};
use musiclib_core::model::EntityKind;
use musiclib_core::{
    AlbumFacade, CatalogFacade, GenreFacade, MusicianFacade, ServiceError, SongFacade,
};
use rusqlite::Connection;

fn add_musician(conn: &Connection, name: &str) -> i64 {
    MusicianFacade::new(conn)
        .create(&MusicianCreate {
            name: name.to_string(),
            biography: Some("Composer".to_string()),
        })
        .unwrap()
}

fn album_form(title: &str, musician_id: i64) -> AlbumCreate {
    AlbumCreate {
        title: title.to_string(),
        release_date: NaiveDate::from_ymd_opt(2001, 2, 3),
        musician_id: Some(musician_id),
    }
}

fn song_form(title: &str, musician_id: i64) -> SongCreate {
    SongCreate {
        title: title.to_string(),
        duration_secs: Some(215),
        musician_id: Some(musician_id),
        ..SongCreate::default()
    }
}

#[test]
fn create_then_find_by_id_returns_payload_fields() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let album_id = AlbumFacade::new(&conn)
        .create(&album_form("Debut", musician_id))
        .unwrap();
    let genre_id = GenreFacade::new(&conn)
        .create(&GenreCreate {
            name: "Jazz".to_string(),
        })
        .unwrap();
    let songs = SongFacade::new(&conn);

    let id = songs
        .create(&SongCreate {
            album_id: Some(album_id),
            genre_id: Some(genre_id),
            ..song_form("Intro", musician_id)
        })
        .unwrap();

    let view = songs.find_by_id(id).unwrap().unwrap();
    assert_eq!(view.id, id);
    assert_eq!(view.title, "Intro");
    assert_eq!(view.duration_secs, 215);
    assert_eq!(view.musician.name, "Ada");
    assert_eq!(view.album.unwrap().title, "Debut");
    assert_eq!(view.genre.unwrap().name, "Jazz");
}

#[test]
fn missing_references_are_reported_per_field() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let songs = SongFacade::new(&conn);

    let field_of = |err: ServiceError| match err {
        ServiceError::ConstraintViolation { field, .. } => field,
        other => panic!("unexpected error: {other}"),
    };

    assert_eq!(
        field_of(songs.create(&song_form("Intro", 404)).unwrap_err()),
        Some("musician_id")
    );
    assert_eq!(
        field_of(
            songs
                .create(&SongCreate {
                    album_id: Some(404),
                    ..song_form("Intro", musician_id)
                })
                .unwrap_err()
        ),
        Some("album_id")
    );
    assert_eq!(
        field_of(
            songs
                .create(&SongCreate {
                    genre_id: Some(404),
                    ..song_form("Intro", musician_id)
                })
                .unwrap_err()
        ),
        Some("genre_id")
    );
    assert_eq!(
        field_of(
            AlbumFacade::new(&conn)
                .create(&album_form("Debut", 404))
                .unwrap_err()
        ),
        Some("musician_id")
    );
    assert!(songs.find_all().unwrap().is_empty());
}

#[test]
fn update_replaces_record_and_rejects_unknown_identity() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let albums = AlbumFacade::new(&conn);
    let id = albums.create(&album_form("Debut", musician_id)).unwrap();

    albums
        .update(&AlbumEdit {
            id: Some(id),
            title: "Debut (Remastered)".to_string(),
            release_date: NaiveDate::from_ymd_opt(2011, 2, 3),
            musician_id: Some(musician_id),
        })
        .unwrap();
    let view = albums.find_by_id(id).unwrap().unwrap();
    assert_eq!(view.title, "Debut (Remastered)");
    assert_eq!(view.release_date, NaiveDate::from_ymd_opt(2011, 2, 3).unwrap());

    let err = albums
        .update(&AlbumEdit {
            id: Some(999),
            ..AlbumEdit::from(&view)
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Album,
            id: 999
        }
    ));

    let err = albums
        .update(&AlbumEdit {
            id: None,
            ..AlbumEdit::from(&view)
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingIdentity(EntityKind::Album)));
}

#[test]
fn delete_then_find_is_absent_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let musician_id = add_musician(&conn, "Ada");
    let songs = SongFacade::new(&conn);
    let id = songs.create(&song_form("Intro", musician_id)).unwrap();

    songs.delete(id).unwrap();
    assert!(songs.find_by_id(id).unwrap().is_none());
    assert!(matches!(
        songs.delete(id).unwrap_err(),
        ServiceError::NotFound {
            entity: EntityKind::Song,
            ..
        }
    ));
}

#[test]
fn deleting_referenced_musician_is_restricted() {
    let conn = open_db_in_memory().unwrap();
    let musicians = MusicianFacade::new(&conn);
    let ada = add_musician(&conn, "Ada");
    let album_id = AlbumFacade::new(&conn)
        .create(&album_form("Debut", ada))
        .unwrap();
    let songs = SongFacade::new(&conn);
    let intro = songs
        .create(&SongCreate {
            album_id: Some(album_id),
            ..song_form("Intro", ada)
        })
        .unwrap();

    let by_musician = songs.find_by_musician(ada).unwrap();
    assert_eq!(by_musician.len(), 1);
    assert_eq!(by_musician[0].id, intro);

    let err = musicians.delete(ada).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ReferentialConflict {
            entity: EntityKind::Musician,
            ..
        }
    ));
    assert!(musicians.find_by_id(ada).unwrap().is_some());
    assert!(songs.find_by_id(intro).unwrap().is_some());
}

#[test]
fn genre_rename_to_existing_name_flags_name_field() {
    let conn = open_db_in_memory().unwrap();
    let genres = GenreFacade::new(&conn);
    genres
        .create(&GenreCreate {
            name: "Jazz".to_string(),
        })
        .unwrap();
    let rock = genres
        .create(&GenreCreate {
            name: "Rock".to_string(),
        })
        .unwrap();

    let err = genres
        .update(&GenreEdit {
            id: Some(rock),
            name: "jazz".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ConstraintViolation {
            field: Some("name"),
            ..
        }
    ));
    assert_eq!(genres.find_by_id(rock).unwrap().unwrap().name, "Rock");
    assert_eq!(genres.find_by_name("RO").unwrap().len(), 1);
}

#[test]
fn genre_names_differing_only_in_accented_case_conflict() {
    let conn = open_db_in_memory().unwrap();
    let genres = GenreFacade::new(&conn);
    genres
        .create(&GenreCreate {
            name: "Électro".to_string(),
        })
        .unwrap();

    let err = genres
        .create(&GenreCreate {
            name: "électro".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ConstraintViolation {
            field: Some("name"),
            ..
        }
    ));
    assert_eq!(genres.find_all().unwrap().len(), 1);
}

#[test]
fn biography_is_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let musicians = MusicianFacade::new(&conn);
    let id = add_musician(&conn, "Ada");

    musicians
        .update(&MusicianEdit {
            id: Some(id),
            name: "Ada L.".to_string(),
            biography: Some("   ".to_string()),
        })
        .unwrap();

    let view = musicians.find_by_id(id).unwrap().unwrap();
    assert_eq!(view.name, "Ada L.");
    assert_eq!(view.biography.as_deref(), Some("   "));

    musicians
        .update(&MusicianEdit {
            id: Some(id),
            name: "Ada L.".to_string(),
            biography: None,
        })
        .unwrap();
    assert_eq!(musicians.find_by_id(id).unwrap().unwrap().biography, None);
}

#[test]
fn song_finders_map_to_views() {
    let conn = open_db_in_memory().unwrap();
    let ada = add_musician(&conn, "Ada");
    let songs = SongFacade::new(&conn);
    songs.create(&song_form("Bassline", ada)).unwrap();
    songs.create(&song_form("Double Bass", ada)).unwrap();
    songs.create(&song_form("Treble", ada)).unwrap();

    let titles = songs
        .find_by_title("BASS")
        .unwrap()
        .into_iter()
        .map(|song| song.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, ["Bassline", "Double Bass"]);
    assert_eq!(songs.find_all().unwrap().len(), 3);
    assert!(songs.find_by_genre(1).unwrap().is_empty());

    let edit = SongEdit::from(&songs.find_by_title("treble").unwrap()[0]);
    assert_eq!(edit.duration_secs, Some(215));
    assert_eq!(edit.musician_id, Some(ada));
}
