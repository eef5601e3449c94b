//! Subcommand execution against an open catalog.
//!
//! Writes go through the workflow controllers and print the resulting notice;
//! reads call the facades directly.

use crate::cli::{AlbumCmd, Command, GenreCmd, MusicianCmd, SongCmd};
use anyhow::{anyhow, bail, Result};
use log::info;
use musiclib_core::dto::{
    form_date, AlbumCreate, AlbumView, GenreCreate, GenreView, MusicianCreate, MusicianView,
    SongCreate, SongView,
};
use musiclib_core::workflow::{
    AlbumResource, BundleMessageSource, Controller, FlashStore, GenreResource,
    InMemoryFlashStore, MusicianResource, Outcome, Request, Resource, SongResource,
    WorkflowResult, ALERT_DANGER,
};
use musiclib_core::{AlbumFacade, CatalogFacade, GenreFacade, MusicianFacade, SongFacade};
use rusqlite::Connection;

/// One CLI invocation acting as a single workflow client.
struct Session<'a> {
    conn: &'a Connection,
    messages: BundleMessageSource,
    flash: InMemoryFlashStore,
    request: Request,
}

impl<'a> Session<'a> {
    fn controller<R: Resource>(&self) -> Controller<'_, R> {
        Controller::new(self.conn, &self.messages, &self.flash)
    }

    /// Prints the notice a redirect carries, or fails with the rejection.
    fn report(&self, outcome: WorkflowResult<Outcome>) -> Result<()> {
        match outcome? {
            Outcome::Redirect(redirect) => {
                let notices = redirect
                    .flash
                    .and_then(|token| self.flash.take(token))
                    .unwrap_or_default();
                if let Some(text) = notices.get(ALERT_DANGER) {
                    bail!("{text}");
                }
                for text in notices.values() {
                    println!("{text}");
                }
                info!(
                    "event=cli_command module=cli status=ok location={}",
                    redirect.location
                );
                Ok(())
            }
            Outcome::Render(page) => {
                if let Some(text) = page.model.text(ALERT_DANGER) {
                    bail!("{text}");
                }
                let invalid = page
                    .model
                    .names()
                    .filter_map(|name| name.strip_suffix("_error"))
                    .collect::<Vec<_>>();
                bail!("invalid input: {}", invalid.join(", "))
            }
        }
    }
}

pub fn run(conn: &Connection, locale: &str, command: &Command) -> Result<()> {
    let session = Session {
        conn,
        messages: BundleMessageSource::english(),
        flash: InMemoryFlashStore::new(),
        request: Request::new(locale),
    };

    match command {
        // Answered before the catalog is opened.
        Command::Ping | Command::Version => Ok(()),
        Command::Musician { cmd } => musician(&session, cmd),
        Command::Genre { cmd } => genre(&session, cmd),
        Command::Album { cmd } => album(&session, cmd),
        Command::Song { cmd } => song(&session, cmd),
    }
}

fn musician(session: &Session<'_>, cmd: &MusicianCmd) -> Result<()> {
    let facade = MusicianFacade::new(session.conn);
    match cmd {
        MusicianCmd::Add { name, biography } => {
            let payload = MusicianCreate {
                name: name.clone(),
                biography: biography.clone(),
            };
            session.report(
                session
                    .controller::<MusicianResource>()
                    .create(payload, &session.request),
            )
        }
        MusicianCmd::List { name } => {
            let musicians = match name {
                Some(pattern) => facade.find_by_name(pattern)?,
                None => facade.find_all()?,
            };
            musicians.iter().for_each(print_musician);
            Ok(())
        }
        MusicianCmd::Show { id } => {
            let musician = facade
                .find_by_id(*id)?
                .ok_or_else(|| anyhow!("musician {id} not found"))?;
            print_musician(&musician);
            if let Some(biography) = &musician.biography {
                println!("{biography}");
            }
            Ok(())
        }
        MusicianCmd::Edit {
            id,
            name,
            biography,
            clear_biography,
        } => edit::<MusicianResource>(session, *id, |form| {
            if let Some(name) = name {
                form.name = name.clone();
            }
            if *clear_biography {
                form.biography = None;
            } else if let Some(biography) = biography {
                form.biography = Some(biography.clone());
            }
            Ok(())
        }),
        MusicianCmd::Delete { id } => session.report(
            session
                .controller::<MusicianResource>()
                .delete(*id, &session.request),
        ),
    }
}

fn genre(session: &Session<'_>, cmd: &GenreCmd) -> Result<()> {
    let facade = GenreFacade::new(session.conn);
    match cmd {
        GenreCmd::Add { name } => session.report(
            session
                .controller::<GenreResource>()
                .create(GenreCreate { name: name.clone() }, &session.request),
        ),
        GenreCmd::List { name } => {
            let genres = match name {
                Some(pattern) => facade.find_by_name(pattern)?,
                None => facade.find_all()?,
            };
            genres.iter().for_each(print_genre);
            Ok(())
        }
        GenreCmd::Edit { id, name } => edit::<GenreResource>(session, *id, |form| {
            form.name = name.clone();
            Ok(())
        }),
        GenreCmd::Delete { id } => session.report(
            session
                .controller::<GenreResource>()
                .delete(*id, &session.request),
        ),
    }
}

fn album(session: &Session<'_>, cmd: &AlbumCmd) -> Result<()> {
    let facade = AlbumFacade::new(session.conn);
    match cmd {
        AlbumCmd::Add {
            title,
            released,
            musician,
        } => {
            let release_date = form_date::parse(released).map_err(|err| anyhow!(err))?;
            let payload = AlbumCreate {
                title: title.clone(),
                release_date,
                musician_id: Some(*musician),
            };
            session.report(
                session
                    .controller::<AlbumResource>()
                    .create(payload, &session.request),
            )
        }
        AlbumCmd::List { musician, title } => {
            let albums = match (musician, title) {
                (Some(musician_id), _) => facade.find_by_musician(*musician_id)?,
                (None, Some(pattern)) => facade.find_by_title(pattern)?,
                (None, None) => facade.find_all()?,
            };
            albums.iter().for_each(print_album);
            Ok(())
        }
        AlbumCmd::Show { id } => {
            let album = facade
                .find_by_id(*id)?
                .ok_or_else(|| anyhow!("album {id} not found"))?;
            print_album(&album);
            SongFacade::new(session.conn)
                .find_by_album(album.id)?
                .iter()
                .for_each(print_song);
            Ok(())
        }
        AlbumCmd::Edit {
            id,
            title,
            released,
            musician,
        } => edit::<AlbumResource>(session, *id, |form| {
            if let Some(title) = title {
                form.title = title.clone();
            }
            if let Some(released) = released {
                form.release_date = form_date::parse(released).map_err(|err| anyhow!(err))?;
            }
            if let Some(musician_id) = musician {
                form.musician_id = Some(*musician_id);
            }
            Ok(())
        }),
        AlbumCmd::Delete { id } => session.report(
            session
                .controller::<AlbumResource>()
                .delete(*id, &session.request),
        ),
    }
}

fn song(session: &Session<'_>, cmd: &SongCmd) -> Result<()> {
    let facade = SongFacade::new(session.conn);
    match cmd {
        SongCmd::Add {
            title,
            duration,
            musician,
            album,
            genre,
        } => {
            let payload = SongCreate {
                title: title.clone(),
                duration_secs: Some(*duration),
                musician_id: Some(*musician),
                album_id: *album,
                genre_id: *genre,
            };
            session.report(
                session
                    .controller::<SongResource>()
                    .create(payload, &session.request),
            )
        }
        SongCmd::List {
            musician,
            album,
            genre,
        } => {
            let songs = match (musician, album, genre) {
                (Some(musician_id), _, _) => facade.find_by_musician(*musician_id)?,
                (None, Some(album_id), _) => facade.find_by_album(*album_id)?,
                (None, None, Some(genre_id)) => facade.find_by_genre(*genre_id)?,
                (None, None, None) => facade.find_all()?,
            };
            songs.iter().for_each(print_song);
            Ok(())
        }
        SongCmd::Search { pattern } => {
            facade.find_by_title(pattern)?.iter().for_each(print_song);
            Ok(())
        }
        SongCmd::Show { id } => {
            let song = facade
                .find_by_id(*id)?
                .ok_or_else(|| anyhow!("song {id} not found"))?;
            print_song(&song);
            Ok(())
        }
        SongCmd::Edit {
            id,
            title,
            duration,
            musician,
            album,
            genre,
            clear_album,
            clear_genre,
        } => edit::<SongResource>(session, *id, |form| {
            if let Some(title) = title {
                form.title = title.clone();
            }
            if let Some(duration) = duration {
                form.duration_secs = Some(*duration);
            }
            if let Some(musician_id) = musician {
                form.musician_id = Some(*musician_id);
            }
            if *clear_album {
                form.album_id = None;
            } else if album.is_some() {
                form.album_id = *album;
            }
            if *clear_genre {
                form.genre_id = None;
            } else if genre.is_some() {
                form.genre_id = *genre;
            }
            Ok(())
        }),
        SongCmd::Delete { id } => session.report(
            session
                .controller::<SongResource>()
                .delete(*id, &session.request),
        ),
    }
}

/// Prefills the edit form from the stored record, applies the requested
/// changes and submits it through the controller.
fn edit<R: Resource>(
    session: &Session<'_>,
    id: i64,
    apply: impl FnOnce(&mut R::Edit) -> Result<()>,
) -> Result<()> {
    let controller = session.controller::<R>();
    let Some(view) = R::facade(session.conn).find_by_id(id)? else {
        return session.report(controller.edit_form(id, &session.request));
    };
    let mut form = R::edit_from_view(&view);
    apply(&mut form)?;
    session.report(controller.edit(id, form, &session.request))
}

fn print_musician(musician: &MusicianView) {
    println!("{}\t{}", musician.id, musician.name);
}

fn print_genre(genre: &GenreView) {
    println!("{}\t{}", genre.id, genre.name);
}

fn print_album(album: &AlbumView) {
    println!(
        "{}\t{}\t{}\t{}",
        album.id,
        album.title,
        form_date::format(&album.release_date),
        album.musician.name
    );
}

fn print_song(song: &SongView) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        song.id,
        song.title,
        format_duration(song.duration_secs),
        song.musician.name,
        song.album.as_ref().map_or("-", |album| album.title.as_str()),
        song.genre.as_ref().map_or("-", |genre| genre.name.as_str())
    );
}

fn format_duration(total_secs: u32) -> String {
    let (hours, minutes, seconds) = (total_secs / 3600, total_secs / 60 % 60, total_secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
