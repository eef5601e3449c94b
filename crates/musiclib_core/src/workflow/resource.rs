//! Per-resource bindings for the generic controller.
//!
//! Each resource names its routes and message keys, picks its facade, and
//! maps its payload types onto `FormPayload` variants so validator choice is
//! fixed at compile time.

use super::model::ModelMap;
use super::validation::FormPayload;
use super::WorkflowResult;
use crate::dto::{
    AlbumCreate, AlbumEdit, AlbumView, GenreCreate, GenreEdit, GenreView, MusicianCreate,
    MusicianEdit, MusicianView, SongCreate, SongEdit, SongView,
};
use crate::service::{AlbumFacade, CatalogFacade, GenreFacade, MusicianFacade, SongFacade};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt::Debug;

/// A catalog resource administered through the workflow.
pub trait Resource {
    type Create: Serialize + Default + Debug;
    type Edit: Serialize + Debug;
    type View: Serialize;
    type Facade<'conn>: CatalogFacade<Create = Self::Create, Edit = Self::Edit, View = Self::View>;

    /// Path segment, view directory and single-record model attribute.
    const NAME: &'static str;
    /// List model attribute and message key prefix.
    const PLURAL: &'static str;
    /// Model attribute holding the creation form.
    const CREATE_FORM: &'static str;

    fn facade(conn: &Connection) -> Self::Facade<'_>;
    fn create_form(payload: &Self::Create) -> FormPayload<'_>;
    fn edit_form(payload: &Self::Edit) -> FormPayload<'_>;
    /// Prefills an edit form from the stored record.
    fn edit_from_view(view: &Self::View) -> Self::Edit;
    fn assign_id(payload: &mut Self::Edit, id: i64);
    fn create_label(payload: &Self::Create) -> &str;
    fn edit_label(payload: &Self::Edit) -> &str;
    fn view_label(view: &Self::View) -> &str;

    /// Adds option lists a create/edit form needs.
    fn add_form_options(_conn: &Connection, _model: &mut ModelMap) -> WorkflowResult<()> {
        Ok(())
    }
}

pub struct MusicianResource;

impl Resource for MusicianResource {
    type Create = MusicianCreate;
    type Edit = MusicianEdit;
    type View = MusicianView;
    type Facade<'conn> = MusicianFacade<'conn>;

    const NAME: &'static str = "musician";
    const PLURAL: &'static str = "musicians";
    const CREATE_FORM: &'static str = "musician_create";

    fn facade(conn: &Connection) -> MusicianFacade<'_> {
        MusicianFacade::new(conn)
    }

    fn create_form(payload: &MusicianCreate) -> FormPayload<'_> {
        FormPayload::MusicianCreate(payload)
    }

    fn edit_form(payload: &MusicianEdit) -> FormPayload<'_> {
        FormPayload::MusicianEdit(payload)
    }

    fn edit_from_view(view: &MusicianView) -> MusicianEdit {
        MusicianEdit::from(view)
    }

    fn assign_id(payload: &mut MusicianEdit, id: i64) {
        payload.id = Some(id);
    }

    fn create_label(payload: &MusicianCreate) -> &str {
        &payload.name
    }

    fn edit_label(payload: &MusicianEdit) -> &str {
        &payload.name
    }

    fn view_label(view: &MusicianView) -> &str {
        &view.name
    }
}

pub struct GenreResource;

impl Resource for GenreResource {
    type Create = GenreCreate;
    type Edit = GenreEdit;
    type View = GenreView;
    type Facade<'conn> = GenreFacade<'conn>;

    const NAME: &'static str = "genre";
    const PLURAL: &'static str = "genres";
    const CREATE_FORM: &'static str = "genre_create";

    fn facade(conn: &Connection) -> GenreFacade<'_> {
        GenreFacade::new(conn)
    }

    fn create_form(payload: &GenreCreate) -> FormPayload<'_> {
        FormPayload::GenreCreate(payload)
    }

    fn edit_form(payload: &GenreEdit) -> FormPayload<'_> {
        FormPayload::GenreEdit(payload)
    }

    fn edit_from_view(view: &GenreView) -> GenreEdit {
        GenreEdit::from(view)
    }

    fn assign_id(payload: &mut GenreEdit, id: i64) {
        payload.id = Some(id);
    }

    fn create_label(payload: &GenreCreate) -> &str {
        &payload.name
    }

    fn edit_label(payload: &GenreEdit) -> &str {
        &payload.name
    }

    fn view_label(view: &GenreView) -> &str {
        &view.name
    }
}

pub struct AlbumResource;

impl Resource for AlbumResource {
    type Create = AlbumCreate;
    type Edit = AlbumEdit;
    type View = AlbumView;
    type Facade<'conn> = AlbumFacade<'conn>;

    const NAME: &'static str = "album";
    const PLURAL: &'static str = "albums";
    const CREATE_FORM: &'static str = "album_create";

    fn facade(conn: &Connection) -> AlbumFacade<'_> {
        AlbumFacade::new(conn)
    }

    fn create_form(payload: &AlbumCreate) -> FormPayload<'_> {
        FormPayload::AlbumCreate(payload)
    }

    fn edit_form(payload: &AlbumEdit) -> FormPayload<'_> {
        FormPayload::AlbumEdit(payload)
    }

    fn edit_from_view(view: &AlbumView) -> AlbumEdit {
        AlbumEdit::from(view)
    }

    fn assign_id(payload: &mut AlbumEdit, id: i64) {
        payload.id = Some(id);
    }

    fn create_label(payload: &AlbumCreate) -> &str {
        &payload.title
    }

    fn edit_label(payload: &AlbumEdit) -> &str {
        &payload.title
    }

    fn view_label(view: &AlbumView) -> &str {
        &view.title
    }

    fn add_form_options(conn: &Connection, model: &mut ModelMap) -> WorkflowResult<()> {
        model.insert("musicians", &MusicianFacade::new(conn).find_all()?)
    }
}

pub struct SongResource;

impl Resource for SongResource {
    type Create = SongCreate;
    type Edit = SongEdit;
    type View = SongView;
    type Facade<'conn> = SongFacade<'conn>;

    const NAME: &'static str = "song";
    const PLURAL: &'static str = "songs";
    const CREATE_FORM: &'static str = "song_create";

    fn facade(conn: &Connection) -> SongFacade<'_> {
        SongFacade::new(conn)
    }

    fn create_form(payload: &SongCreate) -> FormPayload<'_> {
        FormPayload::SongCreate(payload)
    }

    fn edit_form(payload: &SongEdit) -> FormPayload<'_> {
        FormPayload::SongEdit(payload)
    }

    fn edit_from_view(view: &SongView) -> SongEdit {
        SongEdit::from(view)
    }

    fn assign_id(payload: &mut SongEdit, id: i64) {
        payload.id = Some(id);
    }

    fn create_label(payload: &SongCreate) -> &str {
        &payload.title
    }

    fn edit_label(payload: &SongEdit) -> &str {
        &payload.title
    }

    fn view_label(view: &SongView) -> &str {
        &view.title
    }

    fn add_form_options(conn: &Connection, model: &mut ModelMap) -> WorkflowResult<()> {
        model.insert("albums", &AlbumFacade::new(conn).find_all()?)?;
        model.insert("genres", &GenreFacade::new(conn).find_all()?)?;
        model.insert("musicians", &MusicianFacade::new(conn).find_all()?)
    }
}
