//! Form validation.
//!
//! # Responsibility
//! - Run declared field rules, then the payload kind's business rules.
//! - Accumulate every failure; nothing short-circuits.
//!
//! # Invariants
//! - The validator for a payload is chosen by its `FormPayload` variant.
//! - Field names in errors match the payload's field names.

use crate::dto::{
    AlbumCreate, AlbumEdit, GenreCreate, GenreEdit, MusicianCreate, MusicianEdit, SongCreate,
    SongEdit,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;

pub const MAX_TEXT_CHARS: usize = 255;
pub const MAX_BIOGRAPHY_CHARS: usize = 4000;
pub const MAX_DURATION_SECS: u32 = 24 * 60 * 60;

/// Every bindable form payload, tagged by kind.
#[derive(Debug, Clone, Copy)]
pub enum FormPayload<'a> {
    MusicianCreate(&'a MusicianCreate),
    MusicianEdit(&'a MusicianEdit),
    GenreCreate(&'a GenreCreate),
    GenreEdit(&'a GenreEdit),
    AlbumCreate(&'a AlbumCreate),
    AlbumEdit(&'a AlbumEdit),
    SongCreate(&'a SongCreate),
    SongEdit(&'a SongEdit),
}

/// One rejected field with a machine-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub code: &'static str,
}

/// Accumulated validation failures for one submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    field_errors: Vec<FieldError>,
    global_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn reject(&mut self, field: &'static str, code: &'static str) {
        self.field_errors.push(FieldError { field, code });
    }

    pub fn reject_global(&mut self, message: impl Into<String>) {
        self.global_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.global_errors.is_empty()
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.field_errors.iter().any(|error| error.field == field)
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    /// Distinct names of rejected fields.
    pub fn invalid_fields(&self) -> BTreeSet<&'static str> {
        self.field_errors.iter().map(|error| error.field).collect()
    }
}

/// Validates a payload against today's local date.
pub fn validate(payload: FormPayload<'_>) -> ValidationErrors {
    validate_on(payload, Local::now().date_naive())
}

/// Validates a payload; `today` bounds date rules.
pub fn validate_on(payload: FormPayload<'_>, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    check_fields(payload, &mut errors);
    check_business_rules(payload, today, &mut errors);
    errors
}

fn check_fields(payload: FormPayload<'_>, errors: &mut ValidationErrors) {
    match payload {
        FormPayload::MusicianCreate(form) => {
            required_text(errors, "name", &form.name);
            optional_text(errors, "biography", form.biography.as_deref(), MAX_BIOGRAPHY_CHARS);
        }
        FormPayload::MusicianEdit(form) => {
            required_text(errors, "name", &form.name);
            optional_text(errors, "biography", form.biography.as_deref(), MAX_BIOGRAPHY_CHARS);
        }
        FormPayload::GenreCreate(form) => required_text(errors, "name", &form.name),
        FormPayload::GenreEdit(form) => required_text(errors, "name", &form.name),
        FormPayload::AlbumCreate(form) => {
            required_text(errors, "title", &form.title);
            required(errors, "release_date", form.release_date.is_some());
            required(errors, "musician_id", form.musician_id.is_some());
        }
        FormPayload::AlbumEdit(form) => {
            required_text(errors, "title", &form.title);
            required(errors, "release_date", form.release_date.is_some());
            required(errors, "musician_id", form.musician_id.is_some());
        }
        FormPayload::SongCreate(form) => {
            required_text(errors, "title", &form.title);
            required(errors, "duration_secs", form.duration_secs.is_some());
            required(errors, "musician_id", form.musician_id.is_some());
        }
        FormPayload::SongEdit(form) => {
            required_text(errors, "title", &form.title);
            required(errors, "duration_secs", form.duration_secs.is_some());
            required(errors, "musician_id", form.musician_id.is_some());
        }
    }
}

fn check_business_rules(payload: FormPayload<'_>, today: NaiveDate, errors: &mut ValidationErrors) {
    match payload {
        FormPayload::AlbumCreate(form) => check_release_date(errors, form.release_date, today),
        FormPayload::AlbumEdit(form) => check_release_date(errors, form.release_date, today),
        FormPayload::SongCreate(form) => check_duration(errors, form.duration_secs),
        FormPayload::SongEdit(form) => check_duration(errors, form.duration_secs),
        FormPayload::MusicianCreate(_)
        | FormPayload::MusicianEdit(_)
        | FormPayload::GenreCreate(_)
        | FormPayload::GenreEdit(_) => {}
    }
}

fn required(errors: &mut ValidationErrors, field: &'static str, present: bool) {
    if !present {
        errors.reject(field, "required");
    }
}

fn required_text(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.reject(field, "required");
    } else if value.chars().count() > MAX_TEXT_CHARS {
        errors.reject(field, "too_long");
    }
}

fn optional_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if value.is_some_and(|text| text.chars().count() > max) {
        errors.reject(field, "too_long");
    }
}

fn check_release_date(
    errors: &mut ValidationErrors,
    release_date: Option<NaiveDate>,
    today: NaiveDate,
) {
    let Some(date) = release_date else {
        return;
    };
    if date > today {
        errors.reject("release_date", "in_future");
    }
    if NaiveDate::from_ymd_opt(1900, 1, 1).is_some_and(|earliest| date < earliest) {
        errors.reject("release_date", "too_early");
    }
}

fn check_duration(errors: &mut ValidationErrors, duration_secs: Option<u32>) {
    if let Some(duration) = duration_secs {
        if duration == 0 || duration > MAX_DURATION_SECS {
            errors.reject("duration_secs", "out_of_range");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_on, FormPayload};
    use crate::dto::{AlbumCreate, GenreCreate, SongEdit};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
    }

    #[test]
    fn empty_album_form_reports_every_missing_field() {
        let form = AlbumCreate::default();
        let errors = validate_on(FormPayload::AlbumCreate(&form), today());

        let fields = errors.invalid_fields();
        assert_eq!(
            fields.into_iter().collect::<Vec<_>>(),
            ["musician_id", "release_date", "title"]
        );
    }

    #[test]
    fn album_business_rule_runs_alongside_field_rules() {
        let form = AlbumCreate {
            title: " ".to_string(),
            release_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            musician_id: Some(1),
        };
        let errors = validate_on(FormPayload::AlbumCreate(&form), today());

        assert!(errors.has_field_error("title"));
        assert!(errors.has_field_error("release_date"));
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn song_duration_must_be_positive_and_bounded() {
        let mut form = SongEdit {
            id: Some(1),
            title: "Intro".to_string(),
            duration_secs: Some(0),
            musician_id: Some(1),
            ..SongEdit::default()
        };
        let errors = validate_on(FormPayload::SongEdit(&form), today());
        assert!(errors.has_field_error("duration_secs"));

        form.duration_secs = Some(215);
        assert!(validate_on(FormPayload::SongEdit(&form), today()).is_empty());
    }

    #[test]
    fn genre_name_length_is_counted_in_characters() {
        let form = GenreCreate {
            name: "é".repeat(255),
        };
        assert!(validate_on(FormPayload::GenreCreate(&form), today()).is_empty());
    }
}
