//! Application facades over the repository layer.
//!
//! # Responsibility
//! - Translate payloads into stored entities and entities into views.
//! - Check that every referenced musician/album/genre exists before writing.
//! - Own the transaction boundary of each write use-case.
//!
//! # Invariants
//! - Every write runs inside one IMMEDIATE transaction: existence checks and
//!   the write either all apply or none do.
//! - `find_by_id` reports absence as `Ok(None)`.
//! - Deleting a referenced record is restricted, never cascaded or nulled.

pub mod album_service;
pub mod genre_service;
pub mod musician_service;
pub mod song_service;

use crate::db::DbError;
use crate::model::EntityKind;
use crate::repo::RepoError;
use thiserror::Error;

pub use album_service::AlbumFacade;
pub use genre_service::GenreFacade;
pub use musician_service::MusicianFacade;
pub use song_service::SongFacade;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Facade error taxonomy.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Target record of an update/delete does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    /// The write would break a required reference or uniqueness rule.
    ///
    /// `field` names the payload field at fault when it is known.
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        field: Option<&'static str>,
        message: String,
    },
    /// Delete blocked because other records still reference the target.
    #[error("{entity} {id} is still referenced by other records")]
    ReferentialConflict { entity: EntityKind, id: i64 },
    /// Update payload reached the facade without an identity.
    #[error("{0} update payload carries no id")]
    MissingIdentity(EntityKind),
    /// Stored data disagrees with store-enforced relationships.
    #[error("inconsistent catalog state: {0}")]
    InconsistentState(&'static str),
    /// Store failure that is not recoverable by the caller.
    #[error(transparent)]
    Store(RepoError),
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::ConstraintViolation { message, .. } => Self::ConstraintViolation {
                field: None,
                message,
            },
            RepoError::ReferentialConflict { entity, id } => {
                Self::ReferentialConflict { entity, id }
            }
            other => Self::Store(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Store(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(RepoError::from(value))
    }
}

/// CRUD contract shared by every catalog facade.
pub trait CatalogFacade {
    type Create;
    type Edit;
    type View;

    /// Validates references, persists a new record and returns its id.
    fn create(&self, payload: &Self::Create) -> ServiceResult<i64>;
    /// Replaces the stored record named by the payload id.
    fn update(&self, payload: &Self::Edit) -> ServiceResult<()>;
    fn delete(&self, id: i64) -> ServiceResult<()>;
    fn find_by_id(&self, id: i64) -> ServiceResult<Option<Self::View>>;
    fn find_all(&self) -> ServiceResult<Vec<Self::View>>;
}

/// Unwraps a form field the facade cannot write without.
pub(crate) fn require_field<T>(value: Option<T>, field: &'static str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::ConstraintViolation {
        field: Some(field),
        message: format!("{field} is required"),
    })
}

/// Turns a missing referenced record into a field-scoped constraint violation.
pub(crate) fn require_reference<T>(
    found: Option<T>,
    entity: EntityKind,
    id: i64,
    field: &'static str,
) -> ServiceResult<T> {
    found.ok_or_else(|| ServiceError::ConstraintViolation {
        field: Some(field),
        message: format!("{entity} {id} does not exist"),
    })
}

#[cfg(test)]
mod tests {
    use super::{require_reference, ServiceError};
    use crate::model::EntityKind;
    use crate::repo::RepoError;

    #[test]
    fn repo_errors_keep_their_semantics() {
        let not_found: ServiceError = RepoError::NotFound {
            entity: EntityKind::Album,
            id: 3,
        }
        .into();
        assert!(matches!(
            not_found,
            ServiceError::NotFound {
                entity: EntityKind::Album,
                id: 3
            }
        ));

        let conflict: ServiceError = RepoError::ReferentialConflict {
            entity: EntityKind::Genre,
            id: 9,
        }
        .into();
        assert!(matches!(
            conflict,
            ServiceError::ReferentialConflict { id: 9, .. }
        ));
    }

    #[test]
    fn missing_reference_names_the_payload_field() {
        let err = require_reference::<()>(None, EntityKind::Musician, 42, "musician_id")
            .expect_err("missing reference must fail");
        match err {
            ServiceError::ConstraintViolation { field, message } => {
                assert_eq!(field, Some("musician_id"));
                assert!(message.contains("musician 42"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
