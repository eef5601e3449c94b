//! Request workflow layer.
//!
//! # Responsibility
//! - Orchestrate one request: validate input, call the facade, pick the next
//!   view or redirect, and carry notices across the redirect.
//! - Turn not-found, validation, constraint and conflict failures into
//!   outcomes the caller can render.
//!
//! # Invariants
//! - Controllers hold no state between requests.
//! - A detail/edit view is never rendered for an unknown id.
//! - Edit submits take the identity from the path, not the body.
//! - Only store failures escape as `WorkflowError`.

mod controller;
pub mod flash;
pub mod messages;
pub mod model;
pub mod resource;
pub mod validation;

use crate::service::ServiceError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub use controller::Controller;
pub use flash::{FlashAttributes, FlashStore, FlashToken, InMemoryFlashStore, FLASH_TTL};
pub use messages::{BundleMessageSource, MessageSource};
pub use model::ModelMap;
pub use resource::{AlbumResource, GenreResource, MusicianResource, Resource, SongResource};
pub use validation::{validate, FieldError, FormPayload, ValidationErrors};

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Failures that end a request without a renderable outcome.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to build view model attribute `{name}`: {source}")]
    Model {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Logical position of a request in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    List,
    ViewDetail,
    NewForm,
    EditForm,
    Submitting,
    Redirected,
}

impl Display for WorkflowState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::ViewDetail => "view_detail",
            Self::NewForm => "new_form",
            Self::EditForm => "edit_form",
            Self::Submitting => "submitting",
            Self::Redirected => "redirected",
        };
        f.write_str(name)
    }
}

/// Flash attribute carrying a success notice.
pub const ALERT_SUCCESS: &str = "alert_success";
/// Flash attribute carrying a failure notice.
pub const ALERT_DANGER: &str = "alert_danger";

/// Per-request inputs the transport extracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub locale: String,
    /// Token of notices left by the redirect that led here.
    pub flash: Option<FlashToken>,
}

impl Request {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            flash: None,
        }
    }

    /// Follows a redirect outcome: same locale, the redirect's flash token.
    pub fn following(&self, redirect: &Redirect) -> Self {
        Self {
            locale: self.locale.clone(),
            flash: redirect.flash,
        }
    }
}

/// A view to render with its model.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub view: String,
    pub state: WorkflowState,
    pub model: ModelMap,
}

/// A redirect to another workflow location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub flash: Option<FlashToken>,
}

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(Page),
    Redirect(Redirect),
}

impl Outcome {
    pub fn state(&self) -> WorkflowState {
        match self {
            Self::Render(page) => page.state,
            Self::Redirect(_) => WorkflowState::Redirected,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Render(page) => Some(page),
            Self::Redirect(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Render(_) => None,
            Self::Redirect(redirect) => Some(redirect),
        }
    }
}

/// Expands the `{id}` placeholder of a path template.
pub fn expand_path(template: &str, id: i64) -> String {
    template.replace("{id}", &id.to_string())
}
