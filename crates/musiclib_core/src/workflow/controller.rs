//! Generic CRUD controller shared by every catalog resource.
//!
//! # Responsibility
//! - Map list/detail/new/create/edit/update/delete requests onto facade calls.
//! - Pick the next view or redirect and the notice that travels with it.
//!
//! # Invariants
//! - Every handler consumes the inbound flash token; notices reach exactly
//!   one rendered page.
//! - Rejected submissions re-render the form with the submitted values.
//! - Not-found and delete conflicts redirect to the list, never fail.

use super::flash::{FlashAttributes, FlashStore};
use super::messages::MessageSource;
use super::model::ModelMap;
use super::resource::Resource;
use super::validation::{validate, ValidationErrors};
use super::{
    expand_path, Outcome, Page, Redirect, Request, WorkflowResult, WorkflowState, ALERT_DANGER,
    ALERT_SUCCESS,
};
use crate::service::{CatalogFacade, ServiceError};
use log::{debug, info, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::marker::PhantomData;

const LIST_PATH: &str = "/{name}/list";
const DETAIL_PATH: &str = "/{name}/detail/{id}";

/// Stateless request handler for one resource kind.
pub struct Controller<'a, R: Resource> {
    conn: &'a Connection,
    messages: &'a dyn MessageSource,
    flash: &'a dyn FlashStore,
    resource: PhantomData<R>,
}

impl<'a, R: Resource> Controller<'a, R> {
    pub fn new(
        conn: &'a Connection,
        messages: &'a dyn MessageSource,
        flash: &'a dyn FlashStore,
    ) -> Self {
        Self {
            conn,
            messages,
            flash,
            resource: PhantomData,
        }
    }

    /// Renders every record of the resource.
    pub fn list(&self, request: &Request) -> WorkflowResult<Outcome> {
        let inbound = self.take_flash(request);
        let records = R::facade(self.conn).find_all()?;
        let mut model = ModelMap::new();
        model.insert(R::PLURAL, &records)?;
        Ok(self.render("list", WorkflowState::List, model, inbound))
    }

    /// Renders one record, or redirects to the list when it is missing.
    pub fn detail(&self, id: i64, request: &Request) -> WorkflowResult<Outcome> {
        let inbound = self.take_flash(request);
        let Some(view) = R::facade(self.conn).find_by_id(id)? else {
            return Ok(self.not_found("detail", id, request));
        };
        let mut model = ModelMap::new();
        model.insert(R::NAME, &view)?;
        Ok(self.render("detail", WorkflowState::ViewDetail, model, inbound))
    }

    /// Renders an empty creation form.
    pub fn new_form(&self, request: &Request) -> WorkflowResult<Outcome> {
        let inbound = self.take_flash(request);
        let mut model = ModelMap::new();
        model.insert(R::CREATE_FORM, &R::Create::default())?;
        R::add_form_options(self.conn, &mut model)?;
        Ok(self.render("create", WorkflowState::NewForm, model, inbound))
    }

    /// Validates and persists a creation form.
    pub fn create(&self, payload: R::Create, request: &Request) -> WorkflowResult<Outcome> {
        let inbound = self.take_flash(request);
        self.log_submit("create", None);

        let errors = validate(R::create_form(&payload));
        if !errors.is_empty() {
            return self.reject(
                "create",
                WorkflowState::NewForm,
                R::CREATE_FORM,
                &payload,
                &errors,
                inbound,
                request,
            );
        }

        match R::facade(self.conn).create(&payload) {
            Ok(id) => Ok(self.redirect_with_notice(
                self.detail_path(id),
                ALERT_SUCCESS,
                "create.saved",
                &[R::create_label(&payload)],
                request,
            )),
            Err(ServiceError::ConstraintViolation { field, message }) => {
                let errors = constraint_errors(field, message);
                self.reject(
                    "create",
                    WorkflowState::NewForm,
                    R::CREATE_FORM,
                    &payload,
                    &errors,
                    inbound,
                    request,
                )
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Renders the edit form prefilled from the stored record.
    pub fn edit_form(&self, id: i64, request: &Request) -> WorkflowResult<Outcome> {
        let inbound = self.take_flash(request);
        let Some(view) = R::facade(self.conn).find_by_id(id)? else {
            return Ok(self.not_found("edit", id, request));
        };
        let mut model = ModelMap::new();
        model.insert(R::NAME, &R::edit_from_view(&view))?;
        R::add_form_options(self.conn, &mut model)?;
        Ok(self.render("edit", WorkflowState::EditForm, model, inbound))
    }

    /// Validates and applies an edit form; `id` comes from the request path.
    pub fn edit(
        &self,
        id: i64,
        mut payload: R::Edit,
        request: &Request,
    ) -> WorkflowResult<Outcome> {
        let inbound = self.take_flash(request);
        self.log_submit("edit", Some(id));
        R::assign_id(&mut payload, id);

        let errors = validate(R::edit_form(&payload));
        if !errors.is_empty() {
            return self.reject(
                "edit",
                WorkflowState::EditForm,
                R::NAME,
                &payload,
                &errors,
                inbound,
                request,
            );
        }

        match R::facade(self.conn).update(&payload) {
            Ok(()) => Ok(self.redirect_with_notice(
                self.detail_path(id),
                ALERT_SUCCESS,
                "edit.saved",
                &[R::edit_label(&payload)],
                request,
            )),
            Err(ServiceError::NotFound { .. }) => Ok(self.not_found("edit", id, request)),
            Err(ServiceError::ConstraintViolation { field, message }) => {
                let errors = constraint_errors(field, message);
                self.reject(
                    "edit",
                    WorkflowState::EditForm,
                    R::NAME,
                    &payload,
                    &errors,
                    inbound,
                    request,
                )
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes a record and redirects to the list with the result notice.
    pub fn delete(&self, id: i64, request: &Request) -> WorkflowResult<Outcome> {
        self.take_flash(request);
        self.log_submit("delete", Some(id));

        let facade = R::facade(self.conn);
        let Some(view) = facade.find_by_id(id)? else {
            return Ok(self.not_found("delete", id, request));
        };
        let label = R::view_label(&view);

        match facade.delete(id) {
            Ok(()) => Ok(self.redirect_with_notice(
                self.list_path(),
                ALERT_SUCCESS,
                "delete.deleted",
                &[label],
                request,
            )),
            Err(ServiceError::NotFound { .. }) => Ok(self.not_found("delete", id, request)),
            Err(ServiceError::ReferentialConflict { .. }) => {
                warn!(
                    "event=workflow_delete module=workflow status=conflict resource={} id={}",
                    R::NAME,
                    id
                );
                Ok(self.redirect_with_notice(
                    self.list_path(),
                    ALERT_DANGER,
                    "delete.conflict",
                    &[label],
                    request,
                ))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn take_flash(&self, request: &Request) -> Option<FlashAttributes> {
        request.flash.and_then(|token| self.flash.take(token))
    }

    fn render(
        &self,
        action: &str,
        state: WorkflowState,
        mut model: ModelMap,
        inbound: Option<FlashAttributes>,
    ) -> Outcome {
        if let Some(attributes) = inbound {
            model.merge_flash(attributes);
        }
        debug!(
            "event=workflow_render module=workflow resource={} state={}",
            R::NAME,
            state
        );
        Outcome::Render(Page {
            view: format!("{}/{action}", R::NAME),
            state,
            model,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn reject<T: Serialize>(
        &self,
        action: &str,
        state: WorkflowState,
        form_name: &str,
        payload: &T,
        errors: &ValidationErrors,
        inbound: Option<FlashAttributes>,
        request: &Request,
    ) -> WorkflowResult<Outcome> {
        let mut model = ModelMap::new();
        model.insert(form_name, payload)?;
        for field in errors.invalid_fields() {
            model.flag(format!("{field}_error"));
        }
        R::add_form_options(self.conn, &mut model)?;
        if let Some(attributes) = inbound {
            model.merge_flash(attributes);
        }
        if let Some(reason) = errors.global_errors().first() {
            let notice = self.notice(&format!("{action}.rejected"), &[reason.as_str()], request);
            model.insert(ALERT_DANGER, &notice)?;
        }
        info!(
            "event=workflow_{action} module=workflow status=rejected resource={} fields={} global={}",
            R::NAME,
            errors.field_errors().len(),
            errors.global_errors().len()
        );
        Ok(self.render(action, state, model, None))
    }

    fn not_found(&self, action: &str, id: i64, request: &Request) -> Outcome {
        info!(
            "event=workflow_{action} module=workflow status=not_found resource={} id={}",
            R::NAME,
            id
        );
        self.redirect_with_notice(
            self.list_path(),
            ALERT_DANGER,
            &format!("{action}.notFound"),
            &[],
            request,
        )
    }

    fn redirect_with_notice(
        &self,
        location: String,
        attribute: &str,
        action_key: &str,
        args: &[&str],
        request: &Request,
    ) -> Outcome {
        let mut attributes = FlashAttributes::new();
        attributes.insert(attribute.to_string(), self.notice(action_key, args, request));
        let token = self.flash.stash(attributes);
        debug!(
            "event=workflow_redirect module=workflow resource={} location={}",
            R::NAME,
            location
        );
        Outcome::Redirect(Redirect {
            location,
            flash: Some(token),
        })
    }

    fn notice(&self, action_key: &str, args: &[&str], request: &Request) -> String {
        let key = format!("{}.{action_key}", R::PLURAL);
        self.messages.message(&key, args, &request.locale)
    }

    fn list_path(&self) -> String {
        LIST_PATH.replace("{name}", R::NAME)
    }

    fn detail_path(&self, id: i64) -> String {
        expand_path(&DETAIL_PATH.replace("{name}", R::NAME), id)
    }

    fn log_submit(&self, action: &str, id: Option<i64>) {
        debug!(
            "event=workflow_{action} module=workflow state={} resource={} id={}",
            WorkflowState::Submitting,
            R::NAME,
            id.map_or_else(|| "-".to_string(), |id| id.to_string())
        );
    }
}

/// Turns a facade constraint failure into form errors.
fn constraint_errors(field: Option<&'static str>, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    match field {
        Some(field) => errors.reject(field, "constraint"),
        None => errors.reject_global(message),
    }
    errors
}
