//! Turns a [`TableDescriptor`] into list/create/update/delete operations.
//!
//! [`RouteGenerator::generate`] validates a descriptor and bundles its
//! operations into a [`TableRoutes`]; [`TableRoutes::router`] binds them to
//! HTTP paths. Every operation builds parameterized statements from coerced
//! form input and talks to the store through [`RecordStore`] only.
//!
//! Failures of a write never escape the operation: the transaction is rolled
//! back by the store and the error text becomes a warning notice.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::coerce::coerce;
use crate::descriptor::{DisplayColumn, FieldDescriptor, FieldKind, SelectOption, TableDescriptor, TableKey};
use crate::error::{AppError, AppResult, CrudError, DescriptorError};
use crate::flash::{Flash, FlashQuery};
use crate::options::resolve_options;
use crate::statement::Statement;
use crate::store::RecordStore;
use crate::value::Record;
use crate::views;

/// Raw form submission, field name to string.
pub type FormData = HashMap<String, String>;

/// Builds [`TableRoutes`] against one injected store.
#[derive(Clone)]
pub struct RouteGenerator {
    store: Arc<dyn RecordStore>,
}

impl RouteGenerator {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn generate(&self, descriptor: &'static TableDescriptor) -> Result<TableRoutes, DescriptorError> {
        descriptor.validate()?;
        Ok(TableRoutes {
            descriptor,
            store: Arc::clone(&self.store),
            display_name: descriptor.display_name(),
        })
    }
}

/// One list row with the paths of its row actions.
#[derive(Debug, Clone)]
pub struct ListRow {
    pub record: Record,
    pub update_path: Option<String>,
    pub delete_path: String,
}

#[derive(Debug, Clone)]
pub struct ListPage {
    pub title: String,
    pub rows: Vec<ListRow>,
    pub columns: &'static [DisplayColumn],
    /// Column that identifies a row; the first column of a composite key.
    pub id_key: &'static str,
    pub create_path: String,
    pub flash: Option<Flash>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Update,
}

impl FormAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FormAction::Create => "Create",
            FormAction::Update => "Update",
        }
    }
}

/// A field ready to render: options resolved, current value filled in.
#[derive(Debug, Clone)]
pub struct FormField {
    pub descriptor: &'static FieldDescriptor,
    pub options: Vec<SelectOption>,
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormPage {
    pub title: String,
    pub action: FormAction,
    pub fields: Vec<FormField>,
    pub submit_path: String,
    pub list_path: String,
    pub flash: Option<Flash>,
}

/// What a form operation answers with.
#[derive(Debug)]
pub enum Outcome {
    /// Redirect to a target URL that already carries its notice.
    Redirect(String),
    Page(FormPage),
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Redirect(target) => Redirect::to(&target).into_response(),
            Outcome::Page(page) => Html(views::form_page(&page)).into_response(),
        }
    }
}

/// The generated operations of one table.
pub struct TableRoutes {
    descriptor: &'static TableDescriptor,
    store: Arc<dyn RecordStore>,
    display_name: String,
}

impl TableRoutes {
    pub fn descriptor(&self) -> &'static TableDescriptor {
        self.descriptor
    }

    pub fn route(&self) -> &'static str {
        self.descriptor.route
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn list_path(&self) -> String {
        format!("/{}", self.descriptor.route)
    }

    pub fn create_path(&self) -> String {
        format!("/{}/create", self.descriptor.route)
    }

    pub fn update_path(&self, id: i64) -> String {
        format!("/{}/{}/update", self.descriptor.route, id)
    }

    fn redirect_to_list(&self, flash: Flash) -> Outcome {
        Outcome::Redirect(flash.redirect_target(&self.list_path()))
    }

    // -------- List --------

    /// Runs the list query. A store failure yields an empty page with a warning;
    /// a row without its key column is an internal error.
    pub async fn list(&self, flash: Option<Flash>) -> AppResult<ListPage> {
        let (records, flash) = match self
            .store
            .fetch_all(&Statement::new(self.descriptor.list_query))
            .await
        {
            Ok(records) => (records, flash),
            Err(e) => {
                tracing::error!(table = self.route(), error = %e, "database error in list");
                (Vec::new(), Some(Flash::error(format!("Database error: {e}"))))
            }
        };

        let rows = records
            .into_iter()
            .map(|record| self.list_row(record))
            .collect::<AppResult<Vec<_>>>()?;

        let id_key = match self.descriptor.key {
            TableKey::Single(key) | TableKey::Composite(key, _) => key,
        };
        Ok(ListPage {
            title: self.display_name.clone(),
            rows,
            columns: self.descriptor.display_columns,
            id_key,
            create_path: self.create_path(),
            flash,
        })
    }

    fn list_row(&self, record: Record) -> AppResult<ListRow> {
        let key_text = |column: &str| match record.get(column) {
            Some(value) if !value.is_null() => Ok(value.to_string()),
            _ => Err(AppError::Internal(format!(
                "{} row is missing key column `{}`",
                self.route(),
                column
            ))),
        };
        let base = self.list_path();
        let (update_path, delete_path) = match self.descriptor.key {
            TableKey::Single(key) => {
                let id = key_text(key)?;
                (
                    Some(format!("{base}/{id}/update")),
                    format!("{base}/{id}/delete"),
                )
            }
            TableKey::Composite(first, second) => {
                let (a, b) = (key_text(first)?, key_text(second)?);
                (None, format!("{base}/{a}/{b}/delete"))
            }
        };
        Ok(ListRow {
            record,
            update_path,
            delete_path,
        })
    }

    // -------- Create --------

    /// The create form with lookup options resolved.
    pub async fn create_form(&self) -> FormPage {
        self.render_create(&FormData::new(), None).await
    }

    /// Inserts exactly the insert fields. Redirects on success, re-renders the
    /// form with the submitted values on failure.
    pub async fn create(&self, form: &FormData) -> Outcome {
        let result = async {
            let statement = self.bind_form(
                Statement::insert(self.descriptor.storage_name, self.descriptor.insert_fields),
                self.descriptor.insert_fields,
                form,
            )?;
            self.store.execute(&statement).await?;
            Ok::<_, CrudError>(())
        }
        .await;

        match result {
            Ok(()) => {
                tracing::info!(table = self.route(), "record created");
                self.redirect_to_list(Flash::success(format!(
                    "{} created successfully!",
                    self.display_name
                )))
            }
            Err(e) => {
                tracing::warn!(table = self.route(), error = %e, "create failed");
                let flash = Flash::error(format!("Error: {e}"));
                Outcome::Page(self.render_create(form, Some(flash)).await)
            }
        }
    }

    async fn render_create(&self, prefill: &FormData, flash: Option<Flash>) -> FormPage {
        let mut fields = self.static_fields(|_| true, |name| prefill.get(name).cloned());
        let mut flash = flash;
        if let Err(e) = self.resolve_lookups(&mut fields).await {
            tracing::error!(table = self.route(), error = %e, "option lookup failed");
            flash.get_or_insert_with(|| Flash::error(format!("Error: {e}")));
        }
        FormPage {
            title: self.display_name.clone(),
            action: FormAction::Create,
            fields,
            submit_path: self.create_path(),
            list_path: self.list_path(),
            flash,
        }
    }

    // -------- Update --------

    /// The update form for one row, prefilled with its current values.
    pub async fn update_form(&self, id: i64) -> Outcome {
        let Some(key) = self.descriptor.primary_key() else {
            return self.redirect_to_list(Flash::error("Record not found"));
        };
        let statement = Statement::select_by_key(self.descriptor.storage_name, key).bind("id", id);
        let record = match self.store.fetch_optional(&statement).await {
            Ok(Some(record)) => record,
            Ok(None) => return self.redirect_to_list(Flash::error("Record not found")),
            Err(e) => {
                tracing::error!(table = self.route(), id, error = %e, "update lookup failed");
                return self.redirect_to_list(Flash::error(format!("Error: {e}")));
            }
        };

        let update_fields = self.descriptor.update_fields;
        let mut fields = self.static_fields(
            |field| update_fields.contains(&field.name),
            |name| match record.get(name) {
                Some(value) if !value.is_null() => Some(value.to_string()),
                _ => None,
            },
        );
        if let Err(e) = self.resolve_lookups(&mut fields).await {
            tracing::error!(table = self.route(), error = %e, "option lookup failed");
            return self.redirect_to_list(Flash::error(format!("Error: {e}")));
        }

        Outcome::Page(FormPage {
            title: self.display_name.clone(),
            action: FormAction::Update,
            fields,
            submit_path: self.update_path(id),
            list_path: self.list_path(),
            flash: None,
        })
    }

    /// Updates exactly the update fields of one row and redirects to the list.
    pub async fn update(&self, id: i64, form: &FormData) -> Outcome {
        let Some(key) = self.descriptor.primary_key() else {
            return self.redirect_to_list(Flash::error("Record not found"));
        };
        let result = async {
            let statement = self
                .bind_form(
                    Statement::update(self.descriptor.storage_name, self.descriptor.update_fields, key),
                    self.descriptor.update_fields,
                    form,
                )?
                .bind("id", id);
            self.store.execute(&statement).await?;
            Ok::<_, CrudError>(())
        }
        .await;

        let flash = match result {
            Ok(()) => {
                tracing::info!(table = self.route(), id, "record updated");
                Flash::success(format!("{} updated successfully!", self.display_name))
            }
            Err(e) => {
                tracing::warn!(table = self.route(), id, error = %e, "update failed");
                Flash::error(format!("Error: {e}"))
            }
        };
        self.redirect_to_list(flash)
    }

    // -------- Delete --------

    /// Deletes by the single primary key.
    pub async fn delete(&self, id: i64) -> Outcome {
        let Some(key) = self.descriptor.primary_key() else {
            return self.redirect_to_list(Flash::error("Record not found"));
        };
        let statement = Statement::delete_by_key(self.descriptor.storage_name, key).bind("id", id);
        self.finish_delete(&statement).await
    }

    /// Deletes by both columns of a composite key.
    pub async fn delete_pair(&self, first: i64, second: i64) -> Outcome {
        let TableKey::Composite(first_key, second_key) = self.descriptor.key else {
            return self.redirect_to_list(Flash::error("Record not found"));
        };
        let statement = Statement::delete_by_pair(self.descriptor.storage_name, first_key, second_key)
            .bind(first_key, first)
            .bind(second_key, second);
        self.finish_delete(&statement).await
    }

    async fn finish_delete(&self, statement: &Statement) -> Outcome {
        let flash = match self.store.execute(statement).await {
            Ok(affected) => {
                tracing::info!(table = self.route(), affected, "record deleted");
                Flash::success(format!("{} deleted successfully!", self.display_name))
            }
            Err(e) => {
                tracing::warn!(table = self.route(), error = %e, "delete failed");
                Flash::error(format!("Error: {e}"))
            }
        };
        self.redirect_to_list(flash)
    }

    // -------- Helpers --------

    /// Coerces and binds every creation field named in `names`.
    fn bind_form(&self, mut statement: Statement, names: &[&str], form: &FormData) -> Result<Statement, CrudError> {
        for field in self.descriptor.creation_fields {
            if !names.contains(&field.name) {
                continue;
            }
            let (value, ty) = coerce(field, form.get(field.name).map(String::as_str))?;
            statement = statement.bind_typed(field.name, value, ty);
        }
        Ok(statement)
    }

    fn static_fields<I, V>(&self, include: I, value: V) -> Vec<FormField>
    where
        I: Fn(&FieldDescriptor) -> bool,
        V: Fn(&str) -> Option<String>,
    {
        self.descriptor
            .creation_fields
            .iter()
            .filter(|field| include(*field))
            .map(|descriptor| FormField {
                descriptor,
                options: descriptor.options.map(<[SelectOption]>::to_vec).unwrap_or_default(),
                value: value(descriptor.name),
            })
            .collect()
    }

    async fn resolve_lookups(&self, fields: &mut [FormField]) -> Result<(), CrudError> {
        for field in fields.iter_mut() {
            if field.descriptor.kind != FieldKind::Select {
                continue;
            }
            if let Some(query) = field.descriptor.options_query {
                field.options = resolve_options(self.store.as_ref(), query).await?;
            }
        }
        Ok(())
    }

    // -------- HTTP binding --------

    /// Binds the operations to `/{route}` paths. Composite-key tables get only
    /// the pair delete; single-key tables get update and single delete.
    pub fn router(self: Arc<Self>) -> Router {
        let base = self.list_path();
        let mut router = Router::<Arc<TableRoutes>>::new()
            .route(&base, get(list_handler))
            .route(&format!("{base}/create"), get(create_form_handler).post(create_handler));
        router = match self.descriptor.key {
            TableKey::Single(_) => router
                .route(&format!("{base}/{{id}}/update"), get(update_form_handler).post(update_handler))
                .route(&format!("{base}/{{id}}/delete"), post(delete_handler)),
            TableKey::Composite(..) => {
                router.route(&format!("{base}/{{first}}/{{second}}/delete"), post(delete_pair_handler))
            }
        };
        router.with_state(self)
    }
}

/// Integer path segment; anything else is answered like an unknown path.
fn int_segment(segment: &str) -> AppResult<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    segment.parse().map_err(|_| AppError::NotFound)
}

async fn list_handler(
    State(routes): State<Arc<TableRoutes>>,
    Query(query): Query<FlashQuery>,
) -> AppResult<Html<String>> {
    let page = routes.list(query.into_flash()).await?;
    Ok(Html(views::list_page(&page)))
}

async fn create_form_handler(State(routes): State<Arc<TableRoutes>>) -> Html<String> {
    Html(views::form_page(&routes.create_form().await))
}

async fn create_handler(State(routes): State<Arc<TableRoutes>>, Form(form): Form<FormData>) -> Outcome {
    routes.create(&form).await
}

async fn update_form_handler(
    State(routes): State<Arc<TableRoutes>>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let id = int_segment(&id)?;
    Ok(routes.update_form(id).await)
}

async fn update_handler(
    State(routes): State<Arc<TableRoutes>>,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> AppResult<Outcome> {
    let id = int_segment(&id)?;
    Ok(routes.update(id, &form).await)
}

async fn delete_handler(State(routes): State<Arc<TableRoutes>>, Path(id): Path<String>) -> AppResult<Outcome> {
    let id = int_segment(&id)?;
    Ok(routes.delete(id).await)
}

async fn delete_pair_handler(
    State(routes): State<Arc<TableRoutes>>,
    Path((first, second)): Path<(String, String)>,
) -> AppResult<Outcome> {
    let (first, second) = (int_segment(&first)?, int_segment(&second)?);
    Ok(routes.delete_pair(first, second).await)
}
