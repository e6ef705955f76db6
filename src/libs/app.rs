use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::descriptor::TableDescriptor;
use crate::error::{AppError, AppResult, DescriptorError};
use crate::generator::{RouteGenerator, TableRoutes};
use crate::schema::PLATFORM_SCHEMA;
use crate::store::RecordStore;
use crate::views;

/// Generated table operations keyed by route segment, built once at startup.
pub struct TableRegistry {
    tables: Vec<Arc<TableRoutes>>,
}

impl TableRegistry {
    /// Validates and generates every descriptor, rejecting duplicate routes.
    pub fn build(
        generator: &RouteGenerator,
        descriptors: &'static [TableDescriptor],
    ) -> Result<Self, DescriptorError> {
        let mut tables: Vec<Arc<TableRoutes>> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if tables.iter().any(|t| t.route() == descriptor.route) {
                return Err(DescriptorError::DuplicateRoute(descriptor.route));
            }
            tables.push(Arc::new(generator.generate(descriptor)?));
        }
        Ok(Self { tables })
    }

    pub fn get(&self, route: &str) -> Option<&Arc<TableRoutes>> {
        self.tables.iter().find(|t| t.route() == route)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TableRoutes>> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub tables: Arc<TableRegistry>,
    pub masked_database_url: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        config: &AppConfig,
        descriptors: &'static [TableDescriptor],
    ) -> AppResult<Self> {
        let generator = RouteGenerator::new(Arc::clone(&store));
        let tables = TableRegistry::build(&generator, descriptors)?;
        tracing::info!(tables = tables.len(), "table routes generated");
        Ok(Self {
            store,
            tables: Arc::new(tables),
            masked_database_url: config.masked_database_url(),
        })
    }
}

/// The full HTTP surface: utility endpoints plus every generated table.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/db-test", get(db_test))
        .route("/db-init", get(db_init))
        .with_state(state.clone());

    for routes in state.tables.iter() {
        router = router.merge(Arc::clone(routes).router());
    }

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let links: Vec<(String, String)> = state
        .tables
        .iter()
        .map(|t| (t.list_path(), t.display_name().to_string()))
        .collect();
    Html(views::index_page(&links))
}

const UTILITY_LINKS_TEST: &[(&str, &str)] = &[("/db-init", "Initialize Database"), ("/", "Back to main page")];
const UTILITY_LINKS_INIT: &[(&str, &str)] = &[("/db-test", "Test Connection"), ("/", "Back to main page")];

async fn db_test(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match state.store.ping().await {
        Ok(result) => {
            let info = serde_json::json!({
                "status": "Connected",
                "test_result": result,
                "database_url": state.masked_database_url,
            });
            let lines = vec![serde_json::to_string_pretty(&info).unwrap_or_default()];
            (
                StatusCode::OK,
                Html(views::status_page("Database Test", &lines, UTILITY_LINKS_TEST)),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "database test failed");
            let lines = vec![
                format!("Error: {e}"),
                format!("DATABASE_URL: {}", state.masked_database_url),
            ];
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::status_page("Database Error", &lines, UTILITY_LINKS_TEST)),
            )
        }
    }
}

async fn db_init(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match state.store.bootstrap(PLATFORM_SCHEMA).await {
        Ok(()) => {
            tracing::info!("schema bootstrap finished");
            let lines = vec!["All tables created successfully!".to_string()];
            (
                StatusCode::OK,
                Html(views::status_page("Database Initialized", &lines, UTILITY_LINKS_INIT)),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "database initialization failed");
            let lines = vec![
                format!("Error: {e}"),
                format!("DATABASE_URL: {}", state.masked_database_url),
            ];
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::status_page("Database Init Failed", &lines, UTILITY_LINKS_INIT)),
            )
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound
}
