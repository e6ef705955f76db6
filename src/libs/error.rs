use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::views;

/// Failures raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("no value bound for placeholder :{0}")]
    UnboundParameter(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A form string that does not fit its column's type.
#[derive(Debug, Error)]
#[error("invalid {expected} for {field}: {value:?}")]
pub struct CoercionError {
    pub field: String,
    pub value: String,
    pub expected: &'static str,
}

/// Anything that turns a write into a user-visible warning.
#[derive(Debug, Error)]
pub enum CrudError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// Table descriptors that break their own invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("{table}: insert field `{field}` is not a creation field")]
    UnknownInsertField {
        table: &'static str,
        field: &'static str,
    },

    #[error("{table}: update field `{field}` is not an insert field")]
    UpdateNotInsertable {
        table: &'static str,
        field: &'static str,
    },

    #[error("{table}: composite-key tables cannot declare update fields")]
    CompositeKeyUpdate { table: &'static str },

    #[error("{table}: select `{field}` has both static options and an options query")]
    AmbiguousOptions {
        table: &'static str,
        field: &'static str,
    },

    #[error("{table}: `{field}` is not a select but declares options")]
    OptionsOnNonSelect {
        table: &'static str,
        field: &'static str,
    },

    #[error("table route `{0}` is registered twice")]
    DuplicateRoute(&'static str),
}

/// Errors that end a request or the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let page = if status == StatusCode::NOT_FOUND {
            views::not_found_page()
        } else {
            tracing::error!(error = %self, "request failed");
            views::internal_error_page()
        };
        (status, Html(page)).into_response()
    }
}
