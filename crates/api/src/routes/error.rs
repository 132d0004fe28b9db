use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{db, ValidationError};

/// Failures a route can report to the caller.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] db::Error),
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorBody {
    /// Machine readable error code
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "invalid_date",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(e) => warn!("rejected request: {}", e),
            ApiError::Storage(e) => error!("error reading climate dataset: {}", e),
        }
        let body = ErrorBody {
            error: self.code().to_owned(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
