use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::domain::customer::{CustomerError, ErrorKind};

/// Everything a handler can fail with
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body rejected by schema validation, one message per violation
    #[error("request body failed schema validation: {}", .0.join("; "))]
    Schema(Vec<String>),

    #[error(transparent)]
    Domain(#[from] CustomerError),
}

#[derive(Serialize)]
struct SchemaErrorBody<'a> {
    status: &'static str,
    message: &'a [String],
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::WrongSchema | ErrorKind::Malformed | ErrorKind::OutOfRange => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Domain(err) => status_for(err.kind()),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Schema(messages) => HttpResponse::UnprocessableEntity().json(SchemaErrorBody {
                status: "error",
                message: messages,
            }),
            ApiError::Domain(err) if err.is_expected() => {
                HttpResponse::build(self.status_code()).body(err.to_string())
            }
            ApiError::Domain(err) => {
                tracing::error!(error = %err, "Unhandled error while serving request");
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}
