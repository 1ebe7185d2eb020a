use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use corkboard_api_schema::error::{ErrorResponse, INVALID_FILENAME, NO_FILE_PART, NO_SELECTED_FILE};

/// Per-request failures. Every variant is rendered as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", NO_FILE_PART)]
    NoFilePart,
    #[error("{}", NO_SELECTED_FILE)]
    NoSelectedFile,
    #[error("{}", INVALID_FILENAME)]
    InvalidFileName,
    #[error("{0}")]
    InvalidJson(serde_json::Error),
    #[error("{0}")]
    Multipart(#[from] actix_multipart::MultipartError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Store(#[from] corkboard_local_system_store::Error),
    #[error("{0}")]
    Blocking(#[from] actix_web::error::BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFilePart
            | ApiError::NoSelectedFile
            | ApiError::InvalidFileName
            | ApiError::InvalidJson(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Io(_) | ApiError::Store(_) | ApiError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(ErrorResponse::new(self.to_string()))
    }
}

/// Failures that stop the server from starting or keep it from running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("cannot create upload directory: {0}")]
    UploadDir(corkboard_local_system_store::Error),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Run(std::io::Error),
}
