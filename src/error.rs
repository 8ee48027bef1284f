use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot data structure is incorrect: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to fetch snapshot from CDN: {0}")]
    Cdn(String),

    #[error("authorization token is incorrect")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("snapshot lock poisoned")]
    Poisoned,
}

impl ResponseError for FolioError {
    fn status_code(&self) -> StatusCode {
        match self {
            FolioError::Unauthorized => StatusCode::UNAUTHORIZED,
            FolioError::NotFound(_) => StatusCode::NOT_FOUND,
            FolioError::Cdn(_) => StatusCode::BAD_GATEWAY,
            FolioError::Io(_) | FolioError::Json(_) | FolioError::Poisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
