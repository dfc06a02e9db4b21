use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadGateway(String),
    InternalServerError(String),
    ValidationError(Vec<String>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad Gateway: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidationError(errors) => write!(f, "Validation Error: {:?}", errors),
        }
    }
}

impl ApiError {
    fn body(&self) -> ErrorBody {
        match self {
            ApiError::ValidationError(errors) => ErrorBody {
                success: false,
                message: "Validation failed".to_string(),
                errors: Some(errors.clone()),
            },
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadGateway(msg)
            | ApiError::InternalServerError(msg) => ErrorBody {
                success: false,
                message: msg.clone(),
                errors: None,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => {
                HttpResponse::BadRequest().json(self.body())
            }
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(self.body()),
            ApiError::Forbidden(_) => HttpResponse::Forbidden().json(self.body()),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(self.body()),
            ApiError::BadGateway(_) => HttpResponse::BadGateway().json(self.body()),
            ApiError::InternalServerError(_) => HttpResponse::InternalServerError().json(self.body()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::BadGateway(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}
