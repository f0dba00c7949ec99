//! The `{success, data, message, status_code}` wrapper every route answers with.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct Empty {}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self::success(data, StatusCode::OK)
    }

    pub fn created(data: T) -> Self {
        Self::success(data, StatusCode::CREATED)
    }

    fn success(data: T, status_code: StatusCode) -> Self {
        Envelope {
            success: true,
            data,
            message: String::new(),
            status_code,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub enum ApiError {
    MalformedRequest,
    NotFound,
    MethodNotAllowed,
    UnprocessableEntity,
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest => "The request body was not properly formatted.",
            ApiError::NotFound => "The resource you are looking for does not exist.",
            ApiError::MethodNotAllowed => "The HTTP method used is not allowed for this route.",
            ApiError::UnprocessableEntity => "Unprocessable entity.",
            ApiError::Internal(_) => "Internal server error.",
        }
    }

    /// The error a bare framework response with this status stands for, if any.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(ApiError::MalformedRequest),
            StatusCode::NOT_FOUND => Some(ApiError::NotFound),
            StatusCode::METHOD_NOT_ALLOWED => Some(ApiError::MethodNotAllowed),
            StatusCode::UNPROCESSABLE_ENTITY => Some(ApiError::UnprocessableEntity),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(error) = &self {
            tracing::error!("Request failed: {error:#}");
        }
        Envelope {
            success: false,
            data: Empty {},
            message: self.message().to_owned(),
            status_code: self.status_code(),
        }
        .into_response()
    }
}
