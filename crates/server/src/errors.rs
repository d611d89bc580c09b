//! Structured response bodies shared by the cafe routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use service::errors::ServiceError;

pub const MSG_ADDED: &str = "Successfully added new record";
pub const MSG_PRICE_UPDATED: &str = "Price has been successfully updated";
pub const MSG_DELETED: &str = "Caffe has been successfully deleted";
pub const MSG_WENT_WRONG: &str = "Something went wrong";
pub const MSG_ID_NOT_FOUND: &str = "ID was not found in DB";
pub const MSG_WRONG_KEY: &str = "Not allowed. Wrong API Key";
pub const MSG_NO_CAFE_AT_LOCATION: &str = "Sorry, we don't have a cafe at that location.";
pub const MSG_NO_CAFES: &str = "Sorry, there are no cafes yet.";

/// `{"Response": {"Success": ..}}` or `{"Response": {"Fail": ..}}`
#[derive(Debug, Serialize)]
pub struct Envelope {
    #[serde(rename = "Response")]
    pub response: Outcome,
}

#[derive(Debug, Serialize)]
pub enum Outcome {
    Success(String),
    Fail(String),
}

impl Envelope {
    pub fn success(msg: &str) -> Self { Self { response: Outcome::Success(msg.to_string()) } }
    pub fn fail(msg: &str) -> Self { Self { response: Outcome::Fail(msg.to_string()) } }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// `{"error": {"Not Found": ..}}`
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub error: NotFoundDetail,
}

#[derive(Debug, Serialize)]
pub struct NotFoundDetail {
    #[serde(rename = "Not Found")]
    pub not_found: String,
}

impl NotFoundBody {
    pub fn new(msg: &str) -> Self {
        Self { error: NotFoundDetail { not_found: msg.to_string() } }
    }
}

/// Unexpected failure on a read route. Detail is logged, never returned.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(code = self.0.code(), err = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"error": MSG_WENT_WRONG}))).into_response()
    }
}
