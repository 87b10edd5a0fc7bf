use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::FromRequest;

use serde::Serialize;
use serde_json::json;
use utoipa::ToResponse;

use crate::domain::todo::driving_ports::TodoError;

/// Contains diagnostic information about an API failure
#[derive(Serialize, Debug, ToResponse)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[response(examples(
    ("Not Found" = (
        summary = "Entity could not be found (404)",
        value = json!({
            "error_code": "not_found",
            "error_description": "The requested entity could not be found.",
            "extra_info": null
        })
    )),

    ("Internal Failure" = (
        summary = "Something unexpected went wrong inside the server (500)",
        value = json!({
            "error_code": "internal_error",
            "error_description": "Could not access data to complete your request",
            "extra_info": null
        })
    )),

    ("Malformed JSON" = (
        summary = "Invalid JSON passed to server (400)",
        value = json!({
            "error_code": "invalid_json",
            "error_description": "The passed request body contained malformed or unreadable JSON.",
            "extra_info": "Failed to parse the request body as JSON: EOF while parsing an object at line 4 column 0"
        })
    ))
))]
pub struct BasicErrorResponse {
    pub error_code: String,
    pub error_description: String,
    pub extra_info: Option<String>,
}

/// Response type that wraps to-do domain errors and turns them into [BasicErrorResponse]s
pub enum TodoErrorResponse {
    NotFound,
    Internal,
}

impl IntoResponse for TodoErrorResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(BasicErrorResponse {
                    error_code: "not_found".into(),
                    error_description: "The requested entity could not be found.".into(),
                    extra_info: None,
                }),
            )
                .into_response(),

            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BasicErrorResponse {
                    error_code: "internal_error".into(),
                    error_description: "Could not access data to complete your request".into(),
                    extra_info: None,
                }),
            )
                .into_response(),
        }
    }
}

impl From<TodoError> for TodoErrorResponse {
    fn from(value: TodoError) -> Self {
        match value {
            TodoError::NotFound => Self::NotFound,
            TodoError::PortError(_) => Self::Internal,
        }
    }
}

/// Response type for failures the API has no specific answer for, producing a
/// 500 with a [BasicErrorResponse] body
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(BasicErrorResponse {
                error_code: "internal_error".into(),
                error_description: "Could not access data to complete your request".into(),
                extra_info: None,
            }),
        )
            .into_response()
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            axum::Json(BasicErrorResponse {
                error_code: "invalid_json".into(),
                error_description:
                    "The passed request body contained malformed or unreadable JSON.".into(),
                extra_info: Some(self.parse_problem),
            }),
        )
            .into_response()
    }
}
