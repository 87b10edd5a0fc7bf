mod todo;

pub use todo::*;

use utoipa::OpenApi;

/// Error response types referenced from OpenAPI docs on individual endpoints
pub mod err_resps {
    use serde::Serialize;
    use serde_json::json;
    use utoipa::ToResponse;

    #[derive(Serialize, ToResponse)]
    #[response(
        description = "Entity could not be found (404)",
        example = json!({
            "error_code": "not_found",
            "error_description": "The requested entity could not be found.",
            "extra_info": null
        })
    )]
    pub struct BasicError404 {
        pub error_code: String,
        pub error_description: String,
    }

    #[derive(Serialize, ToResponse)]
    #[response(
        description = "Something unexpected went wrong inside the server (500)",
        example = json!({
            "error_code": "internal_error",
            "error_description": "Could not access data to complete your request",
            "extra_info": null
        })
    )]
    pub struct BasicError500 {
        pub error_code: String,
        pub error_description: String,
    }
}

/// Collects the DTO schemas shared across endpoint docs so they only need to
/// be registered once
#[derive(OpenApi)]
#[openapi(components(
    schemas(NewTodo, UpdateTodo, TodoItem, DeletedTodo, Welcome),
    responses(err_resps::BasicError404, err_resps::BasicError500)
))]
pub struct OpenApiSchemas;
