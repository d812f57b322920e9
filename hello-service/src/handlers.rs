use axum::routing::{get, post};
use axum::{Json, Router};
use service_kit::extract::ValidatedJson;

use crate::dtos::{ExampleRequest, ExampleResponse, GreetingResponse};

pub const GREETING: &str = "Hello World!";

/// Ping the top-level path.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Successful greeting", body = GreetingResponse)
    )
)]
pub async fn main_route() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: GREETING.to_string(),
    })
}

/// An example of a POST route: adds two numbers.
#[utoipa::path(
    post,
    path = "/example",
    request_body = ExampleRequest,
    responses(
        (status = 200, description = "Sum of `a` and `b`", body = ExampleResponse),
        (status = 422, description = "Missing or non-numeric field"),
        (status = 500, description = "Unhandled server error")
    )
)]
pub async fn example_route(
    ValidatedJson(request): ValidatedJson<ExampleRequest>,
) -> Json<ExampleResponse> {
    Json(ExampleResponse {
        result: request.a + request.b,
    })
}

pub fn main_router() -> Router {
    Router::new().route("/", get(main_route))
}

pub fn example_router() -> Router {
    Router::new().route("/example", post(example_route))
}
