use axum::Router;
use service_kit::bootstrap::AppBuilder;
use service_kit::error::Result;
use service_kit::settings::Settings;
use utoipa::OpenApi;

pub mod dtos;
pub mod handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "hello-service", description = "Greeting and addition example endpoints"),
    paths(handlers::main_route, handlers::example_route),
    components(schemas(
        dtos::GreetingResponse,
        dtos::ExampleRequest,
        dtos::ExampleResponse
    ))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document at `/openapi.json`, plus Swagger UI at
/// `/docs` when the `swagger-ui` feature is on.
pub fn openapi_router() -> Router {
    #[cfg(feature = "swagger-ui")]
    {
        Router::new().merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()),
        )
    }

    #[cfg(not(feature = "swagger-ui"))]
    {
        Router::new().route(
            "/openapi.json",
            axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
    }
}

/// The service's routers registered on a fresh [`AppBuilder`].
pub fn app_builder(settings: &Settings) -> AppBuilder<'_> {
    AppBuilder::new(settings)
        .router(handlers::main_router())
        .router(handlers::example_router())
        .router(openapi_router())
}

pub fn build_app(settings: &Settings) -> Result<Router> {
    app_builder(settings).build()
}
