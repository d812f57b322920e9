use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cors::build_cors_layer;
use crate::error::{panic_response, ApiError, Result};
use crate::lifecycle::Lifespan;
use crate::settings::{ServerConfig, Settings};

/// Assembles the application router.
///
/// Routers are merged in registration order. On top of them sit JSON
/// fallbacks for unknown paths and methods, the panic boundary, request
/// tracing and, when enabled, the CORS layer as the outermost layer so that
/// error responses carry CORS headers too.
pub struct AppBuilder<'a> {
    settings: &'a Settings,
    routers: Vec<Router>,
}

impl<'a> AppBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            routers: Vec::new(),
        }
    }

    pub fn router(mut self, router: Router) -> Self {
        self.routers.push(router);
        self
    }

    pub fn build(self) -> Result<Router> {
        let mut app = self
            .routers
            .into_iter()
            .fold(Router::new(), Router::merge)
            .fallback(|| async { ApiError::NotFound })
            .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http());

        if self.settings.cors.enabled {
            app = app.layer(build_cors_layer(&self.settings.cors)?);
        }

        Ok(app)
    }
}

/// Runs `app` as a standalone HTTP listener until Ctrl-C or SIGTERM.
pub async fn serve<L: Lifespan>(app: Router, config: &ServerConfig, lifespan: L) -> Result<()> {
    lifespan.startup().await?;

    let listener = TcpListener::bind(config.address()).await?;
    info!(address = %listener.local_addr()?, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    lifespan.shutdown().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CorsSettings;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    fn request(uri: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::ORIGIN, "https://app.example.com")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_routers_are_merged_in_order() {
        let settings = Settings::default_settings();
        let app = AppBuilder::new(&settings)
            .router(Router::new().route("/one", get(|| async { "one" })))
            .router(Router::new().route("/two", get(|| async { "two" })))
            .build()
            .unwrap();

        for uri in ["/one", "/two"] {
            let response = app.clone().oneshot(request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_cors_layer_follows_enabled_flag() {
        let enabled = Settings::default_settings();
        let disabled = Settings {
            cors: CorsSettings {
                enabled: false,
                ..enabled.cors.clone()
            },
        };

        for (settings, expect_cors) in [(enabled, true), (disabled, false)] {
            let app = AppBuilder::new(&settings).build().unwrap();
            let response = app.oneshot(request("/missing")).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                response
                    .headers()
                    .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN),
                expect_cors
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_cors_settings_fail_the_build() {
        let settings = Settings {
            cors: CorsSettings {
                allow_methods: vec!["NOT A METHOD".to_string()],
                ..Settings::default_settings().cors
            },
        };
        assert!(AppBuilder::new(&settings).build().is_err());
    }
}
