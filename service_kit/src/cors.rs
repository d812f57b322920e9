use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::error::{Error, Result};
use crate::settings::CorsSettings;

const WILDCARD: &str = "*";

/// Build a CORS layer from settings.
///
/// A list containing `"*"` allows everything. Browsers refuse a literal `*`
/// on credentialed requests, so when credentials are allowed a wildcard
/// echoes back whatever the request asked for instead.
pub fn build_cors_layer(cfg: &CorsSettings) -> Result<CorsLayer> {
    let credentials = cfg.allow_credentials;
    let mut layer = CorsLayer::new();

    if is_wildcard(&cfg.allow_origins) {
        warn!(
            "CORS is configured with allow_origins=['*']. \
             Any website may make cross-origin requests to this service."
        );
        layer = if credentials {
            layer.allow_origin(AllowOrigin::mirror_request())
        } else {
            layer.allow_origin(Any)
        };
    } else {
        let origins = cfg
            .allow_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| Error::Config(format!("invalid CORS origin: {o:?}")))
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_origin(origins);
    }

    if is_wildcard(&cfg.allow_methods) {
        layer = if credentials {
            layer.allow_methods(AllowMethods::mirror_request())
        } else {
            layer.allow_methods(Any)
        };
    } else {
        let methods = cfg
            .allow_methods
            .iter()
            .map(|m| {
                Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                    .map_err(|_| Error::Config(format!("invalid CORS method: {m:?}")))
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_methods(methods);
    }

    if is_wildcard(&cfg.allow_headers) {
        layer = if credentials {
            layer.allow_headers(AllowHeaders::mirror_request())
        } else {
            layer.allow_headers(Any)
        };
    } else {
        let headers = cfg
            .allow_headers
            .iter()
            .map(|h| {
                HeaderName::from_bytes(h.as_bytes())
                    .map_err(|_| Error::Config(format!("invalid CORS header: {h:?}")))
            })
            .collect::<Result<Vec<_>>>()?;
        layer = layer.allow_headers(headers);
    }

    Ok(layer.allow_credentials(credentials))
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app(cfg: &CorsSettings) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(build_cors_layer(cfg).unwrap())
    }

    #[tokio::test]
    async fn test_wildcard_with_credentials_mirrors_origin() {
        let cfg = Settings::default_settings().cors;
        let response = app(&cfg)
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "https://app.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_wildcard_without_credentials_is_literal() {
        let cfg = CorsSettings {
            allow_credentials: false,
            ..Settings::default_settings().cors
        };
        let response = app(&cfg)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/")
                    .header(header::ORIGIN, "https://app.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_explicit_origin_list_rejects_others() {
        let cfg = CorsSettings {
            enabled: true,
            allow_origins: vec!["https://allowed.example.com".to_string()],
            allow_credentials: false,
            allow_methods: vec!["get".to_string(), "POST".to_string()],
            allow_headers: vec!["content-type".to_string()],
        };
        let response = app(&cfg)
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "https://other.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[test]
    fn test_invalid_header_name_is_a_config_error() {
        let cfg = CorsSettings {
            allow_headers: vec!["not a header".to_string()],
            ..Settings::default_settings().cors
        };
        assert!(matches!(build_cors_layer(&cfg), Err(Error::Config(_))));
    }
}
