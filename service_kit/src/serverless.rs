//! AWS Lambda adapter.
//!
//! `lambda_http` decodes the platform event (API Gateway REST or HTTP API,
//! ALB, Function URL) into an `http::Request`. The adapter runs it through
//! the axum router and hands the response back for re-encoding into the
//! shape the invoking service expects.

use axum::Router;
use lambda_http::{service_fn, Body, IntoResponse as LambdaIntoResponse, Request, Response};
use tower::ServiceExt;
use tracing::info;

use crate::error::{Error, Result};
use crate::lifecycle::Lifespan;

#[derive(Clone)]
pub struct LambdaAdapter {
    router: Router,
}

impl LambdaAdapter {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Dispatches one decoded Lambda request through the router.
    pub async fn dispatch(&self, event: Request) -> Response<Body> {
        let request = event.map(axum::body::Body::new);
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        LambdaIntoResponse::into_response(response).await
    }

    /// Hands the adapter to the Lambda runtime loop. Returns only if the
    /// runtime itself fails.
    pub async fn run(self) -> Result<()> {
        lambda_http::run(service_fn(move |event: Request| {
            let adapter = self.clone();
            async move { Ok::<_, lambda_http::Error>(adapter.dispatch(event).await) }
        }))
        .await
        .map_err(Error::Serverless)
    }
}

/// Runs `router` on AWS Lambda, calling the lifespan hooks around the
/// runtime loop.
pub async fn run<L: Lifespan>(router: Router, lifespan: L) -> Result<()> {
    lifespan.startup().await?;
    info!("Lambda runtime starting");
    let outcome = LambdaAdapter::new(router).run().await;
    lifespan.shutdown().await?;
    outcome
}
