//! AWS Lambda entry point.
//!
//! Deploy this binary as the function's `bootstrap`; the same router as the
//! standalone listener answers every invocation.

use hello_service as app;
use service_kit::{lifecycle::NoopLifespan, logging, serverless, settings::Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_for_lambda();

    let settings = Settings::default_settings();
    let router = app::build_app(&settings)?;

    serverless::run(router, NoopLifespan).await?;
    Ok(())
}
