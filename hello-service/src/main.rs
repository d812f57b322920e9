use clap::Parser;
use hello_service as app;
use service_kit::{bootstrap, lifecycle::NoopLifespan, logging, settings::ServerConfig, settings::Settings};

/// Runs hello-service as a standalone HTTP listener.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    let settings = Settings::default_settings();
    let router = app::build_app(&settings)?;

    bootstrap::serve(router, &cli.server, NoopLifespan).await?;
    Ok(())
}
