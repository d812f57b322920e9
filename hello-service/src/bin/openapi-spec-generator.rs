use hello_service::ApiDoc;
use utoipa::OpenApi;

// Prints the OpenAPI JSON document to standard output.
fn main() -> anyhow::Result<()> {
    let spec = ApiDoc::openapi().to_pretty_json()?;
    println!("{spec}");
    Ok(())
}
