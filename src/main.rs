//! NutriFit Engine
//!
//! An MCP server for nutrition and exercise gap analysis.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrifit::analysis::model::load_model;
use nutrifit::build_info;
use nutrifit::config::Config;
use nutrifit::db;
use nutrifit::mcp::NutrifitService;
use nutrifit::reference::ReferenceData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrifit=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;
    eprintln!("Database path: {}", config.database_path.display());

    // Ensure data directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database
    eprintln!("Initializing database...");
    let database = db::Database::new(&config.database_path)?;
    database.with_conn(db::schema::ensure_schema)?;

    // Reference data and optional model are loaded once
    let (reference, reference_source) = ReferenceData::load(config.reference_path.as_deref())?;
    tracing::info!(
        "Reference data: {} exercises, {} foods ({})",
        reference.exercises.len(),
        reference.foods.len(),
        reference_source
    );
    let model = load_model(config.model_path.as_deref());

    // Create the NutriFit service
    let service = NutrifitService::new(config, database, Arc::new(reference), model, reference_source);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
