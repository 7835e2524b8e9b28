//! Guidekit MCP Server
//!
//! Run with: guidekit-server

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guidekit::error::Result;
use guidekit::mcp::{GuidekitHandler, McpServer};
use guidekit::{Catalog, Config};

#[derive(Parser, Debug)]
#[command(name = "guidekit-server")]
#[command(version = guidekit::VERSION)]
#[command(about = "Serve a team playbook catalog over MCP stdio")]
struct Args {
    /// Catalog file path (defaults to ./guidekit.yaml, then the user
    /// config directory)
    #[arg(long, env = "GUIDEKIT_CONFIG")]
    config: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let path = Config::locate(args.config.as_deref())?;
    let config = Config::load(&path)?;
    let catalog = Catalog::new(config);

    tracing::info!(
        catalog = %path.display(),
        server = %catalog.manifest().name,
        version = %catalog.manifest().version,
        tools = catalog.manifest().tools.len(),
        prompts = catalog.prompt_descriptors().len(),
        "Guidekit MCP server starting..."
    );

    let server = McpServer::new(GuidekitHandler::new(catalog));
    server.run()?;

    tracing::info!("End of input, shutting down");
    Ok(())
}
