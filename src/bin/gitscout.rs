use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{self, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gitscout::config::ScoutConfig;

#[derive(Parser)]
#[command(author, version, about = "MCP server for GitHub repository discovery", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server in stdin/stdout mode
    Stdio {
        /// Enable debug logging
        #[arg(short, long)]
        debug: bool,

        /// GitHub API token for authentication (overrides GITSCOUT_GITHUB_TOKEN environment variable)
        #[arg(short = 't', long)]
        github_token: Option<String>,

        /// GitHub API base URL (overrides GITSCOUT_GITHUB_API_URL environment variable)
        #[arg(long)]
        api_url: Option<String>,

        /// GitHub client backend: rest or octocrab (overrides GITSCOUT_BACKEND environment variable)
        #[arg(long)]
        backend: Option<String>,
    },
    /// Run the server with HTTP/SSE interface
    Http {
        /// Address to bind the HTTP server to
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        address: String,

        /// Enable debug logging
        #[arg(short, long)]
        debug: bool,

        /// GitHub API token for authentication (overrides GITSCOUT_GITHUB_TOKEN environment variable)
        #[arg(short = 't', long)]
        github_token: Option<String>,

        /// GitHub API base URL (overrides GITSCOUT_GITHUB_API_URL environment variable)
        #[arg(long)]
        api_url: Option<String>,

        /// GitHub client backend: rest or octocrab (overrides GITSCOUT_BACKEND environment variable)
        #[arg(long)]
        backend: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stdio {
            debug,
            github_token,
            api_url,
            backend,
        } => {
            let config = ScoutConfig::resolve(github_token, api_url, backend)?;
            run_stdio_server(debug, config).await
        }
        Commands::Http {
            address,
            debug,
            github_token,
            api_url,
            backend,
        } => {
            let config = ScoutConfig::resolve(github_token, api_url, backend)?;
            run_http_server(address, debug, config).await
        }
    }
}

async fn run_stdio_server(debug: bool, config: ScoutConfig) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .init();

    tracing::info!("Starting gitscout MCP server in STDIN/STDOUT mode");
    tracing::info!("{} ({} backend)", config.auth_status(), config.backend);

    gitscout::transport::stdio::run_stdio_server(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Error running STDIO server: {}", e))
}

async fn run_http_server(address: String, debug: bool, config: ScoutConfig) -> Result<()> {
    let level = if debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},{}", level, env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();

    let addr: SocketAddr = address.parse()?;

    tracing::debug!("gitscout MCP server listening on {}", addr);
    tracing::info!("Access the gitscout MCP server at http://{}/sse", addr);
    tracing::info!("{} ({} backend)", config.auth_status(), config.backend);

    let app = gitscout::transport::sse_server::SseServerApp::new(addr, config);
    app.serve().await?;

    Ok(())
}
