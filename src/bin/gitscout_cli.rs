use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{self, EnvFilter};

use gitscout::config::ScoutConfig;
use gitscout::scout::RepositoryScout;
use gitscout::scout::providers::ProviderBackend;
use gitscout::services;
use gitscout::tools::responses::{self, SearchRepositoriesResponse};

#[derive(Parser)]
#[command(author, version, about = "Find and rank GitHub repositories from the terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// GitHub API token for authentication (overrides GITSCOUT_GITHUB_TOKEN environment variable)
    #[arg(short = 't', long, global = true)]
    github_token: Option<String>,

    /// GitHub API base URL (overrides GITSCOUT_GITHUB_API_URL environment variable)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// GitHub client backend
    #[arg(long, value_enum, global = true)]
    backend: Option<BackendArg>,

    /// Print JSON instead of a human-readable listing
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter and rank repositories
    Search {
        /// Keywords, combined into a single query
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Maximum number of repositories to return
        #[arg(short = 'n', long, default_value = "30")]
        max_results: usize,

        /// Minimum number of stars (inclusive)
        #[arg(short = 's', long, default_value = "0")]
        min_stars: u64,

        /// Only keep repositories updated within this many days
        #[arg(long)]
        max_days_since_update: Option<u32>,
    },
    /// Print the README of a repository
    Readme {
        /// Repository in owner/name form
        repository: String,
    },
}

/// GitHub client backends
#[derive(clap::ValueEnum, Clone, Debug)]
enum BackendArg {
    Rest,
    Octocrab,
}

impl From<BackendArg> for ProviderBackend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Rest => ProviderBackend::Rest,
            BackendArg::Octocrab => ProviderBackend::Octocrab,
        }
    }
}

fn print_repositories(response: &SearchRepositoriesResponse) {
    if response.repositories.is_empty() {
        println!("No repositories found for '{}'", response.query);
        return;
    }

    for (i, repo) in response.repositories.iter().enumerate() {
        println!("{}. {} - {} stars", i + 1, repo.full_name, repo.stars);
        println!(
            "   Description: {}",
            repo.description.as_deref().unwrap_or("<no description>")
        );
        println!("   Updated: {}", repo.updated_at.format("%Y-%m-%d"));
        println!("   URL: {}", repo.url);
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let backend = cli
        .backend
        .map(|backend| ProviderBackend::from(backend).to_string());
    let config = ScoutConfig::resolve(cli.github_token, cli.api_url, backend)?;

    tracing::debug!("{} ({} backend)", config.auth_status(), config.backend);
    let scout = RepositoryScout::from_config(&config)?;

    match cli.command {
        Commands::Search {
            keywords,
            max_results,
            min_stars,
            max_days_since_update,
        } => {
            let request = services::build_search_request(
                keywords,
                Some(max_results),
                Some(min_stars),
                max_days_since_update,
            )
            .map_err(|e| anyhow::anyhow!(e))?;

            let response = match services::search_repositories(&scout, &request).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::error!("{}", err);
                    anyhow::bail!(err)
                }
            };

            if cli.json {
                println!(
                    "{}",
                    responses::to_json(&response).map_err(|e| anyhow::anyhow!(e))?
                );
            } else {
                print_repositories(&response);
            }
        }
        Commands::Readme { repository } => {
            let response = services::fetch_readme(&scout, &repository).await;

            if cli.json {
                println!(
                    "{}",
                    responses::to_json(&response).map_err(|e| anyhow::anyhow!(e))?
                );
            } else {
                match response.content {
                    Some(content) => println!("{}", content),
                    None => anyhow::bail!("No README available for {}", response.repository),
                }
            }
        }
    }

    Ok(())
}
