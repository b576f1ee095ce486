//! CLI command implementations

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Subcommand;
use reelpost_core::config::ReelpostConfig;
use reelpost_core::metadata::{MediaType, TmdbClient};
use reelpost_core::network::build_http_client;
use reelpost_core::{DeliveryOutcome, PostRequest, PostService};
use reelpost_search::{MediaSearchService, SearchOutcome, candidate_label};
use tracing::info;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the API and webhook server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Search movies and series, e.g. "Fight Club (1999)"
    Search {
        /// Title with an optional trailing year
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Post one title to a channel
    Post {
        /// movie or tv
        media_type: MediaType,
        /// TMDB id of the title
        id: u64,
        /// Target channel, defaults to TELEGRAM_CHANNEL_ID
        #[arg(short, long)]
        channel: Option<String>,
        /// Season number (series only)
        #[arg(long)]
        season: Option<u32>,
        /// Episode number (series only)
        #[arg(long)]
        episode: Option<u32>,
        /// Watch link shown as the first button
        #[arg(long)]
        link: Option<String>,
        /// Note appended below the post
        #[arg(long)]
        note: Option<String>,
        /// HTML banner appended below the post
        #[arg(long)]
        banner: Option<String>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns an error when configuration is incomplete or the command fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = ReelpostConfig::from_env();

    match command {
        Commands::Serve { host, port } => serve(config, host, port).await,
        Commands::Search { query } => search(&config, &query.join(" ")).await,
        Commands::Post {
            media_type,
            id,
            channel,
            season,
            episode,
            link,
            note,
            banner,
        } => {
            let request = PostRequest {
                season,
                episode,
                custom_link: link,
                note,
                channel_id: channel,
                banner_html: banner,
                ..PostRequest::new(media_type, id)
            };
            post(&config, &request).await
        }
    }
}

fn require(name: &str, value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        bail!("{name} is not set");
    }
    Ok(())
}

/// Start the server with CLI overrides applied.
///
/// # Errors
/// - Missing credentials or a bind failure
pub async fn serve(
    mut config: ReelpostConfig,
    host: Option<IpAddr>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.bind_addr.set_ip(host);
    }
    if let Some(port) = port {
        config.server.bind_addr.set_port(port);
    }

    reelpost_web::run_server(config)
        .await
        .context("server failed")
}

/// Print ranked candidates for a query.
///
/// # Errors
/// - Missing TMDB key or a failed search request
pub async fn search(config: &ReelpostConfig, query: &str) -> anyhow::Result<()> {
    require("TMDB_API_KEY", &config.tmdb.api_key)?;

    let client = build_http_client(&config.network)?;
    let provider = Arc::new(TmdbClient::new(client, config.tmdb.clone()));
    let service = MediaSearchService::new(provider);

    match service.search(query).await? {
        SearchOutcome::Found(candidates) => {
            for candidate in &candidates {
                println!(
                    "{:<60} {}:{}",
                    candidate_label(candidate),
                    candidate.media_type,
                    candidate.id
                );
            }
        }
        SearchOutcome::NoResults => println!("No results found"),
    }

    Ok(())
}

/// Publish one title and print the outcome.
///
/// # Errors
/// - Missing credentials, or any outcome other than a successful post
pub async fn post(config: &ReelpostConfig, request: &PostRequest) -> anyhow::Result<()> {
    require("TMDB_API_KEY", &config.tmdb.api_key)?;
    require("TELEGRAM_BOT_TOKEN", &config.telegram.bot_token)?;

    let service = PostService::from_config(config)?;
    let outcome = service.publish(request).await;
    info!(outcome = outcome.kind(), "Post finished");

    if let DeliveryOutcome::AdminError(diagnostic) = &outcome {
        println!("{}", serde_json::to_string_pretty(diagnostic)?);
    }
    println!("{}", outcome.message());

    if !outcome.is_posted() {
        bail!("post was not published");
    }
    Ok(())
}
