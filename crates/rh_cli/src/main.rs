use clap::{Parser, Subcommand};
use rh_core::{ArticleSource, SystemClock};
use rh_client::{HttpHubApi, HubApi};
use rh_storage::ArticleCache;
use rh_upstream::{FileSource, HttpSource, DEFAULT_UPSTREAM_URL};
use rh_web::config::Upstream;
use rh_web::ServerConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use url::Url;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Readme Hub API server", long_about = None)]
pub struct Cli {
    /// Log verbosity: error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "info", env = "READMEHUB_LOG_LEVEL")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct UpstreamArgs {
    /// URL of the dataset document
    #[arg(long, env = "READMEHUB_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: Url,
    /// Read the dataset from a local JSON file instead of the URL
    #[arg(long, env = "READMEHUB_UPSTREAM_FILE")]
    upstream_file: Option<PathBuf>,
    /// Upstream request timeout in seconds (unbounded when unset)
    #[arg(long, env = "READMEHUB_UPSTREAM_TIMEOUT")]
    upstream_timeout: Option<u64>,
}

impl UpstreamArgs {
    fn upstream(&self) -> Upstream {
        match &self.upstream_file {
            Some(path) => Upstream::File(path.clone()),
            None => Upstream::Url(self.upstream_url.clone()),
        }
    }

    fn timeout(&self) -> Option<Duration> {
        self.upstream_timeout.map(Duration::from_secs)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "READMEHUB_BIND", default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
        /// Seconds a fetched dataset stays fresh
        #[arg(long, env = "READMEHUB_CACHE_TTL", default_value_t = 300)]
        cache_ttl: u64,
        /// Message returned by /api/ping
        #[arg(long, env = "PING_MESSAGE", default_value = "ping")]
        ping_message: String,
        #[command(flatten)]
        upstream: UpstreamArgs,
    },
    /// Fetch and normalize the upstream dataset once, then print it
    Fetch {
        #[command(flatten)]
        upstream: UpstreamArgs,
        /// Print the normalized dataset as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ping a running server
    Ping {
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: Url,
    },
}

async fn fetch(upstream: UpstreamArgs, json: bool) -> anyhow::Result<()> {
    let source: Arc<dyn ArticleSource> = match (upstream.upstream(), upstream.timeout()) {
        (Upstream::File(path), _) => Arc::new(FileSource::new(path)),
        (Upstream::Url(url), Some(timeout)) => Arc::new(HttpSource::with_timeout(url, timeout)?),
        (Upstream::Url(url), None) => Arc::new(HttpSource::new(url)),
    };

    info!("🌐 Fetching articles from {}", source.name());
    let cache = ArticleCache::new(source, Arc::new(SystemClock));
    let dataset = cache.get().await?;
    if let Some(at) = cache.fetched_at() {
        info!("📅 Fetched at {}", at.to_rfc3339());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(dataset.as_ref())?);
        return Ok(());
    }

    println!(
        "Found {} articles in {} categories",
        dataset.articles.len(),
        dataset.categories.len()
    );
    for article in &dataset.articles {
        let marker = if article.featured { "⭐" } else { "-" };
        println!("{} [{}] {} ({})", marker, article.category.name, article.title, article.slug);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    match cli.command {
        Commands::Serve {
            bind,
            cache_ttl,
            ping_message,
            upstream,
        } => {
            let config = ServerConfig::default()
                .with_bind(bind)
                .with_upstream(upstream.upstream())
                .with_upstream_timeout(upstream.timeout())
                .with_cache_ttl(Duration::from_secs(cache_ttl))
                .with_ping_message(ping_message);
            rh_web::serve(config).await?;
        }
        Commands::Fetch { upstream, json } => fetch(upstream, json).await?,
        Commands::Ping { server } => {
            let message = HttpHubApi::new(server).ping().await?;
            println!("{}", message);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["readme-hub", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind, cache_ttl, upstream, .. } => {
                assert_eq!(bind.port(), 8080);
                assert_eq!(cache_ttl, 300);
                assert_eq!(upstream.upstream_url.as_str(), DEFAULT_UPSTREAM_URL);
                assert!(upstream.timeout().is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_upstream_file_wins_over_url() {
        let cli = Cli::try_parse_from([
            "readme-hub",
            "fetch",
            "--upstream-file",
            "db.json",
            "--upstream-timeout",
            "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch { upstream, .. } => {
                assert_eq!(upstream.upstream(), Upstream::File(PathBuf::from("db.json")));
                assert_eq!(upstream.timeout(), Some(Duration::from_secs(5)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
