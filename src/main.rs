use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod config;
mod feed;
mod render;

use config::Config;
use feed::{FeedVideoExtractor, VideoEntry};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Embedded video gallery page
    Html,
    /// Matching entries as a JSON array
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,

    /// Feed URL, overrides feed.url from the config
    #[arg(short, long)]
    url: Option<String>,

    /// Keep only entries whose title or description contains this text
    #[arg(short, long)]
    keyword: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn get_config_path(args: &Args) -> Option<String> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("CONFIG_FILE") {
        return Some(path);
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = format!("{}/feedreel/config.toml", xdg_config_home);
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = format!("{}/.config/feedreel/config.toml", home.display());
        if std::path::Path::new(&config_path).exists() {
            return Some(config_path);
        }
    }

    None
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(url) = &args.url {
        config.feed.url = Some(url.clone());
    }
    if let Some(keyword) = &args.keyword {
        config.feed.keyword = keyword.clone();
    }
    if let Some(timeout) = args.timeout {
        config.feed.timeout_secs = timeout;
    }
}

fn render_output(videos: &[VideoEntry], config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => render::GalleryRenderer::new()?.render(videos, &config.page),
        OutputFormat::Json => {
            serde_json::to_string_pretty(videos).context("Failed to serialize videos")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match get_config_path(&args) {
        Some(config_path) => Config::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path))?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &args);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    if config.get_logging_format() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    info!("Starting feedreel...");

    let url = config
        .feed
        .url
        .clone()
        .context("No feed URL given, pass --url or set feed.url in the config file")?;

    let extractor = FeedVideoExtractor::new(config.feed.timeout(), &config.feed.user_agent)
        .context("Failed to initialize feed client")?;
    let videos = extractor.fetch(&url, &config.feed.keyword).await;

    let output = render_output(&videos, &config, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path))?;
            info!("Wrote {} video(s) to {}", videos.len(), path);
        }
        None => print!("{}", output),
    }

    Ok(())
}
