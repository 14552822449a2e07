use std::fs;
use std::io::{self, IsTerminal, Read};

use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Input, theme::ColorfulTheme};
use mediakit_config::{
    KEYS, MediakitConfig, config_exists, config_path, get_config_value, load_config, open_in_editor,
    resolve_json_output, resolve_listen, resolve_youtube_base_url, resolve_youtube_key,
    save_config, set_config_value,
};
use mediakit_core::{MediaError, MediaResult, ParsedMediaUrl, VideoMetadata};
use mediakit_server::AppState;
use mediakit_video::VideoMetadataFetcher;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "mediakit=info,mediakit_server=info,mediakit_video=info,mediakit_embed=info,tower_http=info";

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the video metadata HTTP service
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000
        #[arg(long)]
        listen: Option<String>,
    },
    /// Resolve Apple Music and Spotify URLs to embeddable player URLs
    Embed {
        #[arg(long)]
        input: Option<String>,
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },
    /// Fetch metadata for a YouTube video
    Metadata {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Open config file in editor
    Edit,
    /// Create the config file interactively
    Init,
}

#[derive(Debug, Parser)]
#[command(name = "mediakit")]
#[command(version, about = "Media embed resolver and video metadata service", long_about = None)]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedLine<'a> {
    #[serde(flatten)]
    parsed: &'a ParsedMediaUrl,
    embed_height: u32,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Commands::Config { action } = cli.command {
        if let Err(err) = handle_config_command(action) {
            exit_with(err);
        }
        return;
    }

    let config = load_config().unwrap_or_else(|err| exit_with(err));
    let json = cli.json || resolve_json_output(&config).unwrap_or(false);

    let result = match cli.command {
        Commands::Serve { listen } => run_serve(&config, listen).await,
        Commands::Embed { input, urls } => run_embed(urls, input.as_deref(), json),
        Commands::Metadata { url } => run_metadata(&config, &url, json).await,
        Commands::Config { .. } => Ok(()),
    };

    if let Err(err) = result {
        exit_with(err);
    }
}

fn exit_with(err: MediaError) -> ! {
    eprintln!("{} {err}", style("Error:").red());
    std::process::exit(1);
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_fetcher(config: &MediakitConfig) -> MediaResult<VideoMetadataFetcher> {
    let api_key = resolve_youtube_key(config);
    match resolve_youtube_base_url(config) {
        Some(base_url) => VideoMetadataFetcher::with_base_url(api_key, base_url),
        None => VideoMetadataFetcher::new(api_key),
    }
}

/// Points first-time users at `config init` when no key is set and no config file exists.
fn setup_hint(has_api_key: bool, config_file_exists: bool) -> Option<&'static str> {
    if has_api_key || config_file_exists {
        return None;
    }
    Some("no config file found; run `mediakit config init` to set a YouTube API key")
}

fn print_setup_hint(fetcher: &VideoMetadataFetcher) {
    let exists = config_exists().unwrap_or(false);
    if let Some(hint) = setup_hint(fetcher.has_api_key(), exists) {
        eprintln!("{} {hint}", style("Hint:").yellow());
    }
}

async fn run_serve(config: &MediakitConfig, listen: Option<String>) -> MediaResult<()> {
    let fetcher = build_fetcher(config)?;
    if !fetcher.has_api_key() {
        warn!("youtube api key is not configured; metadata requests will fail");
        print_setup_hint(&fetcher);
    }

    let addr = listen.unwrap_or_else(|| resolve_listen(config));
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|err| MediaError::Config(format!("failed to bind {addr}: {err}")))?;

    mediakit_server::run(listener, AppState::new(fetcher))
        .await
        .map_err(|err| MediaError::Network(format!("server stopped: {err}")))
}

fn run_embed(mut urls: Vec<String>, input: Option<&str>, json: bool) -> MediaResult<()> {
    urls.extend(gather_inputs(input, urls.is_empty())?);
    if urls.is_empty() {
        return Err(MediaError::InvalidInput("no input URLs provided".to_string()));
    }

    let mut success = 0usize;
    let mut failed = 0usize;

    for url in &urls {
        match mediakit_embed::resolve(url) {
            Some(parsed) => {
                print_embed(&parsed, json)?;
                success += 1;
            }
            None => {
                failed += 1;
                let reason = if mediakit_embed::is_supported(url) {
                    "not an embeddable item"
                } else {
                    "unsupported platform"
                };
                eprintln!("{} {url}: {reason}", style("Failed").red());
            }
        }
    }

    if !json {
        print_summary(success + failed, success, failed);
    }
    Ok(())
}

async fn run_metadata(config: &MediakitConfig, url: &str, json: bool) -> MediaResult<()> {
    let fetcher = build_fetcher(config)?;
    print_setup_hint(&fetcher);
    let metadata = fetcher.fetch(url).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&metadata)
            .map_err(|err| MediaError::Parse(format!("failed to render metadata: {err}")))?;
        println!("{rendered}");
    } else {
        print_metadata(url, &metadata);
    }
    Ok(())
}

/// Reads extra URLs from a file, and from piped stdin when nothing else was given.
fn gather_inputs(input: Option<&str>, read_stdin: bool) -> MediaResult<Vec<String>> {
    let mut urls = Vec::new();

    if let Some(path) = input {
        let content = fs::read_to_string(path)
            .map_err(|err| MediaError::InvalidInput(format!("failed to read input file: {err}")))?;
        urls.extend(parse_lines(&content));
    }

    if read_stdin && urls.is_empty() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| MediaError::InvalidInput(format!("failed to read stdin: {err}")))?;
        urls.extend(parse_lines(&buffer));
    }

    Ok(urls)
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

fn handle_config_command(action: ConfigAction) -> MediaResult<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config()?;
            match get_config_value(&config, &key) {
                Some(v) => println!("{key} = {v}"),
                None => println!("{key} = <null>"),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            set_config_value(&key, &value)?;
            println!("{} Set {key} = {value}", style("✓").green());
            Ok(())
        }
        ConfigAction::List => {
            let config = load_config()?;
            println!("Current configuration:");
            for key in KEYS {
                let value = get_config_value(&config, key);
                println!("{key} = {}", value.as_deref().unwrap_or("<null>"));
            }
            Ok(())
        }
        ConfigAction::Edit => open_in_editor(),
        ConfigAction::Init => run_config_init(),
    }
}

fn run_config_init() -> MediaResult<()> {
    let mut config = load_config()?;
    let theme = ColorfulTheme::default();
    println!(
        "{} Let's configure mediakit",
        style("First-time setup:").bold().cyan()
    );

    let key: String = Input::with_theme(&theme)
        .with_prompt("YouTube Data API key (optional, press Enter to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(|err| MediaError::InvalidInput(format!("prompt failed: {err}")))?;
    if !key.trim().is_empty() {
        config.api.youtube_key = Some(key.trim().to_string());
    }

    let listen: String = Input::with_theme(&theme)
        .with_prompt("Listen address")
        .default(resolve_listen(&config))
        .interact_text()
        .map_err(|err| MediaError::InvalidInput(format!("prompt failed: {err}")))?;
    config.server.listen = Some(listen);

    save_config(&config)?;
    println!(
        "{} Config file written to {}",
        style("✓").green(),
        config_path()?.display()
    );
    Ok(())
}

fn print_embed(parsed: &ParsedMediaUrl, json: bool) -> MediaResult<()> {
    if json {
        let line = EmbedLine {
            parsed,
            embed_height: parsed.embed_height(),
        };
        let rendered = serde_json::to_string(&line)
            .map_err(|err| MediaError::Parse(format!("failed to render embed: {err}")))?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "{} {}",
        style("From:").cyan(),
        parsed.platform_kind().display_name()
    );
    println!("  {} {}", style("URL:").dim(), parsed.original_url());
    println!("{} {}", style("Embed:").green(), parsed.embed_url());
    println!("  {} {}px", style("Height:").dim(), parsed.embed_height());
    println!();
    Ok(())
}

fn print_metadata(url: &str, metadata: &VideoMetadata) {
    if *metadata == VideoMetadata::default() {
        println!("{} no metadata found for {url}", style("Warning:").yellow());
        return;
    }

    let fields = [
        ("Title:", metadata.title.as_deref()),
        ("Channel:", metadata.channel_name.as_deref()),
        ("Published:", metadata.published_at.as_deref()),
        ("Duration:", metadata.duration.as_deref()),
        ("Category:", metadata.category.as_deref()),
        ("Thumbnail:", metadata.thumbnail_url.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{} {value}", style(label).cyan());
        }
    }
    if !metadata.tags.is_empty() {
        println!("{} {}", style("Tags:").cyan(), metadata.tags.join(", "));
    }
    if let Some(description) = &metadata.description {
        println!();
        println!("{description}");
    }
}

fn print_summary(total: usize, success: usize, failed: usize) {
    println!(
        "{} Total: {} | Success: {} | Failed: {}",
        style("Summary:").bold(),
        total,
        success,
        failed
    );
}
