use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docsearch::api::create_router;
use docsearch::config::parse_threshold;
use docsearch::{RenderConfig, SearchResult};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render documentation search results as HTML", long_about = None)]
struct Args {
    /// Renderer settings (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Localized labels (JSON), overrides the config file
    #[arg(short, long, global = true)]
    translations: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render search results read from a file or stdin
    Render {
        /// JSON input, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Score below which sections are collapsed
        #[arg(long, value_parser = parse_threshold)]
        threshold: Option<f64>,

        /// Input is a list of results rendered as a full result pane
        #[arg(long)]
        list: bool,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,
    },
    /// Serve the renderer over HTTP
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Html,
    Json,
}

fn read_input<T: DeserializeOwned>(input: Option<&PathBuf>) -> Result<T> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse input {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            serde_json::from_str(&buffer).context("Failed to parse input from stdin")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if args.translations.is_some() {
        config.translations = args.translations.clone();
    }
    let renderer = config.build_renderer()?;

    match args.command {
        Command::Render {
            input,
            threshold,
            list,
            format,
        } => {
            let start = Instant::now();

            let element = if list {
                let results: Vec<SearchResult> = read_input(input.as_ref())?;
                tracing::info!("Rendering {} results", results.len());
                renderer.render_search_results(&results, threshold)?
            } else {
                let result: SearchResult = read_input(input.as_ref())?;
                tracing::info!("Rendering result with {} documents", result.len());
                renderer.render_search_result(&result, threshold)?
            };

            tracing::info!("Rendered in {:?}", start.elapsed());

            match format {
                Format::Html => println!("{}", element),
                Format::Json => println!("{}", serde_json::to_string_pretty(&element)?),
            }
        }
        Command::Serve { addr } => {
            let app = create_router(Arc::new(renderer));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            tracing::info!("Listening on {}", addr);
            axum::serve(listener, app).await.context("Server error")?;
        }
    }

    Ok(())
}
