use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use image_protocols::application::DEFAULT_SRCSET_WIDTHS;
use image_protocols::infrastructure::{AppConfig, CliArgs, Command, StorageManager};
use image_protocols::{DisplayUrlService, ParseOptions, ResolveOptions, UrlInspector};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level.to_tracing_level()).into())
        .from_env_lossy();

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn run(command: Command, service: &DisplayUrlService) -> Result<ExitCode> {
    let options = ResolveOptions::default();

    match command {
        Command::Resolve { identifier } => {
            println!("{}", service.resolve(&identifier, &options).await);
        }
        Command::Parse {
            identifier,
            no_native,
        } => {
            let parse_options = ParseOptions {
                allow_native_format: !no_native,
                ..ParseOptions::default()
            };
            let parsed = service.parse(&identifier, parse_options);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
            if parsed.is_valid() {
                println!("{}", service.resolve(&identifier, &options).await);
            }
        }
        Command::Validate { identifier } => {
            let validation = service.validate(&identifier);
            if validation.valid {
                println!("valid");
            } else {
                println!("invalid: {}", validation.reason.unwrap_or_default());
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Batch { identifiers } => {
            let batch = service.resolve_many(identifiers, &options).await;
            for (identifier, url) in batch.iter() {
                println!("{identifier} -> {url}");
            }
        }
        Command::Inspect { identifier } => {
            let metadata = UrlInspector::extract_metadata(&identifier);
            println!("{}", serde_json::to_string_pretty(&metadata)?);
            println!("likely image: {}", UrlInspector::is_likely_image(&identifier));
            println!("security: {}", UrlInspector::check_security(&identifier));
            let url = service.resolve(&identifier, &options).await;
            println!(
                "srcset: {}",
                UrlInspector::src_set(&url, &DEFAULT_SRCSET_WIDTHS)
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = image_protocols::VERSION, "Starting {}", image_protocols::NAME);
    debug!(?config, "Loaded configuration");

    let service = DisplayUrlService::new(config.resolver);
    let code = run(args.command, &service).await?;
    debug!(stats = %service.cache_stats(), "Cache statistics");

    Ok(code)
}
