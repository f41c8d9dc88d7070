use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mediagate::application::dto::{CollectionQuery, CollectionSnapshot};
use mediagate::application::use_cases::CollectionQueryService;
use mediagate::domain::entities::CollectionSlug;
use mediagate::infrastructure::cache::DiskAttachmentStore;
use mediagate::domain::ports::AttachmentStorePort;
use mediagate::infrastructure::config::{AppConfig, CacheAction, CliArgs, Command, StorageManager};
use mediagate::infrastructure::opensea::OpenSeaClient;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

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
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn run_collection(config: &AppConfig, slug: &str) -> Result<()> {
    let slug = CollectionSlug::parse(slug)?;

    let api_key = config
        .opensea
        .api_key
        .clone()
        .ok_or_else(|| eyre!("no OpenSea API key; set OPENSEA_API_KEY or pass --api-key"))?;

    let client = Arc::new(OpenSeaClient::with_base_url(
        config.opensea.base_url.clone(),
        api_key,
        config.opensea.timeout_secs,
    )?);

    let service = CollectionQueryService::new(client);
    let snapshot = service.execute(CollectionQuery::new(slug)).await;

    match snapshot {
        CollectionSnapshot::Ready(collection) => {
            println!("{}", serde_json::to_string_pretty(collection.as_ref())?);
            Ok(())
        }
        CollectionSnapshot::Failed(error) => Err(eyre!(error)),
        CollectionSnapshot::Disabled | CollectionSnapshot::Idle | CollectionSnapshot::Loading => {
            Err(eyre!("collection query did not complete"))
        }
    }
}

async fn run_cache(config: &AppConfig, action: &CacheAction) -> Result<()> {
    let store =
        DiskAttachmentStore::new(config.effective_store_dir(), config.cache.max_disk_bytes).await?;

    match action {
        CacheAction::Stats => {
            println!("entries: {}", store.len().await);
            println!("bytes:   {}", store.current_size());
            Ok(())
        }
        CacheAction::Clear => {
            store.clear().await?;
            println!("attachment store cleared");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = mediagate::VERSION, "Starting mediagate");

    match &args.command {
        Command::Collection { slug } => run_collection(&config, slug).await,
        Command::Cache { action } => run_cache(&config, action).await,
    }
}
