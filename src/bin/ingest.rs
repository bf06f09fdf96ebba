//! gearbot-ingest: offline catalog indexing
//!
//! Loads the product catalog, chunks it, embeds every chunk through the
//! Gemini API, and persists the collection for the server to search.
//! Reruns replace the collection.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearbot::config::BotConfig;
use gearbot::ingestion::{IngestPipeline, TextChunker};
use gearbot::providers::GeminiClient;
use gearbot::store::LocalVectorStore;

/// Catalog ingestion for the TechGear support bot
#[derive(Parser)]
#[command(
    name = "gearbot-ingest",
    version,
    about = "Index the product catalog for retrieval-augmented answers"
)]
struct Args {
    /// Catalog file to index
    #[arg(default_value = "data/product_info.txt")]
    source: PathBuf,

    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write into this collection instead of the configured one
    #[arg(long)]
    collection: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gearbot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = BotConfig::load_or_default(args.config.as_deref())?;
    if let Some(collection) = args.collection {
        config.store.collection = collection;
        config.validate()?;
    }

    println!("==========================================================");
    println!(" TechGear catalog ingestion");
    println!("==========================================================");

    tracing::info!("Source: {}", args.source.display());
    tracing::info!(
        "Collection: '{}' in {}",
        config.store.collection,
        config.store.persist_dir.display()
    );
    tracing::info!(
        "Chunking: size={} overlap={} strategy={:?}",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap,
        config.chunking.strategy
    );

    let gemini = Arc::new(GeminiClient::new(&config.models)?);
    let store = Arc::new(LocalVectorStore::from_config(&config.store)?);
    let chunker = TextChunker::from_config(&config.chunking);

    let pipeline = IngestPipeline::new(chunker, gemini, store);
    let indexed = pipeline.ingest(&args.source).await?;

    println!();
    println!(
        "Indexed {} chunks into collection '{}'",
        indexed, config.store.collection
    );
    println!("Start the server with: gearbot-server");

    Ok(())
}
