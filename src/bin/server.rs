//! gearbot-server: the TechGear support chatbot HTTP service

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearbot::config::BotConfig;
use gearbot::server::BotServer;

/// TechGear support chatbot server
#[derive(Parser)]
#[command(
    name = "gearbot-server",
    version,
    about = "Customer-support chatbot with query routing and retrieval-augmented answers"
)]
struct Args {
    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gearbot=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = BotConfig::load_or_default(args.config.as_deref())?;

    println!(
        r#"
╔════════════════════════════════════════════════════════╗
║                 TechGear Support Bot                   ║
║    Query Routing + Retrieval-Augmented Generation      ║
╚════════════════════════════════════════════════════════╝
"#
    );

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.models.embed_model);
    tracing::info!("  - Generation model: {}", config.models.generate_model);
    tracing::info!("  - Collection: {}", config.store.collection);
    tracing::info!("  - Index dir: {}", config.store.persist_dir.display());
    tracing::info!("  - Retrieval top-k: {}", config.retrieval.top_k);

    probe_gemini(&config).await;

    let server = BotServer::new(config)?;

    println!("Endpoints:");
    println!("  POST http://{}/chat", server.address());
    println!("  GET  http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}

/// Startup reachability check; failures only warn
async fn probe_gemini(config: &BotConfig) {
    let key = match std::env::var(&config.models.api_key_env) {
        Ok(key) => key,
        Err(_) => {
            tracing::warn!("{} is not set", config.models.api_key_env);
            tracing::warn!("The bot needs a Gemini API key to answer queries:");
            tracing::warn!("  1. Create a key at https://aistudio.google.com/app/apikey");
            tracing::warn!("  2. export {}='your-api-key'", config.models.api_key_env);
            return;
        }
    };

    tracing::info!("Checking Gemini API at {}...", config.models.api_base);
    let url = format!(
        "{}/v1beta/models/{}",
        config.models.api_base, config.models.generate_model
    );
    match reqwest::Client::new()
        .get(&url)
        .header("x-goog-api-key", &key)
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Gemini API is reachable");
        }
        Ok(resp) => {
            tracing::warn!(
                "Gemini API answered {} for model '{}'; check the key and model name",
                resp.status(),
                config.models.generate_model
            );
        }
        Err(e) => {
            tracing::warn!("Gemini API not reachable: {}", e);
        }
    }
}
