use std::{sync::Arc, time::Duration};

use clap::Parser;
use conversation::{ConversationStore, Kv, MemoryStore, RedisStore};
use providers::ProviderRegistry;

use crate::args::Args;

mod args;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(&args.log_level);

    let cfg = config::Config::from_env()?;
    log::info!("loaded configuration, default model = {:?}", cfg.default_model);

    let registry = Arc::new(ProviderRegistry::from_config(&cfg));
    log::info!("{} provider(s) configured: {}", registry.providers().len(), provider_names(&registry));

    let ttl = Duration::from_secs(cfg.conversation_ttl_hours * 3600);
    let kv: Arc<dyn Kv> = match &cfg.redis_url {
        Some(url) => {
            log::info!("using Redis-backed conversation store");
            Arc::new(RedisStore::connect(url).await?)
        }
        None => {
            log::info!("REDIS_URL not set, using an in-process conversation store (not shared across processes)");
            Arc::new(MemoryStore::new(ttl))
        }
    };

    let store = ConversationStore::new(kv, ttl, cfg.max_conversation_turns);

    let kernel = kernel::Kernel::new(registry, store, cfg.default_model, cfg.default_vision_model, cfg.mcp_prompt_size_limit);

    log::info!("serving MCP over stdio");
    kernel::McpServer::new(kernel).serve_stdio().await
}

fn provider_names(registry: &ProviderRegistry) -> String {
    registry.providers().iter().map(|p| p.name().to_string()).collect::<Vec<_>>().join(", ")
}
