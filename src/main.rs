use lodging::config::{Config, StorageKind};
use lodging::db::{MemoryStore, PgStore};
use lodging::engine::Engine;
use lodging::error::Error;
use lodging::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match config.storage {
        StorageKind::Memory => {
            tracing::info!("using in-memory storage");
            serve(Engine::new(MemoryStore::new()), config.addr).await
        }
        StorageKind::Db {
            url,
            max_connections,
        } => {
            let store = PgStore::new(&url, max_connections).await?;
            tracing::info!("using database storage");
            serve(Engine::new(store), config.addr).await
        }
    }
}
