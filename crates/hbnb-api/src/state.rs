//! Application state shared with request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use hbnb_storage::DbStorage;
use hbnb_types::config::StorageConfig;

/// The one storage instance, constructed at process start and injected into
/// handlers instead of living in process-wide globals.
///
/// The store carries a single session not designed for concurrent mutation,
/// so it sits behind an async mutex; each handler takes the lock for the
/// duration of its storage work.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Mutex<DbStorage>>,
}

impl AppState {
    /// Connect storage per `config` and establish its session.
    pub async fn init(config: &StorageConfig) -> anyhow::Result<Self> {
        let mut storage = DbStorage::connect(config).await?;
        storage.reload().await?;
        Ok(Self {
            storage: Arc::new(Mutex::new(storage)),
        })
    }
}
