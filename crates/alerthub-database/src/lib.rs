//! # alerthub-database
//!
//! Backing store access for AlertHub: the [`AlertStore`] and
//! [`DeliveryStore`] traits, their PostgreSQL repositories, and a
//! process-local implementation used for development and tests.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use tracing::info;

use alerthub_core::config::{DatabaseConfig, StoreBackend};
use alerthub_core::error::AppError;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{AlertRepository, DeliveryRepository};
pub use store::{AlertFilter, AlertStore, DeliveryStore};

/// The store handles shared by the service layer for the process lifetime.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Alert catalog.
    pub alerts: Arc<dyn AlertStore>,
    /// Per-user delivery state.
    pub deliveries: Arc<dyn DeliveryStore>,
}

impl Stores {
    /// Both handles backed by one in-memory store.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            alerts: store.clone(),
            deliveries: store,
        }
    }

    /// Both handles backed by one PostgreSQL pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        Self {
            alerts: Arc::new(AlertRepository::new(pool.pool().clone())),
            deliveries: Arc::new(DeliveryRepository::new(pool.pool().clone())),
        }
    }

    /// Construct the configured backend, connecting and migrating if needed.
    ///
    /// A `postgres` backend without a URL is a configuration error.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, AppError> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory store; state will not survive a restart");
                Ok(Self::memory())
            }
            StoreBackend::Postgres => {
                if !config.is_configured() {
                    return Err(AppError::configuration(
                        "Backing store is not configured: set database.url",
                    ));
                }
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(&pool))
            }
        }
    }
}
