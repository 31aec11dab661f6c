//! Startup wiring: choose the store, apply migrations, seed.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::config::{ServerSettings, SettingsError};
use crate::domain::ports::{BoardSeedRepository, PostsCommand, PostsQuery, SeedOutcome};
use crate::domain::{BoardSeeder, BoardService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryBoardStore;
use crate::outbound::persistence::{
    DbPool, DieselBoardSeedRepository, DieselPostRepository, DieselUserRepository,
    MigrationError, PoolConfig, PoolError, run_migrations,
};

/// Errors returned while preparing the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("migration failed: {0}")]
    Migration(#[from] MigrationError),
    #[error("database pool unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error("seeding failed: {0}")]
    Seeding(#[source] crate::domain::Error),
}

/// Driving ports and the seed repository bound to one store.
#[derive(Clone)]
pub struct BoardBackend {
    posts_query: Arc<dyn PostsQuery>,
    posts_command: Arc<dyn PostsCommand>,
    seed_repository: Arc<dyn BoardSeedRepository>,
}

impl BoardBackend {
    /// Back every port with one shared in-memory store.
    ///
    /// # Examples
    /// ```
    /// use backend::bootstrap::BoardBackend;
    ///
    /// let backend = BoardBackend::in_memory();
    /// let _state = backend.http_state();
    /// ```
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryBoardStore::new());
        let service = Arc::new(BoardService::new(store.clone(), store.clone()));
        Self {
            posts_query: service.clone(),
            posts_command: service,
            seed_repository: store,
        }
    }

    /// Back every port with Diesel repositories sharing `pool`.
    pub fn diesel(pool: DbPool) -> Self {
        let service = Arc::new(BoardService::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPostRepository::new(pool.clone())),
        ));
        Self {
            posts_query: service.clone(),
            posts_command: service,
            seed_repository: Arc::new(DieselBoardSeedRepository::new(pool)),
        }
    }

    /// Handler state over this backend's driving ports.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(self.posts_query.clone(), self.posts_command.clone())
    }

    /// Seeder writing through this backend's seed repository.
    pub fn seeder(&self) -> BoardSeeder {
        BoardSeeder::new(self.seed_repository.clone())
    }
}

/// Build the backend described by `settings`.
///
/// With a database URL the schema is migrated and a pool is opened; without
/// one the in-memory store is used.
pub async fn connect_backend(settings: &ServerSettings) -> Result<BoardBackend, StartupError> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; using the in-memory store");
        return Ok(BoardBackend::in_memory());
    };

    run_migrations(&database_url).await?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await?;
    info!(
        max_connections = settings.db_max_connections(),
        "database pool ready"
    );
    Ok(BoardBackend::diesel(pool))
}

/// Seed the store when enabled.
///
/// Returns `None` when seeding is disabled.
///
/// # Examples
/// ```
/// use backend::bootstrap::{BoardBackend, seed_board_on_startup};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = BoardBackend::in_memory();
/// let outcome = seed_board_on_startup(true, &backend).await?;
/// assert_eq!(outcome.map(|o| o.users_created), Some(3));
/// # Ok(())
/// # }
/// ```
pub async fn seed_board_on_startup(
    enabled: bool,
    backend: &BoardBackend,
) -> Result<Option<SeedOutcome>, StartupError> {
    if !enabled {
        info!(reason = "disabled", "board seeding skipped");
        return Ok(None);
    }
    backend
        .seeder()
        .seed_if_empty()
        .await
        .map(Some)
        .map_err(StartupError::Seeding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[actix_rt::test]
    async fn disabled_seeding_leaves_store_empty() {
        let backend = BoardBackend::in_memory();

        let outcome = seed_board_on_startup(false, &backend)
            .await
            .expect("skipped");

        assert!(outcome.is_none());
        let posts = backend.posts_query.list_posts().await.expect("list");
        assert!(posts.is_empty());
    }

    #[rstest]
    #[actix_rt::test]
    async fn repeated_startup_seeds_once() {
        let backend = BoardBackend::in_memory();

        let first = seed_board_on_startup(true, &backend)
            .await
            .expect("first seed")
            .expect("enabled");
        let second = seed_board_on_startup(true, &backend)
            .await
            .expect("second seed")
            .expect("enabled");

        assert_eq!(first.users_created, 3);
        assert!(first.post_created);
        assert!(second.is_noop());
        let posts = backend.posts_query.list_posts().await.expect("list");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts.first().map(|p| p.comments().len()), Some(2));
    }
}
