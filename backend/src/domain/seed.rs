//! Fixed seed data and the service that applies it to an empty store.

use std::sync::Arc;

use tracing::info;

use super::ports::{BoardSeedRepository, BoardSeedRepositoryError, SeedOutcome};
use super::{Error, UserValidationError, Username};

const SEED_USERNAMES: [&str; 3] = ["Kristian", "Søren", "Mette"];
const SEED_POST_TITLE: &str = "Første tråd";
const SEED_POST_CONTENT: &str = "Velkommen til den første tråd!";
const SEED_COMMENTS: [&str; 2] = ["Første kommentar", "Anden kommentar"];

/// The seed post. It is authored, together with all its comments, by the
/// user with the lowest identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPost {
    pub title: String,
    pub content: String,
    pub comments: Vec<String>,
}

/// Rows inserted into an empty store.
///
/// Users are inserted only when the store has no users; the post only when it
/// has no posts. Both checks are made by the repository in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSeed {
    pub usernames: Vec<Username>,
    pub post: SeedPost,
}

impl BoardSeed {
    /// The seed shipped with the board: three users and one welcome thread.
    pub fn standard() -> Result<Self, UserValidationError> {
        let usernames = SEED_USERNAMES
            .iter()
            .map(|name| Username::new(*name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            usernames,
            post: SeedPost {
                title: SEED_POST_TITLE.to_owned(),
                content: SEED_POST_CONTENT.to_owned(),
                comments: SEED_COMMENTS.iter().map(|c| (*c).to_owned()).collect(),
            },
        })
    }
}

/// Application service applying [`BoardSeed`] data.
#[derive(Clone)]
pub struct BoardSeeder {
    repository: Arc<dyn BoardSeedRepository>,
}

impl BoardSeeder {
    /// Seeder writing through `repository`.
    pub fn new(repository: Arc<dyn BoardSeedRepository>) -> Self {
        Self { repository }
    }

    /// Insert the standard seed where the store is empty. Safe to call on
    /// every startup.
    pub async fn seed_if_empty(&self) -> Result<SeedOutcome, Error> {
        let seed = BoardSeed::standard()
            .map_err(|err| Error::internal(format!("invalid seed data: {err}")))?;
        self.seed_with(&seed).await
    }

    /// Insert `seed` where the store is empty.
    pub async fn seed_with(&self, seed: &BoardSeed) -> Result<SeedOutcome, Error> {
        let outcome = self
            .repository
            .apply_seed(seed)
            .await
            .map_err(map_seed_error)?;
        if outcome.is_noop() {
            info!("store already populated; seed skipped");
        } else {
            info!(
                users_created = outcome.users_created,
                post_created = outcome.post_created,
                "seed data applied"
            );
        }
        Ok(outcome)
    }
}

fn map_seed_error(error: BoardSeedRepositoryError) -> Error {
    match error {
        BoardSeedRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("seed repository unavailable: {message}"))
        }
        BoardSeedRepositoryError::Query { message } => {
            Error::internal(format!("seed repository error: {message}"))
        }
        BoardSeedRepositoryError::MissingAuthor => {
            Error::internal("seed post requires at least one user")
        }
    }
}
