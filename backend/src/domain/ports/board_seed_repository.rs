//! Port abstraction for applying the startup seed.
//!
//! Adapters must check emptiness and insert in one transaction so concurrent
//! startups never double-seed.

use async_trait::async_trait;

use crate::domain::BoardSeed;

use super::define_port_error;

define_port_error! {
    /// Errors raised while applying seed data.
    pub enum BoardSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "seed connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "seed query failed: {message}",
        /// A seed post was due but no user exists to author it.
        MissingAuthor => "seed post has no author",
    }
}

/// Rows written by one seed application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Users inserted; zero when the store already had users.
    pub users_created: usize,
    /// Whether the seed post and its comments were inserted.
    pub post_created: bool,
}

impl SeedOutcome {
    /// `true` when nothing was written.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.users_created == 0 && !self.post_created
    }
}

/// Implementations must:
/// - Insert the seed users only when the users table is empty.
/// - Insert the seed post and comments only when the posts table is empty,
///   authored by the user with the lowest id.
/// - Roll back all changes if any step fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardSeedRepository: Send + Sync {
    /// Apply `seed` to whichever tables are empty.
    async fn apply_seed(&self, seed: &BoardSeed) -> Result<SeedOutcome, BoardSeedRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_default_is_noop() {
        assert!(SeedOutcome::default().is_noop());
        assert!(
            !SeedOutcome {
                users_created: 0,
                post_created: true
            }
            .is_noop()
        );
    }
}
