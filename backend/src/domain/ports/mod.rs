//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod board_seed_repository;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_repository;

#[cfg(test)]
pub use board_seed_repository::MockBoardSeedRepository;
pub use board_seed_repository::{BoardSeedRepository, BoardSeedRepositoryError, SeedOutcome};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostPersistenceError, PostRepository};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::PostsCommand;
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
