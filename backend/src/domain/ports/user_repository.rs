//! Driven port for looking up board users.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures of a [`UserRepository`] adapter.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user store unavailable: {message}",
        /// The store answered with an error or a row that is not a valid user.
        Query { message: String } => "user lookup failed: {message}",
    }
}

/// Read access to board users. Users are only ever created by seeding, so the
/// port has no write side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier; `Ok(None)` when no such user exists.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}
