//! Driving port for reading posts.
//!
//! HTTP handlers depend on this port rather than on the repositories so they
//! stay free of persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts with comments, ordered by id ascending.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// One post with comments; `not_found` when absent.
    async fn get_post(&self, id: PostId) -> Result<Post, Error>;
}
