//! Port abstraction for post and comment persistence.
//!
//! Adapters return fully hydrated [`Post`] values: author attached, vote
//! counters current, and comments ordered oldest first. Vote increments must be
//! atomic at the store so concurrent votes are never lost.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDraft, CommentId, Post, PostDraft, PostId, Vote};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post with its author and comments, ordered by id ascending.
    async fn list_with_comments(&self) -> Result<Vec<Post>, PostPersistenceError>;

    /// One post with its author and comments.
    async fn find_with_comments(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError>;

    /// Whether a post with `id` exists.
    async fn exists(&self, id: PostId) -> Result<bool, PostPersistenceError>;

    /// Persist a new post with zeroed counters. The author must exist.
    async fn insert(&self, draft: &PostDraft) -> Result<Post, PostPersistenceError>;

    /// Add one vote to a post and return the reloaded post, or `None` when
    /// the post does not exist.
    async fn increment_vote(
        &self,
        id: PostId,
        vote: Vote,
    ) -> Result<Option<Post>, PostPersistenceError>;

    /// Persist a new comment with zeroed counters. Post and author must exist.
    async fn insert_comment(&self, draft: &CommentDraft) -> Result<Comment, PostPersistenceError>;

    /// Add one vote to a comment of the given post.
    ///
    /// Returns `None` when the post does not exist or the comment does not
    /// belong to it.
    async fn increment_comment_vote(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        vote: Vote,
    ) -> Result<Option<Comment>, PostPersistenceError>;
}
