//! Driving port for creating posts and comments and for voting.

use async_trait::async_trait;

use crate::domain::{Comment, CommentDraft, CommentId, Error, Post, PostDraft, PostId, Vote};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post. Fails with `invalid_request` when the author is unknown.
    async fn create_post(&self, draft: PostDraft) -> Result<Post, Error>;

    /// Append a comment. Fails with `invalid_request` when the post or the
    /// author is unknown.
    async fn create_comment(&self, draft: CommentDraft) -> Result<Comment, Error>;

    /// Record one vote on a post and return the updated post.
    async fn vote_post(&self, id: PostId, vote: Vote) -> Result<Post, Error>;

    /// Record one vote on a comment of the given post and return the
    /// updated comment.
    async fn vote_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        vote: Vote,
    ) -> Result<Comment, Error>;
}
