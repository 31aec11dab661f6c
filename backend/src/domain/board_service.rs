//! Board application service.
//!
//! Implements the [`PostsQuery`] and [`PostsCommand`] driving ports on top of
//! the user and post repositories. Reference checks run here so adapters only
//! ever see drafts whose author and parent post existed at check time.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    PostPersistenceError, PostRepository, PostsCommand, PostsQuery, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Comment, CommentDraft, CommentId, Error, Post, PostDraft, PostId, UserId, Vote};

/// Service implementing the board driving ports.
#[derive(Clone)]
pub struct BoardService<U, P> {
    users: Arc<U>,
    posts: Arc<P>,
}

impl<U, P> BoardService<U, P> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, posts: Arc<P>) -> Self {
        Self { users, posts }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_post_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

fn post_not_found(id: PostId) -> Error {
    Error::not_found(format!("post {id} not found"))
}

impl<U, P> BoardService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn user_exists(&self, id: UserId) -> Result<bool, Error> {
        let user = self.users.find_by_id(id).await.map_err(map_user_error)?;
        Ok(user.is_some())
    }
}

#[async_trait]
impl<U, P> PostsQuery for BoardService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.posts.list_with_comments().await.map_err(map_post_error)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, Error> {
        self.posts
            .find_with_comments(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| post_not_found(id))
    }
}

#[async_trait]
impl<U, P> PostsCommand for BoardService<U, P>
where
    U: UserRepository,
    P: PostRepository,
{
    async fn create_post(&self, draft: PostDraft) -> Result<Post, Error> {
        if !self.user_exists(draft.author_id).await? {
            return Err(Error::invalid_request("user not found")
                .with_details(json!({ "missing": ["userId"], "userId": draft.author_id.get() })));
        }
        let post = self.posts.insert(&draft).await.map_err(map_post_error)?;
        info!(post_id = %post.id(), user_id = %draft.author_id, "post created");
        Ok(post)
    }

    async fn create_comment(&self, draft: CommentDraft) -> Result<Comment, Error> {
        let user_found = self.user_exists(draft.author_id).await?;
        let post_found = self
            .posts
            .exists(draft.post_id)
            .await
            .map_err(map_post_error)?;
        if !(user_found && post_found) {
            let missing: Vec<&str> = [(!user_found, "userId"), (!post_found, "postId")]
                .into_iter()
                .filter_map(|(absent, field)| absent.then_some(field))
                .collect();
            return Err(Error::invalid_request("user or post not found").with_details(json!({
                "missing": missing,
                "userId": draft.author_id.get(),
                "postId": draft.post_id.get(),
            })));
        }
        let comment = self
            .posts
            .insert_comment(&draft)
            .await
            .map_err(map_post_error)?;
        info!(
            post_id = %draft.post_id,
            comment_id = %comment.id(),
            "comment created"
        );
        Ok(comment)
    }

    async fn vote_post(&self, id: PostId, vote: Vote) -> Result<Post, Error> {
        self.posts
            .increment_vote(id, vote)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| post_not_found(id))
    }

    async fn vote_comment(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        vote: Vote,
    ) -> Result<Comment, Error> {
        self.posts
            .increment_comment_vote(post_id, comment_id, vote)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| {
                Error::not_found(format!("comment {comment_id} not found on post {post_id}"))
            })
    }
}

#[cfg(test)]
#[path = "board_service_tests.rs"]
mod tests;
