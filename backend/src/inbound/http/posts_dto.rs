//! Request and response bodies for the posts API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::json::JsonFields;
use crate::domain::{Comment, Post, User};

/// Author reference embedded in posts and comments.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Kristian")]
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
        }
    }
}

/// Comment as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    #[schema(example = "Første kommentar")]
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub user: UserResponse,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().get(),
            content: comment.content().to_owned(),
            upvotes: comment.votes().upvotes(),
            downvotes: comment.votes().downvotes(),
            user: comment.author().into(),
        }
    }
}

/// Post with its author and every comment, oldest first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: i32,
    #[schema(example = "Første tråd")]
    pub title: String,
    #[schema(example = "Velkommen til den første tråd!")]
    pub content: String,
    pub user: UserResponse,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comments: Vec<CommentResponse>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().get(),
            title: post.title().to_owned(),
            content: post.content().to_owned(),
            user: post.author().into(),
            upvotes: post.votes().upvotes(),
            downvotes: post.votes().downvotes(),
            comments: post.comments().iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Body of `POST /api/posts`. Property names match case-insensitively.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[schema(example = "T")]
    pub title: String,
    #[schema(example = "C")]
    pub content: String,
    /// Author; must reference an existing user.
    #[schema(example = 1)]
    pub user_id: i32,
}

impl JsonFields for CreatePostRequest {
    const FIELDS: &'static [&'static str] = &["title", "content", "userId"];
}

/// Body of `POST /api/posts/{id}/comments`.
///
/// `postId` is optional; when present it must equal the path id.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[schema(example = "hi")]
    pub content: String,
    #[schema(example = 1)]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i32>,
}

impl JsonFields for CreateCommentRequest {
    const FIELDS: &'static [&'static str] = &["content", "userId", "postId"];
}
