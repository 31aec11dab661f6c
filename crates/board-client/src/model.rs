//! Entities as seen by API consumers.
//!
//! Field names are the lowercase forms of the wire properties; the decoder
//! lowercases every key before deserialising.

use serde::{Deserialize, Serialize};

/// Author of a post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub user: User,
}

/// A post with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user: User,
    pub upvotes: u32,
    pub downvotes: u32,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Most recently added comment.
    #[must_use]
    pub fn latest_comment(&self) -> Option<&Comment> {
        self.comments.last()
    }
}

/// Structured error body returned by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: String,
    pub(crate) message: String,
    #[serde(default, rename = "traceid")]
    pub(crate) trace_id: Option<String>,
    #[serde(default)]
    pub(crate) details: Option<serde_json::Value>,
}

/// Body of `POST /api/posts`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewPost<'a> {
    pub(crate) title: &'a str,
    pub(crate) content: &'a str,
    pub(crate) user_id: i32,
}

/// Body of `POST /api/posts/{id}/comments`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewComment<'a> {
    pub(crate) content: &'a str,
    pub(crate) user_id: i32,
    pub(crate) post_id: i32,
}
