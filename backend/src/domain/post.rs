//! Posts, their comments, and the drafts used to create them.
//!
//! A [`Post`] is the aggregate root: comments are only ever reached through
//! the post they belong to, and a post always carries its full comment list in
//! insertion order (oldest first).

use std::fmt;

use super::{User, UserId, VoteTally};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Access the raw identifier.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Store-assigned post identifier.
    PostId
}

numeric_id! {
    /// Store-assigned comment identifier.
    CommentId
}

/// Reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    post_id: PostId,
    content: String,
    author: User,
    votes: VoteTally,
}

impl Comment {
    /// Assemble a comment from stored parts.
    pub fn new(
        id: CommentId,
        post_id: PostId,
        content: impl Into<String>,
        author: User,
        votes: VoteTally,
    ) -> Self {
        Self {
            id,
            post_id,
            content: content.into(),
            author,
            votes,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Post this comment belongs to.
    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    /// Body text.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Writer, resolved at load time.
    pub fn author(&self) -> &User {
        &self.author
    }

    /// Current vote counters.
    pub fn votes(&self) -> VoteTally {
        self.votes
    }
}

/// Top-level discussion thread.
///
/// ## Invariants
/// - `author` is always present; posts cannot exist without an owning user.
/// - `comments` are ordered by insertion, most recent last, and all carry
///   `post_id == id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    author: User,
    votes: VoteTally,
    comments: Vec<Comment>,
}

impl Post {
    /// Assemble a post from stored parts; `comments` must already be oldest first.
    pub fn new(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        author: User,
        votes: VoteTally,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author,
            votes,
            comments,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Thread title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Body text.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Writer, resolved at load time.
    pub fn author(&self) -> &User {
        &self.author
    }

    /// Current vote counters.
    pub fn votes(&self) -> VoteTally {
        self.votes
    }

    /// Comments, oldest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Most recently added comment, if any.
    pub fn latest_comment(&self) -> Option<&Comment> {
        self.comments.last()
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    /// Thread title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Existing user who writes the post.
    pub author_id: UserId,
}

/// Input for appending a comment to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    /// Post the comment is appended to.
    pub post_id: PostId,
    /// Existing user who writes the comment.
    pub author_id: UserId,
    /// Comment text.
    pub content: String,
}
