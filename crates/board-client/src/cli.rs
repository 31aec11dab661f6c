//! Command-line front end for [`crate::BoardClient`].
//!
//! Parsing and dispatch live here so the `board` binary stays a thin shell and
//! the command table can be tested without spawning a process.

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{BoardClient, ClientError, Comment, Post};

/// Default API location for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Talk to a discussion board server.
#[derive(Debug, Parser)]
#[command(name = "board", version, about)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "BOARD_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    #[command(subcommand)]
    pub command: Command,
}

/// One API call.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every post with its comments.
    List,
    /// Show one post.
    Show { id: i32 },
    /// Upvote a post.
    Upvote { id: i32 },
    /// Downvote a post.
    Downvote { id: i32 },
    /// Upvote a comment on a post.
    UpvoteComment { post_id: i32, comment_id: i32 },
    /// Downvote a comment on a post.
    DownvoteComment { post_id: i32, comment_id: i32 },
    /// Create a post.
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        user_id: i32,
    },
    /// Comment on a post.
    Comment {
        post_id: i32,
        #[arg(long)]
        content: String,
        #[arg(long)]
        user_id: i32,
    },
}

/// Entity produced by a command; serialises as the bare entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Result of `list`.
    Posts(Vec<Post>),
    /// A single post.
    Post(Post),
    /// A single comment.
    Comment(Comment),
}

/// Run `command` and return the resulting entity.
pub async fn execute(client: &BoardClient, command: &Command) -> Result<Output, ClientError> {
    Ok(match command {
        Command::List => Output::Posts(client.list_posts().await?),
        Command::Show { id } => Output::Post(client.get_post(*id).await?),
        Command::Upvote { id } => Output::Post(client.upvote_post(*id).await?),
        Command::Downvote { id } => Output::Post(client.downvote_post(*id).await?),
        Command::UpvoteComment {
            post_id,
            comment_id,
        } => Output::Comment(client.upvote_comment(*post_id, *comment_id).await?),
        Command::DownvoteComment {
            post_id,
            comment_id,
        } => Output::Comment(client.downvote_comment(*post_id, *comment_id).await?),
        Command::Post {
            title,
            content,
            user_id,
        } => Output::Post(client.create_post(title, content, *user_id).await?),
        Command::Comment {
            post_id,
            content,
            user_id,
        } => Output::Comment(client.create_comment(content, *user_id, *post_id).await?),
    })
}
