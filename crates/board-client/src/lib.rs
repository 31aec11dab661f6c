//! Typed client for the discussion board HTTP API.
//!
//! [`BoardClient`] wraps each endpoint as an async method returning
//! client-side [`Post`], [`Comment`], and [`User`] values. Response property
//! names are matched case-insensitively, and non-2xx responses are decoded from
//! the server's structured error body into a [`ClientError`].
//!
//! # Example
//!
//! ```no_run
//! use board_client::BoardClient;
//!
//! # async fn run() -> Result<(), board_client::ClientError> {
//! let client = BoardClient::new("http://localhost:8080")?;
//! let post = client.create_post("T", "C", 1).await?;
//! let post = client.upvote_post(post.id).await?;
//! assert_eq!(post.upvotes, 1);
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod client;
mod error;
mod json;
mod model;

pub use client::BoardClient;
pub use error::ClientError;
pub use model::{Comment, Post, User};
