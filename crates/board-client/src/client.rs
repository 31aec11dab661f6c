//! Reqwest-backed API client.
//!
//! Each method performs one HTTP round trip. Success bodies are decoded into
//! the client entity types; every other outcome is a [`ClientError`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, map_status_error};
use crate::json::decode;
use crate::model::{Comment, NewComment, NewPost, Post};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Async client for the board API rooted at one base URL.
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: Client,
    base: Url,
}

/// Parse `raw` and make sure relative joins stay under its path.
fn normalise_base(raw: &str) -> Result<Url, ClientError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|err| ClientError::invalid_url(format!("{raw}: {err}")))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(ClientError::invalid_url(format!(
            "{raw}: expected an http or https URL"
        )));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

impl BoardClient {
    /// Build a client with a default HTTP stack and request timeout.
    ///
    /// # Errors
    /// [`ClientError::InvalidUrl`] when `base_url` is not an http(s) URL;
    /// [`ClientError::Transport`] when the HTTP stack cannot be initialised.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_http_client(base_url, http)
    }

    /// Build a client around a caller-configured [`reqwest::Client`].
    ///
    /// # Errors
    /// [`ClientError::InvalidUrl`] when `base_url` is not an http(s) URL.
    pub fn with_http_client(base_url: &str, http: Client) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base: normalise_base(base_url)?,
        })
    }

    /// Base URL every endpoint path is joined to. Always ends in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|err| ClientError::invalid_url(format!("{path}: {err}")))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "board API responded");
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        decode(&body)
    }

    /// `GET /api/posts`
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let url = self.endpoint("api/posts")?;
        self.send(self.http.get(url)).await
    }

    /// `GET /api/posts/{id}`
    pub async fn get_post(&self, id: i32) -> Result<Post, ClientError> {
        let url = self.endpoint(&format!("api/posts/{id}"))?;
        self.send(self.http.get(url)).await
    }

    /// `PUT /api/posts/{id}/upvote`
    pub async fn upvote_post(&self, id: i32) -> Result<Post, ClientError> {
        let url = self.endpoint(&format!("api/posts/{id}/upvote"))?;
        self.send(self.http.put(url)).await
    }

    /// `PUT /api/posts/{id}/downvote`
    pub async fn downvote_post(&self, id: i32) -> Result<Post, ClientError> {
        let url = self.endpoint(&format!("api/posts/{id}/downvote"))?;
        self.send(self.http.put(url)).await
    }

    /// `PUT /api/posts/{post_id}/comments/{comment_id}/upvote`
    pub async fn upvote_comment(
        &self,
        post_id: i32,
        comment_id: i32,
    ) -> Result<Comment, ClientError> {
        let url = self.endpoint(&format!("api/posts/{post_id}/comments/{comment_id}/upvote"))?;
        self.send(self.http.put(url)).await
    }

    /// `PUT /api/posts/{post_id}/comments/{comment_id}/downvote`
    pub async fn downvote_comment(
        &self,
        post_id: i32,
        comment_id: i32,
    ) -> Result<Comment, ClientError> {
        let url = self.endpoint(&format!(
            "api/posts/{post_id}/comments/{comment_id}/downvote"
        ))?;
        self.send(self.http.put(url)).await
    }

    /// `POST /api/posts`. The author must exist.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: i32,
    ) -> Result<Post, ClientError> {
        let url = self.endpoint("api/posts")?;
        let body = NewPost {
            title,
            content,
            user_id,
        };
        self.send(self.http.post(url).json(&body)).await
    }

    /// `POST /api/posts/{post_id}/comments`. Author and post must exist.
    pub async fn create_comment(
        &self,
        content: &str,
        user_id: i32,
        post_id: i32,
    ) -> Result<Comment, ClientError> {
        let url = self.endpoint(&format!("api/posts/{post_id}/comments"))?;
        let body = NewComment {
            content,
            user_id,
            post_id,
        };
        self.send(self.http.post(url).json(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/")]
    #[case("http://localhost:8080/", "http://localhost:8080/")]
    #[case(" https://board.example/forum ", "https://board.example/forum/")]
    fn base_url_gains_trailing_slash(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_base(raw).expect("valid").as_str(), expected);
    }

    #[rstest]
    #[case("localhost:8080")]
    #[case("not a url")]
    #[case("mailto:board@example.com")]
    #[case("ftp://board.example/")]
    fn unusable_base_urls_are_rejected(#[case] raw: &str) {
        let err = normalise_base(raw).expect_err("rejected");
        assert!(matches!(err, ClientError::InvalidUrl { .. }), "got {err:?}");
    }

    #[test]
    fn endpoints_nest_under_base_path() {
        let client = BoardClient::with_http_client("http://board.example/forum", Client::new())
            .expect("valid base");

        let url = client
            .endpoint("api/posts/3/comments/4/upvote")
            .expect("joins");

        assert_eq!(
            url.as_str(),
            "http://board.example/forum/api/posts/3/comments/4/upvote"
        );
    }
}
