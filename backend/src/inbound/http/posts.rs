//! Posts API handlers.
//!
//! ```text
//! GET  /api/posts
//! GET  /api/posts/{id}
//! PUT  /api/posts/{id}/upvote
//! PUT  /api/posts/{id}/downvote
//! PUT  /api/posts/{postId}/comments/{commentId}/upvote
//! PUT  /api/posts/{postId}/comments/{commentId}/downvote
//! POST /api/posts                {"title":"T","content":"C","userId":1}
//! POST /api/posts/{id}/comments  {"content":"hi","userId":1}
//! ```

use actix_web::{get, post, put, web};
use serde_json::json;

use super::ApiResult;
use super::json::CaseInsensitiveJson;
use super::posts_dto::{CommentResponse, CreateCommentRequest, CreatePostRequest, PostResponse};
use super::schemas::ErrorSchema;
use super::state::HttpState;
use crate::domain::{CommentDraft, CommentId, Error, PostDraft, PostId, UserId, Vote};

/// List every post with its comments, ordered by id.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts", body = [PostResponse]),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(posts.iter().map(PostResponse::from).collect()))
}

/// Fetch one post with its comments.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostResponse>> {
    let post = state.posts_query.get_post(PostId::new(path.into_inner())).await?;
    Ok(web::Json(PostResponse::from(&post)))
}

async fn vote_post(state: &HttpState, id: i32, vote: Vote) -> ApiResult<web::Json<PostResponse>> {
    let post = state.posts_command.vote_post(PostId::new(id), vote).await?;
    Ok(web::Json(PostResponse::from(&post)))
}

/// Add one upvote to a post.
#[utoipa::path(
    put,
    path = "/api/posts/{id}/upvote",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "upvotePost"
)]
#[put("/posts/{id}/upvote")]
pub async fn upvote_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostResponse>> {
    vote_post(&state, path.into_inner(), Vote::Up).await
}

/// Add one downvote to a post.
#[utoipa::path(
    put,
    path = "/api/posts/{id}/downvote",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "downvotePost"
)]
#[put("/posts/{id}/downvote")]
pub async fn downvote_post(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostResponse>> {
    vote_post(&state, path.into_inner(), Vote::Down).await
}

async fn vote_comment(
    state: &HttpState,
    (post_id, comment_id): (i32, i32),
    vote: Vote,
) -> ApiResult<web::Json<CommentResponse>> {
    let comment = state
        .posts_command
        .vote_comment(PostId::new(post_id), CommentId::new(comment_id), vote)
        .await?;
    Ok(web::Json(CommentResponse::from(&comment)))
}

/// Add one upvote to a comment of the given post.
#[utoipa::path(
    put,
    path = "/api/posts/{postId}/comments/{commentId}/upvote",
    params(
        ("postId" = i32, Path, description = "Parent post identifier"),
        ("commentId" = i32, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 404, description = "No such comment on that post", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "upvoteComment"
)]
#[put("/posts/{postId}/comments/{commentId}/upvote")]
pub async fn upvote_comment(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<web::Json<CommentResponse>> {
    vote_comment(&state, path.into_inner(), Vote::Up).await
}

/// Add one downvote to a comment of the given post.
#[utoipa::path(
    put,
    path = "/api/posts/{postId}/comments/{commentId}/downvote",
    params(
        ("postId" = i32, Path, description = "Parent post identifier"),
        ("commentId" = i32, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 404, description = "No such comment on that post", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "downvoteComment"
)]
#[put("/posts/{postId}/comments/{commentId}/downvote")]
pub async fn downvote_comment(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<web::Json<CommentResponse>> {
    vote_comment(&state, path.into_inner(), Vote::Down).await
}

/// Create a post with zero votes and no comments.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Created post", body = PostResponse),
        (status = 400, description = "Malformed body or unknown user", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: CaseInsensitiveJson<CreatePostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let CreatePostRequest {
        title,
        content,
        user_id,
    } = payload.into_inner();
    let post = state
        .posts_command
        .create_post(PostDraft {
            title,
            content,
            author_id: UserId::new(user_id),
        })
        .await?;
    Ok(web::Json(PostResponse::from(&post)))
}

/// Append a comment to a post.
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    params(("id" = i32, Path, description = "Post identifier")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Created comment", body = CommentResponse),
        (status = 400, description = "Malformed body, unknown user or post, or mismatched postId", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/posts/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: CaseInsensitiveJson<CreateCommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let path_post_id = path.into_inner();
    let CreateCommentRequest {
        content,
        user_id,
        post_id,
    } = payload.into_inner();
    if let Some(body_post_id) = post_id.filter(|id| *id != path_post_id) {
        return Err(Error::invalid_request("postId does not match the path")
            .with_details(json!({ "pathPostId": path_post_id, "bodyPostId": body_post_id })));
    }
    let comment = state
        .posts_command
        .create_comment(CommentDraft {
            post_id: PostId::new(path_post_id),
            author_id: UserId::new(user_id),
            content,
        })
        .await?;
    Ok(web::Json(CommentResponse::from(&comment)))
}

/// Register every posts handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::posts;
///
/// let app = App::new().service(web::scope("/api").configure(posts::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_posts)
        .service(create_post)
        .service(get_post)
        .service(upvote_post)
        .service(downvote_post)
        .service(create_comment)
        .service(upvote_comment)
        .service(downvote_comment);
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
