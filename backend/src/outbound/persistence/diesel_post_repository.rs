//! PostgreSQL-backed `PostRepository` adapter.
//!
//! Every read hydrates the aggregate in two queries: posts joined with their
//! authors, then the comments of those posts joined with their authors,
//! ordered by comment id. Vote increments are single `UPDATE ... RETURNING`
//! statements so concurrent votes are never lost.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{
    Comment, CommentDraft, CommentId, Post, PostDraft, PostId, User, Vote, VoteTally,
};

use super::diesel_error_mapping::{counter, map_diesel_error, map_pool_error};
use super::diesel_user_repository::user_from_row;
use super::models::{CommentRow, NewCommentRow, NewPostRow, PostRow, UserRow};
use super::pool::DbPool;
use super::schema::{comments, posts, users};

/// Diesel-backed post and comment persistence.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type PostResult<T> = Result<T, PostPersistenceError>;

fn tally(upvotes: i32, downvotes: i32) -> PostResult<VoteTally> {
    Ok(VoteTally::new(
        counter(upvotes, "upvotes")?,
        counter(downvotes, "downvotes")?,
    ))
}

fn author(row: UserRow) -> PostResult<User> {
    user_from_row(row).map_err(PostPersistenceError::query)
}

fn comment_from_rows(row: CommentRow, user: UserRow) -> PostResult<Comment> {
    Ok(Comment::new(
        CommentId::new(row.id),
        PostId::new(row.post_id),
        row.content,
        author(user)?,
        tally(row.upvotes, row.downvotes)?,
    ))
}

fn post_from_rows(row: PostRow, user: UserRow, comments: Vec<Comment>) -> PostResult<Post> {
    Ok(Post::new(
        PostId::new(row.id),
        row.title,
        row.content,
        author(user)?,
        tally(row.upvotes, row.downvotes)?,
        comments,
    ))
}

async fn load_author(conn: &mut AsyncPgConnection, user_id: i32) -> PostResult<UserRow> {
    users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .map_err(map_diesel_error)
}

/// Attach comments and authors to already loaded post rows, keeping the
/// input order.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<(PostRow, UserRow)>,
) -> PostResult<Vec<Post>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let post_ids: Vec<i32> = rows.iter().map(|(post, _)| post.id).collect();

    let comment_rows: Vec<(CommentRow, UserRow)> = comments::table
        .inner_join(users::table)
        .filter(comments::post_id.eq_any(&post_ids))
        .order(comments::id.asc())
        .select((CommentRow::as_select(), UserRow::as_select()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut by_post: HashMap<i32, Vec<Comment>> = HashMap::new();
    for (comment, user) in comment_rows {
        let post_id = comment.post_id;
        by_post
            .entry(post_id)
            .or_default()
            .push(comment_from_rows(comment, user)?);
    }

    rows.into_iter()
        .map(|(post, user)| {
            let comments = by_post.remove(&post.id).unwrap_or_default();
            post_from_rows(post, user, comments)
        })
        .collect()
}

async fn load_post(conn: &mut AsyncPgConnection, id: i32) -> PostResult<Option<Post>> {
    let row: Option<(PostRow, UserRow)> = posts::table
        .inner_join(users::table)
        .filter(posts::id.eq(id))
        .select((PostRow::as_select(), UserRow::as_select()))
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(hydrate(conn, vec![row]).await?.pop())
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list_with_comments(&self) -> PostResult<Vec<Post>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, UserRow)> = posts::table
            .inner_join(users::table)
            .order(posts::id.asc())
            .select((PostRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        hydrate(&mut conn, rows).await
    }

    async fn find_with_comments(&self, id: PostId) -> PostResult<Option<Post>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_post(&mut conn, id.get()).await
    }

    async fn exists(&self, id: PostId) -> PostResult<bool> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(posts::table.find(id.get())))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert(&self, draft: &PostDraft) -> PostResult<Post> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PostRow = diesel::insert_into(posts::table)
            .values(NewPostRow {
                title: draft.title.as_str(),
                content: draft.content.as_str(),
                user_id: draft.author_id.get(),
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let user = load_author(&mut conn, row.user_id).await?;
        post_from_rows(row, user, Vec::new())
    }

    async fn increment_vote(&self, id: PostId, vote: Vote) -> PostResult<Option<Post>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = posts::table.find(id.get());

        let updated: Option<i32> = match vote {
            Vote::Up => {
                diesel::update(target)
                    .set(posts::upvotes.eq(posts::upvotes + 1))
                    .returning(posts::id)
                    .get_result(&mut conn)
                    .await
            }
            Vote::Down => {
                diesel::update(target)
                    .set(posts::downvotes.eq(posts::downvotes + 1))
                    .returning(posts::id)
                    .get_result(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;

        match updated {
            Some(post_id) => load_post(&mut conn, post_id).await,
            None => Ok(None),
        }
    }

    async fn insert_comment(&self, draft: &CommentDraft) -> PostResult<Comment> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CommentRow = diesel::insert_into(comments::table)
            .values(NewCommentRow {
                post_id: draft.post_id.get(),
                user_id: draft.author_id.get(),
                content: draft.content.as_str(),
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let user = load_author(&mut conn, row.user_id).await?;
        comment_from_rows(row, user)
    }

    async fn increment_comment_vote(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        vote: Vote,
    ) -> PostResult<Option<Comment>> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = comments::table
            .filter(comments::id.eq(comment_id.get()))
            .filter(comments::post_id.eq(post_id.get()));

        let updated: Option<CommentRow> = match vote {
            Vote::Up => {
                diesel::update(target)
                    .set(comments::upvotes.eq(comments::upvotes + 1))
                    .returning(CommentRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
            Vote::Down => {
                diesel::update(target)
                    .set(comments::downvotes.eq(comments::downvotes + 1))
                    .returning(CommentRow::as_returning())
                    .get_result(&mut conn)
                    .await
            }
        }
        .optional()
        .map_err(map_diesel_error)?;

        let Some(row) = updated else {
            return Ok(None);
        };
        let user = load_author(&mut conn, row.user_id).await?;
        comment_from_rows(row, user).map(Some)
    }
}
