//! PostgreSQL-backed seed adapter.
//!
//! The emptiness checks and inserts run in one transaction that first takes a
//! `SHARE ROW EXCLUSIVE` lock on `users` and `posts`. The lock conflicts with
//! itself, so two replicas starting together serialise and the second sees
//! the first one's rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::BoardSeed;
use crate::domain::ports::{BoardSeedRepository, BoardSeedRepositoryError, SeedOutcome};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewCommentRow, NewPostRow, NewUserRow};
use super::pool::DbPool;
use super::schema::{comments, posts, users};

/// Diesel-backed implementation of [`BoardSeedRepository`].
#[derive(Clone)]
pub struct DieselBoardSeedRepository {
    pool: DbPool,
}

impl DieselBoardSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug)]
enum SeedTxError {
    Diesel(diesel::result::Error),
    MissingAuthor,
}

impl From<diesel::result::Error> for SeedTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<SeedTxError> for BoardSeedRepositoryError {
    fn from(error: SeedTxError) -> Self {
        match error {
            SeedTxError::Diesel(err) => map_diesel_error(err),
            SeedTxError::MissingAuthor => Self::missing_author(),
        }
    }
}

async fn seed_users(conn: &mut AsyncPgConnection, seed: &BoardSeed) -> Result<usize, SeedTxError> {
    let existing: i64 = users::table.count().get_result(conn).await?;
    if existing > 0 {
        return Ok(0);
    }
    let rows: Vec<NewUserRow<'_>> = seed
        .usernames
        .iter()
        .map(|name| NewUserRow {
            username: name.as_ref(),
        })
        .collect();
    Ok(diesel::insert_into(users::table)
        .values(&rows)
        .execute(conn)
        .await?)
}

async fn seed_post(conn: &mut AsyncPgConnection, seed: &BoardSeed) -> Result<bool, SeedTxError> {
    let existing: i64 = posts::table.count().get_result(conn).await?;
    if existing > 0 {
        return Ok(false);
    }
    let author_id: i32 = users::table
        .select(users::id)
        .order(users::id.asc())
        .first(conn)
        .await
        .optional()?
        .ok_or(SeedTxError::MissingAuthor)?;

    let post_id: i32 = diesel::insert_into(posts::table)
        .values(NewPostRow {
            title: seed.post.title.as_str(),
            content: seed.post.content.as_str(),
            user_id: author_id,
        })
        .returning(posts::id)
        .get_result(conn)
        .await?;

    let comment_rows: Vec<NewCommentRow<'_>> = seed
        .post
        .comments
        .iter()
        .map(|content| NewCommentRow {
            post_id,
            user_id: author_id,
            content: content.as_str(),
        })
        .collect();
    if !comment_rows.is_empty() {
        diesel::insert_into(comments::table)
            .values(&comment_rows)
            .execute(conn)
            .await?;
    }
    Ok(true)
}

#[async_trait]
impl BoardSeedRepository for DieselBoardSeedRepository {
    async fn apply_seed(&self, seed: &BoardSeed) -> Result<SeedOutcome, BoardSeedRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error::<BoardSeedRepositoryError>)?;

        let outcome = conn
            .transaction::<_, SeedTxError, _>(|conn| {
                async move {
                    diesel::sql_query("LOCK TABLE users, posts IN SHARE ROW EXCLUSIVE MODE")
                        .execute(conn)
                        .await?;
                    let users_created = seed_users(conn, seed).await?;
                    let post_created = seed_post(conn, seed).await?;
                    Ok(SeedOutcome {
                        users_created,
                        post_created,
                    })
                }
                .scope_boxed()
            })
            .await?;

        Ok(outcome)
    }
}
