//! In-process board store.
//!
//! Implements every board repository port over a single mutex-guarded state so
//! the server can run without PostgreSQL. Each port call takes the lock once,
//! which makes vote increments and comment appends atomic with respect to each
//! other, matching the guarantees of the Diesel adapters.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BoardSeedRepository, BoardSeedRepositoryError, PostPersistenceError, PostRepository,
    SeedOutcome, UserPersistenceError, UserRepository,
};
use crate::domain::{
    BoardSeed, Comment, CommentDraft, CommentId, Post, PostDraft, PostId, User, UserId, Vote,
    VoteTally,
};

#[derive(Debug, Clone)]
struct StoredComment {
    id: i32,
    post_id: i32,
    user_id: i32,
    content: String,
    votes: VoteTally,
}

#[derive(Debug, Clone)]
struct StoredPost {
    id: i32,
    title: String,
    content: String,
    user_id: i32,
    votes: VoteTally,
}

#[derive(Debug, Default)]
struct BoardState {
    users: Vec<User>,
    posts: Vec<StoredPost>,
    comments: Vec<StoredComment>,
    next_user_id: i32,
    next_post_id: i32,
    next_comment_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

impl BoardState {
    fn user(&self, id: i32) -> Option<&User> {
        self.users.iter().find(|user| user.id().get() == id)
    }

    fn require_user(&self, id: i32) -> Result<User, String> {
        self.user(id)
            .cloned()
            .ok_or_else(|| format!("user {id} violates foreign key"))
    }

    fn comment(&self, stored: &StoredComment) -> Result<Comment, String> {
        Ok(Comment::new(
            CommentId::new(stored.id),
            PostId::new(stored.post_id),
            stored.content.clone(),
            self.require_user(stored.user_id)?,
            stored.votes,
        ))
    }

    fn post(&self, stored: &StoredPost) -> Result<Post, String> {
        // Comments are appended with increasing ids, so storage order is id order.
        let comments = self
            .comments
            .iter()
            .filter(|comment| comment.post_id == stored.id)
            .map(|comment| self.comment(comment))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Post::new(
            PostId::new(stored.id),
            stored.title.clone(),
            stored.content.clone(),
            self.require_user(stored.user_id)?,
            stored.votes,
            comments,
        ))
    }

    fn stored_post(&self, id: PostId) -> Option<&StoredPost> {
        self.posts.iter().find(|post| post.id == id.get())
    }

    fn insert_post(
        &mut self,
        title: &str,
        content: &str,
        user_id: i32,
    ) -> Result<StoredPost, String> {
        self.require_user(user_id)?;
        let stored = StoredPost {
            id: next_id(&mut self.next_post_id),
            title: title.to_owned(),
            content: content.to_owned(),
            user_id,
            votes: VoteTally::default(),
        };
        self.posts.push(stored.clone());
        Ok(stored)
    }

    fn insert_comment(
        &mut self,
        post_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<StoredComment, String> {
        self.require_user(user_id)?;
        if !self.posts.iter().any(|post| post.id == post_id) {
            return Err(format!("post {post_id} violates foreign key"));
        }
        let stored = StoredComment {
            id: next_id(&mut self.next_comment_id),
            post_id,
            user_id,
            content: content.to_owned(),
            votes: VoteTally::default(),
        };
        self.comments.push(stored.clone());
        Ok(stored)
    }
}

/// Mutex-guarded in-memory implementation of the board repositories.
#[derive(Debug, Default)]
pub struct InMemoryBoardStore {
    state: Mutex<BoardState>,
}

impl InMemoryBoardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BoardState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryBoardStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state.user(id.get()).cloned())
    }
}

#[async_trait]
impl PostRepository for InMemoryBoardStore {
    async fn list_with_comments(&self) -> Result<Vec<Post>, PostPersistenceError> {
        let state = self.lock().map_err(PostPersistenceError::connection)?;
        let mut posts = state
            .posts
            .iter()
            .map(|post| state.post(post))
            .collect::<Result<Vec<_>, _>>()
            .map_err(PostPersistenceError::query)?;
        posts.sort_by_key(Post::id);
        Ok(posts)
    }

    async fn find_with_comments(&self, id: PostId) -> Result<Option<Post>, PostPersistenceError> {
        let state = self.lock().map_err(PostPersistenceError::connection)?;
        state
            .stored_post(id)
            .map(|stored| state.post(stored))
            .transpose()
            .map_err(PostPersistenceError::query)
    }

    async fn exists(&self, id: PostId) -> Result<bool, PostPersistenceError> {
        let state = self.lock().map_err(PostPersistenceError::connection)?;
        Ok(state.stored_post(id).is_some())
    }

    async fn insert(&self, draft: &PostDraft) -> Result<Post, PostPersistenceError> {
        let mut state = self.lock().map_err(PostPersistenceError::connection)?;
        let stored = state
            .insert_post(&draft.title, &draft.content, draft.author_id.get())
            .map_err(PostPersistenceError::query)?;
        state.post(&stored).map_err(PostPersistenceError::query)
    }

    async fn increment_vote(
        &self,
        id: PostId,
        vote: Vote,
    ) -> Result<Option<Post>, PostPersistenceError> {
        let mut state = self.lock().map_err(PostPersistenceError::connection)?;
        let Some(stored) = state.posts.iter_mut().find(|post| post.id == id.get()) else {
            return Ok(None);
        };
        stored.votes = stored.votes.record(vote);
        let updated = stored.clone();
        state
            .post(&updated)
            .map(Some)
            .map_err(PostPersistenceError::query)
    }

    async fn insert_comment(&self, draft: &CommentDraft) -> Result<Comment, PostPersistenceError> {
        let mut state = self.lock().map_err(PostPersistenceError::connection)?;
        let stored = state
            .insert_comment(draft.post_id.get(), draft.author_id.get(), &draft.content)
            .map_err(PostPersistenceError::query)?;
        state.comment(&stored).map_err(PostPersistenceError::query)
    }

    async fn increment_comment_vote(
        &self,
        post_id: PostId,
        comment_id: CommentId,
        vote: Vote,
    ) -> Result<Option<Comment>, PostPersistenceError> {
        let mut state = self.lock().map_err(PostPersistenceError::connection)?;
        let Some(stored) = state
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id.get() && c.post_id == post_id.get())
        else {
            return Ok(None);
        };
        stored.votes = stored.votes.record(vote);
        let updated = stored.clone();
        state
            .comment(&updated)
            .map(Some)
            .map_err(PostPersistenceError::query)
    }
}

#[async_trait]
impl BoardSeedRepository for InMemoryBoardStore {
    async fn apply_seed(&self, seed: &BoardSeed) -> Result<SeedOutcome, BoardSeedRepositoryError> {
        let mut state = self.lock().map_err(BoardSeedRepositoryError::connection)?;
        let mut outcome = SeedOutcome::default();

        if state.users.is_empty() {
            for username in &seed.usernames {
                let id = next_id(&mut state.next_user_id);
                state.users.push(User::new(UserId::new(id), username.clone()));
            }
            outcome.users_created = seed.usernames.len();
        }

        if state.posts.is_empty() {
            let author_id = state
                .users
                .iter()
                .map(|user| user.id().get())
                .min()
                .ok_or_else(BoardSeedRepositoryError::missing_author)?;
            let post = state
                .insert_post(&seed.post.title, &seed.post.content, author_id)
                .map_err(BoardSeedRepositoryError::query)?;
            for content in &seed.post.comments {
                state
                    .insert_comment(post.id, author_id, content)
                    .map_err(BoardSeedRepositoryError::query)?;
            }
            outcome.post_created = true;
        }

        Ok(outcome)
    }
}
