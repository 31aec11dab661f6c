//! Diesel table definitions for the board schema.
//!
//! These definitions must match `backend/migrations`. The `created_at` audit
//! columns are populated by database defaults and never read, so they are not
//! declared here.

diesel::table! {
    /// Board users. Rows are written only by seeding.
    users (id) {
        id -> Int4,
        /// Name shown next to posts and comments (max 64 characters).
        username -> Varchar,
    }
}

diesel::table! {
    /// Discussion threads.
    posts (id) {
        id -> Int4,
        title -> Text,
        content -> Text,
        /// Owning user. Foreign key to `users.id`.
        user_id -> Int4,
        /// Non-negative, enforced by a check constraint.
        upvotes -> Int4,
        /// Non-negative, enforced by a check constraint.
        downvotes -> Int4,
    }
}

diesel::table! {
    /// Replies to posts, ordered by `id` within a post.
    comments (id) {
        id -> Int4,
        /// Parent post. Foreign key to `posts.id`.
        post_id -> Int4,
        /// Owning user. Foreign key to `users.id`.
        user_id -> Int4,
        content -> Text,
        upvotes -> Int4,
        downvotes -> Int4,
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, comments);
