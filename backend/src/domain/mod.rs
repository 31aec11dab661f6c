//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed board entities used by the API and
//! persistence layers, the ports adapters implement, and the services that
//! orchestrate them. Types are immutable once built; invariants are documented
//! on each type.
//!
//! Public surface:
//! - Error, ErrorCode: API error payload and its stable identifier.
//! - User, Post, Comment, VoteTally: board entities.
//! - BoardService, BoardSeeder: application services over the ports.

pub mod board_service;
pub mod error;
pub mod ports;
pub mod post;
pub mod seed;
pub mod trace_id;
pub mod user;
pub mod vote;

pub use self::board_service::BoardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::post::{Comment, CommentDraft, CommentId, Post, PostDraft, PostId};
pub use self::seed::{BoardSeed, BoardSeeder, SeedPost};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
pub use self::vote::{Vote, VoteTally};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("post 1 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
