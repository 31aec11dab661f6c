//! HTTP inbound adapter exposing the board REST endpoints.

pub mod error;
pub mod health;
pub mod json;
pub mod posts;
pub mod posts_dto;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
