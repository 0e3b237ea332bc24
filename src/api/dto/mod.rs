//! Data Transfer Objects for REST request/response serialization.

pub mod poll_dto;
pub mod vote_dto;

pub use poll_dto::*;
pub use vote_dto::*;
