//! # Blog Shared
//!
//! Wire types shared between the server and its clients.
//! Kept free of server-side dependencies so a client can depend on it alone.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
