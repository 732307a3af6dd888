//! # Mentor Shared
//!
//! Wire types shared between the site server and its browser client.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
