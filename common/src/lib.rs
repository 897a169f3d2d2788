//! Shared building blocks for the movie service.
//!
//! Configuration loading, the error taxonomy, the error response envelope,
//! request-id middleware and the movie models live here so the service binary
//! only carries its HTTP and database plumbing.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
