//! Middleware components.

pub mod request_id;
