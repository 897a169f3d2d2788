//! Shared data models.

pub mod movie;
