//! Utility functions and helpers.

pub mod uri_validator;
