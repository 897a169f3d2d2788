//! Graph database URI validator.
//!
//! Rejects endpoints the driver cannot use before a connection handle is
//! built from them.

use validator::ValidationError;

/// Schemes understood by the Bolt driver.
pub const SUPPORTED_SCHEMES: [&str; 6] = [
    "neo4j",
    "neo4j+s",
    "neo4j+ssc",
    "bolt",
    "bolt+s",
    "bolt+ssc",
];

/// Validates a `scheme://host[:port]` connection URI.
///
/// # Errors
/// Returns a `ValidationError` with code `malformed_uri` when the URI has no
/// scheme separator, an empty host or a non numeric port, and
/// `unsupported_scheme` when the scheme is not one of [`SUPPORTED_SCHEMES`].
pub fn validate_bolt_uri(uri: &str) -> Result<(), ValidationError> {
    let Some((scheme, rest)) = uri.trim().split_once("://") else {
        return Err(invalid("malformed_uri", "missing scheme separator"));
    };

    if !SUPPORTED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
        return Err(invalid("unsupported_scheme", "scheme must be neo4j or bolt"));
    }

    // Routing context (`?policy=...`) and trailing paths are left to the driver.
    let authority = rest.split(['/', '?']).next().unwrap_or_default();
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };

    if host.is_empty() {
        return Err(invalid("malformed_uri", "host must not be empty"));
    }
    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return Err(invalid("malformed_uri", "port must be a number"));
        }
    }

    Ok(())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
