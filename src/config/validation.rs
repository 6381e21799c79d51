//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use irclog_proto::LineCodec;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("identity.nicknames must name at least one nickname")]
    NoNicknames,
    #[error("server.address has no host")]
    MissingHost,
    #[error("server.address has an invalid port: {0}")]
    InvalidPort(String),
    #[error("server.encoding is not a known encoding: {0}")]
    UnknownEncoding(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.identity.nicknames.is_empty() {
        errors.push(ValidationError::NoNicknames);
    }

    match config.server.endpoint() {
        Ok((host, _)) if host.trim().is_empty() => errors.push(ValidationError::MissingHost),
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidPort(config.server.address.clone())),
    }

    if LineCodec::new(&config.server.encoding).is_err() {
        errors.push(ValidationError::UnknownEncoding(
            config.server.encoding.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
