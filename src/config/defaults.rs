//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::path::PathBuf;

/// Port used when `server.address` has no `:NNNN` suffix.
pub const DEFAULT_PORT: u16 = 6667;

/// JOIN, PART, QUIT and MODE senders are shown as `nick (user@host)`.
pub const DEFAULT_LONG_MODE: u32 = 0b1000_0111;

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_address() -> String {
    "irc.libera.chat".to_string()
}

pub fn default_server_password() -> Option<String> {
    Some("testing".to_string())
}

pub fn default_encoding() -> String {
    "utf-8".to_string()
}

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_nicknames() -> Vec<String> {
    vec!["logger_rs".to_string(), "IRCLogBot".to_string()]
}

pub fn default_username() -> String {
    "lurker".to_string()
}

pub fn default_realname() -> String {
    "Joey Lurkenstein".to_string()
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_long_mode() -> u32 {
    DEFAULT_LONG_MODE
}

pub fn default_channels() -> Vec<String> {
    ["#nethack", "#lojban", "#jbosnu", "#ckule"]
        .into_iter()
        .map(String::from)
        .collect()
}
