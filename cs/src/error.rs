use thiserror::Error;

/// Errors raised while configuring or constructing a content store.
///
/// Policy hooks themselves never fail: duplicate adds and missing keys are
/// silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("unknown cache policy '{name}' (available: {})", .available.join(", "))]
  UnknownPolicy { name: String, available: Vec<String> },

  #[error("failed to parse configuration: {0}")]
  Parse(String),

  #[error("invalid configuration value for '{field}': {message}")]
  InvalidValue { field: String, message: String },
}

/// A specialized `Result` type for store configuration.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
