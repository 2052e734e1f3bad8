use crate::error::{ConfigError, Result};
use crate::policy::lfu::LfuPolicy;

use serde::{Deserialize, Serialize};

/// The content store settings an operator can change.
///
/// ```yaml
/// policy: lfu
/// limit: 65536
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsConfig {
  /// Name of the replacement policy, looked up in a `PolicyRegistry`.
  #[serde(default = "default_policy")]
  pub policy: String,
  /// Maximum number of cached entries. Zero disables caching.
  #[serde(default = "default_limit")]
  pub limit: usize,
}

fn default_policy() -> String {
  LfuPolicy::POLICY_NAME.to_string()
}

fn default_limit() -> usize {
  65536
}

impl Default for CsConfig {
  fn default() -> Self {
    Self {
      policy: default_policy(),
      limit: default_limit(),
    }
  }
}

impl CsConfig {
  /// Parses and validates a YAML document.
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    let config: CsConfig =
      serde_yaml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    if self.policy.trim().is_empty() {
      return Err(ConfigError::InvalidValue {
        field: "policy".to_string(),
        message: "policy name cannot be empty".to_string(),
      });
    }
    Ok(())
  }
}
