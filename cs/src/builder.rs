use crate::config::CsConfig;
use crate::error::Result;
use crate::listener::EvictionListener;
use crate::policy::EvictionPolicy;
use crate::registry::PolicyRegistry;
use crate::shared::SharedContentStore;
use crate::store::ContentStore;

use core::fmt;
use std::sync::Arc;

/// A builder for creating [`ContentStore`] instances.
pub struct ContentStoreBuilder {
  limit: usize,
  policy_name: String,
  policy: Option<Box<dyn EvictionPolicy>>,
  listener: Option<Arc<dyn EvictionListener>>,
}

impl fmt::Debug for ContentStoreBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContentStoreBuilder")
      .field("limit", &self.limit)
      .field("policy_name", &self.policy_name)
      .field("has_policy", &self.policy.is_some())
      .field("has_listener", &self.listener.is_some())
      .finish()
  }
}

impl Default for ContentStoreBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl ContentStoreBuilder {
  /// Creates a builder with the default configuration: `lfu`, 65536 entries.
  pub fn new() -> Self {
    Self::from_config(&CsConfig::default())
  }

  /// Creates a builder from operator configuration.
  pub fn from_config(config: &CsConfig) -> Self {
    Self {
      limit: config.limit,
      policy_name: config.policy.clone(),
      policy: None,
      listener: None,
    }
  }

  /// Sets the maximum number of entries.
  pub fn limit(mut self, limit: usize) -> Self {
    self.limit = limit;
    self
  }

  /// Selects the replacement policy by its registered name.
  pub fn policy(mut self, name: impl Into<String>) -> Self {
    self.policy_name = name.into();
    self
  }

  /// Uses the given policy instance instead of looking one up by name.
  pub fn cache_policy<Policy>(mut self, policy: Policy) -> Self
  where
    Policy: EvictionPolicy + 'static,
  {
    self.policy = Some(Box::new(policy));
    self
  }

  /// Sets the eviction listener for the store.
  pub fn eviction_listener<Listener>(mut self, listener: Listener) -> Self
  where
    Listener: EvictionListener + 'static,
  {
    self.listener = Some(Arc::new(listener));
    self
  }

  /// Builds the store, resolving the policy name against the built-in
  /// strategies.
  pub fn build(self) -> Result<ContentStore> {
    self.build_with_registry(&PolicyRegistry::default())
  }

  /// Builds the store, resolving the policy name against `registry`.
  ///
  /// Fails if no policy instance was supplied and the name is unknown.
  pub fn build_with_registry(self, registry: &PolicyRegistry) -> Result<ContentStore> {
    let policy = match self.policy {
      Some(policy) => policy,
      None => registry.create(&self.policy_name)?,
    };
    Ok(ContentStore::with_policy(policy, self.limit, self.listener))
  }

  /// Builds a store that can be shared across threads.
  pub fn build_shared(self) -> Result<SharedContentStore> {
    self.build().map(SharedContentStore::new)
  }
}
