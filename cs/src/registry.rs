//! Name-based selection of replacement policies.

use crate::error::{ConfigError, Result};
use crate::policy::fifo::FifoPolicy;
use crate::policy::lfu::LfuPolicy;
use crate::policy::lru::LruPolicy;
use crate::policy::EvictionPolicy;

use std::collections::HashMap;
use std::fmt;

type PolicyFactory = Box<dyn Fn() -> Box<dyn EvictionPolicy> + Send + Sync>;

/// Maps policy names to zero-argument constructors.
///
/// A registry is assembled once with [`PolicyRegistryBuilder`] and then only
/// read. [`PolicyRegistry::default`] holds the built-in `lfu`, `lru` and
/// `fifo` strategies.
pub struct PolicyRegistry {
  factories: HashMap<String, PolicyFactory, ahash::RandomState>,
}

impl fmt::Debug for PolicyRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PolicyRegistry")
      .field("policies", &self.names())
      .finish()
  }
}

impl PolicyRegistry {
  pub fn builder() -> PolicyRegistryBuilder {
    PolicyRegistryBuilder::new()
  }

  /// A registry holding only the built-in strategies.
  pub fn with_builtin() -> Self {
    PolicyRegistryBuilder::new().with_builtin().build()
  }

  /// Constructs a fresh policy registered under `name`.
  pub fn create(&self, name: &str) -> Result<Box<dyn EvictionPolicy>> {
    match self.factories.get(name) {
      Some(factory) => Ok(factory()),
      None => Err(ConfigError::UnknownPolicy {
        name: name.to_string(),
        available: self.names().into_iter().map(String::from).collect(),
      }),
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.factories.contains_key(name)
  }

  /// Registered names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }
}

impl Default for PolicyRegistry {
  fn default() -> Self {
    Self::with_builtin()
  }
}

/// Assembles a [`PolicyRegistry`].
///
/// Registering a name twice keeps the later constructor.
#[derive(Default)]
pub struct PolicyRegistryBuilder {
  factories: HashMap<String, PolicyFactory, ahash::RandomState>,
}

impl PolicyRegistryBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a constructor under `name`.
  pub fn register<P, F>(mut self, name: &str, factory: F) -> Self
  where
    P: EvictionPolicy + 'static,
    F: Fn() -> P + Send + Sync + 'static,
  {
    self.factories.insert(
      name.to_string(),
      Box::new(move || Box::new(factory()) as Box<dyn EvictionPolicy>),
    );
    self
  }

  /// Registers `lfu`, `lru` and `fifo`.
  pub fn with_builtin(self) -> Self {
    self
      .register(LfuPolicy::POLICY_NAME, LfuPolicy::new)
      .register(LruPolicy::POLICY_NAME, LruPolicy::new)
      .register(FifoPolicy::POLICY_NAME, FifoPolicy::new)
  }

  pub fn build(self) -> PolicyRegistry {
    PolicyRegistry {
      factories: self.factories,
    }
  }
}
