//! Replacement policies for a network-layer Content Store.
//!
//! A content store caches data packets inside a forwarder and must stay
//! within a fixed number of entries. This crate decides *what stays cached*:
//!
//! - **Pluggable policies**: every strategy implements [`EvictionPolicy`] and
//!   is notified of each insert, refresh, hit and erase.
//! - **LFU**: [`LfuPolicy`] keeps entries in a frequency-ordered
//!   [`FrequencyStructure`] and evicts the least frequently used first.
//! - **Registry**: policies are selected by name (`"lfu"`, `"lru"`,
//!   `"fifo"`) through a [`PolicyRegistry`] assembled at startup.
//! - **Reference store**: [`ContentStore`] drives a policy end to end and
//!   removes whatever it evicts.
//!
//! ```
//! use cs_policy::{ContentStore, Data};
//!
//! let mut store = ContentStore::builder().policy("lfu").limit(2).build().unwrap();
//! store.insert(Data::new("/a", b"1".to_vec()), false);
//! store.insert(Data::new("/b", b"2".to_vec()), false);
//! store.find("/a");
//! store.insert(Data::new("/c", b"3".to_vec()), false);
//!
//! assert!(store.contains("/a"));
//! assert!(!store.contains("/b"));
//! assert!(store.contains("/c"));
//! ```

pub mod builder;
pub mod config;
pub mod entry;
pub mod error;
pub mod listener;
pub mod policy;
pub mod registry;

mod shared;
mod store;

pub use builder::ContentStoreBuilder;
pub use config::CsConfig;
pub use entry::{CacheEntry, Data, EntryRef};
pub use error::ConfigError;
pub use listener::{EvictionListener, EvictionReason};
pub use policy::fifo::FifoPolicy;
pub use policy::frequency::FrequencyStructure;
pub use policy::lfu::LfuPolicy;
pub use policy::lru::LruPolicy;
pub use policy::{EvictionPolicy, EvictionSink, PolicyContext, StoreView};
pub use registry::{PolicyRegistry, PolicyRegistryBuilder};
pub use shared::SharedContentStore;
pub use store::ContentStore;
