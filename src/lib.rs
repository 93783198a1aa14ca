//! memocache: bounded in-process key/value caching with pluggable eviction
//! policies, per-entry expiration, and an optional background janitor.
//!
//! The [`Cache`] façade multiplexes one of six replacement policies behind a
//! single mutex: simple (unbounded), LRU, LFU, FIFO, MRU, and Clock. Entries
//! may carry a time-to-live; expired entries behave as absent on every read
//! path and are reclaimed lazily or by the janitor.
//!
//! ```
//! use memocache::{Cache, CacheBuilder, CachePolicy};
//!
//! let cache: Cache<&str, i32> = CacheBuilder::new()
//!     .policy(CachePolicy::Lru)
//!     .capacity(128)
//!     .build();
//!
//! cache.insert("a", 1);
//! assert_eq!(cache.get(&"a"), Some(1));
//! assert_eq!(cache.get(&"b"), None);
//! ```

pub mod clock;
pub mod ds;
pub mod entry;
pub mod policy;

mod cache;
mod janitor;
mod number;

pub mod prelude;

pub use cache::{Cache, CacheBuilder, CachePolicy};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, EntryOptions};
pub use janitor::Canceller;
pub use number::{Number, NumberCache};
