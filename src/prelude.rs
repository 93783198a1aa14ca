pub use crate::cache::{Cache, CacheBuilder, CachePolicy};
pub use crate::entry::EntryOptions;
pub use crate::number::NumberCache;
