//! Cached entry wrapper and per-insert options.
//!
//! The façade stores every user value inside an [`Entry`], which carries the
//! optional expiration deadline and the optional initial reference count the
//! LFU policy seeds its frequency counter from. Policies treat the entry as
//! an opaque value; only the façade inspects it.

use std::time::{Duration, Instant};

/// A cached value together with its expiration and LFU metadata.
///
/// An entry with no deadline never expires. The reference count is `None`
/// unless the caller supplied one via [`EntryOptions::reference_count`]; the
/// distinction matters when an existing LFU key is replaced, where a supplied
/// count resets the frequency and an absent one preserves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    value: V,
    expires_at: Option<Instant>,
    reference_count: Option<u64>,
}

impl<V> Entry<V> {
    /// Wraps a value with no expiration and no explicit reference count.
    pub fn new(value: V) -> Self {
        Self {
            value,
            expires_at: None,
            reference_count: None,
        }
    }

    /// Wraps a value applying `options`, resolving a TTL against `now`.
    pub fn with_options(value: V, now: Instant, options: &EntryOptions) -> Self {
        Self {
            value,
            expires_at: options.ttl.map(|ttl| now + ttl),
            reference_count: options.reference_count,
        }
    }

    /// Wraps a value keeping an already-resolved deadline.
    pub(crate) fn with_deadline(value: V, expires_at: Option<Instant>) -> Self {
        Self {
            value,
            expires_at,
            reference_count: None,
        }
    }

    /// Returns the wrapped value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry and returns the wrapped value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the absolute deadline, if the entry can expire.
    #[inline]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Returns `true` if the deadline has passed at `now`.
    ///
    /// Entries without a deadline never expire.
    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    /// Returns the caller-supplied initial reference count, if any.
    #[inline]
    pub fn initial_reference_count(&self) -> Option<u64> {
        self.reference_count
    }
}

/// Per-insert options recognized by [`Cache::insert_with`](crate::Cache::insert_with).
///
/// ```
/// use std::time::Duration;
/// use memocache::EntryOptions;
///
/// let options = EntryOptions::new()
///     .ttl(Duration::from_millis(250))
///     .reference_count(5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryOptions {
    ttl: Option<Duration>,
    reference_count: Option<u64>,
}

impl EntryOptions {
    /// Creates the default option set: no expiration, reference count 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expires the entry `ttl` after the insert.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Seeds the LFU frequency counter; values below 1 are clamped to 1.
    ///
    /// Ignored by every policy except LFU.
    pub fn reference_count(mut self, count: u64) -> Self {
        self.reference_count = Some(count.max(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_deadline_never_expires() {
        let entry = Entry::new(42);
        assert!(!entry.is_expired(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(entry.expires_at(), None);
    }

    #[test]
    fn entry_expires_exactly_at_deadline() {
        let now = Instant::now();
        let options = EntryOptions::new().ttl(Duration::from_millis(250));
        let entry = Entry::with_options(7, now, &options);

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_millis(249)));
        assert!(entry.is_expired(now + Duration::from_millis(250)));
        assert!(entry.is_expired(now + Duration::from_millis(251)));
    }

    #[test]
    fn reference_count_is_clamped_to_one() {
        let now = Instant::now();
        let options = EntryOptions::new().reference_count(0);
        let entry = Entry::with_options((), now, &options);
        assert_eq!(entry.initial_reference_count(), Some(1));
    }

    #[test]
    fn reference_count_defaults_to_unspecified() {
        let entry = Entry::new("v");
        assert_eq!(entry.initial_reference_count(), None);
    }

    #[test]
    fn into_value_unwraps() {
        let entry = Entry::new(String::from("payload"));
        assert_eq!(entry.into_value(), "payload");
    }
}
