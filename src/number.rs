//! Numeric cache variant with atomic increment and decrement.
//!
//! [`NumberCache`] wraps a [`Cache`] whose values support addition and
//! subtraction, adding counters that create the key on first touch. Both
//! mutations run under one lock acquisition, so concurrent callers never
//! observe an intermediate state or lose an update.

use std::hash::Hash;
use std::ops::Deref;

use crate::cache::Cache;
use crate::clock::{Clock, SystemClock};
use crate::entry::Entry;

/// Value types usable with [`NumberCache`].
///
/// Integer implementations wrap on overflow, matching the primitive
/// `wrapping_*` operations; float implementations use plain IEEE arithmetic.
/// `Default` supplies the zero that first-touch mutations start from.
pub trait Number: Copy + Default {
    /// Adds `rhs`, wrapping on integer overflow.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Subtracts `rhs`, wrapping on integer overflow.
    fn wrapping_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_number_for_int {
    ($($ty:ty),*) => {$(
        impl Number for $ty {
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }
        }
    )*};
}

macro_rules! impl_number_for_float {
    ($($ty:ty),*) => {$(
        impl Number for $ty {
            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn wrapping_sub(self, rhs: Self) -> Self {
                self - rhs
            }
        }
    )*};
}

impl_number_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_number_for_float!(f32, f64);

/// Cache façade specialized to numeric values.
///
/// Derefs to [`Cache`], so the whole façade surface (`insert`, `get`,
/// `keys`, ...) is available alongside the counters.
///
/// # Example
///
/// ```
/// use memocache::NumberCache;
///
/// let counters: NumberCache<&str, i64> = NumberCache::new();
/// counters.insert("a", 1);
///
/// assert_eq!(counters.increment("a", 1), 2);
/// assert_eq!(counters.decrement("b", 100), -100); // created from zero
/// assert_eq!(counters.get(&"a"), Some(2));
/// ```
pub struct NumberCache<K, V, C = SystemClock> {
    inner: Cache<K, V, C>,
}

impl<K, V> NumberCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    /// Creates an unbounded numeric cache with the simple policy.
    pub fn new() -> Self {
        Self {
            inner: Cache::new(),
        }
    }
}

impl<K, V> Default for NumberCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> NumberCache<K, V, C> {
    pub(crate) fn from_cache(inner: Cache<K, V, C>) -> Self {
        Self { inner }
    }
}

impl<K, V, C> NumberCache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Number,
    C: Clock,
{
    /// Adds `delta` to the value under `key` and returns the result.
    ///
    /// An absent or expired key starts from zero with no expiration; a live
    /// entry keeps its expiration deadline across the update.
    pub fn increment(&self, key: K, delta: V) -> V {
        self.apply(key, |value| value.wrapping_add(delta))
    }

    /// Subtracts `delta` from the value under `key` and returns the result.
    ///
    /// Same creation and expiration behavior as [`increment`](Self::increment).
    pub fn decrement(&self, key: K, delta: V) -> V {
        self.apply(key, |value| value.wrapping_sub(delta))
    }

    /// Runs one read-modify-write cycle under a single lock acquisition.
    fn apply(&self, key: K, op: impl FnOnce(V) -> V) -> V {
        let mut core = self.inner.core.lock();
        let now = self.inner.clock.now();
        let (base, deadline) = match core.peek(&key) {
            Some(entry) if !entry.is_expired(now) => (*entry.value(), entry.expires_at()),
            _ => (V::default(), None),
        };
        let next = op(base);
        core.insert(key, Entry::with_deadline(next, deadline));
        next
    }
}

impl<K, V, C> Deref for NumberCache<K, V, C> {
    type Target = Cache<K, V, C>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K, V, C> Clone for NumberCache<K, V, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheBuilder;
    use crate::clock::ManualClock;
    use crate::entry::EntryOptions;
    use std::time::Duration;

    #[test]
    fn increment_and_decrement_existing_values() {
        let cache: NumberCache<&str, i32> = NumberCache::new();
        cache.insert("a", 1);

        assert_eq!(cache.increment("a", 1), 2);
        assert_eq!(cache.increment("a", 3), 5);
        assert_eq!(cache.decrement("a", 4), 1);
        assert_eq!(cache.get(&"a"), Some(1));
    }

    #[test]
    fn first_touch_starts_from_zero() {
        let cache: NumberCache<&str, i64> = NumberCache::new();
        assert_eq!(cache.increment("c", 100), 100);
        assert_eq!(cache.decrement("d", 100), -100);
        assert_eq!(cache.get(&"c"), Some(100));
        assert_eq!(cache.get(&"d"), Some(-100));
    }

    #[test]
    fn update_preserves_expiration() {
        let clock = ManualClock::new();
        let cache: NumberCache<&str, i32, ManualClock> =
            CacheBuilder::new().build_number_with_clock(clock.clone());

        cache.insert_with("b", 2, EntryOptions::new().ttl(Duration::from_millis(100)));
        assert_eq!(cache.decrement("b", 1), 1);

        clock.advance(Duration::from_millis(100));
        // The original deadline still applies to the updated value.
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn expired_key_restarts_from_zero_without_deadline() {
        let clock = ManualClock::new();
        let cache: NumberCache<&str, i32, ManualClock> =
            CacheBuilder::new().build_number_with_clock(clock.clone());

        cache.insert_with("n", 40, EntryOptions::new().ttl(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(20));

        assert_eq!(cache.increment("n", 2), 2);
        clock.advance(Duration::from_secs(3600));
        assert_eq!(cache.get(&"n"), Some(2));
    }

    #[test]
    fn integers_wrap_on_overflow() {
        let cache: NumberCache<&str, u8> = NumberCache::new();
        cache.insert("x", u8::MAX);
        assert_eq!(cache.increment("x", 1), 0);
        assert_eq!(cache.decrement("x", 1), u8::MAX);
    }

    #[test]
    fn floats_use_plain_arithmetic() {
        let cache: NumberCache<&str, f64> = NumberCache::new();
        assert_eq!(cache.increment("f", 1.5), 1.5);
        assert_eq!(cache.decrement("f", 0.5), 1.0);
    }

    #[test]
    fn counters_work_over_bounded_policies() {
        let cache: NumberCache<u32, i32> = CacheBuilder::new()
            .policy(crate::cache::CachePolicy::Lru)
            .capacity(2)
            .build_number();

        cache.increment(1, 10);
        cache.increment(2, 20);
        cache.increment(3, 30); // evicts key 1
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.increment(1, 5), 5); // recreated from zero
    }
}
