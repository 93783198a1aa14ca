//! Cache façade multiplexing the eviction policies.
//!
//! [`Cache`] wraps exactly one policy core behind a `parking_lot::Mutex`,
//! layers per-entry expiration on every read path, and optionally pairs the
//! core with a background [janitor](crate::janitor). Construction goes
//! through [`CacheBuilder`], which selects the policy, its capacity, and the
//! sweep interval.
//!
//! Expired entries are observationally absent: `get` reclaims them on
//! contact, `contains` and `keys` filter them, and `len` deliberately keeps
//! counting them until a sweep runs, staying O(1).

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::entry::{Entry, EntryOptions};
use crate::janitor::{Canceller, Janitor};
use crate::number::NumberCache;
use crate::policy::clock::ClockPolicy;
use crate::policy::fifo::FifoPolicy;
use crate::policy::lfu::LfuPolicy;
use crate::policy::lru::LruPolicy;
use crate::policy::mru::MruPolicy;
use crate::policy::simple::SimplePolicy;

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Unbounded map, insertion-ordered, never evicts. The default.
    Simple,
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction, oldest insert on frequency ties.
    Lfu,
    /// First-In First-Out eviction.
    Fifo,
    /// Most Recently Used eviction.
    Mru,
    /// Clock (second chance) eviction.
    Clock,
}

/// One policy core instantiated over wrapped entries.
///
/// The façade dispatches through this tagged variant rather than a trait
/// object so the LFU arm can feed the entry's reference count into its
/// frequency counter.
pub(crate) enum PolicyCore<K, V> {
    Simple(SimplePolicy<K, Entry<V>>),
    Lru(LruPolicy<K, Entry<V>>),
    Lfu(LfuPolicy<K, Entry<V>>),
    Fifo(FifoPolicy<K, Entry<V>>),
    Mru(MruPolicy<K, Entry<V>>),
    Clock(ClockPolicy<K, Entry<V>>),
}

impl<K, V> PolicyCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn build(policy: CachePolicy, capacity: usize) -> Self {
        match policy {
            CachePolicy::Simple => PolicyCore::Simple(SimplePolicy::new()),
            CachePolicy::Lru => PolicyCore::Lru(LruPolicy::with_capacity(capacity)),
            CachePolicy::Lfu => PolicyCore::Lfu(LfuPolicy::with_capacity(capacity)),
            CachePolicy::Fifo => PolicyCore::Fifo(FifoPolicy::with_capacity(capacity)),
            CachePolicy::Mru => PolicyCore::Mru(MruPolicy::with_capacity(capacity)),
            CachePolicy::Clock => PolicyCore::Clock(ClockPolicy::with_capacity(capacity)),
        }
    }

    pub(crate) fn insert(&mut self, key: K, entry: Entry<V>) {
        match self {
            PolicyCore::Simple(policy) => policy.insert(key, entry),
            PolicyCore::Lru(policy) => policy.insert(key, entry),
            PolicyCore::Lfu(policy) => {
                let count = entry.initial_reference_count();
                policy.insert_with(key, entry, count);
            }
            PolicyCore::Fifo(policy) => policy.insert(key, entry),
            PolicyCore::Mru(policy) => policy.insert(key, entry),
            PolicyCore::Clock(policy) => policy.insert(key, entry),
        }
    }

    pub(crate) fn get(&mut self, key: &K) -> Option<&Entry<V>> {
        match self {
            PolicyCore::Simple(policy) => policy.get(key),
            PolicyCore::Lru(policy) => policy.get(key),
            PolicyCore::Lfu(policy) => policy.get(key),
            PolicyCore::Fifo(policy) => policy.get(key),
            PolicyCore::Mru(policy) => policy.get(key),
            PolicyCore::Clock(policy) => policy.get(key),
        }
    }

    pub(crate) fn peek(&self, key: &K) -> Option<&Entry<V>> {
        match self {
            PolicyCore::Simple(policy) => policy.peek(key),
            PolicyCore::Lru(policy) => policy.peek(key),
            PolicyCore::Lfu(policy) => policy.peek(key),
            PolicyCore::Fifo(policy) => policy.peek(key),
            PolicyCore::Mru(policy) => policy.peek(key),
            PolicyCore::Clock(policy) => policy.peek(key),
        }
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<Entry<V>> {
        match self {
            PolicyCore::Simple(policy) => policy.remove(key),
            PolicyCore::Lru(policy) => policy.remove(key),
            PolicyCore::Lfu(policy) => policy.remove(key),
            PolicyCore::Fifo(policy) => policy.remove(key),
            PolicyCore::Mru(policy) => policy.remove(key),
            PolicyCore::Clock(policy) => policy.remove(key),
        }
    }

    pub(crate) fn keys(&self) -> Vec<K> {
        match self {
            PolicyCore::Simple(policy) => policy.keys(),
            PolicyCore::Lru(policy) => policy.keys(),
            PolicyCore::Lfu(policy) => policy.keys(),
            PolicyCore::Fifo(policy) => policy.keys(),
            PolicyCore::Mru(policy) => policy.keys(),
            PolicyCore::Clock(policy) => policy.keys(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            PolicyCore::Simple(policy) => policy.len(),
            PolicyCore::Lru(policy) => policy.len(),
            PolicyCore::Lfu(policy) => policy.len(),
            PolicyCore::Fifo(policy) => policy.len(),
            PolicyCore::Mru(policy) => policy.len(),
            PolicyCore::Clock(policy) => policy.len(),
        }
    }

    pub(crate) fn capacity(&self) -> Option<usize> {
        match self {
            PolicyCore::Simple(_) => None,
            PolicyCore::Lru(policy) => Some(policy.capacity()),
            PolicyCore::Lfu(policy) => Some(policy.capacity()),
            PolicyCore::Fifo(policy) => Some(policy.capacity()),
            PolicyCore::Mru(policy) => Some(policy.capacity()),
            PolicyCore::Clock(policy) => Some(policy.capacity()),
        }
    }
}

/// Removes every entry expired at `now`; returns how many were dropped.
pub(crate) fn sweep_expired<K, V>(core: &mut PolicyCore<K, V>, now: Instant) -> usize
where
    K: Eq + Hash + Clone,
{
    let stale: Vec<K> = core
        .keys()
        .into_iter()
        .filter(|key| core.peek(key).map_or(false, |entry| entry.is_expired(now)))
        .collect();
    for key in &stale {
        core.remove(key);
    }
    stale.len()
}

/// Thread-safe cache façade over one eviction policy.
///
/// Handles are cheap to clone and share the same underlying store; all
/// operations take the internal mutex once, so `get_or_insert` and the
/// numeric mutations are indivisible.
///
/// # Example
///
/// ```
/// use memocache::{Cache, CacheBuilder, CachePolicy};
///
/// let cache: Cache<String, u64> = CacheBuilder::new()
///     .policy(CachePolicy::Lfu)
///     .capacity(1024)
///     .build();
///
/// cache.insert("hits".to_string(), 1);
/// assert_eq!(cache.get(&"hits".to_string()), Some(1));
/// assert!(cache.contains(&"hits".to_string()));
/// ```
pub struct Cache<K, V, C = SystemClock> {
    pub(crate) core: Arc<Mutex<PolicyCore<K, V>>>,
    pub(crate) clock: C,
    janitor: Option<Arc<Janitor>>,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    /// Creates an unbounded cache with the simple policy and no janitor.
    pub fn new() -> Self {
        Self {
            core: Arc::new(Mutex::new(PolicyCore::Simple(SimplePolicy::new()))),
            clock: SystemClock,
            janitor: None,
        }
    }
}

impl<K, V> Default for Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Inserts `value` under `key` with default entry options.
    pub fn insert(&self, key: K, value: V) {
        self.insert_with(key, value, EntryOptions::default());
    }

    /// Inserts `value` under `key`, applying per-entry options.
    ///
    /// A TTL resolves to an absolute deadline against the cache clock at
    /// insert time. Over-capacity insertion silently evicts per policy.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use memocache::{Cache, EntryOptions};
    ///
    /// let cache: Cache<&str, i32> = Cache::new();
    /// cache.insert_with("session", 7, EntryOptions::new().ttl(Duration::from_secs(60)));
    /// assert_eq!(cache.get(&"session"), Some(7));
    /// ```
    pub fn insert_with(&self, key: K, value: V, options: EntryOptions) {
        let mut core = self.core.lock();
        let now = self.clock.now();
        core.insert(key, Entry::with_options(value, now, &options));
    }

    /// Returns the live value for `key`.
    ///
    /// A hit on an expired entry removes it and reports a miss, so no
    /// caller ever observes a value past its deadline.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut core = self.core.lock();
        let now = self.clock.now();
        if let Some(entry) = core.get(key) {
            if !entry.is_expired(now) {
                return Some(entry.value().clone());
            }
        } else {
            return None;
        }
        // Expired on contact: reclaim under the same lock acquisition.
        core.remove(key);
        None
    }

    /// Returns the existing live value, or inserts `value` with default
    /// options.
    ///
    /// The boolean reports whether the key was already present; an expired
    /// entry counts as absent and is replaced.
    ///
    /// # Example
    ///
    /// ```
    /// use memocache::Cache;
    ///
    /// let cache: Cache<&str, i32> = Cache::new();
    /// cache.insert("a", 1);
    /// assert_eq!(cache.get_or_insert("b", 2), (2, false));
    /// assert_eq!(cache.get_or_insert("a", 3), (1, true));
    /// ```
    pub fn get_or_insert(&self, key: K, value: V) -> (V, bool)
    where
        V: Clone,
    {
        let mut core = self.core.lock();
        let now = self.clock.now();
        if let Some(entry) = core.get(&key) {
            if !entry.is_expired(now) {
                return (entry.value().clone(), true);
            }
        }
        core.insert(key, Entry::new(value.clone()));
        (value, false)
    }

    /// Removes `key`; idempotent.
    pub fn remove(&self, key: &K) {
        self.core.lock().remove(key);
    }

    /// Returns `true` if `key` is present and not expired.
    ///
    /// Does not update policy metadata and does not reclaim the entry.
    pub fn contains(&self, key: &K) -> bool {
        let core = self.core.lock();
        let now = self.clock.now();
        core.peek(key).map_or(false, |entry| !entry.is_expired(now))
    }

    /// Returns keys in policy order, excluding entries already expired.
    ///
    /// Expired entries are filtered but not reclaimed.
    pub fn keys(&self) -> Vec<K> {
        let core = self.core.lock();
        let now = self.clock.now();
        core.keys()
            .into_iter()
            .filter(|key| {
                core.peek(key)
                    .map_or(false, |entry| !entry.is_expired(now))
            })
            .collect()
    }

    /// Returns the raw entry count, including expired-but-unswept entries.
    pub fn len(&self) -> usize {
        self.core.lock().len()
    }

    /// Returns `true` if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the policy capacity, or `None` for the unbounded simple
    /// policy.
    pub fn capacity(&self) -> Option<usize> {
        self.core.lock().capacity()
    }

    /// Removes every expired entry now; returns how many were dropped.
    ///
    /// This is the same sweep the janitor runs on each tick.
    pub fn remove_expired(&self) -> usize {
        let mut core = self.core.lock();
        let now = self.clock.now();
        sweep_expired(&mut core, now)
    }

    /// Returns a cancellation handle for the janitor, if one is running.
    pub fn canceller(&self) -> Option<Canceller> {
        self.janitor.as_ref().map(|janitor| janitor.canceller())
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            clock: self.clock.clone(),
            janitor: self.janitor.clone(),
        }
    }
}

/// Builder selecting policy, capacity, and janitor interval.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use memocache::{Cache, CacheBuilder, CachePolicy};
///
/// let cache: Cache<u64, String> = CacheBuilder::new()
///     .policy(CachePolicy::Fifo)
///     .capacity(64)
///     .janitor_interval(Duration::from_secs(30))
///     .build();
/// # drop(cache);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    policy: CachePolicy,
    capacity: usize,
    janitor_interval: Option<Duration>,
}

impl CacheBuilder {
    /// Starts from the defaults: simple policy, no janitor.
    pub fn new() -> Self {
        Self {
            policy: CachePolicy::Simple,
            capacity: 0,
            janitor_interval: None,
        }
    }

    /// Selects the eviction policy.
    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bounds the policy at `capacity` entries; zero selects the policy
    /// default of 128. Ignored by the simple policy.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Spawns a background sweeper with period `interval` on build.
    ///
    /// The janitor stops when cancelled through [`Cache::canceller`] or when
    /// the last cache handle is dropped.
    pub fn janitor_interval(mut self, interval: Duration) -> Self {
        self.janitor_interval = Some(interval);
        self
    }

    /// Builds the cache against the system clock.
    pub fn build<K, V>(self) -> Cache<K, V, SystemClock>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Send + 'static,
    {
        self.build_with_clock(SystemClock)
    }

    /// Builds the cache against a caller-supplied clock.
    pub fn build_with_clock<K, V, C>(self, clock: C) -> Cache<K, V, C>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Send + 'static,
        C: Clock + Clone + Send + 'static,
    {
        let core = Arc::new(Mutex::new(PolicyCore::build(self.policy, self.capacity)));
        let janitor = self.janitor_interval.map(|interval| {
            let weak = Arc::downgrade(&core);
            let clock = clock.clone();
            Arc::new(Janitor::spawn(interval, move || match weak.upgrade() {
                Some(core) => {
                    let mut core = core.lock();
                    sweep_expired(&mut core, clock.now());
                    true
                }
                None => false,
            }))
        });
        Cache {
            core,
            clock,
            janitor,
        }
    }

    /// Builds the numeric variant against the system clock.
    pub fn build_number<K, V>(self) -> NumberCache<K, V, SystemClock>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Send + 'static,
    {
        NumberCache::from_cache(self.build())
    }

    /// Builds the numeric variant against a caller-supplied clock.
    pub fn build_number_with_clock<K, V, C>(self, clock: C) -> NumberCache<K, V, C>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Send + 'static,
        C: Clock + Clone + Send + 'static,
    {
        NumberCache::from_cache(self.build_with_clock(clock))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
