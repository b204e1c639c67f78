//! Bounded in-memory cache tier.

use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use super::key::ContentKey;

/// In-memory tier: concurrent map plus an insertion-order queue.
///
/// Lookups go straight to the map. The queue is only touched under its lock
/// during insert/evict — never while a value is being computed — and drives
/// the eviction policy: when an insert would exceed the bound, the oldest
/// quarter of entries is dropped in one sweep. Eviction never loses data
/// the disk tier can't serve back.
#[derive(Debug)]
pub struct MemoryTier<V> {
    entries: DashMap<ContentKey, Arc<V>>,
    order: Mutex<VecDeque<ContentKey>>,
    max_entries: usize,
}

impl<V> MemoryTier<V> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::with_capacity(max_entries.min(1024))),
            max_entries: max_entries.max(1),
        }
    }

    pub fn get(&self, key: &ContentKey) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry))
    }

    /// Insert or replace. Replacement keeps the key's original queue slot;
    /// only genuinely new keys can trigger eviction.
    pub fn insert(&self, key: ContentKey, value: Arc<V>) {
        if self.entries.insert(key, value).is_some() {
            return;
        }

        let mut order = self.order.lock();
        order.push_back(key);
        if order.len() > self.max_entries {
            let evict = (self.max_entries / 4).max(1);
            for _ in 0..evict {
                if let Some(old) = order.pop_front() {
                    self.entries.remove(&old);
                }
            }
        }
    }

    pub fn clear(&self) {
        let mut order = self.order.lock();
        self.entries.clear();
        order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SyntaxMode;

    fn key(n: usize) -> ContentKey {
        ContentKey::compute(&format!("doc {n}"), SyntaxMode::Markdown)
    }

    #[test]
    fn test_insert_and_get() {
        let tier = MemoryTier::new(8);
        tier.insert(key(1), Arc::new("one".to_string()));
        assert_eq!(tier.get(&key(1)).as_deref(), Some(&"one".to_string()));
        assert_eq!(tier.get(&key(2)), None);
    }

    #[test]
    fn test_replacement_does_not_grow() {
        let tier = MemoryTier::new(8);
        tier.insert(key(1), Arc::new(1u32));
        tier.insert(key(1), Arc::new(2u32));
        assert_eq!(tier.len(), 1);
        assert_eq!(tier.get(&key(1)).as_deref(), Some(&2));
    }

    #[test]
    fn test_overflow_evicts_oldest_quarter() {
        let tier = MemoryTier::new(8);
        for n in 0..9 {
            tier.insert(key(n), Arc::new(n));
        }
        // 9th insert evicts the 2 oldest.
        assert_eq!(tier.len(), 7);
        assert_eq!(tier.get(&key(0)), None);
        assert_eq!(tier.get(&key(1)), None);
        for n in 2..9 {
            assert_eq!(tier.get(&key(n)).as_deref(), Some(&n), "entry {n} survived");
        }
    }

    #[test]
    fn test_recent_entries_survive_heavy_overflow() {
        let tier = MemoryTier::new(16);
        for n in 0..1000 {
            tier.insert(key(n), Arc::new(n));
        }
        assert!(tier.len() <= 16);
        assert_eq!(tier.get(&key(999)).as_deref(), Some(&999));
    }

    #[test]
    fn test_clear() {
        let tier = MemoryTier::new(8);
        tier.insert(key(1), Arc::new(1));
        tier.clear();
        assert_eq!(tier.len(), 0);
        assert_eq!(tier.get(&key(1)), None);
    }
}
