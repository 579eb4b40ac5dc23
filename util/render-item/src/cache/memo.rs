use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::RwLock;

/// Shared memo table keyed by the parameters a value was generated from.
///
/// Clones share the same table, so a cache can be handed to several builders
/// and each of them will see the others' entries. Entries are never evicted;
/// the table holds one entry per distinct parameter tuple that was requested.
#[derive(Debug, Clone)]
pub struct MemoCache<K: Hash + Eq + Clone, V: Clone> {
	cache: Arc<RwLock<HashMap<K, V>>>,
}

impl<K: Hash + Eq + Clone, V: Clone> MemoCache<K, V> {
	pub fn new() -> Self {
		Self { cache: Arc::new(RwLock::new(HashMap::new())) }
	}

	pub fn get(&self, key: &K) -> Option<V> {
		let cache = self.cache.read().ok()?;
		cache.get(key).cloned()
	}

	pub fn insert(&self, key: K, value: V) {
		match self.cache.write() {
			Ok(mut cache) => {
				cache.insert(key, value);
			}
			Err(_) => log::warn!("Memo cache lock poisoned, dropping entry"),
		}
	}

	/// Returns the cached value for `key`, computing and storing it on a miss.
	///
	/// A poisoned lock never panics here: the value is recomputed and returned uncached.
	pub fn get_or_insert_with<F: FnOnce() -> V>(&self, key: K, compute: F) -> V {
		if let Some(value) = self.get(&key) {
			return value;
		}

		let value = compute();
		self.insert(key, value.clone());
		value
	}

	pub fn len(&self) -> usize {
		self.cache.read().map(|cache| cache.len()).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<K: Hash + Eq + Clone, V: Clone> Default for MemoCache<K, V> {
	fn default() -> Self {
		Self::new()
	}
}
