//! FnHashMap: chaining hash map driven by two caller-supplied functions.

use core::fmt;
use core::mem;
use hashbrown::HashMap;
use slotmap::{DefaultKey, SlotMap};

/// Bucket-selecting code produced by the caller's hash function.
///
/// Codes are used only to pick a bucket; collisions are expected and
/// resolved by scanning the bucket with the equality function.
pub type HashCode = u64;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A hash map whose hashing and key equality are supplied by the caller as
/// plain functions, so `K` needs no `Hash` or `Eq` implementation.
///
/// Entries sharing a hash code are chained in one bucket and told apart by
/// the equality function alone, which means a poorly distributing hash
/// degrades performance but never correctness.
///
/// The two functions are fixed at construction. `hash` must be
/// deterministic and must return the same code for any two keys the
/// equality function considers equal; the map trusts this and does not
/// check it at runtime. Violating the contract produces missed lookups or
/// duplicate logical keys, never unsafety.
pub struct FnHashMap<K, V, H, E> {
    hash: H,
    equal: E,
    // Chaining index: hash code -> arena keys of the entries sharing it.
    // Buckets are never stored empty.
    buckets: HashMap<HashCode, Vec<DefaultKey>>,
    slots: SlotMap<DefaultKey, Entry<K, V>>, // entry arena; len() is the count
}

impl<K, V, H, E> FnHashMap<K, V, H, E>
where
    H: Fn(&K) -> HashCode,
    E: Fn(&K, &K) -> bool,
{
    /// Creates an empty map from a hash function and an equality function.
    ///
    /// # Examples
    ///
    /// A map keyed by `Vec<i32>` compared by content:
    ///
    /// ```
    /// use fn_hashmap::{FnHashMap, HashCode};
    ///
    /// let mut m = FnHashMap::new(
    ///     |k: &Vec<i32>| k.iter().fold(0u64, |s, &e| s.wrapping_add(e as HashCode)),
    ///     |a: &Vec<i32>, b: &Vec<i32>| a == b,
    /// );
    /// m.put(vec![1, 2], 12);
    /// assert_eq!(m.get(&vec![1, 2]), Some(&12));
    /// ```
    pub fn new(hash: H, equal: E) -> Self {
        Self {
            hash,
            equal,
            buckets: HashMap::new(),
            slots: SlotMap::with_key(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sets the value for a key. Returns the previous value when an equal
    /// key was already present; its position within the bucket is
    /// unchanged but not part of the contract.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let code = (self.hash)(&key);
        let bucket = self.buckets.entry(code).or_default();
        for &id in bucket.iter() {
            if let Some(e) = self.slots.get_mut(id) {
                if (self.equal)(&e.key, &key) {
                    return Some(mem::replace(&mut e.value, value));
                }
            }
        }
        bucket.push(self.slots.insert(Entry { key, value }));
        None
    }

    /// Returns a reference to the value stored for a key, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        let code = (self.hash)(key);
        let bucket = self.buckets.get(&code)?;
        bucket.iter().find_map(|&id| {
            self.slots
                .get(id)
                .filter(|e| (self.equal)(&e.key, key))
                .map(|e| &e.value)
        })
    }

    /// Returns a mutable reference to the value stored for a key, if any.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let code = (self.hash)(key);
        let bucket = self.buckets.get(&code)?;
        let id = bucket.iter().copied().find(|&id| {
            self.slots
                .get(id)
                .map(|e| (self.equal)(&e.key, key))
                .unwrap_or(false)
        })?;
        self.slots.get_mut(id).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for a key and returns its value. Removing an
    /// absent key is a no-op returning `None`.
    ///
    /// Removal swap-removes within the bucket, so intra-bucket scan order
    /// is not preserved. A bucket left with no entries is dropped from the
    /// index; otherwise its storage is shrunk once capacity exceeds twice
    /// the live length.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let code = (self.hash)(key);
        let bucket = self.buckets.get_mut(&code)?;
        let pos = bucket.iter().position(|&id| {
            self.slots
                .get(id)
                .map(|e| (self.equal)(&e.key, key))
                .unwrap_or(false)
        })?;
        let id = bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&code);
        } else if bucket.capacity() > bucket.len() * 2 {
            // save memory
            bucket.shrink_to_fit();
        }
        self.slots.remove(id).map(|e| e.value)
    }

    /// Drops every entry. The map keeps its functions and stays usable.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.slots.clear();
    }

    /// Visits every live entry in unspecified order. `visit` returning
    /// `true` stops the traversal immediately, so a stop on the k-th call
    /// means exactly k entries were visited.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for e in self.slots.values() {
            if visit(&e.key, &e.value) {
                return;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }

    #[cfg(test)]
    pub(crate) fn check_consistency(&self) {
        let mut total = 0;
        for (code, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket left behind for code {code}");
            for &id in bucket {
                assert!(
                    self.slots.contains_key(id),
                    "bucket for code {code} references a dead slot"
                );
            }
            total += bucket.len();
        }
        assert_eq!(total, self.slots.len(), "bucket totals diverge from entry count");
    }
}

/// Iterator over `(&K, &V)` pairs in unspecified order.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&e.key, &e.value))
    }
}

/// Iterator over `(&K, &mut V)` pairs in unspecified order.
pub struct IterMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&e.key, &mut e.value))
    }
}

/// Renders `{k1:v1, k2:v2}` with `Debug`-formatted keys and values, in the
/// current (unspecified) traversal order. Diagnostic output only.
impl<K, V, H, E> fmt::Display for FnHashMap<K, V, H, E>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut sep = "";
        for e in self.slots.values() {
            write!(f, "{}{:?}:{:?}", sep, e.key, e.value)?;
            sep = ", ";
        }
        f.write_str("}")
    }
}
