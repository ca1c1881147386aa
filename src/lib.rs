//! fn-hashmap: a hash map whose hashing and key equality come from
//! caller-supplied functions instead of `Hash`/`Eq` implementations.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: admit key types whose natural semantics are unsuitable or
//!   missing for table use (content-compared slices, case-insensitive
//!   strings) by storing two callable handles alongside the data and
//!   funneling every operation through them.
//! - Layout:
//!   - `slots: SlotMap<DefaultKey, Entry<K, V>>`: flat arena owning every
//!     live entry behind generational keys; its length is the entry count.
//!   - `buckets: hashbrown::HashMap<HashCode, Vec<DefaultKey>>`: chaining
//!     index from hash code to the arena keys of the entries sharing it.
//!
//! Caller contract
//! - `hash` must be deterministic, and must agree with `equal`:
//!   `equal(a, b)` implies `hash(a) == hash(b)`. The map trusts this and
//!   never verifies it; a violation degrades lookups (missed hits,
//!   duplicate logical keys) but cannot cause unsafety or panics.
//! - `equal` must be an equivalence relation (reflexive, symmetric,
//!   transitive).
//!
//! Collision handling
//! - Entries sharing a hash code live in one bucket and are scanned
//!   linearly with `equal`. A constant hash still behaves correctly, at
//!   O(n) per operation instead of amortized O(1).
//! - Removal swap-removes within the bucket; intra-bucket order is not
//!   part of the contract. A bucket that becomes empty is dropped from the
//!   index, and after a removal a bucket whose capacity exceeds twice its
//!   live length is shrunk to reclaim slack.
//!
//! Notes and non-goals
//! - No interior mutability and no internal synchronization; mutation
//!   requires `&mut` exclusivity and the auto traits follow from `K`, `V`
//!   and the two functions.
//! - Iteration and `Display` rendering run in unspecified order that may
//!   change across mutations.
//! - The outer index relies on hashbrown's own growth policy; there is no
//!   custom resize layer on top of it.
//! - `put` replaces the value for an equal key, it never rejects; the
//!   stored key itself is kept from the first insertion.

mod fn_hash_map;
mod fn_hash_map_proptest;

// Public surface
pub use fn_hash_map::{FnHashMap, HashCode, Iter, IterMut};
