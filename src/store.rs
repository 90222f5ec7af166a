//! Backing storage for [`OrderedMap`](crate::ordered_map::OrderedMap).
//!
//! The map threads its doubly-linked list through the storage by key: every
//! [`Node`] records the keys of its neighbors, so the storage itself acts as
//! the arena and keys act as stable indices. Any associative container that
//! implements [`NodeStore`] can back an ordered map.

use alloc::collections::btree_map;
use alloc::collections::BTreeMap;
use core::fmt;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::RandomState;

#[cold]
#[inline(never)]
pub(crate) fn dangling_link() -> ! {
    panic!("Link refers to a key that is not stored in the map");
}

/// The record stored for every key: the value plus the keys of its
/// neighbors in the ordering.
///
/// `None` in `prev`/`next` is the nil link: the node is the head or tail.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<K, V> {
    /// Key of the previous node, `None` for the head.
    pub prev: Option<K>,
    /// The stored value.
    pub value: V,
    /// Key of the next node, `None` for the tail.
    pub next: Option<K>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(prev: Option<K>, value: V, next: Option<K>) -> Self {
        Node { prev, value, next }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("prev", &Link(&self.prev))
            .field("value", &self.value)
            .field("next", &Link(&self.next))
            .finish()
    }
}

/// Renders a link as its key, or `nil` when absent.
pub(crate) struct Link<'a, K>(pub(crate) &'a Option<K>);

impl<K: fmt::Debug> fmt::Debug for Link<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(key) => key.fmt(f),
            None => f.write_str("nil"),
        }
    }
}

/// Associative storage from keys to [`Node`]s.
///
/// Implementations only store and look up nodes; all linking is done by the
/// map. Lookups must be consistent with `K`'s equality.
pub trait NodeStore<K, V> {
    /// Borrowing iterator over the raw table, in storage order.
    type Iter<'a>: Iterator<Item = (&'a K, &'a Node<K, V>)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Owning iterator over the raw table, in storage order.
    type IntoIter: Iterator<Item = (K, Node<K, V>)>;

    /// Creates an empty store able to hold `capacity` nodes, where the
    /// storage supports preallocation.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Number of stored nodes.
    fn len(&self) -> usize;

    /// Returns the stored key and node for `key`.
    fn get_key_value(&self, key: &K) -> Option<(&K, &Node<K, V>)>;

    /// Returns the node for `key`.
    fn get(&self, key: &K) -> Option<&Node<K, V>> {
        self.get_key_value(key).map(|(_, node)| node)
    }

    /// Returns the node for `key` mutably.
    fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>>;

    /// Returns `true` if a node is stored for `key`.
    fn contains(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Stores `node` under `key`, returning the node it replaced.
    fn insert(&mut self, key: K, node: Node<K, V>) -> Option<Node<K, V>>;

    /// Removes the node for `key`, returning the stored key with it.
    fn remove_entry(&mut self, key: &K) -> Option<(K, Node<K, V>)>;

    /// Removes every node.
    fn clear(&mut self);

    /// Releases spare capacity, where the storage supports it.
    fn shrink_to_fit(&mut self) {}

    /// Iterates over the raw table.
    fn iter(&self) -> Self::Iter<'_>;

    /// Consumes the store, yielding the raw table.
    fn into_entries(self) -> Self::IntoIter;

    /// Returns the node for a key reached through a link.
    ///
    /// Links always refer to stored keys, so a miss is a broken invariant.
    fn linked(&self, key: &K) -> &Node<K, V> {
        match self.get(key) {
            Some(node) => node,
            None => dangling_link(),
        }
    }

    /// Mutable counterpart of [`linked`](NodeStore::linked).
    fn linked_mut(&mut self, key: &K) -> &mut Node<K, V> {
        match self.get_mut(key) {
            Some(node) => node,
            None => dangling_link(),
        }
    }
}

/// Hash table storage, the default backend.
pub type HashStore<K, V, S = RandomState> = hashbrown::HashMap<K, Node<K, V>, S>;

/// Sorted tree storage. Keys need `Ord` instead of `Hash`.
pub type TreeStore<K, V> = BTreeMap<K, Node<K, V>>;

impl<K, V, S> NodeStore<K, V> for hashbrown::HashMap<K, Node<K, V>, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    type Iter<'a>
        = hashbrown::hash_map::Iter<'a, K, Node<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoIter = hashbrown::hash_map::IntoIter<K, Node<K, V>>;

    fn with_capacity(capacity: usize) -> Self {
        hashbrown::HashMap::with_capacity_and_hasher(capacity, S::default())
    }

    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &Node<K, V>)> {
        hashbrown::HashMap::get_key_value(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        hashbrown::HashMap::get_mut(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn insert(&mut self, key: K, node: Node<K, V>) -> Option<Node<K, V>> {
        hashbrown::HashMap::insert(self, key, node)
    }

    fn remove_entry(&mut self, key: &K) -> Option<(K, Node<K, V>)> {
        hashbrown::HashMap::remove_entry(self, key)
    }

    fn clear(&mut self) {
        hashbrown::HashMap::clear(self);
    }

    fn shrink_to_fit(&mut self) {
        hashbrown::HashMap::shrink_to_fit(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        hashbrown::HashMap::iter(self)
    }

    fn into_entries(self) -> Self::IntoIter {
        IntoIterator::into_iter(self)
    }
}

impl<K: Ord, V> NodeStore<K, V> for BTreeMap<K, Node<K, V>> {
    type Iter<'a>
        = btree_map::Iter<'a, K, Node<K, V>>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type IntoIter = btree_map::IntoIter<K, Node<K, V>>;

    fn with_capacity(_capacity: usize) -> Self {
        BTreeMap::new()
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn get_key_value(&self, key: &K) -> Option<(&K, &Node<K, V>)> {
        BTreeMap::get_key_value(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        BTreeMap::get_mut(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    fn insert(&mut self, key: K, node: Node<K, V>) -> Option<Node<K, V>> {
        BTreeMap::insert(self, key, node)
    }

    fn remove_entry(&mut self, key: &K) -> Option<(K, Node<K, V>)> {
        BTreeMap::remove_entry(self, key)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }

    fn into_entries(self) -> Self::IntoIter {
        IntoIterator::into_iter(self)
    }
}
