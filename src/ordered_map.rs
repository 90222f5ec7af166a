//! Ordered map implementation.
//!
//! This module provides the core [`OrderedMap`] type and related
//! functionality. The ordered map keeps its entries in an explicit order
//! (insertion order unless rearranged) while providing O(1) access,
//! insertion, removal and reordering.
//!
//! The order is a doubly-linked list threaded through the backing store by
//! key: every [`Node`] stores the keys of its neighbors, and the map keeps the
//! keys of the head and the tail. There are no pointers into the store, so
//! nothing can dangle when the store reallocates.
//!
//! # Examples
//!
//! ```
//! use odict::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("first", 1);
//! map.insert("second", 2);
//! map.insert_first("zeroth", 0).unwrap();
//!
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"zeroth", &0), (&"first", &1), (&"second", &2)]);
//! ```

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::marker::PhantomData;
use core::mem;
use core::ops::Index;
use core::ops::IndexMut;

use crate::error::Direction;
use crate::error::Error;
use crate::store::HashStore;
use crate::store::Node;
use crate::store::NodeStore;

mod entry;
mod fmt;
mod iter;
mod snapshot;

pub use entry::Entry;
pub use entry::OccupiedEntry;
pub use entry::VacantEntry;
pub use fmt::LowLevel;
pub use iter::IntoIter;
pub use iter::Iter;
pub use snapshot::Snapshot;

/// A map that keeps its entries in an explicit order.
///
/// New keys are appended at the tail. Overwriting the value of a present key
/// never moves it. Besides the usual map operations, entries can be inserted
/// relative to other keys, moved, swapped, renamed and sorted, all without
/// touching unrelated entries.
///
/// The generic parameters are:
/// - `K`: Key type. Mutating operations need `K: Clone + Eq`, since links
///   are stored as keys.
/// - `V`: Value type
/// - `M`: Backing store, a [`NodeStore`]. Defaults to a hashbrown table; use
///   [`TreeStore`](crate::store::TreeStore) for keys that are `Ord` but not
///   `Hash`.
///
/// The map is not internally synchronized. Iterators borrow the map, so the
/// order cannot change while one is alive.
///
/// # Examples
///
/// ```
/// use odict::OrderedMap;
///
/// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
/// map.delete(&"b").unwrap();
/// map.swap(&"a", &"d").unwrap();
///
/// assert_eq!(map.key_vec(), ["d", "c", "a"]);
/// assert_eq!(map.value_vec(), [4, 3, 1]);
/// ```
pub struct OrderedMap<K, V, M = HashStore<K, V>> {
    head: Option<K>,
    tail: Option<K>,
    nodes: M,
    _values: PhantomData<fn() -> V>,
}

impl<K: Clone, V, M: Clone> Clone for OrderedMap<K, V, M> {
    fn clone(&self) -> Self {
        OrderedMap {
            head: self.head.clone(),
            tail: self.tail.clone(),
            nodes: self.nodes.clone(),
            _values: PhantomData,
        }
    }
}

impl<K, V, M: NodeStore<K, V>> Default for OrderedMap<K, V, M> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, S> OrderedMap<K, V, HashStore<K, V, S>>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map with the specified capacity and hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use odict::ordered_map::OrderedMap;
    ///
    /// let hasher = RandomState::default();
    /// let mut map: OrderedMap<&str, i32, _> = OrderedMap::with_capacity_and_hasher(10, hasher);
    /// map.insert("key", 42);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            head: None,
            tail: None,
            nodes: hashbrown::HashMap::with_capacity_and_hasher(capacity, hasher),
            _values: PhantomData,
        }
    }
}

impl<K, V, M: NodeStore<K, V>> OrderedMap<K, V, M> {
    /// Creates a new, empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.insert("key", 42);
    /// assert!(!map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty map able to hold `capacity` entries without
    /// reallocating, where the store supports preallocation.
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            head: None,
            tail: None,
            nodes: M::with_capacity(capacity),
            _values: PhantomData,
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1)]);
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// assert_eq!(map.get(&"b"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.nodes.get(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.nodes.get_mut(key).map(|node| &mut node.value)
    }

    /// Returns the stored key and the value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.nodes
            .get_key_value(key)
            .map(|(key, node)| (key, &node.value))
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.nodes.contains(key)
    }

    /// Returns the first key in order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    pub fn first_key(&self) -> Result<&K, Error<K>> {
        self.head.as_ref().ok_or(Error::EmptyContainer {
            operation: "first_key",
        })
    }

    /// Returns the last key in order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    pub fn last_key(&self) -> Result<&K, Error<K>> {
        self.tail.as_ref().ok_or(Error::EmptyContainer {
            operation: "last_key",
        })
    }

    /// Returns the first entry in order, if any.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.head.as_ref().and_then(|key| self.get_key_value(key))
    }

    /// Returns the last entry in order, if any.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tail.as_ref().and_then(|key| self.get_key_value(key))
    }

    /// Returns an iterator over the entries in order.
    ///
    /// The iterator is double-ended: `.rev()` walks from the tail to the head
    /// along the `prev` links.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    ///
    /// let forward: Vec<_> = map.iter().collect();
    /// assert_eq!(forward, [(&"a", &1), (&"b", &2), (&"c", &3)]);
    ///
    /// let backward: Vec<_> = map.iter().rev().map(|(k, _)| *k).collect();
    /// assert_eq!(backward, ["c", "b", "a"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, M> {
        Iter::new(&self.nodes, self.head.as_ref(), self.tail.as_ref(), self.len())
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values in order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }

    /// Collects the keys, in order.
    pub fn key_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Collects the values, in order.
    pub fn value_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// Collects the entries, in order.
    pub fn item_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Shrinks the capacity of the store as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Returns `true` if both maps hold equal entries in the same order.
    ///
    /// `==` compares contents only, like any other map.
    pub fn order_eq<M2>(&self, other: &OrderedMap<K, V, M2>) -> bool
    where
        K: PartialEq,
        V: PartialEq,
        M2: NodeStore<K, V>,
    {
        self.len() == other.len() && self.iter().eq(other.iter())
    }

    /// Copies the entries into a plain hash map, dropping the order.
    pub fn to_hash_map(&self) -> hashbrown::HashMap<K, V>
    where
        K: Hash + Eq + Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Converts the map into a plain hash map, dropping the order.
    pub fn into_hash_map(self) -> hashbrown::HashMap<K, V>
    where
        K: Hash + Eq,
    {
        self.nodes
            .into_entries()
            .map(|(key, node)| (key, node.value))
            .collect()
    }
}

impl<K: Clone + Eq, V, M: NodeStore<K, V>> OrderedMap<K, V, M> {
    /// Creates a map holding `keys` in the given order, each bound to a clone
    /// of `value`.
    ///
    /// A key repeated in `keys` keeps its first position.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = OrderedMap::from_keys(["x", "y", "z"], 0);
    /// assert_eq!(map.item_vec(), [("x", 0), ("y", 0), ("z", 0)]);
    /// ```
    pub fn from_keys<I>(keys: I, value: V) -> Self
    where
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        let keys = keys.into_iter();
        let mut map = Self::with_capacity(keys.size_hint().0);
        for key in keys {
            map.insert(key, value.clone());
        }
        map
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn lookup(&self, key: &K) -> Result<&V, Error<K>> {
        self.get(key).ok_or_else(|| Error::KeyNotFound(key.clone()))
    }

    /// Returns the key following `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotFound`] if `key` is absent.
    /// - [`Error::NoSuchNeighbor`] if `key` is the last key.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::Error;
    /// use odict::OrderedMap;
    ///
    /// let map = OrderedMap::from([("x", 1), ("y", 2)]);
    /// assert_eq!(map.next_key(&"x"), Ok(&"y"));
    /// assert!(matches!(map.next_key(&"y"), Err(Error::NoSuchNeighbor { .. })));
    /// assert_eq!(map.next_key(&"z"), Err(Error::KeyNotFound("z")));
    /// ```
    pub fn next_key(&self, key: &K) -> Result<&K, Error<K>> {
        let node = self
            .nodes
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone()))?;
        node.next.as_ref().ok_or_else(|| Error::NoSuchNeighbor {
            key: key.clone(),
            direction: Direction::Next,
        })
    }

    /// Returns the key preceding `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotFound`] if `key` is absent.
    /// - [`Error::NoSuchNeighbor`] if `key` is the first key.
    pub fn prev_key(&self, key: &K) -> Result<&K, Error<K>> {
        let node = self
            .nodes
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone()))?;
        node.prev.as_ref().ok_or_else(|| Error::NoSuchNeighbor {
            key: key.clone(),
            direction: Direction::Prev,
        })
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, the entry is linked at the
    /// tail and `None` is returned.
    ///
    /// If the map did have this key present, the value is updated and the old
    /// value is returned. The entry is **not** moved.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// map.insert("b", 2);
    /// assert_eq!(map.insert("a", 10), Some(1));
    /// assert_eq!(map.item_vec(), [("a", 10), ("b", 2)]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(node) = self.nodes.get_mut(&key) {
            return Some(mem::replace(&mut node.value, value));
        }
        self.push_back(key, value);
        None
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// *map.entry("hits").or_insert(0) += 1;
    /// *map.entry("hits").or_insert(0) += 1;
    /// assert_eq!(map.get(&"hits"), Some(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, M> {
        if self.nodes.contains(&key) {
            Entry::Occupied(OccupiedEntry { map: self, key })
        } else {
            Entry::Vacant(VacantEntry { map: self, key })
        }
    }

    /// Returns the value for `key`, inserting `default` at the tail first if
    /// the key is absent.
    pub fn setdefault(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }

    /// Inserts every pair from `pairs` in iteration order, as [`insert`]
    /// does.
    ///
    /// [`insert`]: OrderedMap::insert
    pub fn update<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key together with its value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        if !self.nodes.contains(key) {
            return None;
        }
        self.unlink(key);
        let (key, node) = self.nodes.remove_entry(key)?;
        Some((key, node.value))
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn delete(&mut self, key: &K) -> Result<(), Error<K>> {
        self.pop(key).map(drop)
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent; the map is untouched.
    pub fn pop(&mut self, key: &K) -> Result<V, Error<K>> {
        self.remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone()))
    }

    /// Removes `key` and returns its value, or returns `default` without
    /// modifying the map if the key is absent.
    pub fn pop_or(&mut self, key: &K, default: V) -> V {
        self.remove(key).unwrap_or(default)
    }

    /// Removes and returns the first entry.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    pub fn pop_first(&mut self) -> Result<(K, V), Error<K>> {
        let Some(head) = self.head.clone() else {
            return Err(Error::EmptyContainer {
                operation: "pop_first",
            });
        };
        self.remove_entry(&head)
            .ok_or(Error::CorruptLinks("head is not stored"))
    }

    /// Removes and returns the last entry.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([(1, 'a'), (2, 'b')]);
    /// assert_eq!(map.pop_last(), Ok((2, 'b')));
    /// assert_eq!(map.item_vec(), [(1, 'a')]);
    /// ```
    pub fn pop_last(&mut self) -> Result<(K, V), Error<K>> {
        let Some(tail) = self.tail.clone() else {
            return Err(Error::EmptyContainer {
                operation: "pop_last",
            });
        };
        self.remove_entry(&tail)
            .ok_or(Error::CorruptLinks("tail is not stored"))
    }

    /// Retains only the entries for which `f` returns `true`, visiting them
    /// in order. The predicate may modify the values.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut cursor = self.head.clone();
        while let Some(key) = cursor {
            let node = self.nodes.linked_mut(&key);
            cursor = node.next.clone();
            if !f(&key, &mut node.value) {
                self.remove_entry(&key);
            }
        }
    }

    /// Calls `f` on every entry in order with mutable access to the value.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        let mut cursor = self.head.clone();
        while let Some(key) = cursor {
            let node = self.nodes.linked_mut(&key);
            f(&key, &mut node.value);
            cursor = node.next.clone();
        }
    }

    /// Inserts a new entry at the head.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `key` is already present.
    pub fn insert_first(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        if self.nodes.contains(&key) {
            return Err(Error::InvalidArgument(
                "insert_first(): key is already present",
            ));
        }
        self.push_front(key, value);
        Ok(())
    }

    /// Inserts a new entry at the tail.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `key` is already present.
    pub fn insert_last(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        if self.nodes.contains(&key) {
            return Err(Error::InvalidArgument(
                "insert_last(): key is already present",
            ));
        }
        self.push_back(key, value);
        Ok(())
    }

    /// Inserts a new entry immediately before `ref_key`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `ref_key == key`, or if `key` is
    ///   already present.
    /// - [`Error::KeyNotFound`] if `ref_key` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("c", 3), ("d", 4)]);
    /// map.insert_before(&"c", "x", 99).unwrap();
    /// assert_eq!(map.key_vec(), ["a", "x", "c", "d"]);
    /// ```
    pub fn insert_before(&mut self, ref_key: &K, key: K, value: V) -> Result<(), Error<K>> {
        self.check_relative_insert(ref_key, &key, "insert_before(): key is already present")?;
        let prev = self.nodes.linked(ref_key).prev.clone();
        self.nodes.insert(key.clone(), Node::new(None, value, None));
        self.link_between(&key, prev, Some(ref_key.clone()));
        tracing::trace!(len = self.len(), "inserted entry before reference key");
        Ok(())
    }

    /// Inserts a new entry immediately after `ref_key`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `ref_key == key`, or if `key` is
    ///   already present.
    /// - [`Error::KeyNotFound`] if `ref_key` is absent.
    pub fn insert_after(&mut self, ref_key: &K, key: K, value: V) -> Result<(), Error<K>> {
        self.check_relative_insert(ref_key, &key, "insert_after(): key is already present")?;
        let next = self.nodes.linked(ref_key).next.clone();
        self.nodes.insert(key.clone(), Node::new(None, value, None));
        self.link_between(&key, Some(ref_key.clone()), next);
        tracing::trace!(len = self.len(), "inserted entry after reference key");
        Ok(())
    }

    /// Moves `key` to sit immediately before `ref_key`.
    ///
    /// Does nothing if it is already there.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `ref_key == key`.
    /// - [`Error::KeyNotFound`] if either key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("0", 'a'), ("1", 'b'), ("2", 'c'), ("3", 'd')]);
    /// map.move_before(&"1", &"3").unwrap();
    /// assert_eq!(map.key_vec(), ["0", "3", "1", "2"]);
    /// ```
    pub fn move_before(&mut self, ref_key: &K, key: &K) -> Result<(), Error<K>> {
        self.check_move(ref_key, key, "move_before(): reference and moved key must differ")?;
        if self.nodes.linked(key).next.as_ref() == Some(ref_key) {
            return Ok(());
        }
        // Detach first so the reference's links no longer mention `key`.
        self.unlink(key);
        let prev = self.nodes.linked(ref_key).prev.clone();
        self.link_between(key, prev, Some(ref_key.clone()));
        tracing::trace!(len = self.len(), "moved entry before reference key");
        Ok(())
    }

    /// Moves `key` to sit immediately after `ref_key`.
    ///
    /// Does nothing if it is already there.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `ref_key == key`.
    /// - [`Error::KeyNotFound`] if either key is absent.
    pub fn move_after(&mut self, ref_key: &K, key: &K) -> Result<(), Error<K>> {
        self.check_move(ref_key, key, "move_after(): reference and moved key must differ")?;
        if self.nodes.linked(key).prev.as_ref() == Some(ref_key) {
            return Ok(());
        }
        self.unlink(key);
        let next = self.nodes.linked(ref_key).next.clone();
        self.link_between(key, Some(ref_key.clone()), next);
        tracing::trace!(len = self.len(), "moved entry after reference key");
        Ok(())
    }

    /// Moves `key` to the head. Does nothing if it is already first.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn move_first(&mut self, key: &K) -> Result<(), Error<K>> {
        if !self.nodes.contains(key) {
            return Err(Error::KeyNotFound(key.clone()));
        }
        match self.head.clone() {
            Some(head) if head != *key => self.move_before(&head, key),
            _ => Ok(()),
        }
    }

    /// Moves `key` to the tail. Does nothing if it is already last.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent.
    pub fn move_last(&mut self, key: &K) -> Result<(), Error<K>> {
        if !self.nodes.contains(key) {
            return Err(Error::KeyNotFound(key.clone()));
        }
        match self.tail.clone() {
            Some(tail) if tail != *key => self.move_after(&tail, key),
            _ => Ok(()),
        }
    }

    /// Exchanges the positions of `a` and `b`. Their values stay with their
    /// keys.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `a == b`.
    /// - [`Error::KeyNotFound`] if either key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// map.swap(&"a", &"c").unwrap();
    /// assert_eq!(map.item_vec(), [("c", 3), ("b", 2), ("a", 1)]);
    /// assert_eq!(map.first_key(), Ok(&"c"));
    /// assert_eq!(map.last_key(), Ok(&"a"));
    /// ```
    pub fn swap(&mut self, a: &K, b: &K) -> Result<(), Error<K>> {
        if a == b {
            return Err(Error::InvalidArgument("swap(): keys must differ"));
        }
        let (a_prev, a_next) = self.links_of(a)?;
        let (b_prev, b_next) = self.links_of(b)?;

        if a_next.as_ref() == Some(b) {
            self.unlink(a);
            let after_b = self.nodes.linked(b).next.clone();
            self.link_between(a, Some(b.clone()), after_b);
        } else if b_next.as_ref() == Some(a) {
            self.unlink(b);
            let after_a = self.nodes.linked(a).next.clone();
            self.link_between(b, Some(a.clone()), after_a);
        } else {
            // Not adjacent: none of the captured links refers to `a` or `b`.
            self.point_next_at(a_prev.as_ref(), b);
            self.point_prev_at(a_next.as_ref(), b);
            self.point_next_at(b_prev.as_ref(), a);
            self.point_prev_at(b_next.as_ref(), a);

            let node_a = self.nodes.linked_mut(a);
            node_a.prev = b_prev;
            node_a.next = b_next;
            let node_b = self.nodes.linked_mut(b);
            node_b.prev = a_prev;
            node_b.next = a_next;
        }
        tracing::trace!(len = self.len(), "swapped two entries");
        Ok(())
    }

    /// Renames `old` to `new`, keeping its value and position.
    ///
    /// Renaming a key to itself does nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotFound`] if `old` is absent.
    /// - [`Error::InvalidArgument`] if `new` is already present; the map is
    ///   untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("1", 'a'), ("2", 'b'), ("3", 'c')]);
    /// map.alter_key(&"2", "bar").unwrap();
    /// assert_eq!(map.item_vec(), [("1", 'a'), ("bar", 'b'), ("3", 'c')]);
    /// ```
    pub fn alter_key(&mut self, old: &K, new: K) -> Result<(), Error<K>> {
        if !self.nodes.contains(old) {
            return Err(Error::KeyNotFound(old.clone()));
        }
        if *old == new {
            return Ok(());
        }
        if self.nodes.contains(&new) {
            return Err(Error::InvalidArgument(
                "alter_key(): new key is already present",
            ));
        }
        let Some((_, node)) = self.nodes.remove_entry(old) else {
            return Err(Error::KeyNotFound(old.clone()));
        };
        self.point_next_at(node.prev.as_ref(), &new);
        self.point_prev_at(node.next.as_ref(), &new);
        self.nodes.insert(new, node);
        tracing::trace!(len = self.len(), "renamed key in place");
        Ok(())
    }

    /// Reorders the entries with a stable sort by `compare`.
    ///
    /// Nodes are relinked in place; nothing is reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("c", 3), ("b", 2)]);
    /// map.sort_by(|(ka, _), (kb, _)| kb.cmp(ka));
    /// assert_eq!(map.key_vec(), ["c", "b", "a"]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut((&K, &V), (&K, &V)) -> Ordering,
    {
        let mut entries: Vec<(&K, &V)> = self.iter().collect();
        entries.sort_by(|a, b| compare(*a, *b));
        let order: Vec<K> = entries.into_iter().map(|(k, _)| k.clone()).collect();
        self.relink(order);
    }

    /// Reorders the entries with a stable sort by the key extracted by `f`.
    pub fn sort_by_key<T, F>(&mut self, mut f: F)
    where
        T: Ord,
        F: FnMut((&K, &V)) -> T,
    {
        let mut entries: Vec<(&K, &V)> = self.iter().collect();
        entries.sort_by_key(|entry| f(*entry));
        let order: Vec<K> = entries.into_iter().map(|(k, _)| k.clone()).collect();
        self.relink(order);
    }

    /// Sorts the entries by ascending value. Entries with equal values keep
    /// their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 3), ("b", 1), ("c", 2)]);
    /// map.sort_values();
    /// assert_eq!(map.item_vec(), [("b", 1), ("c", 2), ("a", 3)]);
    /// ```
    pub fn sort_values(&mut self)
    where
        V: Ord,
    {
        self.sort_by(|(_, a), (_, b)| a.cmp(b));
    }

    /// Sorts the entries by ascending key.
    pub fn sort_keys(&mut self)
    where
        K: Ord,
    {
        self.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    /// Reverses the order of the entries in place.
    pub fn reverse(&mut self) {
        let mut cursor = self.head.clone();
        while let Some(key) = cursor {
            let node = self.nodes.linked_mut(&key);
            mem::swap(&mut node.prev, &mut node.next);
            cursor = node.prev.clone();
        }
        mem::swap(&mut self.head, &mut self.tail);
        tracing::debug!(len = self.len(), "reversed order");
    }

    /// Checks that the links form one consistent list over every stored key.
    ///
    /// Every public operation preserves this; it is useful after rebuilding a
    /// map from untrusted parts.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptLinks`] describing the first violation found.
    pub fn validate(&self) -> Result<(), Error<K>> {
        let len = self.nodes.len();
        let (Some(head), Some(tail)) = (&self.head, &self.tail) else {
            if len == 0 && self.head.is_none() && self.tail.is_none() {
                return Ok(());
            }
            return Err(Error::CorruptLinks(
                "head and tail must be set exactly when the map is non-empty",
            ));
        };
        if len == 0 {
            return Err(Error::CorruptLinks("empty map has a head or tail"));
        }
        let head_node = self
            .nodes
            .get(head)
            .ok_or(Error::CorruptLinks("head is not stored"))?;
        if head_node.prev.is_some() {
            return Err(Error::CorruptLinks("head has a predecessor"));
        }

        let mut current = head;
        let mut node = head_node;
        let mut seen = 1;
        while let Some(next) = &node.next {
            let next_node = self
                .nodes
                .get(next)
                .ok_or(Error::CorruptLinks("link refers to a missing key"))?;
            if next_node.prev.as_ref() != Some(current) {
                return Err(Error::CorruptLinks("prev and next links disagree"));
            }
            seen += 1;
            if seen > len {
                return Err(Error::CorruptLinks("links form a cycle"));
            }
            current = next;
            node = next_node;
        }

        if current != tail {
            return Err(Error::CorruptLinks("forward walk does not end at the tail"));
        }
        if seen != len {
            return Err(Error::CorruptLinks("not every stored key is linked"));
        }
        Ok(())
    }

    fn links_of(&self, key: &K) -> Result<(Option<K>, Option<K>), Error<K>> {
        let node = self
            .nodes
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.clone()))?;
        Ok((node.prev.clone(), node.next.clone()))
    }

    fn check_relative_insert(
        &self,
        ref_key: &K,
        key: &K,
        duplicate: &'static str,
    ) -> Result<(), Error<K>> {
        if ref_key == key {
            return Err(Error::InvalidArgument(
                "reference key and inserted key must differ",
            ));
        }
        if !self.nodes.contains(ref_key) {
            return Err(Error::KeyNotFound(ref_key.clone()));
        }
        if self.nodes.contains(key) {
            return Err(Error::InvalidArgument(duplicate));
        }
        Ok(())
    }

    fn check_move(&self, ref_key: &K, key: &K, same: &'static str) -> Result<(), Error<K>> {
        if ref_key == key {
            return Err(Error::InvalidArgument(same));
        }
        if !self.nodes.contains(ref_key) {
            return Err(Error::KeyNotFound(ref_key.clone()));
        }
        if !self.nodes.contains(key) {
            return Err(Error::KeyNotFound(key.clone()));
        }
        Ok(())
    }

    /// Stores an absent key and links it at the tail.
    fn push_back(&mut self, key: K, value: V) {
        let prev = self.tail.clone();
        self.nodes.insert(key.clone(), Node::new(None, value, None));
        self.link_between(&key, prev, None);
    }

    /// Stores an absent key and links it at the head.
    fn push_front(&mut self, key: K, value: V) {
        let next = self.head.clone();
        self.nodes.insert(key.clone(), Node::new(None, value, None));
        self.link_between(&key, None, next);
    }

    /// Makes `prev` (or the head, if `None`) point forward at `key`.
    fn point_next_at(&mut self, prev: Option<&K>, key: &K) {
        match prev {
            Some(prev) => self.nodes.linked_mut(prev).next = Some(key.clone()),
            None => self.head = Some(key.clone()),
        }
    }

    /// Makes `next` (or the tail, if `None`) point back at `key`.
    fn point_prev_at(&mut self, next: Option<&K>, key: &K) {
        match next {
            Some(next) => self.nodes.linked_mut(next).prev = Some(key.clone()),
            None => self.tail = Some(key.clone()),
        }
    }

    /// Splices `key` out of the list, joining its neighbors. The node stays
    /// stored, with both of its links cleared.
    fn unlink(&mut self, key: &K) {
        let node = self.nodes.linked_mut(key);
        let prev = node.prev.take();
        let next = node.next.take();
        match &prev {
            Some(prev) => self.nodes.linked_mut(prev).next = next.clone(),
            None => self.head = next.clone(),
        }
        match next {
            Some(next) => self.nodes.linked_mut(&next).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links the stored, detached `key` between two adjacent positions.
    fn link_between(&mut self, key: &K, prev: Option<K>, next: Option<K>) {
        self.point_next_at(prev.as_ref(), key);
        self.point_prev_at(next.as_ref(), key);
        let node = self.nodes.linked_mut(key);
        node.prev = prev;
        node.next = next;
    }

    /// Rewrites every link so the list follows `order`, which must hold each
    /// stored key exactly once.
    fn relink(&mut self, order: Vec<K>) {
        debug_assert_eq!(order.len(), self.len());
        for (i, key) in order.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| order[p].clone());
            let next = order.get(i + 1).cloned();
            let node = self.nodes.linked_mut(key);
            node.prev = prev;
            node.next = next;
        }
        self.head = order.first().cloned();
        self.tail = order.last().cloned();
        tracing::debug!(len = order.len(), "rebuilt order");
    }
}

impl<K, V, M> PartialEq for OrderedMap<K, V, M>
where
    V: PartialEq,
    M: NodeStore<K, V>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V, M> Eq for OrderedMap<K, V, M>
where
    V: Eq,
    M: NodeStore<K, V>,
{
}

impl<K, V, M> FromIterator<(K, V)> for OrderedMap<K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.update(iter);
        map
    }
}

impl<K, V, M, const N: usize> From<[(K, V); N]> for OrderedMap<K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, M> Extend<(K, V)> for OrderedMap<K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<'a, K, V, M> Extend<(&'a K, &'a V)> for OrderedMap<K, V, M>
where
    K: Clone + Eq,
    V: Clone,
    M: NodeStore<K, V>,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.clone(), value.clone());
        }
    }
}

impl<K, V, M> Index<&K> for OrderedMap<K, V, M>
where
    M: NodeStore<K, V>,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, M> IndexMut<&K> for OrderedMap<K, V, M>
where
    M: NodeStore<K, V>,
{
    fn index_mut(&mut self, key: &K) -> &mut Self::Output {
        self.get_mut(key).expect("no entry found for key")
    }
}
