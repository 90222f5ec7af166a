use alloc::vec::Vec;

use crate::error::Error;
use crate::ordered_map::OrderedMap;
use crate::store::Node;
use crate::store::NodeStore;

/// The raw state of an [`OrderedMap`]: head, tail and every stored node with
/// its links, in storage order.
///
/// A snapshot is a lossless picture of the link structure, unlike the pair
/// sequence produced by iteration. Absent links stay `None`, so they cannot
/// be confused with any key after a round trip. With the `serde` feature the
/// snapshot is serializable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<K, V> {
    /// Key of the first node.
    pub head: Option<K>,
    /// Key of the last node.
    pub tail: Option<K>,
    /// Every stored node with its key.
    pub entries: Vec<(K, Node<K, V>)>,
}

impl<K, V, M: NodeStore<K, V>> OrderedMap<K, V, M> {
    /// Copies the raw link structure into a [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot<K, V>
    where
        K: Clone,
        V: Clone,
    {
        Snapshot {
            head: self.head.clone(),
            tail: self.tail.clone(),
            entries: self
                .nodes
                .iter()
                .map(|(key, node)| (key.clone(), node.clone()))
                .collect(),
        }
    }

    /// Converts the map into its raw [`Snapshot`] without cloning.
    pub fn into_snapshot(self) -> Snapshot<K, V> {
        Snapshot {
            head: self.head,
            tail: self.tail,
            entries: self.nodes.into_entries().collect(),
        }
    }
}

impl<K: Clone + Eq, V, M: NodeStore<K, V>> OrderedMap<K, V, M> {
    /// Rebuilds a map from a [`Snapshot`], verifying the link structure.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptLinks`] if a key appears twice, or if the links do not
    /// form one list over every entry from `head` to `tail` (see
    /// [`validate`](OrderedMap::validate)).
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// let restored: OrderedMap<_, _> = OrderedMap::from_snapshot(map.snapshot()).unwrap();
    /// assert!(restored.order_eq(&map));
    /// ```
    pub fn from_snapshot(snapshot: Snapshot<K, V>) -> Result<Self, Error<K>> {
        let Snapshot {
            head,
            tail,
            entries,
        } = snapshot;

        let mut map = Self::with_capacity(entries.len());
        let count = entries.len();
        for (key, node) in entries {
            if map.nodes.insert(key, node).is_some() {
                tracing::warn!(entries = count, "rejected snapshot with a duplicate key");
                return Err(Error::CorruptLinks("duplicate key in snapshot"));
            }
        }
        map.head = head;
        map.tail = tail;

        if let Err(err) = map.validate() {
            tracing::warn!(entries = count, "rejected snapshot with inconsistent links");
            return Err(err);
        }
        Ok(map)
    }
}
