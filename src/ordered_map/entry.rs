use crate::ordered_map::OrderedMap;
use crate::store::NodeStore;

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This enum is constructed from the [`entry`] method on [`OrderedMap`].
///
/// [`entry`]: OrderedMap::entry
///
/// # Examples
///
/// ```
/// use odict::Entry;
/// use odict::OrderedMap;
///
/// let mut map = OrderedMap::new();
///
/// match map.entry("key") {
///     Entry::Vacant(entry) => {
///         entry.insert_tail("value");
///     }
///     Entry::Occupied(entry) => {
///         println!("Key already exists: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, K, V, M> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, M>),

    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, M>),
}

impl<'a, K, V, M> Entry<'a, K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    /// Ensures a value is in the entry by inserting the provided default if
    /// vacant, and returns a mutable reference to the value in the entry.
    ///
    /// When inserting, the new entry is linked at the tail, matching
    /// [`OrderedMap::insert`] for new keys.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => v.insert_tail(default),
        }
    }

    /// Like [`or_insert`](Entry::or_insert), computing the default only when
    /// the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => v.insert_tail(default()),
        }
    }

    /// Inserts `V::default()` if vacant.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// If the entry is occupied, applies the provided function to the value in
    /// place. Returns the entry for further chaining.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(mut e) = self {
            f(e.get_mut());
            Entry::Occupied(e)
        } else {
            self
        }
    }

    /// Returns the key this entry was requested with.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(e) => e.key(),
            Entry::Vacant(v) => v.key(),
        }
    }
}

/// A view into an occupied entry in an [`OrderedMap`].
///
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, M> {
    pub(crate) map: &'a mut OrderedMap<K, V, M>,
    pub(crate) key: K,
}

impl<'a, K, V, M> OccupiedEntry<'a, K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    /// Returns the key this entry was requested with.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.map.nodes.linked(&self.key).value
    }

    /// Returns a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.nodes.linked_mut(&self.key).value
    }

    /// Converts the entry into a mutable reference bound to the map's
    /// lifetime.
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { map, key } = self;
        &mut map.nodes.linked_mut(&key).value
    }

    /// Replaces the value, returning the old one. The entry keeps its
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::Entry;
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// if let Entry::Occupied(entry) = map.entry("a") {
    ///     assert_eq!(entry.insert(10), 1);
    /// }
    /// assert_eq!(map.item_vec(), [("a", 10), ("b", 2)]);
    /// ```
    pub fn insert(mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry, returning the stored key and the value.
    pub fn remove_entry(self) -> (K, V) {
        let OccupiedEntry { map, key } = self;
        match map.remove_entry(&key) {
            Some(entry) => entry,
            None => crate::store::dangling_link(),
        }
    }

    /// Removes the entry, returning the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Moves the entry to the head and returns its value.
    pub fn move_first(self) -> &'a mut V {
        let OccupiedEntry { map, key } = self;
        if map.head.as_ref() != Some(&key) {
            map.unlink(&key);
            let next = map.head.clone();
            map.link_between(&key, None, next);
        }
        &mut map.nodes.linked_mut(&key).value
    }

    /// Moves the entry to the tail and returns its value.
    pub fn move_last(self) -> &'a mut V {
        let OccupiedEntry { map, key } = self;
        if map.tail.as_ref() != Some(&key) {
            map.unlink(&key);
            let prev = map.tail.clone();
            map.link_between(&key, prev, None);
        }
        &mut map.nodes.linked_mut(&key).value
    }
}

/// A view into a vacant entry in an [`OrderedMap`].
///
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, M> {
    pub(crate) map: &'a mut OrderedMap<K, V, M>,
    pub(crate) key: K,
}

impl<'a, K, V, M> VacantEntry<'a, K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    /// Returns the key that would be used when inserting.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value at the tail and returns a mutable reference to it.
    pub fn insert_tail(self, value: V) -> &'a mut V {
        let VacantEntry { map, key } = self;
        map.push_back(key.clone(), value);
        &mut map.nodes.linked_mut(&key).value
    }

    /// Inserts the value at the head and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::Entry;
    /// use odict::OrderedMap;
    ///
    /// let mut map = OrderedMap::from([("b", 2)]);
    /// if let Entry::Vacant(entry) = map.entry("a") {
    ///     *entry.insert_head(0) += 1;
    /// }
    /// assert_eq!(map.item_vec(), [("a", 1), ("b", 2)]);
    /// ```
    pub fn insert_head(self, value: V) -> &'a mut V {
        let VacantEntry { map, key } = self;
        map.push_front(key.clone(), value);
        &mut map.nodes.linked_mut(&key).value
    }
}
