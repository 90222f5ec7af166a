use core::fmt;

use crate::ordered_map::OrderedMap;
use crate::store::Link;
use crate::store::NodeStore;

/// Renders the map like a literal: `{"a": 1, "b": 2}`.
impl<K, V, M> fmt::Display for OrderedMap<K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: NodeStore<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", key, value)?;
        }
        f.write_str("}")
    }
}

/// Renders the map as a list of pairs, `OrderedMap([("a", 1)])`, or
/// `OrderedMap()` when empty. The output does not depend on the store.
impl<K, V, M> fmt::Debug for OrderedMap<K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: NodeStore<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("OrderedMap()");
        }
        f.write_str("OrderedMap([")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({:?}, {:?})", key, value)?;
        }
        f.write_str("])")
    }
}

/// Debug view of the raw link structure, created by
/// [`OrderedMap::low_level`].
pub struct LowLevel<'a, K, V, M> {
    map: &'a OrderedMap<K, V, M>,
}

impl<K, V, M> fmt::Debug for LowLevel<'_, K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: NodeStore<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderedMap low level repr head,tail,data: {:?}, {:?}, ",
            Link(&self.map.head),
            Link(&self.map.tail)
        )?;
        f.debug_map().entries(self.map.nodes.iter()).finish()
    }
}

impl<K, V, M: NodeStore<K, V>> OrderedMap<K, V, M> {
    /// Returns a view whose `Debug` output shows the head, the tail and the
    /// raw node table with every link. Absent links print as `nil`.
    ///
    /// Meant for debugging; the table is printed in storage order, which
    /// depends on the store.
    ///
    /// # Examples
    ///
    /// ```
    /// use odict::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert_eq!(
    ///     format!("{:?}", map.low_level()),
    ///     "OrderedMap low level repr head,tail,data: nil, nil, {}"
    /// );
    /// ```
    pub fn low_level(&self) -> LowLevel<'_, K, V, M> {
        LowLevel { map: self }
    }
}
