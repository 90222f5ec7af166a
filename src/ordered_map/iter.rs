use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::ordered_map::OrderedMap;
use crate::store::dangling_link;
use crate::store::NodeStore;

/// An iterator over the entries of an [`OrderedMap`], in order.
///
/// This struct is created by the [`iter`] method on [`OrderedMap`]. See its
/// documentation for more.
///
/// [`iter`]: OrderedMap::iter
///
/// # Examples
///
/// ```
/// use odict::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// ```
pub struct Iter<'a, K, V, M> {
    nodes: &'a M,
    front: Option<&'a K>,
    back: Option<&'a K>,
    remaining: usize,
    _values: PhantomData<&'a V>,
}

impl<'a, K, V, M> Iter<'a, K, V, M> {
    pub(crate) fn new(
        nodes: &'a M,
        front: Option<&'a K>,
        back: Option<&'a K>,
        remaining: usize,
    ) -> Self {
        Iter {
            nodes,
            front,
            back,
            remaining,
            _values: PhantomData,
        }
    }
}

impl<K, V, M> Clone for Iter<'_, K, V, M> {
    fn clone(&self) -> Self {
        Iter::new(self.nodes, self.front, self.back, self.remaining)
    }
}

impl<K, V, M> fmt::Debug for Iter<'_, K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M>
where
    M: NodeStore<K, V>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a M = self.nodes;
        let (key, node) = match nodes.get_key_value(self.front?) {
            Some(entry) => entry,
            None => dangling_link(),
        };
        self.remaining -= 1;
        self.front = node.next.as_ref();
        Some((key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> DoubleEndedIterator for Iter<'a, K, V, M>
where
    M: NodeStore<K, V>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes: &'a M = self.nodes;
        let (key, node) = match nodes.get_key_value(self.back?) {
            Some(entry) => entry,
            None => dangling_link(),
        };
        self.remaining -= 1;
        self.back = node.prev.as_ref();
        Some((key, &node.value))
    }
}

impl<K, V, M: NodeStore<K, V>> ExactSizeIterator for Iter<'_, K, V, M> {}

impl<K, V, M: NodeStore<K, V>> FusedIterator for Iter<'_, K, V, M> {}

/// An owning iterator over the entries of an [`OrderedMap`], in order.
///
/// Each step unlinks the entry from the front (or back), so the remaining
/// entries always form a valid map.
///
/// # Examples
///
/// ```
/// use odict::OrderedMap;
///
/// let map = OrderedMap::from([("a", 1), ("b", 2), ("c", 3)]);
/// let mut iter = map.into_iter();
/// assert_eq!(iter.next(), Some(("a", 1)));
/// assert_eq!(iter.next_back(), Some(("c", 3)));
/// assert_eq!(iter.len(), 1);
/// ```
pub struct IntoIter<K, V, M> {
    map: OrderedMap<K, V, M>,
}

impl<K, V, M> Iterator for IntoIter<K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.map.pop_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K, V, M> DoubleEndedIterator for IntoIter<K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.pop_last().ok()
    }
}

impl<K: Clone + Eq, V, M: NodeStore<K, V>> ExactSizeIterator for IntoIter<K, V, M> {}

impl<K: Clone + Eq, V, M: NodeStore<K, V>> FusedIterator for IntoIter<K, V, M> {}

impl<K, V, M> fmt::Debug for IntoIter<K, V, M>
where
    K: fmt::Debug,
    V: fmt::Debug,
    M: NodeStore<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.map.iter()).finish()
    }
}

impl<K, V, M> IntoIterator for OrderedMap<K, V, M>
where
    K: Clone + Eq,
    M: NodeStore<K, V>,
{
    type IntoIter = IntoIter<K, V, M>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { map: self }
    }
}

impl<'a, K, V, M> IntoIterator for &'a OrderedMap<K, V, M>
where
    M: NodeStore<K, V>,
{
    type IntoIter = Iter<'a, K, V, M>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
