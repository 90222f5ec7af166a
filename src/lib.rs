#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod deep_clone;
pub mod error;
pub mod ordered_map;
#[cfg(feature = "serde")]
mod serde;
pub mod store;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

/// A map that maintains an explicit order of its entries, implemented as a
/// doubly-linked list threaded by key through a hash table.
///
/// This is the main type alias using the default hasher. For custom hashers
/// or other stores, use [`ordered_map::OrderedMap`] directly.
///
/// # Examples
///
/// ```
/// use odict::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.move_first(&"b").unwrap();
///
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"b", &2), (&"a", &1)]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, HashStore<K, V>>;

/// An [`OrderedMap`] stored in a `BTreeMap`, for keys that are `Ord` but not
/// `Hash`. Behaves exactly like [`OrderedMap`]; only the storage differs.
///
/// # Examples
///
/// ```
/// use odict::OrderedTreeMap;
///
/// let mut map = OrderedTreeMap::new();
/// map.insert(3, "c");
/// map.insert(1, "a");
/// assert_eq!(map.key_vec(), [3, 1]);
/// ```
pub type OrderedTreeMap<K, V> = crate::ordered_map::OrderedMap<K, V, TreeStore<K, V>>;

pub use deep_clone::CloneMemo;
pub use deep_clone::DeepClone;
pub use error::Direction;
pub use error::Error;
pub use ordered_map::Entry;
pub use ordered_map::IntoIter;
pub use ordered_map::Iter;
pub use ordered_map::LowLevel;
pub use ordered_map::OccupiedEntry;
pub use ordered_map::Snapshot;
pub use ordered_map::VacantEntry;
pub use store::HashStore;
pub use store::Node;
pub use store::NodeStore;
pub use store::TreeStore;
