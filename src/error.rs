//! Errors reported by ordered map operations.

use core::fmt;

/// Direction of a neighbor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the tail.
    Next,
    /// Towards the head.
    Prev,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => f.write_str("next"),
            Direction::Prev => f.write_str("previous"),
        }
    }
}

/// Errors reported by [`OrderedMap`](crate::ordered_map::OrderedMap)
/// operations.
///
/// A failing operation never leaves the map partially modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<K> {
    /// The key is not present in the map.
    KeyNotFound(K),
    /// The operation needs at least one entry.
    EmptyContainer {
        /// Name of the operation that failed.
        operation: &'static str,
    },
    /// The key is present but has no neighbor in the requested direction.
    NoSuchNeighbor {
        /// The key whose neighbor was requested.
        key: K,
        /// The requested direction.
        direction: Direction,
    },
    /// The arguments are not acceptable for the operation, e.g. the same key
    /// given twice where two distinct keys are required.
    InvalidArgument(&'static str),
    /// The link structure does not form a single consistent list.
    CorruptLinks(&'static str),
}

impl<K> Error<K> {
    /// Returns the key carried by the error, if any.
    pub fn key(&self) -> Option<&K> {
        match self {
            Error::KeyNotFound(key) | Error::NoSuchNeighbor { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl<K: fmt::Debug> fmt::Display for Error<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound(key) => write!(f, "key not found: {:?}", key),
            Error::EmptyContainer { operation } => {
                write!(f, "{}(): ordered map is empty", operation)
            }
            Error::NoSuchNeighbor { key, direction } => {
                write!(f, "key {:?} has no {} key", key, direction)
            }
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            Error::CorruptLinks(reason) => write!(f, "corrupt link structure: {}", reason),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for Error<K> {}
