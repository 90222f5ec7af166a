use core::fmt;
use core::marker::PhantomData;

use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::ordered_map::OrderedMap;
use crate::store::NodeStore;

/// Serializes as a map whose entries appear in order.
impl<K, V, M> Serialize for OrderedMap<K, V, M>
where
    K: Serialize,
    V: Serialize,
    M: NodeStore<K, V>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V, M> {
    marker: PhantomData<fn() -> OrderedMap<K, V, M>>,
}

impl<'de, K, V, M> Visitor<'de> for OrderedMapVisitor<K, V, M>
where
    K: Deserialize<'de> + Clone + Eq,
    V: Deserialize<'de>,
    M: NodeStore<K, V>,
{
    type Value = OrderedMap<K, V, M>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

/// Deserializes from a map, keeping the entries in input order. A repeated
/// key keeps its first position and its last value.
impl<'de, K, V, M> Deserialize<'de> for OrderedMap<K, V, M>
where
    K: Deserialize<'de> + Clone + Eq,
    V: Deserialize<'de>,
    M: NodeStore<K, V>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}
