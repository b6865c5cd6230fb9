//! Serde support for every map backend.
//!
//! Maps serialize as serde maps in their iteration order. Deserialization
//! inserts entries one by one through [`Map::put`], so a repeated key keeps
//! the last value.

use std::fmt;
#[cfg(feature = "hash")]
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Map;
#[cfg(feature = "hash")]
use super::{ChainedHashMap, UnorderedBucketMap};
#[cfg(feature = "tree")]
use super::OrderedTreeMap;
#[cfg(feature = "sorted")]
use super::SortedArrayMap;

struct MapVisitor<M, K, V> {
    map_marker: PhantomData<M>,
    key_marker: PhantomData<K>,
    value_marker: PhantomData<V>,
}

impl<M, K, V> MapVisitor<M, K, V> {
    const fn new() -> Self {
        Self {
            map_marker: PhantomData,
            key_marker: PhantomData,
            value_marker: PhantomData,
        }
    }
}

impl<'de, M, K, V> Visitor<'de> for MapVisitor<M, K, V>
where
    M: Map<K, V> + Default,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = M::default();
        while let Some((key, value)) = access.next_entry()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

macro_rules! impl_serde {
    ($map:ident, [$($bound:tt)+]) => {
        impl<K, V> Serialize for $map<K, V>
        where
            K: Serialize,
            V: Serialize,
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

        impl<'de, K, V> Deserialize<'de> for $map<K, V>
        where
            K: Deserialize<'de> + $($bound)+,
            V: Deserialize<'de>,
        {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_map(MapVisitor::new())
            }
        }
    };
}

#[cfg(feature = "tree")]
impl_serde!(OrderedTreeMap, [Ord]);
#[cfg(feature = "sorted")]
impl_serde!(SortedArrayMap, [Ord]);
#[cfg(feature = "hash")]
impl_serde!(ChainedHashMap, [Hash + Eq]);
#[cfg(feature = "hash")]
impl_serde!(UnorderedBucketMap, [Eq]);
