//! The key-value pair stored by every map backend.

use std::mem;

/// A key-value pair with an immutable key and a mutable value.
///
/// Every backend owns its entries exclusively. Callers observe them
/// through `(&K, &V)` pairs or [`Entry::as_pair`].
///
/// # Examples
///
/// ```rust
/// use mapsmith::map::Entry;
///
/// let mut entry = Entry::new("answer", 41);
/// assert_eq!(entry.set_value(42), 41);
/// assert_eq!(entry.as_pair(), (&"answer", &42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key and a value.
    #[inline]
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the value.
    #[inline]
    pub const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub const fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    /// Borrows the entry as a `(key, value)` pair.
    #[inline]
    pub const fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Consumes the entry, returning its key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Consumes the entry, returning only its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_set_value_keeps_key() {
        let mut entry = Entry::new(1, "one");
        let previous = entry.set_value("uno");
        assert_eq!(previous, "one");
        assert_eq!(entry.key(), &1);
        assert_eq!(entry.value(), &"uno");
    }

    #[rstest]
    fn test_value_mut_updates_in_place() {
        let mut entry = Entry::new("count", 1);
        *entry.value_mut() += 1;
        assert_eq!(entry.into_parts(), ("count", 2));
    }

    #[rstest]
    fn test_from_tuple() {
        let entry: Entry<i32, char> = (7, 'x').into();
        assert_eq!(entry.as_pair(), (&7, &'x'));
        assert_eq!(entry.into_value(), 'x');
    }
}
