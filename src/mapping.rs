//! [`Mapping`], a key/value collection with key and value extraction.

use std::{
    collections::HashMap,
    hash::{BuildHasher, Hash, RandomState},
    ops::{ControlFlow, Deref, DerefMut},
};

use crate::{Slice, collector::Collector, iter::IteratorExt};

/// A hash map whose keys and values can be pulled out as [`Slice`]s.
///
/// The order of [`keys()`](Mapping::keys) and [`values()`](Mapping::values) is
/// unspecified and may differ between two calls on the same mapping, but the
/// `n`-th key of one call is paired with the `n`-th value of the same iteration.
///
/// # Examples
///
/// ```
/// use sugared::Mapping;
///
/// let ages: Mapping<&str, u32> = [("ann", 31), ("bob", 27)].into_iter().collect();
///
/// let mut names = ages.keys().into_vec();
/// names.sort();
/// assert_eq!(names, ["ann", "bob"]);
///
/// assert_eq!(ages.values().reduce(|a, b| a + b), Some(58));
/// ```
#[derive(Debug, Clone)]
pub struct Mapping<K, V, S = RandomState>(HashMap<K, V, S>);

impl<K, V> Mapping<K, V> {
    /// Creates an empty mapping.
    #[inline]
    pub fn new() -> Self {
        Self(HashMap::new())
    }
}

impl<K, V, S> Mapping<K, V, S> {
    /// Returns a sequence of cloned keys.
    pub fn keys(&self) -> Slice<K>
    where
        K: Clone,
    {
        Slice::from(self.0.keys().cloned().feed_into(Vec::with_capacity(self.0.len())))
    }

    /// Returns a sequence of cloned values.
    pub fn values(&self) -> Slice<V>
    where
        V: Clone,
    {
        Slice::from(self.0.values().cloned().feed_into(Vec::with_capacity(self.0.len())))
    }

    /// Consumes the mapping and returns its keys.
    pub fn into_keys(self) -> Slice<K> {
        self.0.into_keys().collect()
    }

    /// Consumes the mapping and returns its values.
    pub fn into_values(self) -> Slice<V> {
        self.0.into_values().collect()
    }

    #[inline]
    pub fn into_inner(self) -> HashMap<K, V, S> {
        self.0
    }
}

impl<K, V> Default for Mapping<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Deref for Mapping<K, V, S> {
    type Target = HashMap<K, V, S>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V, S> DerefMut for Mapping<K, V, S> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for Mapping<K, V, S> {
    #[inline]
    fn from(map: HashMap<K, V, S>) -> Self {
        Self(map)
    }
}

impl<K, V, S> FromIterator<(K, V)> for Mapping<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K, V, S> IntoIterator for Mapping<K, V, S> {
    type Item = (K, V);
    type IntoIter = std::collections::hash_map::IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K, V, S> PartialEq for Mapping<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K, V, S> Eq for Mapping<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

/// Collects `(key, value)` pairs into a [`HashMap`]; later pairs overwrite earlier ones.
impl<K, V, S> Collector<(K, V)> for Mapping<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Output = Self;

    #[inline]
    fn collect(&mut self, (key, value): (K, V)) -> ControlFlow<()> {
        self.0.insert(key, value);
        ControlFlow::Continue(())
    }

    #[inline]
    fn finish(self) -> Self::Output {
        self
    }

    fn collect_many(&mut self, items: impl IntoIterator<Item = (K, V)>) -> ControlFlow<()> {
        self.0.extend(items);
        ControlFlow::Continue(())
    }
}
