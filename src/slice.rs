//! [`Slice`], an ordered sequence with functional sugar on top.
//!
//! Every method that returns a new [`Slice`] leaves the receiver untouched:
//! the result never shares storage with it.

use std::{fmt::Display, ops::Deref};

use crate::{
    Error, Result,
    collector::Collector,
    iter::{IteratorExt, Reduce},
};

/// An ordered sequence of `T` with `filter`, `map`, `reduce` and friends.
///
/// # Examples
///
/// ```
/// use sugared::Slice;
///
/// let nums = Slice::from(vec![1, 2, 3]);
///
/// assert_eq!(nums.filter(|&num| num < 2), [1]);
/// assert_eq!(nums.map(|num| format!("mapped {num}")), ["mapped 1", "mapped 2", "mapped 3"]);
/// assert_eq!(nums.reduce(|a, b| a + b), Some(6));
///
/// // The receiver is never modified.
/// assert_eq!(nums, [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Slice<T>(Vec<T>);

impl<T> Slice<T> {
    /// Creates an empty sequence.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns a sequence of the elements for which `pred` returns `true`, in order.
    pub fn filter(&self, pred: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        Self(self.iter().cloned().feed_into(Vec::<T>::new().filter(pred)))
    }

    /// Returns a sequence of `f` applied to every element, in order.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Slice<U> {
        Slice(self.iter().feed_into(Vec::<U>::new().map(f)))
    }

    /// Left-folds the sequence with `f`, seeded by the first element.
    ///
    /// Returns `None` for an empty sequence. A single element is returned as-is
    /// without calling `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugared::Slice;
    ///
    /// let words = Slice::from(vec!["a", "b", "c"]).map(|s| s.to_string());
    ///
    /// assert_eq!(words.reduce(|a, b| format!("({a}{b})")).as_deref(), Some("((ab)c)"));
    /// assert_eq!(Slice::<i32>::new().reduce(|a, b| a + b), None);
    /// ```
    pub fn reduce(&self, f: impl FnMut(T, T) -> T) -> Option<T>
    where
        T: Clone,
    {
        self.iter().cloned().feed_into(Reduce::new(f))
    }

    /// Returns a sequence with `items` appended after the existing elements.
    pub fn append(&self, items: impl IntoIterator<Item = T>) -> Self
    where
        T: Clone,
    {
        let mut elements = self.0.clone();
        elements.extend(items);
        Self(elements)
    }

    /// Returns a sequence without the element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index` is not in `0..len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugared::{Error, Slice};
    ///
    /// let nums = Slice::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(nums.delete(1)?, [1, 3]);
    /// assert!(matches!(nums.delete(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn delete(&self, index: usize) -> Result<Self>
    where
        T: Clone,
    {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        let mut elements = Vec::with_capacity(self.len() - 1);
        elements.extend_from_slice(&self.0[..index]);
        elements.extend_from_slice(&self.0[index + 1..]);
        Ok(Self(elements))
    }

    /// Returns `true` if some element equals `item`.
    #[inline]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.0.contains(item)
    }

    /// Clones every element into `dst`, which must have the same length.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if `dst.len() != self.len()`. `dst` is left untouched.
    pub fn copy_to(&self, dst: &mut [T]) -> Result<()>
    where
        T: Clone,
    {
        if dst.len() != self.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: dst.len(),
            });
        }

        dst.clone_from_slice(&self.0);
        Ok(())
    }

    /// Renders every element with its [`Display`] implementation.
    pub fn to_strings(&self) -> Vec<String>
    where
        T: Display,
    {
        self.iter().feed_into(Vec::<String>::new().map(|item: &T| item.to_string()))
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Slice<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> From<Vec<T>> for Slice<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self(elements)
    }
}

impl<T> From<Slice<T>> for Vec<T> {
    #[inline]
    fn from(slice: Slice<T>) -> Self {
        slice.0
    }
}

impl<T, const N: usize> From<[T; N]> for Slice<T> {
    #[inline]
    fn from(elements: [T; N]) -> Self {
        Self(elements.into())
    }
}

impl<T> FromIterator<T> for Slice<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Slice<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Slice<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Slice<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.0[..] == other[..]
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Slice<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.0[..] == other[..]
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for Slice<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.0[..] == other[..]
    }
}
