use crate::collector::Collector;

/// Extends [`Iterator`] with the [`feed_into`](IteratorExt::feed_into) method
/// for working seamlessly with [`Collector`]s.
///
/// This trait is automatically implemented for all [`Iterator`] types.
pub trait IteratorExt: Iterator {
    /// Extracts items from this iterator into the provided collector till
    /// the collector stops accumulating or the iterator is exhausted,
    /// and returns the collector's output.
    ///
    /// To use this method, import the [`IteratorExt`] trait.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugared::{prelude::*, iter::Reduce};
    ///
    /// let sum = [4, 2, 6, 3].into_iter().feed_into(Reduce::new(|a, b| a + b));
    ///
    /// assert_eq!(sum, Some(15));
    /// ```
    #[inline]
    fn feed_into<C>(&mut self, collector: C) -> C::Output
    where
        C: Collector<Self::Item>,
    {
        collector.collect_then_finish(self)
    }
}

impl<I: Iterator> IteratorExt for I {}
