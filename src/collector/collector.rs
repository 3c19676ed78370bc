use std::ops::ControlFlow;

use super::{Filter, Map, assert_collector};

/// Collects items and produces a final output.
///
/// This trait requires two core methods:
///
/// - [`collect`](Collector::collect): consumes an item and returns whether the collector continues
///   accumulating further items *after* this operation.
/// - [`finish`](Collector::finish): consumes the collector and returns the accumulated result.
///
/// # Example
///
/// ```
/// use std::ops::ControlFlow;
/// use sugared::prelude::*;
///
/// #[derive(Default)]
/// struct Longest(Option<String>);
///
/// impl Collector<String> for Longest {
///     type Output = Option<String>;
///
///     fn collect(&mut self, word: String) -> ControlFlow<()> {
///         match &self.0 {
///             Some(longest) if longest.len() >= word.len() => {}
///             _ => self.0 = Some(word),
///         }
///         ControlFlow::Continue(())
///     }
///
///     fn finish(self) -> Self::Output {
///         self.0
///     }
/// }
///
/// let longest = "the noble and the singer"
///     .split_whitespace()
///     .map(String::from)
///     .feed_into(Longest::default());
///
/// assert_eq!(longest.as_deref(), Some("singer"));
/// ```
pub trait Collector<T>: Sized {
    /// The result this collector yields, via the [`finish`](Collector::finish) method.
    type Output;

    /// Collects an item and returns a [`ControlFlow`] indicating whether the collector is "closed",
    /// meaning it will no longer accumulate items **right after** this operation.
    ///
    /// Return [`Continue(())`] to indicate the collector can still accumulate more items,
    /// or [`Break(())`] if further feeding is meaningless.
    /// A collector writing into a channel, for example, breaks once the receiving side hung up.
    ///
    /// [`Continue(())`]: ControlFlow::Continue
    /// [`Break(())`]: ControlFlow::Break
    fn collect(&mut self, item: T) -> ControlFlow<()>;

    /// Consumes the collector and returns the accumulated result.
    fn finish(self) -> Self::Output;

    /// Collects items from an iterator and returns a [`ControlFlow`] indicating whether the collector is "closed".
    ///
    /// This method can be overridden for optimization.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sugared::prelude::*;
    ///
    /// let mut v = vec![1, 2];
    /// assert!(v.collect_many([3, 4, 5]).is_continue());
    ///
    /// assert_eq!(v, [1, 2, 3, 4, 5]);
    /// ```
    fn collect_many(&mut self, items: impl IntoIterator<Item = T>) -> ControlFlow<()> {
        // `try_for_each` over `for` since adaptors like `filter` drive it better.
        items.into_iter().try_for_each(|item| self.collect(item))
    }

    /// Collects items from an iterator, consumes the collector, and produces the accumulated result.
    ///
    /// This is equivalent to calling [`collect_many`](Collector::collect_many)
    /// followed by [`finish`](Collector::finish), which is the default implementation.
    fn collect_then_finish(self, items: impl IntoIterator<Item = T>) -> Self::Output {
        let mut this = self;

        // Breaking or not, the output is the same.
        let _ = this.collect_many(items);
        this.finish()
    }

    /// Creates a collector that only collects items satisfying `pred`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugared::prelude::*;
    ///
    /// let evens = (1..=6).feed_into(Vec::<i32>::new().filter(|&num: &i32| num % 2 == 0));
    ///
    /// assert_eq!(evens, [2, 4, 6]);
    /// ```
    #[inline]
    fn filter<F>(self, pred: F) -> Filter<Self, F>
    where
        F: FnMut(&T) -> bool,
    {
        assert_collector(Filter::new(self, pred))
    }

    /// Creates a collector that transforms every item with `f` before collecting it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sugared::prelude::*;
    ///
    /// let rendered = [1, 2].into_iter().feed_into(Vec::<String>::new().map(|num: i32| format!("#{num}")));
    ///
    /// assert_eq!(rendered, ["#1", "#2"]);
    /// ```
    #[inline]
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(U) -> T,
    {
        assert_collector(Map::new(self, f))
    }
}
