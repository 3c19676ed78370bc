use crate::collector::{Collector, assert_collector};

use std::{fmt::Debug, ops::ControlFlow};

/// Left-folds the collected items with `f`, seeded by the first item.
///
/// - No items: the [`Output`](Collector::Output) is `None`, and `f` is never called.
/// - One item `a`: `Some(a)`, still without calling `f`.
/// - Two items `a, b`: `Some(f(a, b))`, and so on from the left.
///
/// No default value stands in for the seed, so an empty input can't be mistaken
/// for a real result. [`Slice::reduce()`](crate::Slice::reduce) and the pipeline's
/// `Channel::reduce()` both drain into this collector.
///
/// # Examples
///
/// ```
/// use sugared::{prelude::*, iter::Reduce};
///
/// let mut collector = Reduce::new(|accum, num| accum + num);
///
/// assert!(collector.collect(1).is_continue());
/// assert!(collector.collect(3).is_continue());
/// assert!(collector.collect(5).is_continue());
///
/// assert_eq!(collector.finish(), Some(9));
/// ```
///
/// The output is `None` if no items were collected.
///
/// ```
/// use sugared::{prelude::*, iter::Reduce};
///
/// assert_eq!(Reduce::new(|accum: i32, num| accum + num).finish(), None);
/// ```
#[derive(Clone)]
pub struct Reduce<T, F> {
    accum: Option<T>,
    f: F,
}

impl<T, F> Reduce<T, F>
where
    F: FnMut(T, T) -> T,
{
    /// Creates a new instance of this collector with a given reduction function.
    #[inline]
    pub const fn new(f: F) -> Self {
        assert_collector::<_, T>(Self { accum: None, f })
    }
}

impl<T, F> Collector<T> for Reduce<T, F>
where
    F: FnMut(T, T) -> T,
{
    type Output = Option<T>;

    fn collect(&mut self, item: T) -> ControlFlow<()> {
        if let Some(accum) = self.accum.take() {
            self.accum = Some((self.f)(accum, item));
        } else {
            self.accum = Some(item);
        };

        ControlFlow::Continue(())
    }

    #[inline]
    fn finish(self) -> Self::Output {
        self.accum
    }

    fn collect_many(&mut self, items: impl IntoIterator<Item = T>) -> ControlFlow<()> {
        self.accum = self
            .accum
            .take()
            .into_iter()
            .chain(items)
            .reduce(&mut self.f);

        ControlFlow::Continue(())
    }

    fn collect_then_finish(self, items: impl IntoIterator<Item = T>) -> Self::Output {
        self.accum.into_iter().chain(items).reduce(self.f)
    }
}

impl<T: Debug, F> Debug for Reduce<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reduce")
            .field("accum", &self.accum)
            .finish()
    }
}
