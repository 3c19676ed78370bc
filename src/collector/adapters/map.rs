use std::{fmt::Debug, ops::ControlFlow};

use crate::collector::Collector;

/// Converts every item with `f` before handing it to the inner collector.
///
/// Exactly one converted item is passed on per item, in arrival order.
/// [`Slice::map()`](crate::Slice::map) is this adaptor over a fresh [`Vec`], fed with
/// borrowed elements.
///
/// This `struct` is created by [`Collector::map()`].
#[derive(Clone)]
pub struct Map<C, F> {
    collector: C,
    f: F,
}

impl<C, F> Map<C, F> {
    pub(in crate::collector) fn new(collector: C, f: F) -> Self {
        Self { collector, f }
    }
}

impl<C, T, U, F> Collector<T> for Map<C, F>
where
    C: Collector<U>,
    F: FnMut(T) -> U,
{
    type Output = C::Output;

    #[inline]
    fn collect(&mut self, item: T) -> ControlFlow<()> {
        self.collector.collect((self.f)(item))
    }

    #[inline]
    fn finish(self) -> Self::Output {
        self.collector.finish()
    }

    fn collect_many(&mut self, items: impl IntoIterator<Item = T>) -> ControlFlow<()> {
        self.collector
            .collect_many(items.into_iter().map(&mut self.f))
    }

    fn collect_then_finish(self, items: impl IntoIterator<Item = T>) -> Self::Output {
        self.collector
            .collect_then_finish(items.into_iter().map(self.f))
    }
}

impl<C: Debug, F> Debug for Map<C, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("collector", &self.collector)
            .finish()
    }
}
