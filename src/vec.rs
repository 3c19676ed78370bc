//! A [`Collector`] for [`Vec`].
//!
//! This module corresponds to [`mod@std::vec`].

use std::ops::ControlFlow;

use crate::collector::Collector;

impl<T> Collector<T> for Vec<T> {
    type Output = Self;

    #[inline]
    fn collect(&mut self, item: T) -> ControlFlow<()> {
        self.push(item);
        ControlFlow::Continue(())
    }

    #[inline]
    fn finish(self) -> Self::Output {
        self
    }

    #[inline]
    fn collect_many(&mut self, items: impl IntoIterator<Item = T>) -> ControlFlow<()> {
        self.extend(items);
        ControlFlow::Continue(())
    }

    #[inline]
    fn collect_then_finish(mut self, items: impl IntoIterator<Item = T>) -> Self::Output {
        self.extend(items);
        self
    }
}
