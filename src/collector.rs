//! Module contains the [`Collector`] trait and its adaptors.
//!
//! A collector is the "sink half" of a data flow: it is fed items one by one
//! and produces a final output once [`finish`](Collector::finish) is called.
//! Every operation of [`Slice`](crate::Slice) and every terminal of a
//! pipeline [`Channel`](crate::pipeline::Channel) is expressed as feeding a
//! collector.
//!
//! # Unspecified behaviors
//!
//! After [`Collector::collect()`] or [`Collector::collect_many()`] have returned
//! [`Break(())`] once, behaviors of subsequent calls to any method other than
//! [`finish()`](Collector::finish) are unspecified. They may keep accumulating,
//! or silently drop items, but they must not cause memory unsafety.
//!
//! [`Break(())`]: std::ops::ControlFlow::Break

mod adapters;
#[allow(clippy::module_inception)]
mod collector;

pub use adapters::*;
pub use collector::*;

#[inline(always)]
pub(crate) const fn assert_collector<C, T>(collector: C) -> C
where
    C: Collector<T>,
{
    collector
}
