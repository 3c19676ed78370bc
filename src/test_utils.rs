use std::{fmt::Debug, ops::ControlFlow};

use proptest::{prelude::*, test_runner::TestCaseResult};

use crate::collector::Collector;

/// Checks that `collect()`, `collect_many()` and `collect_then_finish()` of the collectors
/// built by `collector_factory` agree with each other and with `iter_way`.
pub fn proptest_collector<I, C>(
    mut iter_factory: impl FnMut() -> I,
    mut collector_factory: impl FnMut() -> C,
    should_break_pred: impl FnOnce(I) -> bool,
    iter_way: impl FnOnce(I) -> C::Output,
) -> TestCaseResult
where
    I: Iterator,
    C: Collector<I::Item, Output: PartialEq + Debug>,
{
    let should_break = should_break_pred(iter_factory());
    let expected_result = iter_way(iter_factory());

    // `collect()`
    let mut collector = collector_factory();
    let mut iter = iter_factory();
    let has_stopped = iter.try_for_each(|item| collector.collect(item)).is_break();
    prop_assert_eq!(
        has_stopped,
        should_break,
        "`collect()` didn't break correctly"
    );
    prop_assert_eq!(
        &collector.finish(),
        &expected_result,
        "`collect()`'s result mismatched"
    );
    let collect_rem = iter.count();

    // `collect_many()`
    let mut collector = collector_factory();
    let mut iter = iter_factory();
    let has_stopped = collector.collect_many(&mut iter).is_break();
    prop_assert_eq!(
        has_stopped,
        should_break,
        "`collect_many()` didn't break correctly"
    );
    prop_assert_eq!(
        &collector.finish(),
        &expected_result,
        "`collect_many()`'s result mismatched"
    );
    let collect_many_rem = iter.count();

    // `collect_then_finish()`
    let collector = collector_factory();
    let mut iter = iter_factory();
    prop_assert_eq!(
        &collector.collect_then_finish(&mut iter),
        &expected_result,
        "`collect_then_finish()`'s result mismatched"
    );
    let collect_then_finish_rem = iter.count();

    prop_assert!(
        collect_rem == collect_many_rem && collect_many_rem == collect_then_finish_rem,
        "collect methods consume iterator inconsistently: {collect_rem}, {collect_many_rem}, {collect_then_finish_rem}",
    );

    Ok(())
}

/// A collector that keeps the first `n` items and then stops.
#[derive(Debug)]
pub struct Take<T> {
    items: Vec<T>,
    n: usize,
}

impl<T> Take<T> {
    pub fn new(n: usize) -> Self {
        Self {
            items: Vec::with_capacity(n),
            n,
        }
    }
}

impl<T> Collector<T> for Take<T> {
    type Output = Vec<T>;

    fn collect(&mut self, item: T) -> ControlFlow<()> {
        if self.items.len() < self.n {
            self.items.push(item);
        }

        if self.items.len() < self.n {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }

    fn finish(self) -> Self::Output {
        self.items
    }
}

/// Routes `tracing` output of the crate to the test harness. `RUST_LOG` controls the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod proptests {
    use proptest::collection::vec as propvec;

    use super::*;

    proptest! {
        #[test]
        fn take_stops_when_full(
            nums in propvec(any::<i32>(), ..=9),
            n in 1..=5_usize,
        ) {
            proptest_collector(
                || nums.iter().copied(),
                || Take::new(n),
                |iter| iter.count() >= n,
                |iter| iter.take(n).collect(),
            )?;
        }
    }
}
