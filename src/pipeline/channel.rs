use std::{fmt::Debug, iter::FusedIterator, sync::Arc};

use crossbeam::channel::{self, Receiver, select};

use super::{CancelToken, Message, StageKind, cancel::Signal, worker};
use crate::{
    Error, Result, Slice,
    collector::Collector,
    iter::Reduce,
};

/// The receiving end of one pipeline stage.
///
/// A channel is consumed by chaining another stage onto it or by a blocking
/// terminal. It cannot be cloned, so every stage has exactly one reader.
/// Dropping it, or the [`IntoIter`] draining it, shuts down every upstream worker,
/// including stages that have stopped forwarding anything.
///
/// # Examples
///
/// ```
/// use sugared::pipeline::Channel;
///
/// let lengths = Channel::produce(["a", "bb", "ccc"])
///     .map(str::len)
///     .filter(|&len| len > 1)
///     .collect_vec()?;
///
/// assert_eq!(lengths, [2, 3]);
/// # Ok::<_, sugared::Error>(())
/// ```
pub struct Channel<T> {
    rx: Receiver<Message<T>>,
    token: CancelToken,
    // Raised on drop; the writing worker stops even if it has nothing to send.
    hangup: Arc<Signal>,
    depth: usize,
}

impl<T: Send + 'static> Channel<T> {
    /// Spawns a producer that writes every item, in order, onto a new channel, then closes it.
    ///
    /// Returns at once; production runs concurrently with the caller.
    pub fn produce<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::produce_with_token(items, CancelToken::new())
    }

    /// Like [`produce()`](Channel::produce), but every stage of the pipeline
    /// will observe `token`.
    pub fn produce_with_token<I>(items: I, token: CancelToken) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        let items = items.into_iter();
        let (rx, hangup) = worker::spawn(StageKind::Source, 0, token.clone(), move |sink| {
            worker::drive(StageKind::Source, 0, items.map(Ok), sink, Some)
        });

        Self {
            rx,
            token,
            hangup,
            depth: 0,
        }
    }

    /// Adds a stage forwarding only the elements for which `pred` returns `true`.
    ///
    /// Returns without waiting for any element to flow.
    pub fn filter<F>(self, mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        self.stage(StageKind::Filter, move |item| pred(&item).then_some(item))
    }

    /// Adds a stage forwarding `f` applied to every element.
    ///
    /// Returns without waiting for any element to flow.
    pub fn map<U, F>(self, mut f: F) -> Channel<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        self.stage(StageKind::Map, move |item| Some(f(item)))
    }

    fn stage<U, F>(self, kind: StageKind, step: F) -> Channel<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> Option<U> + Send + 'static,
    {
        let depth = self.depth + 1;
        let token = self.token.clone();
        let (rx, hangup) = worker::spawn(kind, depth, token.clone(), move |sink| {
            let upstream = self.into_iter().read_by(Arc::clone(sink.hangup()));
            worker::drive(kind, depth, upstream, sink, step)
        });

        Channel {
            rx,
            token,
            hangup,
            depth,
        }
    }
}

impl<T> Channel<T> {
    /// Blocks until the channel closes, left-folding the elements in arrival order
    /// with the first one as seed.
    ///
    /// Returns `Ok(None)` if the channel closed without any element; `f` is never called then.
    ///
    /// # Errors
    ///
    /// The first fault of the pipeline, such as [`Error::CallbackPanicked`] or
    /// [`Error::Cancelled`].
    pub fn reduce<F>(self, f: F) -> Result<Option<T>>
    where
        F: FnMut(T, T) -> T,
    {
        self.feed_into(Reduce::new(f))
    }

    /// Blocks until the channel closes and returns every element in order.
    ///
    /// # Errors
    ///
    /// The first fault of the pipeline.
    pub fn collect_vec(self) -> Result<Vec<T>> {
        self.feed_into(Vec::new())
    }

    /// Feeds every element into `collector` until the channel closes or the collector stops,
    /// then returns its output.
    ///
    /// If the collector stops early, every upstream worker is shut down.
    ///
    /// # Errors
    ///
    /// The first fault of the pipeline. The partial output is discarded.
    pub fn feed_into<C>(self, collector: C) -> Result<C::Output>
    where
        C: Collector<T>,
    {
        let mut collector = collector;
        for message in self {
            if collector.collect(message?).is_break() {
                break;
            }
        }

        Ok(collector.finish())
    }

    /// The token shared by every stage of this pipeline.
    #[inline]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.token
    }

    /// Cancels every stage of this pipeline.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// How many filter/map stages are between the producer and this channel.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<T> Drop for Channel<T> {
    fn drop(&mut self) {
        if self.hangup.raise() {
            tracing::trace!(depth = self.depth, "reader hung up");
        }
    }
}

impl<T> IntoIterator for Channel<T> {
    type Item = Result<T>;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            channel: self,
            reader: None,
            done: false,
        }
    }
}

impl<T> Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("depth", &self.depth)
            .field("token", &self.token)
            .finish()
    }
}

/// A blocking iterator draining a [`Channel`].
///
/// Yields `Ok` for every element, then ends when the channel closes.
/// A fault is yielded once as `Err` and ends the iteration.
///
/// This `struct` is created by [`Channel::into_iter()`].
pub struct IntoIter<T> {
    channel: Channel<T>,
    // Hang-up signal of the worker reading this iterator, if any.
    reader: Option<Arc<Signal>>,
    done: bool,
}

impl<T> IntoIter<T> {
    /// The token shared by every stage of the drained pipeline.
    #[inline]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.channel.token
    }

    /// Ends the iteration once `reader` is raised, even while waiting for an element.
    pub(super) fn read_by(mut self, reader: Arc<Signal>) -> Self {
        self.reader = Some(reader);
        self
    }

    fn recv(&self) -> Option<Message<T>> {
        let Channel { rx, token, .. } = &self.channel;

        if token.is_cancelled() {
            return Some(Err(Error::Cancelled));
        }
        if self.reader.as_deref().is_some_and(Signal::is_raised) {
            return None;
        }

        let never = channel::never();
        let reader = self.reader.as_deref().map_or(&never, Signal::receiver);

        select! {
            recv(rx) -> message => match message {
                Ok(message) => Some(message),
                // Upstream may have closed because of the cancellation.
                Err(_) if token.is_cancelled() => Some(Err(Error::Cancelled)),
                Err(_) => None,
            },
            recv(token.signal()) -> _ => Some(Err(Error::Cancelled)),
            recv(reader) -> _ => None,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let message = self.recv();
        self.done = !matches!(message, Some(Ok(_)));
        message
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntoIter")
            .field("channel", &self.channel)
            .field("reader", &self.reader)
            .field("done", &self.done)
            .finish()
    }
}

impl<T: Clone + Send + 'static> Slice<T> {
    /// Starts a pipeline producing a copy of every element, in order.
    ///
    /// See [`Channel::produce()`].
    pub fn pipe(&self) -> Channel<T> {
        Channel::produce(self.clone())
    }
}

impl<T: Send + 'static> Slice<T> {
    /// Starts a pipeline producing every element, in order.
    pub fn into_pipe(self) -> Channel<T> {
        Channel::produce(self)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
        time::Duration,
    };

    use crossbeam::channel::{self, Sender};

    use super::*;
    use crate::test_utils::init_tracing;

    fn nums() -> Slice<i32> {
        Slice::from([1, 2, 3])
    }

    #[test]
    fn filter_then_map_to_string() {
        init_tracing();

        let result = nums()
            .pipe()
            .filter(|&num| num == 2)
            .map(|num| num.to_string())
            .collect_vec();

        assert!(matches!(result.as_deref(), Ok([two]) if two == "2"));
    }

    #[test]
    fn reduce_to_sum() {
        assert!(matches!(nums().pipe().reduce(|a, b| a + b), Ok(Some(6))));
    }

    #[test]
    fn reduce_empty_is_none() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let result = nums()
            .pipe()
            .filter(|_| false)
            .map(|num| num * 10)
            .reduce(|a, b| {
                counted.fetch_add(1, Ordering::SeqCst);
                a + b
            });

        assert!(matches!(result, Ok(None)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(matches!(
            Slice::<u8>::new().into_pipe().reduce(|a, b| a + b),
            Ok(None)
        ));
    }

    #[test]
    fn reduce_single_and_pair() {
        let concat = |a: String, b: String| format!("{a}+{b}");

        let single = Channel::produce(["x".to_string()]).reduce(concat);
        assert!(matches!(single, Ok(Some(ref s)) if s == "x"));

        let pair = Channel::produce(["x".to_string(), "y".to_string()]).reduce(concat);
        assert!(matches!(pair, Ok(Some(ref s)) if s == "x+y"));
    }

    #[test]
    fn depth_counts_stages() {
        let channel = nums().pipe();
        assert_eq!(channel.depth(), 0);

        let channel = channel.filter(|_| true).map(|num| num + 1);
        assert_eq!(channel.depth(), 2);
        assert!(matches!(channel.collect_vec().as_deref(), Ok([2, 3, 4])));
    }

    #[test]
    fn receiver_is_untouched() {
        let source = nums();
        let _ = source.pipe().map(|num| num * 2).collect_vec();
        assert_eq!(source, [1, 2, 3]);
    }

    #[test]
    fn panicking_mapper_is_reported() {
        init_tracing();

        let result = nums()
            .pipe()
            .map(|num| {
                if num == 2 {
                    panic!("boom at {num}");
                }
                num
            })
            .map(|num| num + 1)
            .collect_vec();

        assert!(matches!(
            result,
            Err(Error::CallbackPanicked { stage: StageKind::Map, depth: 1, ref message })
                if message == "boom at 2"
        ));
    }

    #[test]
    fn elements_before_a_fault_still_arrive() {
        let mut drain = nums()
            .pipe()
            .filter(|&num| {
                assert!(num < 3, "too big");
                true
            })
            .into_iter();

        assert!(matches!(drain.next(), Some(Ok(1))));
        assert!(matches!(drain.next(), Some(Ok(2))));
        assert!(matches!(
            drain.next(),
            Some(Err(Error::CallbackPanicked { stage: StageKind::Filter, depth: 1, .. }))
        ));
        assert!(drain.next().is_none());
    }

    #[test]
    fn panicking_reducer_is_not_caught() {
        // Reduce runs on the caller's thread, so the panic reaches the caller as usual.
        let outcome = thread::spawn(|| nums().pipe().reduce(|_, _| panic!("reducer"))).join();
        assert!(outcome.is_err());
    }

    #[test]
    fn cancel_stops_an_endless_pipeline() {
        init_tracing();

        let channel = Channel::produce(0_u64..).filter(|num| num % 2 == 0);
        let token = channel.cancel_token().clone();

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            token.cancel();
        });

        let result = channel.reduce(u64::wrapping_add);
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(canceller.join().is_ok());
    }

    #[test]
    fn shared_token_cancels_before_start() {
        let token = CancelToken::new();
        token.cancel();

        let result = Channel::produce_with_token(nums(), token).map(|num| num * 2).collect_vec();
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    /// An endless iterator that reports when the producer drops it.
    struct Endless {
        next: u64,
        dropped: Sender<()>,
    }

    impl Iterator for Endless {
        type Item = u64;

        fn next(&mut self) -> Option<u64> {
            self.next += 1;
            Some(self.next)
        }
    }

    impl Drop for Endless {
        fn drop(&mut self) {
            let _ = self.dropped.send(());
        }
    }

    #[test]
    fn dropping_the_consumer_releases_the_producer() {
        init_tracing();

        let (dropped, producer_exited) = channel::bounded(1);
        let mut drain = Channel::produce(Endless { next: 0, dropped })
            .map(|num| num * 3)
            .filter(|num| num % 2 == 0)
            .into_iter();

        assert!(matches!(drain.next(), Some(Ok(6))));
        drop(drain);

        assert!(
            producer_exited.recv_timeout(Duration::from_secs(5)).is_ok(),
            "producer is still blocked"
        );
    }

    #[test]
    fn early_stopping_collector_releases_the_producer() {
        let (dropped, producer_exited) = channel::bounded(1);
        let firsts = Channel::produce(Endless { next: 0, dropped })
            .feed_into(crate::test_utils::Take::new(3));

        assert!(matches!(firsts.as_deref(), Ok([1, 2, 3])));
        assert!(producer_exited.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn early_stop_releases_a_stage_that_stopped_forwarding() {
        init_tracing();

        let (dropped, producer_exited) = channel::bounded(1);
        let firsts = Channel::produce(Endless { next: 0, dropped })
            .filter(|&num| num < 3)
            .feed_into(crate::test_utils::Take::new(2));

        assert!(matches!(firsts.as_deref(), Ok([1, 2])));
        assert!(
            producer_exited.recv_timeout(Duration::from_secs(5)).is_ok(),
            "producer still running after the consumer stopped"
        );
    }

    #[test]
    fn dropping_a_silent_pipeline_releases_the_producer() {
        let (dropped, producer_exited) = channel::bounded(1);
        let silent = Channel::produce(Endless { next: 0, dropped })
            .filter(|_| false)
            .map(|num| num + 1);
        drop(silent);

        assert!(
            producer_exited.recv_timeout(Duration::from_secs(5)).is_ok(),
            "producer still running after the channel was dropped"
        );
    }
}
