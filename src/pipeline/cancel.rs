use std::{
    fmt::Debug,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use crossbeam::channel::{self, Receiver, Sender};

/// Never sent; the signal channel only ever disconnects.
pub(crate) enum Never {}

/// A one-shot flag that blocked `select!`s can also wait on.
///
/// Raising it is permanent and idempotent.
pub(crate) struct Signal {
    raised: AtomicBool,
    // Dropping the sender disconnects `receiver`, waking every `select!` on it.
    trigger: Mutex<Option<Sender<Never>>>,
    receiver: Receiver<Never>,
}

impl Signal {
    pub(crate) fn new() -> Self {
        let (trigger, receiver) = channel::bounded(0);
        Self {
            raised: AtomicBool::new(false),
            trigger: Mutex::new(Some(trigger)),
            receiver,
        }
    }

    /// Returns `true` if this call raised it.
    pub(crate) fn raise(&self) -> bool {
        if self.raised.swap(true, Ordering::SeqCst) {
            return false;
        }

        drop(
            self.trigger
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );
        true
    }

    #[inline]
    pub(crate) fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Becomes ready (disconnected) once raised.
    #[inline]
    pub(crate) fn receiver(&self) -> &Receiver<Never> {
        &self.receiver
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("raised", &self.is_raised())
            .finish()
    }
}

/// A handle that stops every stage of a pipeline.
///
/// All stages built from one producer share its token. Clones refer to the
/// same token, so one can be handed to another thread to cancel from there.
///
/// Cancelling is permanent and idempotent.
///
/// # Examples
///
/// ```
/// use sugared::{Error, pipeline::Channel};
///
/// let mut drain = Channel::produce(0_u64..).map(|num| num * 2).into_iter();
/// let token = drain.cancel_token().clone();
///
/// assert!(matches!(drain.next(), Some(Ok(0))));
/// assert!(matches!(drain.next(), Some(Ok(2))));
///
/// token.cancel();
/// assert!(matches!(drain.next(), Some(Err(Error::Cancelled))));
/// assert!(drain.next().is_none());
/// ```
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<Signal>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Signal::new()),
        }
    }

    /// Cancels the pipeline.
    pub fn cancel(&self) {
        if self.inner.raise() {
            tracing::debug!("pipeline cancelled");
        }
    }

    /// Returns `true` once [`cancel()`](CancelToken::cancel) has been called.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_raised()
    }

    /// Becomes ready (disconnected) once the token is cancelled.
    #[inline]
    pub(crate) fn signal(&self) -> &Receiver<Never> {
        self.inner.receiver()
    }
}

impl Default for CancelToken {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
