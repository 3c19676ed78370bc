use std::{
    any::Any,
    ops::ControlFlow,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread,
};

use crossbeam::channel::{self, Receiver};

use super::{CancelToken, Message, StageKind, cancel::Signal, sink::Sink};
use crate::{Error, collector::Collector};

/// Spawns a named worker thread running `body` with a sink into a fresh rendezvous channel,
/// and returns the receiving end of that channel with the sink's hang-up signal.
///
/// The reader raises the hang-up signal once it stops reading, so the worker exits even
/// if it never sends again.
///
/// If the thread cannot be spawned, the returned channel yields a single
/// [`Error::Spawn`] and closes.
pub(super) fn spawn<U, F>(
    kind: StageKind,
    depth: usize,
    token: CancelToken,
    body: F,
) -> (Receiver<Message<U>>, Arc<Signal>)
where
    U: Send + 'static,
    F: FnOnce(Sink<U>) + Send + 'static,
{
    let (tx, rx) = channel::bounded(0);
    let hangup = Arc::new(Signal::new());
    let sink = Sink::new(tx, token, Arc::clone(&hangup));

    let spawned = thread::Builder::new()
        .name(format!("sugared-{kind}-{depth}"))
        .spawn(move || body(sink));

    match spawned {
        // Detached: the worker ends on its own once its upstream closes,
        // its downstream hangs up, or the pipeline is cancelled.
        Ok(_) => (rx, hangup),
        Err(source) => {
            tracing::error!(%kind, depth, %source, "failed to spawn worker");
            let (tx, rx) = channel::bounded(1);
            let _ = tx.send(Err(Error::Spawn {
                stage: kind,
                source,
            }));
            (rx, hangup)
        }
    }
}

/// Runs one stage: pulls messages from `upstream`, applies `step` to every element and
/// sends what it yields into `sink`, until `upstream` is exhausted, a fault is forwarded,
/// or `sink` stops accepting.
///
/// `sink` is checked before every pull, so a stage that drops every element still
/// stops once its reader is gone.
///
/// `step` returning `None` drops the element. Panics in `step` or in `upstream` are
/// caught and forwarded as [`Error::CallbackPanicked`].
pub(super) fn drive<T, U>(
    kind: StageKind,
    depth: usize,
    mut upstream: impl Iterator<Item = Message<T>>,
    mut sink: Sink<U>,
    mut step: impl FnMut(T) -> Option<U>,
) {
    let span = tracing::debug_span!("stage", %kind, depth);
    let _entered = span.enter();
    tracing::debug!("worker started");

    let flow = loop {
        if sink.is_closed() {
            break ControlFlow::Break(());
        }

        let message = match panic::catch_unwind(AssertUnwindSafe(|| upstream.next())) {
            Ok(Some(message)) => message,
            Ok(None) => break ControlFlow::Continue(()),
            Err(payload) => Err(panicked(kind, depth, payload)),
        };

        let outgoing = match message {
            Ok(item) => match panic::catch_unwind(AssertUnwindSafe(|| step(item))) {
                Ok(Some(out)) => Ok(out),
                Ok(None) => continue,
                Err(payload) => Err(panicked(kind, depth, payload)),
            },
            Err(e) => Err(e),
        };

        let is_fault = outgoing.is_err();
        if sink.collect(outgoing).is_break() {
            break ControlFlow::Break(());
        }
        if is_fault {
            // The fault ends the stream; nothing after it is meaningful.
            break ControlFlow::Continue(());
        }
    };

    // `upstream` also ends early once the reader hangs up.
    let stopped = flow.is_break() || sink.is_closed();
    let sent = sink.finish();
    if stopped {
        tracing::debug!(sent, "downstream hung up or pipeline cancelled");
    } else {
        tracing::debug!(sent, "closing downstream");
    }
}

fn panicked(kind: StageKind, depth: usize, payload: Box<dyn Any + Send>) -> Error {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    };

    tracing::warn!(%kind, depth, %message, "callback panicked");
    Error::CallbackPanicked {
        stage: kind,
        depth,
        message,
    }
}
