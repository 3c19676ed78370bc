use std::{fmt::Debug, ops::ControlFlow, sync::Arc};

use crossbeam::channel::{Sender, select};

use super::{CancelToken, Message, cancel::Signal};
use crate::collector::Collector;

/// A collector that sends messages to the next stage through a rendezvous channel.
/// Its [`Output`](Collector::Output) is the number of messages delivered.
///
/// Each send blocks until the receiving stage takes the message. If the receiver
/// has hung up, the reader raised the hang-up signal, or the pipeline is cancelled,
/// this collector returns [`Break(())`](ControlFlow::Break) and the message is lost.
///
/// Finishing drops the only sender, which closes the downstream channel.
pub(crate) struct Sink<T> {
    tx: Sender<Message<T>>,
    token: CancelToken,
    hangup: Arc<Signal>,
    sent: usize,
}

impl<T> Sink<T> {
    pub(crate) fn new(tx: Sender<Message<T>>, token: CancelToken, hangup: Arc<Signal>) -> Self {
        Self {
            tx,
            token,
            hangup,
            sent: 0,
        }
    }

    /// Raised by the reading side once it stops reading.
    #[inline]
    pub(crate) fn hangup(&self) -> &Arc<Signal> {
        &self.hangup
    }

    /// Whether sending can no longer succeed.
    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.token.is_cancelled() || self.hangup.is_raised()
    }
}

impl<T> Collector<Message<T>> for Sink<T> {
    type Output = usize;

    fn collect(&mut self, message: Message<T>) -> ControlFlow<()> {
        if self.is_closed() {
            return ControlFlow::Break(());
        }

        select! {
            send(self.tx, message) -> res => match res {
                Ok(()) => {
                    self.sent += 1;
                    tracing::trace!(sent = self.sent, "forwarded");
                    ControlFlow::Continue(())
                }
                Err(_) => ControlFlow::Break(()),
            },
            recv(self.token.signal()) -> _ => ControlFlow::Break(()),
            recv(self.hangup.receiver()) -> _ => ControlFlow::Break(()),
        }
    }

    #[inline]
    fn finish(self) -> Self::Output {
        self.sent
    }
}

impl<T> Debug for Sink<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("sent", &self.sent)
            .field("token", &self.token)
            .field("hangup", &self.hangup)
            .finish()
    }
}
