//! A concurrent pipeline of filter and map stages connected by rendezvous channels.
//!
//! A pipeline starts with a producer ([`Channel::produce()`] or [`Slice::pipe()`])
//! that writes every element, in order, onto a fresh channel from its own thread.
//! Each [`filter()`](Channel::filter) or [`map()`](Channel::map) spawns one more
//! worker thread reading the previous channel and writing a new one, so stages
//! run concurrently while order is kept end to end.
//! A terminal such as [`reduce()`](Channel::reduce) blocks the caller until
//! the last stage closes.
//!
//! Channels carry no buffer: a worker's send waits until the next stage takes
//! the element.
//!
//! # Faults and shutdown
//!
//! - A panicking callback does not tear anything down. It becomes
//!   [`Error::CallbackPanicked`], is forwarded by every later stage, and is
//!   returned by the terminal.
//! - [`CancelToken::cancel()`] wakes every blocked stage; the terminal returns
//!   [`Error::Cancelled`].
//! - Dropping a [`Channel`] before it is drained makes the upstream worker's
//!   next send fail, and every worker up to the producer exits in turn.
//!
//! # Examples
//!
//! ```
//! use sugared::Slice;
//!
//! let nums = Slice::from([1, 2, 3]);
//!
//! let twos = nums
//!     .pipe()
//!     .filter(|&num| num == 2)
//!     .map(|num| num.to_string())
//!     .collect_vec()?;
//! assert_eq!(twos, ["2"]);
//!
//! assert_eq!(nums.pipe().reduce(|a, b| a + b)?, Some(6));
//! # Ok::<_, sugared::Error>(())
//! ```
//!
//! [`Slice::pipe()`]: crate::Slice::pipe
//! [`Error::CallbackPanicked`]: crate::Error::CallbackPanicked
//! [`Error::Cancelled`]: crate::Error::Cancelled

mod cancel;
mod channel;
mod sink;
mod worker;

use std::fmt;

pub use cancel::*;
pub use channel::*;

/// The role of a pipeline worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// The producer writing the source elements.
    Source,
    Filter,
    Map,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageKind::Source => "source",
            StageKind::Filter => "filter",
            StageKind::Map => "map",
        })
    }
}

/// What travels between two stages: an element, or the fault that ended the stream.
pub(crate) type Message<T> = crate::Result<T>;
