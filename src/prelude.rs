//! Re-exports commonly used items from this crate.
//!
//! This module is intended to be imported with a wildcard, providing
//! convenient access to the most frequently used traits and types.
//!
//! # Example
//!
//! ```
//! use sugared::prelude::*;
//! ```

pub use crate::collector::Collector;
pub use crate::iter::IteratorExt;
#[cfg(feature = "pipeline")]
pub use crate::pipeline::{CancelToken, Channel};
pub use crate::{Mapping, Slice};
