//! Functional sugar for collections, plus a concurrent channel pipeline.
//!
//! [`Slice`] and [`Mapping`] wrap a [`Vec`] and a [`HashMap`](std::collections::HashMap)
//! with the usual functional operations. [`pipeline::Channel`] runs the same
//! filter/map/reduce operations as a chain of concurrent workers.
//!
//! # Sequences
//!
//! Every operation returning a new [`Slice`] leaves the receiver untouched.
//!
//! ```
//! use sugared::Slice;
//!
//! let nums = Slice::from([1, 2, 3]);
//!
//! assert_eq!(nums.filter(|&num| num < 2), [1]);
//! assert_eq!(nums.reduce(|a, b| a + b), Some(6));
//! assert_eq!(nums.append([4, 5]), [1, 2, 3, 4, 5]);
//! assert_eq!(nums.delete(1)?, [1, 3]);
//! assert!(nums.contains(&2));
//! assert_eq!(nums.to_strings(), ["1", "2", "3"]);
//!
//! assert_eq!(nums, [1, 2, 3]);
//! # Ok::<_, sugared::Error>(())
//! ```
//!
//! # Pipelines
//!
//! Each stage runs on its own thread and hands elements to the next one through
//! a rendezvous channel, so the order of the source is kept however long the chain is.
//!
//! ```
//! use sugared::Slice;
//!
//! let total = Slice::from([1, 2, 3, 4, 5, 6])
//!     .pipe()
//!     .filter(|num| num % 2 == 0)
//!     .map(|num| num * 10)
//!     .reduce(|a, b| a + b)?;
//!
//! assert_eq!(total, Some(120));
//! # Ok::<_, sugared::Error>(())
//! ```
//!
//! A panicking callback, a cancelled [`CancelToken`](pipeline::CancelToken), or a
//! dropped consumer all shut the pipeline down instead of leaving workers behind.
//! See the [`pipeline`] module for details.
//!
//! # Collectors
//!
//! Under the hood, operations are expressed as feeding a [`Collector`](collector::Collector),
//! the "sink half" of an [`Iterator`]. Collectors are public and compose with
//! [`filter`](collector::Collector::filter) and [`map`](collector::Collector::map):
//!
//! ```
//! use sugared::{prelude::*, iter::Reduce};
//!
//! let max_even = [3, 8, 5, 6]
//!     .into_iter()
//!     .feed_into(Reduce::new(i32::max).filter(|num: &i32| num % 2 == 0));
//!
//! assert_eq!(max_even, Some(8));
//! ```
//!
//! # Features
//!
//! - `pipeline` (default): the [`pipeline`] module.
//! - `dynamic` (default): `from_value` conversions from untyped
//!   [`serde_json::Value`](https://docs.rs/serde_json/latest/serde_json/enum.Value.html)s.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod collector;
#[cfg(feature = "dynamic")]
mod dynamic;
mod error;
pub mod iter;
mod mapping;
#[cfg(feature = "pipeline")]
pub mod pipeline;
pub mod prelude;
mod slice;
mod vec;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use mapping::*;
pub use slice::*;
