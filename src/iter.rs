//! Collectors mirroring consuming methods of [`Iterator`], and the
//! [`IteratorExt`] driver.

mod iterator_ext;
mod reduce;

pub use iterator_ext::*;
pub use reduce::*;
