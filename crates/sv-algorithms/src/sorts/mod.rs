//! Instrumented sorting algorithms
//!
//! Each generator sorts a private copy of its input and records the
//! operations a display needs to replay the same run. A `Compare` is recorded
//! right before the branch that depends on it, and `Swap`/`Overwrite` only
//! when the private copy actually changes. Every index receives exactly one
//! `Sorted` by the end of the trace.

pub mod bubble;
pub mod bucket;
pub mod cocktail;
pub mod comb;
pub mod counting;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod radix;
pub mod selection;
pub mod shell;

pub use bubble::bubble_sort;
pub use bucket::bucket_sort;
pub use cocktail::cocktail_sort;
pub use comb::comb_sort;
pub use counting::counting_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use radix::radix_sort;
pub use selection::selection_sort;
pub use shell::shell_sort;
