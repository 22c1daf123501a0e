//! Ordered map implemented using [left-leaning-red-black][wiki-llrb] tree.
//!
//! - Each entry in [Llrb] instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - Insert and update via put(), lookup via get().
//! - Ordered access via min(), max(), keys() and iter().
//! - Diagnostic rendering of tree shape via `Display`.
//! - No delete, no range scan, no durability guarantee.
//! - Not thread safe.
//!
//! ```
//! use llrb_map::Llrb;
//!
//! let mut index: Llrb<i32, String> = Llrb::new("myinstance");
//! for key in [5, 3, 8, 1, 4, 7, 9].iter() {
//!     index.put(*key, key.to_string());
//! }
//! index.put(4, "four".to_string());
//!
//! assert_eq!(index.len(), 7);
//! assert_eq!(index.keys(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(index.get(&4).map(|s| s.as_str()), Some("four"));
//! assert_eq!(index.get(&6), None);
//! assert_eq!(index.min(), Some(&1));
//! assert_eq!(index.max(), Some(&9));
//! assert!(index.validate().is_ok());
//! ```
//!
//! [wiki-llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

mod depth;
mod error;
mod llrb;
mod render;

pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::llrb::{Iter, Llrb, Stats};

#[cfg(test)]
mod proptests;
