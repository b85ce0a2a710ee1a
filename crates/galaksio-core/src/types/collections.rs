//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for mate candidates in one pairing group (usually 2).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
