//! Core data structures for time series clustering.

mod sequence;

pub use sequence::Sequence;
