pub mod inverted;

pub use inverted::{InvertedIndex, PostingSet};
