pub mod analyzer;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use tokenizer::{ChainTokenizer, ExactMatchTokenizer, NopTokenizer, StandardTokenizer, Tokenizer};
