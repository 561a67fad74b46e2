use std::collections::HashSet;

/// A tokeniser turns a raw field value into an ordered list of terms.
/// Implementations are pure: no side effects, no errors, safe to share
/// across threads once constructed.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, input: &str) -> Vec<String>;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Lowercases the whole input and returns it as the single term. Used for
/// fields that should only ever match on their full, exact value.
#[derive(Clone, Default)]
pub struct ExactMatchTokenizer;

impl Tokenizer for ExactMatchTokenizer {
    fn tokenize(&self, input: &str) -> Vec<String> {
        vec![input.to_lowercase()]
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Produces no terms at all, making a field unsearchable.
#[derive(Clone, Default)]
pub struct NopTokenizer;

impl Tokenizer for NopTokenizer {
    fn tokenize(&self, _input: &str) -> Vec<String> {
        Vec::new()
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

pub(crate) const DEFAULT_STOP_WORDS: &[&str] = &[
    "and", "is", "an", "then", "the", "not", "when", "or", "to", "from", "for", "of", "if", "at",
    "about", "use", "with", "inc", "llc",
];

pub(crate) const DEFAULT_CUTSET: &[char] = &[
    ',', ':', ';', '!', '%', '$', '#', '(', ')', '*', '"', ' ', '\t', '\n', '\r', '\x0b', '\x0c',
];

/// Splits on whitespace (or a literal separator), trims a configurable cutset
/// of characters from each token, lowercases, and drops stop-words and
/// tokens shorter than two characters.
#[derive(Clone)]
pub struct StandardTokenizer {
    stop_words: HashSet<String>,
    separator: Option<String>,
    cutset: Vec<char>,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            separator: None,
            cutset: DEFAULT_CUTSET.to_vec(),
        }
    }
}

impl StandardTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty `stop_words` list means no stop-word filtering at all.
    pub fn with_stop_words(mut self, stop_words: impl IntoIterator<Item = String>) -> Self {
        self.stop_words = stop_words.into_iter().collect();
        self
    }

    /// An empty separator means "split on whitespace runs" (the default).
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        self.separator = if separator.is_empty() {
            None
        } else {
            Some(separator)
        };
        self
    }

    /// An empty cutset falls back to the built-in default, matching how the
    /// separator is treated rather than leaving tokens untrimmed.
    pub fn with_cutset(mut self, cutset: &str) -> Self {
        self.cutset = if cutset.is_empty() {
            DEFAULT_CUTSET.to_vec()
        } else {
            cutset.chars().collect()
        };
        self
    }

    fn split<'a>(&self, input: &'a str) -> Vec<&'a str> {
        match &self.separator {
            Some(sep) => input.split(sep.as_str()).collect(),
            None => input.split_whitespace().collect(),
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, input: &str) -> Vec<String> {
        let lowered = input.to_lowercase();
        let mut terms = Vec::new();

        for token in self.split(&lowered) {
            let trimmed = token.trim_matches(|c| self.cutset.contains(&c));
            if trimmed.chars().count() <= 1 {
                continue;
            }
            if self.stop_words.contains(trimmed) {
                continue;
            }
            terms.push(trimmed.to_string());
        }
        terms
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Runs each inner tokeniser in order and concatenates their outputs,
/// preserving duplicates (the index de-dupes naturally via set semantics).
pub struct ChainTokenizer {
    inner: Vec<Box<dyn Tokenizer>>,
}

impl ChainTokenizer {
    pub fn new(inner: Vec<Box<dyn Tokenizer>>) -> Self {
        ChainTokenizer { inner }
    }
}

impl Clone for ChainTokenizer {
    fn clone(&self) -> Self {
        ChainTokenizer {
            inner: self.inner.iter().map(|t| t.clone_box()).collect(),
        }
    }
}

impl Tokenizer for ChainTokenizer {
    fn tokenize(&self, input: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for tokenizer in &self.inner {
            terms.extend(tokenizer.tokenize(input));
        }
        terms
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_lowercases_whole_input() {
        let terms = ExactMatchTokenizer.tokenize("http://Github.com/vpoliboy");
        assert_eq!(terms, vec!["http://github.com/vpoliboy"]);
    }

    #[test]
    fn nop_produces_nothing() {
        assert!(NopTokenizer.tokenize("anything").is_empty());
    }

    #[test]
    fn standard_drops_stop_words_and_trims_punctuation() {
        let terms = StandardTokenizer::new().tokenize("Some application content, and description");
        assert_eq!(terms, vec!["some", "application", "content", "description"]);
    }

    #[test]
    fn standard_drops_single_char_tokens_and_handles_newlines() {
        let terms = StandardTokenizer::new()
            .tokenize("Some application content, and description\n  with a multiline\n");
        assert_eq!(
            terms,
            vec!["some", "application", "content", "description", "multiline"]
        );
    }

    #[test]
    fn standard_is_idempotent_under_default_separator() {
        let tokenizer = StandardTokenizer::new();
        let input = "Some application content, and description";
        let once = tokenizer.tokenize(input);
        let twice = tokenizer.tokenize(&once.join(" "));
        assert!(twice.iter().all(|t| once.contains(t)));
    }

    #[test]
    fn chain_concatenates_in_order() {
        let chain = ChainTokenizer::new(vec![
            Box::new(StandardTokenizer::new()),
            Box::new(ExactMatchTokenizer),
        ]);
        let terms = chain.tokenize("Vijay Poliboyina");
        assert_eq!(terms, vec!["vijay", "poliboyina", "vijay poliboyina"]);
    }

    #[test]
    fn empty_cutset_falls_back_to_default() {
        let a = StandardTokenizer::new().tokenize("hello, world!");
        let b = StandardTokenizer::new().with_cutset("").tokenize("hello, world!");
        assert_eq!(a, b);
    }
}
