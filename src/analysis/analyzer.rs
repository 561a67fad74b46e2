use std::collections::HashMap;

use crate::analysis::tokenizer::{ChainTokenizer, ExactMatchTokenizer, StandardTokenizer, Tokenizer};
use crate::model::{Metadata, SearchField};

/// Holds one tokeniser per field and turns a `Metadata` payload into the
/// field→terms map the inverted index is built from. Stateless beyond its
/// configuration, so a single instance can be shared across threads.
pub struct Analyzer {
    mapping: HashMap<SearchField, Box<dyn Tokenizer>>,
}

impl Analyzer {
    pub fn new(mapping: HashMap<SearchField, Box<dyn Tokenizer>>) -> Self {
        Analyzer { mapping }
    }

    /// The default mapping: identifiers (title, version, urls, license,
    /// email) are exact-match; free text (company, description) is
    /// tokenised word-by-word; name is both, via a chain.
    pub fn default_mapping() -> HashMap<SearchField, Box<dyn Tokenizer>> {
        let mut mapping: HashMap<SearchField, Box<dyn Tokenizer>> = HashMap::new();
        mapping.insert(SearchField::Title, Box::new(ExactMatchTokenizer));
        mapping.insert(SearchField::Version, Box::new(ExactMatchTokenizer));
        mapping.insert(SearchField::Website, Box::new(ExactMatchTokenizer));
        mapping.insert(SearchField::Source, Box::new(ExactMatchTokenizer));
        mapping.insert(SearchField::License, Box::new(ExactMatchTokenizer));
        mapping.insert(SearchField::Email, Box::new(ExactMatchTokenizer));
        mapping.insert(SearchField::Company, Box::new(StandardTokenizer::new()));
        mapping.insert(SearchField::Description, Box::new(StandardTokenizer::new()));
        mapping.insert(
            SearchField::Name,
            Box::new(ChainTokenizer::new(vec![
                Box::new(StandardTokenizer::new()),
                Box::new(ExactMatchTokenizer),
            ])),
        );
        mapping
    }

    fn tokenize(&self, field: SearchField, value: &str) -> Vec<String> {
        self.mapping
            .get(&field)
            .map(|t| t.tokenize(value))
            .unwrap_or_default()
    }

    /// Breaks down every single-valued field with its configured tokeniser,
    /// then appends each maintainer's name/email terms to the aggregate
    /// `name`/`email` entries. Fields with no configured tokeniser are
    /// absent from the result entirely (never indexed).
    pub fn analyze(&self, metadata: &Metadata) -> HashMap<SearchField, Vec<String>> {
        let mut tokens = HashMap::new();

        for (field, value) in [
            (SearchField::Title, metadata.title.as_str()),
            (SearchField::Version, metadata.version.as_str()),
            (SearchField::Company, metadata.company.as_str()),
            (SearchField::Website, metadata.website.as_str()),
            (SearchField::Source, metadata.source.as_str()),
            (SearchField::License, metadata.license.as_str()),
            (SearchField::Description, metadata.description.as_str()),
        ] {
            let terms = self.tokenize(field, value);
            if !terms.is_empty() {
                tokens.insert(field, terms);
            }
        }

        for maintainer in &metadata.maintainers {
            let name_terms = self.tokenize(SearchField::Name, &maintainer.name);
            if !name_terms.is_empty() {
                tokens.entry(SearchField::Name).or_default().extend(name_terms);
            }
            let email_terms = self.tokenize(SearchField::Email, &maintainer.email);
            if !email_terms.is_empty() {
                tokens.entry(SearchField::Email).or_default().extend(email_terms);
            }
        }

        tokens
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(Self::default_mapping())
    }
}
