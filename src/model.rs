use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// The closed set of fields a document can be indexed and queried on, plus
/// the `any` wildcard that only ever appears in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Name,
    Email,
    Title,
    Version,
    Company,
    Website,
    Source,
    License,
    Description,
    Any,
}

impl SearchField {
    /// All fields a payload can be indexed under; `Any` is deliberately excluded
    /// since it is query-only (invariant I6).
    pub const INDEXABLE: [SearchField; 9] = [
        SearchField::Name,
        SearchField::Email,
        SearchField::Title,
        SearchField::Version,
        SearchField::Company,
        SearchField::Website,
        SearchField::Source,
        SearchField::License,
        SearchField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Email => "email",
            SearchField::Title => "title",
            SearchField::Version => "version",
            SearchField::Company => "company",
            SearchField::Website => "website",
            SearchField::Source => "source",
            SearchField::License => "license",
            SearchField::Description => "description",
            SearchField::Any => "any",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchField::Name),
            "email" => Ok(SearchField::Email),
            "title" => Ok(SearchField::Title),
            "version" => Ok(SearchField::Version),
            "company" => Ok(SearchField::Company),
            "website" => Ok(SearchField::Website),
            "source" => Ok(SearchField::Source),
            "license" => Ok(SearchField::License),
            "description" => Ok(SearchField::Description),
            "any" => Ok(SearchField::Any),
            _ => Err(()),
        }
    }
}

/// A 128-bit id generated for every successful insert. Two inserts of
/// identical content still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        DocumentId(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DocumentId(Uuid::parse_str(s)?))
    }
}

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(.*)\s(.*)").unwrap());

fn validate_semver(version: &str) -> Result<(), ValidationError> {
    semver::Version::parse(version).map_err(|_| ValidationError::new("semver"))?;
    Ok(())
}

fn validate_url(value: &str) -> Result<(), ValidationError> {
    url::Url::parse(value).map_err(|_| ValidationError::new("url"))?;
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Maintainer {
    #[validate(length(min = 4, max = 64), regex(path = "*NAME_RE"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Metadata {
    #[validate(length(min = 4, max = 64))]
    pub title: String,
    #[validate(custom(function = "validate_semver"))]
    pub version: String,
    #[validate(length(min = 1, max = 1024), nested)]
    pub maintainers: Vec<Maintainer>,
    #[validate(length(min = 4, max = 1024))]
    pub company: String,
    #[validate(custom(function = "validate_url"))]
    pub website: String,
    #[validate(custom(function = "validate_url"))]
    pub source: String,
    #[validate(length(min = 4, max = 64))]
    pub license: String,
    #[validate(length(min = 4, max = 1024))]
    pub description: String,
}

/// The pair the service hands back to callers: the id allocated at insert
/// time together with the payload the document store owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub metadata: Metadata,
}
