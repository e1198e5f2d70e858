//! Driver-neutral query description

use std::collections::HashSet;

/// Which documents a query selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    /// Any search word equals any word of the collection's text fields
    Text(TextQuery),
    /// Top-level string field equals a value
    FieldEquals { field: String, value: String },
}

impl Filter {
    /// Text filter for a user-supplied term; absent or empty terms select
    /// everything, a term without words selects nothing
    pub fn search(term: Option<&str>) -> Self {
        match term {
            None | Some("") => Self::All,
            Some(term) => Self::Text(TextQuery::parse(term)),
        }
    }

    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Search words extracted from a term
///
/// Words are runs of letters, digits and `_`; matching is exact and
/// case-sensitive, the same tokenization the text index applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    words: Vec<String>,
}

impl TextQuery {
    pub fn parse(term: &str) -> Self {
        Self {
            words: tokenize(term).map(str::to_string).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// A query without words matches no document
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether any word of `texts` is one of the search words
    pub fn matches<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> bool {
        let wanted: HashSet<&str> = self.words.iter().map(String::as_str).collect();
        texts
            .into_iter()
            .flat_map(tokenize)
            .any(|word| wanted.contains(word))
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Order by one top-level field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}
