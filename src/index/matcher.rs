//! Search term matching for the reference index
//!
//! A term is split on whitespace into lowercase tokens. A product matches
//! when every token occurs in at least one searchable field (AND across
//! tokens, OR across fields). Only string and number fields are searched.

use serde_json::Value;

use crate::product::ProductContent;

/// Evaluates a search term against products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatcher {
    tokens: Vec<String>,
}

impl TermMatcher {
    /// Tokenises a search term
    pub fn new(term: &str) -> Self {
        Self {
            tokens: term.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// Returns the lowercase tokens
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Checks if a product matches every token.
    ///
    /// A term with no tokens matches everything.
    pub fn matches(&self, product: &ProductContent, fields: &[String]) -> bool {
        let haystacks: Vec<String> = fields
            .iter()
            .filter_map(|field| product.field(field))
            .filter_map(Self::searchable_text)
            .collect();

        self.tokens
            .iter()
            .all(|token| haystacks.iter().any(|text| text.contains(token.as_str())))
    }

    fn searchable_text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.to_lowercase()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
