//! Declarative query specification
//!
//! A `QuerySpec` is built per request and never mutated once handed to the
//! executor.

use std::fmt;

use serde::{de::IgnoredAny, Deserialize, Serialize};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// How multiple collection keys combine when restricting a query.
///
/// Numeric codes: 0 = not in any, 1 = in any, 2 = in all. Any value that
/// does not map to a variant is read as `InAll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ClusivityRepr", into = "String")]
pub enum Clusivity {
    /// Product belongs to none of the collections
    NotInAny,
    /// Product belongs to at least one of the collections
    InAny,
    /// Product belongs to every one of the collections
    #[default]
    InAll,
}

impl Clusivity {
    /// Maps a numeric code, falling back to `InAll` for unknown codes
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Clusivity::NotInAny,
            1 => Clusivity::InAny,
            2 => Clusivity::InAll,
            other => Self::fallback(&other.to_string()),
        }
    }

    /// Maps a name (case-insensitive), falling back to `InAll` for unknown names
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "not_in_any" | "notinany" | "doesnotexistinanycollectionsandfilters" => {
                Clusivity::NotInAny
            }
            "in_any" | "inany" | "existsinanycollectionorfilter" => Clusivity::InAny,
            "in_all" | "inall" | "existsinallcollectionsandfilters" => Clusivity::InAll,
            _ => Self::fallback(name),
        }
    }

    /// Returns the numeric code
    pub fn code(&self) -> i64 {
        match self {
            Clusivity::NotInAny => 0,
            Clusivity::InAny => 1,
            Clusivity::InAll => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Clusivity::NotInAny => "not_in_any",
            Clusivity::InAny => "in_any",
            Clusivity::InAll => "in_all",
        }
    }

    fn fallback(raw: &str) -> Self {
        log_event_with_fields(Event::ClusivityFallback, &[("value", raw)]);
        Clusivity::InAll
    }
}

impl fmt::Display for Clusivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wire forms accepted for a clusivity value
#[derive(Deserialize)]
#[serde(untagged)]
enum ClusivityRepr {
    Code(i64),
    Name(String),
    Other(IgnoredAny),
}

impl From<ClusivityRepr> for Clusivity {
    fn from(repr: ClusivityRepr) -> Self {
        match repr {
            ClusivityRepr::Code(code) => Clusivity::from_code(code),
            ClusivityRepr::Name(name) => Clusivity::parse(&name),
            ClusivityRepr::Other(_) => Clusivity::fallback("<non-scalar>"),
        }
    }
}

impl From<Clusivity> for String {
    fn from(clusivity: Clusivity) -> Self {
        clusivity.as_str().to_string()
    }
}

/// Query specification handed to the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Free-text term; blank is the same as absent
    pub search_term: Option<String>,
    /// 1-based page index
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
    /// Field to sort on; empty means the backend default
    pub sort_by: String,
    /// Sort direction
    pub sort_direction: SortDirection,
    /// Collections to restrict by; empty means no restriction
    pub collection_keys: Vec<Uuid>,
    /// How `collection_keys` combine; ignored when there are none
    pub clusivity: Clusivity,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_term: None,
            page: 1,
            items_per_page: 10,
            sort_by: String::new(),
            sort_direction: SortDirection::Ascending,
            collection_keys: Vec::new(),
            clusivity: Clusivity::InAll,
        }
    }
}

impl QuerySpec {
    /// Creates a spec for the first page of ten, unrestricted
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: u64) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Sets the sort field and direction
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = field.into();
        self.sort_direction = direction;
        self
    }

    /// Restricts the query to the given collections
    pub fn with_collections(
        mut self,
        keys: impl IntoIterator<Item = Uuid>,
        clusivity: Clusivity,
    ) -> Self {
        self.collection_keys = keys.into_iter().collect();
        self.clusivity = clusivity;
        self
    }

    /// The trimmed search term, or `None` when absent or whitespace only
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn has_search_term(&self) -> bool {
        self.search_term().is_some()
    }

    pub fn has_collections(&self) -> bool {
        !self.collection_keys.is_empty()
    }
}
