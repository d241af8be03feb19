//! Dispatch routes and explain output
//!
//! A route names exactly one backend operation. Selection is a total
//! function of two conditions: whether the spec carries a non-blank search
//! term, and whether (and how) it restricts by collection.

use std::fmt;

use uuid::Uuid;

use super::spec::{Clusivity, QuerySpec};

/// Backend operation selected for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRoute {
    /// Unrestricted paged search
    Search,
    /// Term-filtered paged search
    SearchTerm,
    /// In none of the collections
    NotInCollections,
    /// In none of the collections, term-filtered
    NotInCollectionsTerm,
    /// In at least one collection
    InAnyCollection,
    /// In at least one collection, term-filtered
    InAnyCollectionTerm,
    /// In every collection
    InAllCollections,
    /// In every collection, term-filtered
    InAllCollectionsTerm,
}

impl QueryRoute {
    /// Selects the route for a spec
    pub fn for_spec(spec: &QuerySpec) -> Self {
        Dispatch::for_spec(spec).route()
    }

    /// Stable route name used in logs and explain output
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryRoute::Search => "SEARCH",
            QueryRoute::SearchTerm => "SEARCH_TERM",
            QueryRoute::NotInCollections => "NOT_IN_COLLECTIONS",
            QueryRoute::NotInCollectionsTerm => "NOT_IN_COLLECTIONS_TERM",
            QueryRoute::InAnyCollection => "IN_ANY_COLLECTION",
            QueryRoute::InAnyCollectionTerm => "IN_ANY_COLLECTION_TERM",
            QueryRoute::InAllCollections => "IN_ALL_COLLECTIONS",
            QueryRoute::InAllCollectionsTerm => "IN_ALL_COLLECTIONS_TERM",
        }
    }

    /// Name of the backend trait method this route calls
    pub fn operation(&self) -> &'static str {
        match self {
            QueryRoute::Search => "search_paged",
            QueryRoute::SearchTerm => "search_term_paged",
            QueryRoute::NotInCollections => "page_not_in_collections",
            QueryRoute::NotInCollectionsTerm => "page_not_in_collections_with_term",
            QueryRoute::InAnyCollection => "page_in_any_collection",
            QueryRoute::InAnyCollectionTerm => "page_in_any_collection_with_term",
            QueryRoute::InAllCollections => "page_in_all_collections",
            QueryRoute::InAllCollectionsTerm => "page_in_all_collections_with_term",
        }
    }

    /// Returns true if the route passes a search term to the backend
    pub fn is_term_filtered(&self) -> bool {
        matches!(
            self,
            QueryRoute::SearchTerm
                | QueryRoute::NotInCollectionsTerm
                | QueryRoute::InAnyCollectionTerm
                | QueryRoute::InAllCollectionsTerm
        )
    }

    /// Clusivity applied by the route, `None` for unrestricted routes
    pub fn clusivity(&self) -> Option<Clusivity> {
        match self {
            QueryRoute::Search | QueryRoute::SearchTerm => None,
            QueryRoute::NotInCollections | QueryRoute::NotInCollectionsTerm => {
                Some(Clusivity::NotInAny)
            }
            QueryRoute::InAnyCollection | QueryRoute::InAnyCollectionTerm => {
                Some(Clusivity::InAny)
            }
            QueryRoute::InAllCollections | QueryRoute::InAllCollectionsTerm => {
                Some(Clusivity::InAll)
            }
        }
    }
}

impl fmt::Display for QueryRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A route together with the arguments it borrows from the spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch<'a> {
    Search,
    SearchTerm(&'a str),
    NotInCollections(&'a [Uuid]),
    NotInCollectionsTerm(&'a [Uuid], &'a str),
    InAnyCollection(&'a [Uuid]),
    InAnyCollectionTerm(&'a [Uuid], &'a str),
    InAllCollections(&'a [Uuid]),
    InAllCollectionsTerm(&'a [Uuid], &'a str),
}

impl<'a> Dispatch<'a> {
    pub(crate) fn for_spec(spec: &'a QuerySpec) -> Self {
        let term = spec.search_term();

        if !spec.has_collections() {
            return match term {
                Some(term) => Dispatch::SearchTerm(term),
                None => Dispatch::Search,
            };
        }

        let keys = spec.collection_keys.as_slice();
        match (spec.clusivity, term) {
            (Clusivity::NotInAny, Some(term)) => Dispatch::NotInCollectionsTerm(keys, term),
            (Clusivity::NotInAny, None) => Dispatch::NotInCollections(keys),
            (Clusivity::InAny, Some(term)) => Dispatch::InAnyCollectionTerm(keys, term),
            (Clusivity::InAny, None) => Dispatch::InAnyCollection(keys),
            (Clusivity::InAll, Some(term)) => Dispatch::InAllCollectionsTerm(keys, term),
            (Clusivity::InAll, None) => Dispatch::InAllCollections(keys),
        }
    }

    pub(crate) fn route(&self) -> QueryRoute {
        match self {
            Dispatch::Search => QueryRoute::Search,
            Dispatch::SearchTerm(_) => QueryRoute::SearchTerm,
            Dispatch::NotInCollections(_) => QueryRoute::NotInCollections,
            Dispatch::NotInCollectionsTerm(..) => QueryRoute::NotInCollectionsTerm,
            Dispatch::InAnyCollection(_) => QueryRoute::InAnyCollection,
            Dispatch::InAnyCollectionTerm(..) => QueryRoute::InAnyCollectionTerm,
            Dispatch::InAllCollections(_) => QueryRoute::InAllCollections,
            Dispatch::InAllCollectionsTerm(..) => QueryRoute::InAllCollectionsTerm,
        }
    }
}

/// Human-readable description of how a spec would be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRoute {
    /// Selected route
    pub route: QueryRoute,
    /// Trimmed search term, if one is applied
    pub search_term: Option<String>,
    /// Collection keys passed to the backend
    pub collection_keys: Vec<Uuid>,
    /// Clusivity applied, `None` when collections are not restricted
    pub clusivity: Option<Clusivity>,
    /// 1-based page
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
    /// Sort description
    pub sort: String,
}

impl ExplainRoute {
    /// Explains a spec without touching any backend
    pub fn from_spec(spec: &QuerySpec) -> Self {
        let route = QueryRoute::for_spec(spec);
        let sort_field = if spec.sort_by.is_empty() {
            "<default>"
        } else {
            spec.sort_by.as_str()
        };

        Self {
            route,
            search_term: spec.search_term().map(str::to_string),
            collection_keys: if route.clusivity().is_some() {
                spec.collection_keys.clone()
            } else {
                Vec::new()
            },
            clusivity: route.clusivity(),
            page: spec.page,
            items_per_page: spec.items_per_page,
            sort: format!("{} {}", sort_field, spec.sort_direction.as_str()),
        }
    }
}

impl fmt::Display for ExplainRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN QUERY ===")?;
        writeln!(f, "Route: {}", self.route)?;
        writeln!(f, "Operation: {}", self.route.operation())?;
        if let Some(term) = &self.search_term {
            writeln!(f, "Search Term: {:?}", term)?;
        }
        if let Some(clusivity) = self.clusivity {
            writeln!(f, "Clusivity: {}", clusivity)?;
            writeln!(f, "Collections:")?;
            for key in &self.collection_keys {
                writeln!(f, "  - {}", key)?;
            }
        }
        writeln!(f, "Sort: {}", self.sort)?;
        writeln!(f, "Page: {} ({} per page)", self.page, self.items_per_page)?;
        Ok(())
    }
}
