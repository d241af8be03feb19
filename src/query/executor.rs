//! Query executor
//!
//! Translates a `QuerySpec` into exactly one backend call. The executor does
//! no filtering, sorting or paging of its own and returns whatever page (or
//! error) the backend produced.

use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::backend::IndexSearchBackend;
use super::errors::{QueryError, QueryResult};
use super::result::{PageRequest, ResultPage};
use super::route::{Dispatch, ExplainRoute, QueryRoute};
use super::spec::QuerySpec;

/// Stateless strategy selector over an index search backend
pub struct QueryExecutor<B: IndexSearchBackend + ?Sized> {
    backend: Arc<B>,
}

impl<B: IndexSearchBackend + ?Sized> QueryExecutor<B> {
    /// Creates a new executor
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Creates an executor from an optional backend.
    ///
    /// A missing backend is a configuration error (FATAL).
    pub fn from_backend(backend: Option<Arc<B>>) -> QueryResult<Self> {
        backend.map(Self::new).ok_or_else(QueryError::missing_backend)
    }

    /// Returns the backend this executor dispatches to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the route `spec` would take, without calling the backend
    pub fn route(&self, spec: &QuerySpec) -> QueryRoute {
        QueryRoute::for_spec(spec)
    }

    /// Explains how `spec` would be dispatched
    pub fn explain(&self, spec: &QuerySpec) -> ExplainRoute {
        ExplainRoute::from_spec(spec)
    }

    /// Executes the query.
    ///
    /// Deterministic: the same spec against an unchanged backend yields the
    /// same page. Backend errors are returned unchanged.
    pub fn execute(&self, spec: &QuerySpec) -> Result<ResultPage<B::Item>, B::Error> {
        let dispatch = Dispatch::for_spec(spec);
        let route = dispatch.route();
        let request = PageRequest::from(spec);

        if Logger::enabled(Severity::Trace) {
            let page = request.page.to_string();
            let items_per_page = request.items_per_page.to_string();
            log_event_with_fields(
                Event::QueryDispatched,
                &[
                    ("route", route.as_str()),
                    ("page", &page),
                    ("items_per_page", &items_per_page),
                ],
            );
        }

        let backend = self.backend.as_ref();
        let result = match dispatch {
            Dispatch::Search => backend.search_paged(&request),
            Dispatch::SearchTerm(term) => backend.search_term_paged(term, &request),
            Dispatch::NotInCollections(keys) => backend.page_not_in_collections(keys, &request),
            Dispatch::NotInCollectionsTerm(keys, term) => {
                backend.page_not_in_collections_with_term(keys, term, &request)
            }
            Dispatch::InAnyCollection(keys) => backend.page_in_any_collection(keys, &request),
            Dispatch::InAnyCollectionTerm(keys, term) => {
                backend.page_in_any_collection_with_term(keys, term, &request)
            }
            Dispatch::InAllCollections(keys) => backend.page_in_all_collections(keys, &request),
            Dispatch::InAllCollectionsTerm(keys, term) => {
                backend.page_in_all_collections_with_term(keys, term, &request)
            }
        };

        if let Err(err) = &result {
            log_event_with_fields(
                Event::QueryFailed,
                &[("route", route.as_str()), ("error", &err.to_string())],
            );
        }

        result
    }
}

impl<B: IndexSearchBackend + ?Sized> Clone for QueryExecutor<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}
