//! Query executor subsystem
//!
//! The executor consumes a declarative `QuerySpec` and dispatches it to one
//! of eight operations on an injected `IndexSearchBackend`.
//!
//! # Dispatch (strict order)
//!
//! 1. Trim the search term; blank counts as absent
//! 2. No collection keys: plain or term-filtered search, clusivity ignored
//! 3. Collection keys: not-in-any, in-any or in-all, each plain or
//!    term-filtered
//!
//! # Invariants
//!
//! - Exactly one backend call per execution
//! - No post-filtering, re-sorting or re-paging
//! - Backend errors propagate unchanged

mod backend;
mod errors;
mod executor;
mod result;
mod route;
mod spec;

pub use backend::IndexSearchBackend;
pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use executor::QueryExecutor;
pub use result::{PageRequest, ResultPage};
pub use route::{ExplainRoute, QueryRoute};
pub use spec::{Clusivity, QuerySpec, SortDirection};
