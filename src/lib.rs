//! storefront-query - A deterministic, faceted and paginated product query engine
//!
//! A `QueryExecutor` turns a `QuerySpec` (search term, collection keys,
//! clusivity, paging, sort) into exactly one call on an `IndexSearchBackend`.
//! `ProductIndex` is an in-memory backend over `ProductContent`.

pub mod config;
pub mod index;
pub mod observability;
pub mod product;
pub mod query;

pub use config::{CatalogConfig, ConfigError, ConfigResult};
pub use index::{IndexError, IndexResult, ProductIndex};
pub use product::ProductContent;
pub use query::{
    Clusivity, ExplainRoute, IndexSearchBackend, PageRequest, QueryError, QueryExecutor,
    QueryRoute, QuerySpec, ResultPage, SortDirection,
};
