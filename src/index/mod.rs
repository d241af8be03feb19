//! Reference product index
//!
//! An in-memory implementation of `IndexSearchBackend` over
//! `ProductContent`. It is the executable form of the backend contract the
//! executor relies on.
//!
//! # Design Principles
//!
//! - Deterministic: BTreeMap storage, sort ties broken by product key
//! - Set semantics: not-in-any = universe minus union, in-any = union,
//!   in-all = intersection of collection memberships
//! - Paging is 1-based; a page past the end is empty but keeps the total
//!
//! # Invariants
//!
//! - Membership map always mirrors the stored products' `collections`
//! - Identical lookups against an unchanged index return identical pages

mod errors;
mod matcher;
mod product_index;
mod sorter;

pub use errors::{IndexError, IndexResult};
pub use matcher::TermMatcher;
pub use product_index::ProductIndex;
pub use sorter::ProductSorter;
