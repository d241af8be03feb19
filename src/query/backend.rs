//! Index search backend seam
//!
//! The executor never filters, sorts or pages on its own. Every lookup is
//! delegated to one of these eight operations, and the backend owns their
//! semantics:
//!
//! - Sorting is stable and total (ties broken by a deterministic key), so an
//!   unchanged index answers identical requests identically.
//! - Paging is 1-based: page `p` holds offsets `(p-1)*n ..= p*n - 1`.
//! - Collection filters use set semantics over each entity's memberships:
//!   not-in-any is the universe minus the union, in-any is the union,
//!   in-all is the intersection.

use uuid::Uuid;

use super::result::{PageRequest, ResultPage};

/// Paged lookups against a search index
pub trait IndexSearchBackend {
    /// Entity returned by the index
    type Item;
    /// Failure raised by the index
    type Error: std::error::Error;

    /// Unrestricted paged search
    fn search_paged(&self, request: &PageRequest) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Term-filtered paged search
    fn search_term_paged(
        &self,
        term: &str,
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Entities in none of `keys`
    fn page_not_in_collections(
        &self,
        keys: &[Uuid],
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Term-filtered entities in none of `keys`
    fn page_not_in_collections_with_term(
        &self,
        keys: &[Uuid],
        term: &str,
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Entities in at least one of `keys`
    fn page_in_any_collection(
        &self,
        keys: &[Uuid],
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Term-filtered entities in at least one of `keys`
    fn page_in_any_collection_with_term(
        &self,
        keys: &[Uuid],
        term: &str,
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Entities in every one of `keys`
    fn page_in_all_collections(
        &self,
        keys: &[Uuid],
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;

    /// Term-filtered entities in every one of `keys`
    fn page_in_all_collections_with_term(
        &self,
        keys: &[Uuid],
        term: &str,
        request: &PageRequest,
    ) -> Result<ResultPage<Self::Item>, Self::Error>;
}
