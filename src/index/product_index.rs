//! In-memory product index
//!
//! Holds product content keyed by product key plus a collection membership
//! map (collection -> product keys). Both maps are BTreeMaps so traversal
//! order is deterministic.
//!
//! # API
//!
//! - `insert(product)` - Add or replace a product and its memberships
//! - `remove(key)` - Drop a product and its memberships
//! - `collection_members(collection)` - Product keys in a collection
//! - `IndexSearchBackend` - The eight paged lookups used by the executor

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::product::ProductContent;
use crate::query::{IndexSearchBackend, PageRequest, ResultPage};

use super::errors::{IndexError, IndexResult};
use super::matcher::TermMatcher;
use super::sorter::ProductSorter;

/// Which products a lookup starts from
#[derive(Debug, Clone, Copy)]
enum Candidates<'a> {
    /// Every product
    All,
    /// Universe minus the union of the collections
    NotInAny(&'a [Uuid]),
    /// Union of the collections
    InAny(&'a [Uuid]),
    /// Intersection of the collections
    InAll(&'a [Uuid]),
}

#[derive(Debug, Default)]
struct IndexState {
    /// Product key -> product
    products: BTreeMap<Uuid, ProductContent>,
    /// Collection key -> member product keys
    memberships: BTreeMap<Uuid, BTreeSet<Uuid>>,
}

impl IndexState {
    fn link(&mut self, product: &ProductContent) {
        for collection in &product.collections {
            self.memberships
                .entry(*collection)
                .or_default()
                .insert(product.key);
        }
    }

    fn unlink(&mut self, product: &ProductContent) {
        for collection in &product.collections {
            if let Some(members) = self.memberships.get_mut(collection) {
                members.remove(&product.key);
                if members.is_empty() {
                    self.memberships.remove(collection);
                }
            }
        }
    }

    fn union(&self, collections: &[Uuid]) -> BTreeSet<Uuid> {
        collections
            .iter()
            .filter_map(|c| self.memberships.get(c))
            .flat_map(|members| members.iter().copied())
            .collect()
    }

    fn intersection(&self, collections: &[Uuid]) -> BTreeSet<Uuid> {
        let mut sets = collections.iter().map(|c| self.memberships.get(c));

        let mut result = match sets.next() {
            Some(Some(first)) => first.clone(),
            _ => return BTreeSet::new(),
        };

        for set in sets {
            match set {
                Some(members) => result.retain(|key| members.contains(key)),
                None => return BTreeSet::new(),
            }
            if result.is_empty() {
                break;
            }
        }

        result
    }

    fn candidate_products(&self, candidates: Candidates<'_>) -> Vec<&ProductContent> {
        match candidates {
            Candidates::All => self.products.values().collect(),
            // Every product is in all of zero collections
            Candidates::InAll([]) => self.products.values().collect(),
            Candidates::NotInAny(collections) => {
                let excluded = self.union(collections);
                self.products
                    .values()
                    .filter(|p| !excluded.contains(&p.key))
                    .collect()
            }
            Candidates::InAny(collections) => self.lookup_keys(&self.union(collections)),
            Candidates::InAll(collections) => self.lookup_keys(&self.intersection(collections)),
        }
    }

    fn lookup_keys(&self, keys: &BTreeSet<Uuid>) -> Vec<&ProductContent> {
        keys.iter().filter_map(|k| self.products.get(k)).collect()
    }
}

/// In-memory reference implementation of the index search backend
#[derive(Debug)]
pub struct ProductIndex {
    /// Sort field used when a request leaves `sort_by` empty
    default_sort_field: String,
    /// Body fields a search term is matched against
    searchable_fields: Vec<String>,
    state: RwLock<IndexState>,
}

impl ProductIndex {
    /// Creates an empty index with default settings
    pub fn new() -> Self {
        let config = CatalogConfig::default();
        Self::from_settings(&config)
    }

    /// Creates an empty index using the sort and search settings of `config`.
    ///
    /// The configuration is validated first, so an index never runs with an
    /// empty searchable field list or a blank default sort field.
    pub fn with_config(config: &CatalogConfig) -> IndexResult<Self> {
        config
            .validate()
            .map_err(|e| IndexError::InvalidConfig(e.to_string()))?;
        Ok(Self::from_settings(config))
    }

    /// Creates an index pre-populated with `products`
    pub fn from_products(
        config: &CatalogConfig,
        products: impl IntoIterator<Item = ProductContent>,
    ) -> IndexResult<Self> {
        let index = Self::with_config(config)?;
        for product in products {
            index.insert(product)?;
        }
        Ok(index)
    }

    fn from_settings(config: &CatalogConfig) -> Self {
        Self {
            default_sort_field: config.default_sort_field.clone(),
            searchable_fields: config.searchable_fields.clone(),
            state: RwLock::new(IndexState::default()),
        }
    }

    /// Adds a product, replacing any product with the same key.
    ///
    /// Returns the replaced product.
    pub fn insert(&self, product: ProductContent) -> IndexResult<Option<ProductContent>> {
        let key = product.key.to_string();
        let mut state = self.write()?;

        let previous = state.products.remove(&product.key);
        if let Some(old) = &previous {
            state.unlink(old);
        }
        state.link(&product);
        state.products.insert(product.key, product);
        drop(state);

        log_event_with_fields(Event::IndexDocumentInserted, &[("key", &key)]);
        Ok(previous)
    }

    /// Removes a product and its memberships
    pub fn remove(&self, key: &Uuid) -> IndexResult<Option<ProductContent>> {
        let mut state = self.write()?;

        let removed = state.products.remove(key);
        if let Some(product) = &removed {
            state.unlink(product);
        }
        drop(state);

        if removed.is_some() {
            log_event_with_fields(Event::IndexDocumentRemoved, &[("key", &key.to_string())]);
        }
        Ok(removed)
    }

    /// Returns a copy of the product with `key`
    pub fn get(&self, key: &Uuid) -> IndexResult<Option<ProductContent>> {
        Ok(self.read()?.products.get(key).cloned())
    }

    /// Product keys in `collection`, ascending
    pub fn collection_members(&self, collection: &Uuid) -> IndexResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .memberships
            .get(collection)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default())
    }

    /// Number of indexed products
    pub fn len(&self) -> IndexResult<usize> {
        Ok(self.read()?.products.len())
    }

    pub fn is_empty(&self) -> IndexResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn default_sort_field(&self) -> &str {
        &self.default_sort_field
    }

    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }

    /// Filters, sorts and pages.
    ///
    /// 1. Validate paging (both values at least 1)
    /// 2. Resolve collection candidates with set operations
    /// 3. Apply the search term
    /// 4. Sort by the requested (or default) field, ties by key
    /// 5. Cut the requested page
    fn lookup(
        &self,
        candidates: Candidates<'_>,
        term: Option<&str>,
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        if request.page == 0 || request.items_per_page == 0 {
            return Err(IndexError::InvalidPaging {
                page: request.page,
                items_per_page: request.items_per_page,
            });
        }

        let matcher = term.map(TermMatcher::new);
        let sort_field = if request.sort_by.trim().is_empty() {
            self.default_sort_field.as_str()
        } else {
            request.sort_by.as_str()
        };

        let state = self.read()?;
        let matched: Vec<&ProductContent> = state
            .candidate_products(candidates)
            .into_iter()
            .filter(|p| {
                matcher
                    .as_ref()
                    .map_or(true, |m| m.matches(p, &self.searchable_fields))
            })
            .collect();
        let sorted = ProductSorter::sort(matched, sort_field, request.sort_direction);

        // Only the requested page leaves the lock as owned products
        let page = ResultPage::from_sorted(sorted, request).map(ProductContent::clone);
        Ok(page)
    }

    fn read(&self) -> IndexResult<RwLockReadGuard<'_, IndexState>> {
        self.state
            .read()
            .map_err(|e| IndexError::Unavailable(e.to_string()))
    }

    fn write(&self) -> IndexResult<RwLockWriteGuard<'_, IndexState>> {
        self.state
            .write()
            .map_err(|e| IndexError::Unavailable(e.to_string()))
    }
}

impl Default for ProductIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSearchBackend for ProductIndex {
    type Item = ProductContent;
    type Error = IndexError;

    fn search_paged(&self, request: &PageRequest) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::All, None, request)
    }

    fn search_term_paged(
        &self,
        term: &str,
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::All, Some(term), request)
    }

    fn page_not_in_collections(
        &self,
        keys: &[Uuid],
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::NotInAny(keys), None, request)
    }

    fn page_not_in_collections_with_term(
        &self,
        keys: &[Uuid],
        term: &str,
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::NotInAny(keys), Some(term), request)
    }

    fn page_in_any_collection(
        &self,
        keys: &[Uuid],
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::InAny(keys), None, request)
    }

    fn page_in_any_collection_with_term(
        &self,
        keys: &[Uuid],
        term: &str,
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::InAny(keys), Some(term), request)
    }

    fn page_in_all_collections(
        &self,
        keys: &[Uuid],
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::InAll(keys), None, request)
    }

    fn page_in_all_collections_with_term(
        &self,
        keys: &[Uuid],
        term: &str,
        request: &PageRequest,
    ) -> IndexResult<ResultPage<ProductContent>> {
        self.lookup(Candidates::InAll(keys), Some(term), request)
    }
}
