//! Index Semantics Tests
//!
//! End-to-end tests of the executor over the in-memory product index:
//! - Collection filters follow set semantics (difference, union, intersection)
//! - Paging is 1-based and keeps the true total past the last page
//! - Sorting is stable and total
//! - Repeated identical queries return identical pages
//! - Backend errors reach the caller unchanged

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::json;
use storefront_query::{
    CatalogConfig, Clusivity, IndexError, ProductContent, ProductIndex, QueryExecutor, QuerySpec,
    SortDirection,
};
use uuid::Uuid;

// =============================================================================
// Fixture
// =============================================================================

const SHIRTS: Uuid = Uuid::from_u128(0x100);
const SALE: Uuid = Uuid::from_u128(0x200);
const WINTER: Uuid = Uuid::from_u128(0x300);

fn key(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn product(n: u128, name: &str, price: f64, collections: &[Uuid]) -> ProductContent {
    ProductContent::new(
        key(n),
        json!({"name": name, "sku": format!("SKU-{:03}", n), "price": price}),
    )
    .in_collections(collections.iter().copied())
}

/// 1 Blue Shirt      shirts, sale
/// 2 Red Shirt       shirts
/// 3 Wool Scarf      winter, sale
/// 4 Red Wool Jumper winter
/// 5 Canvas Tote     (none)
/// 6 Blue Wool Shirt shirts, winter
fn catalog() -> Arc<ProductIndex> {
    let products = vec![
        product(1, "Blue Shirt", 30.0, &[SHIRTS, SALE]),
        product(2, "Red Shirt", 25.0, &[SHIRTS]),
        product(3, "Wool Scarf", 15.0, &[WINTER, SALE]),
        product(4, "Red Wool Jumper", 60.0, &[WINTER]),
        product(5, "Canvas Tote", 12.0, &[]),
        product(6, "Blue Wool Shirt", 45.0, &[SHIRTS, WINTER]),
    ];
    Arc::new(ProductIndex::from_products(&CatalogConfig::default(), products).unwrap())
}

fn executor() -> QueryExecutor<ProductIndex> {
    QueryExecutor::new(catalog())
}

fn keys_of(spec: &QuerySpec) -> Vec<Uuid> {
    executor()
        .execute(spec)
        .unwrap()
        .iter()
        .map(|p| p.key)
        .collect()
}

fn key_set(spec: &QuerySpec) -> BTreeSet<Uuid> {
    keys_of(&spec.clone().with_items_per_page(100)).into_iter().collect()
}

fn set(ns: &[u128]) -> BTreeSet<Uuid> {
    ns.iter().map(|n| key(*n)).collect()
}

// =============================================================================
// Collection Set Semantics
// =============================================================================

/// In-any is the union of memberships.
#[test]
fn test_in_any_is_union() {
    let spec = QuerySpec::new().with_collections([SALE, WINTER], Clusivity::InAny);
    assert_eq!(key_set(&spec), set(&[1, 3, 4, 6]));
}

/// In-all is the intersection of memberships.
#[test]
fn test_in_all_is_intersection() {
    let spec = QuerySpec::new().with_collections([SHIRTS, WINTER], Clusivity::InAll);
    assert_eq!(key_set(&spec), set(&[6]));

    let spec = QuerySpec::new().with_collections([SHIRTS, SALE, WINTER], Clusivity::InAll);
    assert!(key_set(&spec).is_empty());
}

/// Not-in-any is the universe minus the union.
#[test]
fn test_not_in_any_is_difference() {
    let spec = QuerySpec::new().with_collections([SHIRTS, SALE], Clusivity::NotInAny);
    assert_eq!(key_set(&spec), set(&[4, 5]));
}

/// A single collection gives the same members under in-any and in-all.
#[test]
fn test_single_collection_any_equals_all() {
    let any = QuerySpec::new().with_collections([WINTER], Clusivity::InAny);
    let all = QuerySpec::new().with_collections([WINTER], Clusivity::InAll);
    assert_eq!(key_set(&any), key_set(&all));
    assert_eq!(key_set(&any), set(&[3, 4, 6]));
}

/// Not-in-any and in-any partition the catalogue.
#[test]
fn test_not_in_any_complements_in_any() {
    let any = key_set(&QuerySpec::new().with_collections([SALE], Clusivity::InAny));
    let none = key_set(&QuerySpec::new().with_collections([SALE], Clusivity::NotInAny));

    assert!(any.is_disjoint(&none));
    assert_eq!(any.len() + none.len(), 6);
}

/// Unknown collection keys contribute empty membership sets.
#[test]
fn test_unknown_collection() {
    let unknown = Uuid::from_u128(0xdead);
    assert!(key_set(&QuerySpec::new().with_collections([unknown], Clusivity::InAny)).is_empty());
    assert_eq!(
        key_set(&QuerySpec::new().with_collections([unknown], Clusivity::NotInAny)).len(),
        6
    );
}

// =============================================================================
// Search Term
// =============================================================================

/// Term combines with collection filters.
#[test]
fn test_term_with_collections() {
    let spec = QuerySpec::new()
        .with_search_term("wool")
        .with_collections([SHIRTS], Clusivity::NotInAny);
    assert_eq!(key_set(&spec), set(&[3, 4]));

    let spec = QuerySpec::new()
        .with_search_term("blue")
        .with_collections([SHIRTS, WINTER], Clusivity::InAll);
    assert_eq!(key_set(&spec), set(&[6]));
}

/// Multi-word terms require every word.
#[test]
fn test_term_requires_all_tokens() {
    assert_eq!(key_set(&QuerySpec::new().with_search_term("red wool")), set(&[4]));
    assert_eq!(key_set(&QuerySpec::new().with_search_term("RED")), set(&[2, 4]));
}

/// Term matches the sku as well as the name.
#[test]
fn test_term_matches_sku() {
    assert_eq!(key_set(&QuerySpec::new().with_search_term("sku-005")), set(&[5]));
}

/// A blank term returns the unrestricted result.
#[test]
fn test_blank_term_returns_everything() {
    assert_eq!(key_set(&QuerySpec::new().with_search_term("   ")).len(), 6);
}

// =============================================================================
// Sorting
// =============================================================================

/// Default sort is by name ascending.
#[test]
fn test_default_sort_by_name() {
    let keys = keys_of(&QuerySpec::new());
    // Blue Shirt, Blue Wool Shirt, Canvas Tote, Red Shirt, Red Wool Jumper, Wool Scarf
    assert_eq!(keys, vec![key(1), key(6), key(5), key(2), key(4), key(3)]);
}

/// Descending numeric sort.
#[test]
fn test_sort_by_price_descending() {
    let spec = QuerySpec::new().with_sort("price", SortDirection::Descending);
    assert_eq!(
        keys_of(&spec),
        vec![key(4), key(6), key(1), key(2), key(3), key(5)]
    );
}

/// Equal sort values fall back to key order, making the sort total.
#[test]
fn test_ties_broken_by_key() {
    let index = Arc::new(ProductIndex::new());
    for n in [9, 3, 7, 1] {
        index
            .insert(ProductContent::new(key(n), json!({"name": "Same", "price": 10})))
            .unwrap();
    }
    let executor = QueryExecutor::new(index);

    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let page = executor
            .execute(&QuerySpec::new().with_sort("price", direction))
            .unwrap();
        let keys: Vec<_> = page.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![key(1), key(3), key(7), key(9)]);
    }
}

// =============================================================================
// Paging
// =============================================================================

/// Pages partition the sorted result without gaps or overlap.
#[test]
fn test_pages_partition_result() {
    let full = keys_of(&QuerySpec::new().with_items_per_page(100));

    let mut paged = Vec::new();
    for page in 1..=3 {
        let spec = QuerySpec::new().with_page(page).with_items_per_page(2);
        let result = executor().execute(&spec).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.total_items, 6);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.current_page, page);
        paged.extend(result.iter().map(|p| p.key));
    }

    assert_eq!(paged, full);
}

/// The last page may be short.
#[test]
fn test_last_partial_page() {
    let spec = QuerySpec::new().with_page(2).with_items_per_page(4);
    let result = executor().execute(&spec).unwrap();

    assert_eq!(result.len(), 2);
    assert!(!result.has_next());
    assert!(result.has_previous());
}

/// A page past the end is empty but still reports the true total.
#[test]
fn test_page_past_end() {
    let spec = QuerySpec::new()
        .with_collections([WINTER], Clusivity::InAny)
        .with_page(5)
        .with_items_per_page(10);
    let result = executor().execute(&spec).unwrap();

    assert!(result.is_empty());
    assert_eq!(result.total_items, 3);
    assert_eq!(result.total_pages(), 1);
}

// =============================================================================
// Determinism & Errors
// =============================================================================

/// Repeated identical queries return identical pages.
#[test]
fn test_repeated_queries_identical() {
    let executor = executor();
    let spec = QuerySpec::new()
        .with_search_term("shirt")
        .with_collections([SHIRTS], Clusivity::InAny)
        .with_sort("price", SortDirection::Ascending)
        .with_items_per_page(2);

    let first = executor.execute(&spec).unwrap();
    for _ in 0..10 {
        assert_eq!(executor.execute(&spec).unwrap(), first);
    }
}

/// Insertion order does not affect results.
#[test]
fn test_insertion_order_irrelevant() {
    let forward = catalog();
    let reversed = Arc::new(ProductIndex::new());
    for n in (1..=6u128).rev() {
        let product = forward.get(&key(n)).unwrap().unwrap();
        reversed.insert(product).unwrap();
    }

    let spec = QuerySpec::new().with_sort("sku", SortDirection::Descending);
    assert_eq!(
        QueryExecutor::new(forward).execute(&spec).unwrap(),
        QueryExecutor::new(reversed).execute(&spec).unwrap()
    );
}

/// Invalid paging is rejected by the index and returned unchanged by the executor.
#[test]
fn test_index_error_propagates_unchanged() {
    let err = executor()
        .execute(&QuerySpec::new().with_page(0))
        .unwrap_err();

    assert_eq!(
        err,
        IndexError::InvalidPaging {
            page: 0,
            items_per_page: 10
        }
    );
    assert_eq!(err.code(), "CATALOG_INDEX_INVALID_PAGING");
}

/// Index updates are visible to later queries through the same executor.
#[test]
fn test_index_updates_visible() {
    let index = catalog();
    let executor = QueryExecutor::new(Arc::clone(&index));
    let sale = QuerySpec::new().with_collections([SALE], Clusivity::InAny);

    assert_eq!(executor.execute(&sale).unwrap().total_items, 2);

    index
        .insert(product(7, "Linen Shirt", 20.0, &[SHIRTS, SALE]))
        .unwrap();
    index.remove(&key(3)).unwrap();

    let keys: BTreeSet<_> = executor.execute(&sale).unwrap().iter().map(|p| p.key).collect();
    assert_eq!(keys, set(&[1, 7]));
}
