//! Result sorting for the reference index
//!
//! Sort is stable and total: ties on the sort field are broken by product
//! key ascending, in both directions.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::product::ProductContent;
use crate::query::SortDirection;

/// A sort field value extracted once per product
#[derive(Debug)]
enum SortValue<'a> {
    Missing,
    Null,
    Bool(bool),
    Number(&'a Number),
    Text { folded: String, raw: &'a str },
    Array,
    Object,
}

impl<'a> SortValue<'a> {
    fn of(value: Option<&'a Value>) -> Self {
        match value {
            None => SortValue::Missing,
            Some(Value::Null) => SortValue::Null,
            Some(Value::Bool(b)) => SortValue::Bool(*b),
            Some(Value::Number(n)) => SortValue::Number(n),
            Some(Value::String(s)) => SortValue::Text {
                folded: s.to_lowercase(),
                raw: s,
            },
            Some(Value::Array(_)) => SortValue::Array,
            Some(Value::Object(_)) => SortValue::Object,
        }
    }

    fn type_order(&self) -> u8 {
        match self {
            SortValue::Missing => 0,
            SortValue::Null => 1,
            SortValue::Bool(_) => 2,
            SortValue::Number(_) => 3,
            SortValue::Text { .. } => 4,
            SortValue::Array => 5,
            SortValue::Object => 6,
        }
    }
}

/// Sorts product content
pub struct ProductSorter;

impl ProductSorter {
    /// Sorts products by `field` in `direction`, then by key.
    ///
    /// Each product's sort value is extracted once, before sorting.
    pub fn sort<'a>(
        products: Vec<&'a ProductContent>,
        field: &str,
        direction: SortDirection,
    ) -> Vec<&'a ProductContent> {
        let mut keyed: Vec<(SortValue<'a>, &'a ProductContent)> = products
            .into_iter()
            .map(|p| (SortValue::of(p.field(field)), p))
            .collect();

        keyed.sort_by(|(a_val, a), (b_val, b)| {
            let ordering = Self::compare_values(a_val, b_val);
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            ordering.then_with(|| a.key.cmp(&b.key))
        });

        keyed.into_iter().map(|(_, p)| p).collect()
    }

    /// Compares two extracted values for sorting.
    ///
    /// Ordering rules:
    /// - missing < null < bool < number < string < array < object
    /// - For same types, natural ordering; strings compare case-insensitively
    ///   first, then by exact bytes
    /// - Arrays and objects compare equal to each other
    fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
        match (a, b) {
            (SortValue::Bool(a_b), SortValue::Bool(b_b)) => a_b.cmp(b_b),
            (SortValue::Number(a_n), SortValue::Number(b_n)) => Self::compare_numbers(a_n, b_n),
            (
                SortValue::Text {
                    folded: a_f,
                    raw: a_s,
                },
                SortValue::Text {
                    folded: b_f,
                    raw: b_s,
                },
            ) => a_f.cmp(b_f).then_with(|| a_s.cmp(b_s)),
            _ => a.type_order().cmp(&b.type_order()),
        }
    }

    /// Integers compare exactly; floats and mixed pairs compare as f64.
    fn compare_numbers(a: &Number, b: &Number) -> Ordering {
        match (Self::as_integer(a), Self::as_integer(b)) {
            (Some(a_i), Some(b_i)) => a_i.cmp(&b_i),
            _ => {
                let a_f = a.as_f64().unwrap_or(0.0);
                let b_f = b.as_f64().unwrap_or(0.0);
                a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
            }
        }
    }

    fn as_integer(n: &Number) -> Option<i128> {
        n.as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn key(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn make_product(n: u128, price: f64) -> ProductContent {
        ProductContent::new(key(n), json!({"price": price}))
    }

    fn sorted_keys(products: &[ProductContent], field: &str, direction: SortDirection) -> Vec<Uuid> {
        ProductSorter::sort(products.iter().collect(), field, direction)
            .iter()
            .map(|p| p.key)
            .collect()
    }

    #[test]
    fn test_sort_ascending() {
        let products = vec![make_product(1, 30.0), make_product(2, 10.0), make_product(3, 20.0)];

        assert_eq!(
            sorted_keys(&products, "price", SortDirection::Ascending),
            vec![key(2), key(3), key(1)]
        );
    }

    #[test]
    fn test_sort_large_integers_exactly() {
        // Both values round to the same f64
        let products = vec![
            ProductContent::new(key(1), json!({"n": 9007199254740993u64})),
            ProductContent::new(key(2), json!({"n": 9007199254740992u64})),
        ];

        assert_eq!(
            sorted_keys(&products, "n", SortDirection::Ascending),
            vec![key(2), key(1)]
        );
        assert_eq!(
            sorted_keys(&products, "n", SortDirection::Descending),
            vec![key(1), key(2)]
        );
    }

    #[test]
    fn test_sort_integers_across_signed_and_unsigned_range() {
        let products = vec![
            ProductContent::new(key(1), json!({"n": u64::MAX})),
            ProductContent::new(key(2), json!({"n": -5})),
            ProductContent::new(key(3), json!({"n": i64::MAX})),
            ProductContent::new(key(4), json!({"n": 2.5})),
        ];

        assert_eq!(
            sorted_keys(&products, "n", SortDirection::Ascending),
            vec![key(2), key(4), key(3), key(1)]
        );
    }

    #[test]
    fn test_sort_descending() {
        let products = vec![make_product(1, 30.0), make_product(2, 10.0), make_product(3, 20.0)];

        assert_eq!(
            sorted_keys(&products, "price", SortDirection::Descending),
            vec![key(1), key(3), key(2)]
        );
    }

    #[test]
    fn test_ties_broken_by_key_in_both_directions() {
        let products = vec![make_product(3, 5.0), make_product(1, 5.0), make_product(2, 5.0)];

        assert_eq!(
            sorted_keys(&products, "price", SortDirection::Ascending),
            vec![key(1), key(2), key(3)]
        );
        assert_eq!(
            sorted_keys(&products, "price", SortDirection::Descending),
            vec![key(1), key(2), key(3)]
        );
    }

    #[test]
    fn test_missing_field_sorts_first() {
        let products = vec![
            make_product(1, 1.0),
            ProductContent::new(key(2), json!({"name": "no price"})),
        ];

        assert_eq!(
            sorted_keys(&products, "price", SortDirection::Ascending),
            vec![key(2), key(1)]
        );
    }

    #[test]
    fn test_sort_by_string_case_insensitive() {
        let products = vec![
            ProductContent::new(key(1), json!({"name": "charlie"})),
            ProductContent::new(key(2), json!({"name": "Alice"})),
            ProductContent::new(key(3), json!({"name": "bob"})),
        ];

        assert_eq!(
            sorted_keys(&products, "name", SortDirection::Ascending),
            vec![key(2), key(3), key(1)]
        );
    }

    #[test]
    fn test_mixed_types_order() {
        let products = vec![
            ProductContent::new(key(1), json!({"v": "text"})),
            ProductContent::new(key(2), json!({"v": 3})),
            ProductContent::new(key(3), json!({"v": true})),
            ProductContent::new(key(4), json!({"v": null})),
        ];

        assert_eq!(
            sorted_keys(&products, "v", SortDirection::Ascending),
            vec![key(4), key(3), key(2), key(1)]
        );
    }
}
