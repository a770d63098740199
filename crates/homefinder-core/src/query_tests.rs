//! Tests for `query` module

use super::error::Error;
use super::posting::{Attribute, AttributeIndex, RecordId, SetPostingIndex, SortedPostingIndex};
use super::query::*;

const ROWS: [(RecordId, &str, &str, &str); 6] = [
    (0, "4", "3", "320000"),
    (1, "4", "2", "280000"),
    (2, "3", "3", "310000"),
    (3, "4", "3", "410000"),
    (4, "4", "4", ""),
    (5, "2", "1", "$95,000"),
];

fn both() -> (SetPostingIndex, SortedPostingIndex) {
    let mut set = SetPostingIndex::new(50_000).expect("valid bin");
    let mut list = SortedPostingIndex::new(50_000).expect("valid bin");
    for &(id, beds, baths, price) in &ROWS {
        set.add_row(id, beds, baths, price);
        list.add_row(id, beds, baths, price);
    }
    list.finalize();
    (set, list)
}

fn run(query: &PropertyQuery) -> Vec<RecordId> {
    let (set, list) = both();
    let a = query.execute(&set).expect("set query");
    let b = query.execute(&list).expect("list query");
    assert_eq!(a, b, "variants disagree for {query:?}");
    a
}

#[test]
fn test_price_range_default_is_unbounded_from_zero() {
    // Arrange & Act
    let range = PriceRange::default();

    // Assert
    assert!(range.min.abs() < f64::EPSILON);
    assert!(range.max.is_infinite());
    assert!(range.contains(0.0));
    assert!(range.contains(1e12));
    assert!(!range.contains(-1.0));
}

#[test]
fn test_full_conjunction() {
    // Arrange
    let query = PropertyQuery::new()
        .bedrooms(4)
        .min_fullbaths(3)
        .price_between(300_000.0, 350_000.0);

    // Act & Assert
    assert_eq!(run(&query), vec![0]);
}

#[test]
fn test_default_query_returns_every_priced_row() {
    // Row 4 has no price and is excluded by the implicit price predicate.
    assert_eq!(run(&PropertyQuery::new()), vec![0, 1, 2, 3, 5]);
}

#[test]
fn test_default_query_with_outlier_price_stays_fast() {
    // Arrange
    let mut set = SetPostingIndex::new(50_000).expect("valid bin");
    let mut list = SortedPostingIndex::new(50_000).expect("valid bin");
    for (id, price) in [(0, "250000"), (1, "1e13"), (2, "1e30")] {
        set.add_row(id, "3", "2", price);
        list.add_row(id, "3", "2", price);
    }
    list.finalize();

    // Act
    let start = std::time::Instant::now();
    let from_set = PropertyQuery::new().execute(&set).expect("set query");
    let from_list = PropertyQuery::new().execute(&list).expect("list query");

    // Assert
    assert!(start.elapsed() < std::time::Duration::from_secs(1));
    assert_eq!(from_set, vec![0, 1, 2]);
    assert_eq!(from_list, from_set);
}

#[test]
fn test_execute_does_not_ignore_empty_predicate_like_intersect() {
    // Arrange
    let (set, _) = both();
    let query = PropertyQuery::new().bedrooms(9);
    let beds = set.query_equals(Attribute::Bedrooms, 9).expect("query");
    let price = set.query_price_range(0.0, f64::INFINITY).expect("query");

    // Act & Assert: the primitive drops the empty member, execute does not
    assert_eq!(set.intersect(&[beds, price]), vec![0, 1, 2, 3, 5]);
    assert!(query.execute(&set).expect("query").is_empty());
}

#[test]
fn test_post_filter_removes_bin_false_positives() {
    // Arrange - 310000 and 320000 share the [300000, 350000) bin
    let query = PropertyQuery::new().price_between(315_000.0, 349_999.0);

    // Act & Assert
    assert_eq!(run(&query), vec![0]);
}

#[test]
fn test_bedrooms_only() {
    assert_eq!(run(&PropertyQuery::new().bedrooms(4)), vec![0, 1, 3]);
}

#[test]
fn test_bath_threshold_only() {
    assert_eq!(run(&PropertyQuery::new().min_fullbaths(3)), vec![0, 2, 3]);
}

#[test]
fn test_empty_predicate_short_circuits_to_empty() {
    // Arrange - no home has 9 bedrooms
    let query = PropertyQuery::new().bedrooms(9).min_fullbaths(1);

    // Act & Assert
    assert!(run(&query).is_empty());
}

#[test]
fn test_price_at_least() {
    let query = PropertyQuery::new().price(PriceRange::at_least(300_000.0));
    assert_eq!(run(&query), vec![0, 2, 3]);
}

#[test]
fn test_inverted_range_is_empty() {
    let query = PropertyQuery::new().price_between(400_000.0, 100_000.0);
    assert!(run(&query).is_empty());
}

#[test]
fn test_nan_bound_is_rejected() {
    // Arrange
    let (set, _) = both();
    let query = PropertyQuery::new().price_between(f64::NAN, 1.0);

    // Act
    let result = query.execute(&set);

    // Assert
    assert!(matches!(result, Err(Error::InvalidQuery(_))));
}

#[test]
fn test_unfinalized_sorted_index_is_rejected() {
    // Arrange
    let mut list = SortedPostingIndex::new(50_000).expect("valid bin");
    list.add_row(0, "3", "2", "100000");

    // Act
    let result = PropertyQuery::new().bedrooms(3).execute(&list);

    // Assert
    assert!(matches!(result, Err(Error::NotFinalized)));
}

#[test]
fn test_results_are_ascending() {
    let hits = run(&PropertyQuery::new().min_fullbaths(0));
    assert!(hits.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_query_serializes_to_json() {
    // Arrange
    let query = PropertyQuery::new().bedrooms(3).price_between(1.0, 2.0);

    // Act
    let json = serde_json::to_value(query).expect("serialize");

    // Assert
    assert_eq!(json["bedrooms"], 3);
    assert!(json["min_fullbaths"].is_null());
    assert_eq!(json["price"]["max"], 2.0);
}
