//! Tag filtering and name/id search over a loaded catalog.
//!
//! All functions are pure and preserve catalog order.

use std::collections::BTreeSet;

use pokemart_core::Product;

/// Tag value meaning "no tag filter".
pub const ALL_TAGS: &str = "all";

/// Live (as-you-type) search only runs once the query has this many chars.
pub const LIVE_SEARCH_MIN_CHARS: usize = 2;

/// Every tag used in the catalog, case as provided, ascending.
#[must_use]
pub fn distinct_tags(catalog: &[Product]) -> BTreeSet<String> {
    catalog
        .iter()
        .flat_map(|product| product.types.iter().cloned())
        .collect()
}

/// Products carrying `tag`, or the whole catalog for [`ALL_TAGS`].
#[must_use]
pub fn filter_by_tag<'a>(catalog: &'a [Product], tag: &str) -> Vec<&'a Product> {
    if tag == ALL_TAGS {
        return catalog.iter().collect();
    }
    catalog.iter().filter(|product| product.has_type(tag)).collect()
}

/// Products whose name contains `query` (case-insensitive), or whose id
/// written in decimal is exactly `query`.
///
/// An empty or whitespace-only query returns the whole catalog.
#[must_use]
pub fn search<'a>(catalog: &'a [Product], query: &str) -> Vec<&'a Product> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return catalog.iter().collect();
    }

    catalog
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&term) || product.id.to_string() == term
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokemart_core::{Price, ProductId};

    fn product(id: i32, name: &str, types: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            image: None,
            price: Price::new(100),
            types: types.iter().map(ToString::to_string).collect(),
            height: 1,
            weight: 1,
            abilities: String::new(),
            stats: vec![],
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "bulbasaur", &["grass", "poison"]),
            product(4, "charmander", &["fire"]),
            product(6, "charizard", &["fire", "flying"]),
            product(7, "squirtle", &["water"]),
            product(25, "pikachu", &["electric"]),
            product(125, "electabuzz", &["electric"]),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_distinct_tags_sorted_and_unique() {
        let tags: Vec<String> = distinct_tags(&catalog()).into_iter().collect();
        assert_eq!(
            tags,
            vec!["electric", "fire", "flying", "grass", "poison", "water"]
        );
    }

    #[test]
    fn test_distinct_tags_empty_catalog() {
        assert!(distinct_tags(&[]).is_empty());
    }

    #[test]
    fn test_filter_all_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(ids(&filter_by_tag(&catalog, ALL_TAGS)), vec![1, 4, 6, 7, 25, 125]);
    }

    #[test]
    fn test_filter_by_tag_preserves_order() {
        let catalog = catalog();
        assert_eq!(ids(&filter_by_tag(&catalog, "fire")), vec![4, 6]);
        assert_eq!(ids(&filter_by_tag(&catalog, "poison")), vec![1]);
        assert!(filter_by_tag(&catalog, "ghost").is_empty());
    }

    #[test]
    fn test_filter_by_tag_is_case_sensitive() {
        let catalog = catalog();
        assert!(filter_by_tag(&catalog, "Fire").is_empty());
    }

    #[test]
    fn test_search_empty_returns_full_catalog() {
        let catalog = catalog();
        assert_eq!(search(&catalog, "").len(), catalog.len());
        assert_eq!(search(&catalog, "   ").len(), catalog.len());
    }

    #[test]
    fn test_search_by_name_substring_case_insensitive() {
        let catalog = catalog();
        assert_eq!(ids(&search(&catalog, "char")), vec![4, 6]);
        assert_eq!(ids(&search(&catalog, "  PIKA ")), vec![25]);
    }

    #[test]
    fn test_search_by_id() {
        let catalog = catalog();
        assert_eq!(ids(&search(&catalog, "25")), vec![25]);
        assert_eq!(ids(&search(&catalog, "7")), vec![7]);
    }

    #[test]
    fn test_search_by_id_needs_exact_digits() {
        let catalog = catalog();
        assert!(search(&catalog, "025").is_empty());
        assert!(search(&catalog, "+25").is_empty());
        assert_eq!(ids(&search(&catalog, " 25 ")), vec![25]);
    }

    #[test]
    fn test_search_no_match() {
        let catalog = catalog();
        assert!(search(&catalog, "mewtwo").is_empty());
        assert!(search(&catalog, "999").is_empty());
    }
}
