use crate::cli::{PriceBucket, SortKey};
use crate::domain::models::FilterState;
use crate::market::Listing;
use std::cmp::Ordering;

/// Parses the leading numeric magnitude out of a free-form price string:
/// the first run of ASCII digits with at most one embedded decimal point.
/// "$7.50" -> 7.5, "Free" -> 0, "10 or best offer" -> 10.
pub fn parse_price(raw: &str) -> f64 {
    let mut buf = String::new();
    let mut seen_dot = false;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            buf.push(c);
        } else if c == '.' && !buf.is_empty() && !seen_dot {
            buf.push(c);
            seen_dot = true;
        } else if !buf.is_empty() {
            break;
        }
    }
    buf.parse().unwrap_or(0.0)
}

fn is_free(listing: &Listing) -> bool {
    parse_price(&listing.price) == 0.0 || listing.price.to_ascii_lowercase().contains("free")
}

pub fn in_bucket(listing: &Listing, bucket: PriceBucket) -> bool {
    let price = parse_price(&listing.price);
    match bucket {
        PriceBucket::All => true,
        PriceBucket::Free => is_free(listing),
        PriceBucket::Under20 => price <= 20.0,
        PriceBucket::TwentyToFifty => (20.0..=50.0).contains(&price),
        // Open upper bound: anything at or above 50 qualifies.
        PriceBucket::Over50 => price >= 50.0,
    }
}

fn matches_term(listing: &Listing, term: &str) -> bool {
    let needle = term.to_ascii_lowercase();
    listing.title.to_ascii_lowercase().contains(&needle)
        || listing.category.to_ascii_lowercase().contains(&needle)
}

fn matches_category(listing: &Listing, category: &str) -> bool {
    category == "all" || listing.category.eq_ignore_ascii_case(category)
}

/// Ids are usually numeric and monotonically increasing; compare
/// numerically when both sides parse, lexicographically otherwise.
fn id_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Derives the visible projection of the catalog for one filter state.
/// Pure and deterministic: identical inputs yield identical output.
pub fn derive_view(catalog: &[Listing], filter: &FilterState) -> Vec<Listing> {
    let mut view: Vec<Listing> = catalog
        .iter()
        .filter(|l| matches_category(l, &filter.category))
        .filter(|l| in_bucket(l, filter.price))
        .filter(|l| filter.search_term.is_empty() || matches_term(l, &filter.search_term))
        .cloned()
        .collect();

    view.sort_by(|a, b| match filter.sort {
        SortKey::Recent => id_order(&b.id, &a.id),
        SortKey::PriceLow => parse_price(&a.price)
            .partial_cmp(&parse_price(&b.price))
            .unwrap_or(Ordering::Equal),
        SortKey::PriceHigh => parse_price(&b.price)
            .partial_cmp(&parse_price(&a.price))
            .unwrap_or(Ordering::Equal),
        SortKey::Name => a.title.cmp(&b.title),
        SortKey::Category => a.category.cmp(&b.category),
    });
    view
}

pub fn distinct_categories(catalog: &[Listing]) -> Vec<(String, usize)> {
    let mut counts: std::collections::BTreeMap<String, usize> = Default::default();
    for l in catalog {
        *counts.entry(l.category.to_ascii_lowercase()).or_default() += 1;
    }
    counts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, title: &str, price: &str, category: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: title.to_string(),
            price: price.to_string(),
            category: category.to_string(),
            description: String::new(),
            image: String::new(),
            contact: None,
        }
    }

    fn fixture() -> Vec<Listing> {
        vec![
            listing("1", "Calc textbook", "$15", "books"),
            listing("2", "EGN lab kit", "Free", "books"),
            listing("3", "Monitor", "$60", "electronics"),
        ]
    }

    #[test]
    fn price_parsing_takes_leading_magnitude() {
        assert_eq!(parse_price("$7.50"), 7.5);
        assert_eq!(parse_price("Free"), 0.0);
        assert_eq!(parse_price("0"), 0.0);
        assert_eq!(parse_price("10 or best offer"), 10.0);
        assert_eq!(parse_price("no number here"), 0.0);
        assert_eq!(parse_price("$1200.00"), 1200.0);
    }

    #[test]
    fn derive_view_is_deterministic() {
        let catalog = fixture();
        let filter = FilterState {
            sort: SortKey::Name,
            ..Default::default()
        };
        let a = derive_view(&catalog, &filter);
        let b = derive_view(&catalog, &filter);
        let ids_a: Vec<_> = a.iter().map(|l| &l.id).collect();
        let ids_b: Vec<_> = b.iter().map(|l| &l.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let catalog = fixture();
        let filter = FilterState {
            category: "Books".to_string(),
            ..Default::default()
        };
        let view = derive_view(&catalog, &filter);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|l| l.category == "books"));
    }

    #[test]
    fn free_bucket_catches_zero_and_free_text() {
        let zero = listing("9", "Posters", "$0", "decor");
        let word = listing("10", "Couch", "Free", "furniture");
        assert!(in_bucket(&zero, PriceBucket::Free));
        assert!(in_bucket(&word, PriceBucket::Free));
        // Zero-priced listings are also within the under-20 bound.
        assert!(in_bucket(&zero, PriceBucket::Under20));
        assert!(in_bucket(&word, PriceBucket::Under20));
    }

    #[test]
    fn over_fifty_has_no_upper_cap() {
        let pricey = listing("11", "Road bike", "$1200.00", "sports");
        assert!(in_bucket(&pricey, PriceBucket::Over50));
    }

    #[test]
    fn price_low_sort_is_non_decreasing() {
        let catalog = fixture();
        let filter = FilterState {
            sort: SortKey::PriceLow,
            ..Default::default()
        };
        let view = derive_view(&catalog, &filter);
        let prices: Vec<f64> = view.iter().map(|l| parse_price(&l.price)).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn books_under_price_low_scenario() {
        let catalog = fixture();
        let filter = FilterState {
            category: "books".to_string(),
            sort: SortKey::PriceLow,
            ..Default::default()
        };
        let view = derive_view(&catalog, &filter);
        let ids: Vec<_> = view.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn term_matches_title_or_category() {
        let catalog = fixture();
        let filter = FilterState {
            search_term: "ELECTRO".to_string(),
            ..Default::default()
        };
        let view = derive_view(&catalog, &filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "3");
    }

    #[test]
    fn recent_sort_compares_numeric_ids_numerically() {
        let catalog = vec![
            listing("9", "A", "$1", "misc"),
            listing("10", "B", "$1", "misc"),
        ];
        let view = derive_view(&catalog, &FilterState::default());
        let ids: Vec<_> = view.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "9"]);
    }

    #[test]
    fn distinct_categories_counts_case_insensitively() {
        let catalog = vec![
            listing("1", "A", "$1", "Books"),
            listing("2", "B", "$1", "books"),
            listing("3", "C", "$1", "decor"),
        ];
        let cats = distinct_categories(&catalog);
        assert_eq!(
            cats,
            vec![("books".to_string(), 2), ("decor".to_string(), 1)]
        );
    }
}
