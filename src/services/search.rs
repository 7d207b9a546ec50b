use crate::market::{self, Api, Listing};
use crate::services::storage::audit;

const CATALOG_CACHE: &str = "catalog";
const SEARCH_CACHE: &str = "search";

/// Fetches the full catalog, falling back to the cached copy when the
/// server is unreachable. Stale-but-valid: a failed fetch is audited and
/// the caller sees the last good data (or an empty catalog on a cold
/// cache), never an error.
pub fn load_catalog(api: &Api) -> Vec<Listing> {
    match api.fetch_listings() {
        Ok(listings) => {
            let _ = market::write_cached(api.base(), CATALOG_CACHE, &listings);
            listings
        }
        Err(e) => {
            audit(
                "catalog_fallback",
                serde_json::json!({"api": api.base(), "error": e.to_string()}),
            );
            market::read_cached(api.base(), CATALOG_CACHE).unwrap_or_default()
        }
    }
}

/// Hard refresh for `quadmart refresh`: here a fetch failure is an error.
pub fn refresh_catalog(api: &Api) -> anyhow::Result<usize> {
    let listings = api.fetch_listings()?;
    market::write_cached(api.base(), CATALOG_CACHE, &listings)?;
    Ok(listings.len())
}

/// Two sourcing modes. An empty query means local mode: the visible set is
/// the catalog itself. A non-empty query goes to the server-side search;
/// on failure the prior visible set (last good response) is retained.
pub fn visible_listings(api: &Api, catalog: &[Listing], query: Option<&str>) -> Vec<Listing> {
    let term = query.unwrap_or("").trim();
    if term.is_empty() {
        return catalog.to_vec();
    }
    match api.search(term) {
        Ok(results) => {
            let _ = market::write_cached(api.base(), SEARCH_CACHE, &results);
            results
        }
        Err(e) => {
            audit(
                "search_fallback",
                serde_json::json!({"query": term, "error": e.to_string()}),
            );
            market::read_cached(api.base(), SEARCH_CACHE).unwrap_or_default()
        }
    }
}
