use crate::cli::{PriceBucket, SortKey};
use crate::market::Listing;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Local per-user state. The favorites set is a UI affordance only and is
/// never sent to the server.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// One invocation's filter selections for the browse surface.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub category: String,
    pub price: PriceBucket,
    pub search_term: String,
    pub sort: SortKey,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: "all".to_string(),
            price: PriceBucket::All,
            search_term: String::new(),
            sort: SortKey::Recent,
        }
    }
}

#[derive(Serialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: Listing,
    pub image_url: String,
    pub contact_kind: String,
    pub contact_value: String,
}

#[derive(Serialize)]
pub struct FavoriteReport {
    pub id: String,
    pub favorited: bool,
    pub favorite_count: usize,
}

#[derive(Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<String>,
}

#[derive(Serialize)]
pub struct RefreshReport {
    pub listings: usize,
    pub source: String,
}
