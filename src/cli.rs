use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "quadmart", version, about = "Campus marketplace CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Marketplace API base URL (falls back to QUADMART_API, then config.toml)"
    )]
    pub api: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the catalog with local filters
    Browse {
        /// Free-text match against title or category
        term: Option<String>,
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, value_enum, default_value_t = PriceBucket::All)]
        price: PriceBucket,
        #[arg(long, value_enum, default_value_t = SortKey::Recent)]
        sort: SortKey,
        #[arg(long, help = "Restrict to favorited listings")]
        favorites: bool,
    },
    /// Server-side search (falls back to the last good result set)
    Search {
        query: Option<String>,
    },
    /// Full detail for one listing
    Show {
        id: String,
    },
    /// Toggle a listing in the favorites set
    Favorite {
        id: String,
    },
    /// List favorited listings
    Favorites,
    /// Distinct categories with listing counts
    Categories,
    /// Force-refresh the local catalog cache
    Refresh,
    /// Post a new listing
    Sell {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long, help = "Seller contact as type:value (email or instagram)")]
        contact: String,
        #[arg(long)]
        photo: std::path::PathBuf,
    },
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
    },
    Logout,
    /// Validate the stored token and print the session user
    Whoami,
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    Show,
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PriceBucket {
    #[value(name = "all")]
    #[serde(rename = "all")]
    All,
    #[value(name = "free")]
    #[serde(rename = "free")]
    Free,
    #[value(name = "under-20")]
    #[serde(rename = "under-20")]
    Under20,
    #[value(name = "20-50")]
    #[serde(rename = "20-50")]
    TwentyToFifty,
    #[value(name = "over-50")]
    #[serde(rename = "over-50")]
    Over50,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Recent,
    PriceLow,
    PriceHigh,
    Name,
    Category,
}
