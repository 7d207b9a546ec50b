use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Exact success message of the registration endpoint. External contract.
pub const REGISTER_SUCCESS_MESSAGE: &str = "User created successfully";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Listing {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    pub price: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WhoAmI {
    pub user: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatedListing {
    pub message: String,
    pub product_id: String,
}

#[derive(thiserror::Error, Debug)]
pub enum MarketError {
    #[error("listing not found: {0}")]
    ListingNotFound(String),
    #[error("not signed in")]
    AuthRequired,
    #[error("credentials rejected")]
    CredentialsRejected,
    #[error("registration rejected")]
    RegistrationRejected,
}

/// Stable machine-readable code for the `--json` error envelope.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(me) = err.downcast_ref::<MarketError>() {
        return match me {
            MarketError::ListingNotFound(_) => "NOT_FOUND",
            MarketError::AuthRequired => "AUTH_REQUIRED",
            MarketError::CredentialsRejected => "AUTH_FAILED",
            MarketError::RegistrationRejected => "REGISTER_FAILED",
        };
    }
    if err.downcast_ref::<reqwest::Error>().is_some() {
        return "NETWORK";
    }
    "ERROR"
}

/// Ids arrive as JSON strings or numbers depending on listing age.
fn id_as_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let v = serde_json::Value::deserialize(de)?;
    match v {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "listing id must be string or number, got {}",
            other
        ))),
    }
}

pub struct Api {
    base: String,
}

impl Api {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn client(timeout_ms: u64) -> anyhow::Result<reqwest::blocking::Client> {
        Ok(reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?)
    }

    pub fn fetch_listings(&self) -> anyhow::Result<Vec<Listing>> {
        let resp = Self::client(5000)?
            .get(format!("{}/products", self.base))
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    pub fn search(&self, query: &str) -> anyhow::Result<Vec<Listing>> {
        let resp = Self::client(5000)?
            .get(format!("{}/search", self.base))
            .query(&[("query", query)])
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    pub fn login(&self, username: &str, password: &str) -> anyhow::Result<String> {
        let resp = Self::client(5000)?
            .post(format!("{}/login", self.base))
            .form(&[("username", username), ("password", password)])
            .send()?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketError::CredentialsRejected.into());
        }
        let token: TokenResponse = resp.error_for_status()?.json()?;
        Ok(token.access_token)
    }

    pub fn register(&self, username: &str, password: &str) -> anyhow::Result<String> {
        let resp = Self::client(5000)?
            .post(format!("{}/register", self.base))
            .form(&[("username", username), ("password", password)])
            .send()?;
        let body: MessageResponse = resp.json()?;
        Ok(body.message)
    }

    pub fn whoami(&self, token: &str) -> anyhow::Result<WhoAmI> {
        let resp = Self::client(5000)?
            .get(format!("{}/protected", self.base))
            .bearer_auth(token)
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    pub fn profile(&self, token: &str) -> anyhow::Result<Profile> {
        let resp = Self::client(5000)?
            .get(format!("{}/user/profile", self.base))
            .bearer_auth(token)
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    pub fn update_profile(&self, token: &str, profile: &Profile) -> anyhow::Result<Profile> {
        let body = serde_json::json!({
            "username": profile.username,
            "email": profile.email,
            "full_name": profile.full_name,
            "bio": profile.bio,
            "location": profile.location,
        });
        let resp = Self::client(5000)?
            .put(format!("{}/user/profile", self.base))
            .bearer_auth(token)
            .json(&body)
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_listing(
        &self,
        title: &str,
        price: &str,
        description: &str,
        category: &str,
        contact: &str,
        photo: &std::path::Path,
    ) -> anyhow::Result<CreatedListing> {
        let form = reqwest::blocking::multipart::Form::new()
            .text("title", title.to_string())
            .text("price", price.to_string())
            .text("description", description.to_string())
            .text("category", category.to_string())
            .text("contact", contact.to_string())
            .file("photo", photo)?;
        let resp = Self::client(15000)?
            .post(format!("{}/products", self.base))
            .multipart(form)
            .send()?
            .error_for_status()?;
        Ok(resp.json()?)
    }

    /// Uploaded photos are stored server-side by filename; anything already
    /// absolute passes through untouched.
    pub fn image_url(&self, image: &str) -> String {
        if image.starts_with("http://") || image.starts_with("https://") {
            image.to_string()
        } else {
            format!("{}/uploads/{}", self.base, image)
        }
    }
}

pub fn find_listing<'a>(catalog: &'a [Listing], id: &str) -> anyhow::Result<&'a Listing> {
    catalog
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| MarketError::ListingNotFound(id.to_string()).into())
}

/// Splits a `type:value` contact string into its parts.
pub fn parse_contact(raw: &str) -> (&str, &str) {
    match raw.split_once(':') {
        Some((kind, value)) => (kind, value),
        None => ("unknown", raw),
    }
}

fn cache_path(base: &str, kind: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(base.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("quadmart")
        .join(kind)
        .join(format!("{}.json", id)))
}

pub fn write_cached(base: &str, kind: &str, listings: &[Listing]) -> anyhow::Result<()> {
    let p = cache_path(base, kind)?;
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string(listings)?)?;
    Ok(())
}

pub fn read_cached(base: &str, kind: &str) -> Option<Vec<Listing>> {
    let p = cache_path(base, kind).ok()?;
    let raw = std::fs::read_to_string(p).ok()?;
    serde_json::from_str(&raw).ok()
}
