use crate::domain::models::State;
use crate::market::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Append-only observability sink. Read paths log here instead of failing
/// the command.
pub fn audit(action: &str, data: serde_json::Value) {
    let home = match std::env::var("HOME") {
        Ok(h) => h,
        Err(_) => return,
    };
    let path = PathBuf::from(home).join(".config/quadmart/audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    api_url: Option<String>,
}

fn config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/quadmart/config.toml"))
}

fn load_config() -> ConfigFile {
    let Ok(path) = config_path() else {
        return ConfigFile::default();
    };
    let Ok(raw) = std::fs::read_to_string(path) else {
        return ConfigFile::default();
    };
    toml::from_str(&raw).unwrap_or_default()
}

/// Resolution order: --api flag, QUADMART_API, config.toml, built-in default.
pub fn resolve_api_base(flag: Option<&str>) -> String {
    if let Some(base) = flag {
        return base.to_string();
    }
    if let Ok(base) = std::env::var("QUADMART_API") {
        if !base.is_empty() {
            return base;
        }
    }
    if let Some(base) = load_config().api_url {
        return base;
    }
    DEFAULT_API_BASE.to_string()
}

fn state_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/quadmart/state.json"))
}

fn session_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/quadmart/session.json"))
}

pub fn load_state() -> anyhow::Result<State> {
    let p = state_path()?;
    if !p.exists() {
        return Ok(State::default());
    }
    let raw = std::fs::read_to_string(p)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_state(s: &State) -> anyhow::Result<()> {
    let p = state_path()?;
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(p, serde_json::to_string_pretty(s)?)?;
    Ok(())
}

#[derive(Debug, Deserialize, Serialize)]
struct SessionFile {
    access_token: String,
}

/// Bearer token persisted across invocations; rehydrated at startup.
pub fn load_token() -> Option<String> {
    let p = session_path().ok()?;
    let raw = std::fs::read_to_string(p).ok()?;
    let file: SessionFile = serde_json::from_str(&raw).ok()?;
    Some(file.access_token)
}

pub fn save_token(token: &str) -> anyhow::Result<()> {
    let p = session_path()?;
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = SessionFile {
        access_token: token.to_string(),
    };
    std::fs::write(p, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

pub fn clear_token() {
    if let Ok(p) = session_path() {
        let _ = std::fs::remove_file(p);
    }
}
