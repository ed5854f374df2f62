/// Configuration system for opsdeck.
///
/// Layered hierarchy, later layers override earlier ones:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::OpsdeckConfig::default()`]
/// 2. **User global config** — `~/.opsdeck/config.toml`
/// 3. **Project local config** — `.opsdeck.toml` in the current directory
/// 4. **Environment variables** — `OPSDECK_*` (highest precedence)
///
/// Malformed files are silently ignored; a broken config must never make
/// the console unusable.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::OpsdeckConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved opsdeck configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML →
/// env vars. The primary entry point for every module needing config.
pub fn load() -> OpsdeckConfig {
    let mut config = OpsdeckConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
fn load_toml_file(path: Option<PathBuf>) -> Option<OpsdeckConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.opsdeck/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".opsdeck").join("config.toml"))
}

/// Path to the project local config: `.opsdeck.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".opsdeck.toml"))
}

/// Return the global config path for display purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `OPSDECK_BACKEND_URL` — backend base URL
/// - `OPSDECK_TIMEOUT_MS` — per-request timeout
/// - `OPSDECK_PAGE_SIZE` — default user listing page size
/// - `OPSDECK_HISTORY` — request log enabled (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut OpsdeckConfig) {
    if let Ok(val) = std::env::var("OPSDECK_BACKEND_URL")
        && !val.is_empty()
    {
        config.backend.base_url = val;
    }
    if let Ok(val) = std::env::var("OPSDECK_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.backend.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("OPSDECK_PAGE_SIZE")
        && let Ok(size) = val.parse::<u32>()
    {
        config.users.page_size = size;
    }
    if let Ok(val) = std::env::var("OPSDECK_HISTORY") {
        config.history.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.opsdeck/config.toml`.
///
/// Creates `~/.opsdeck/` if needed. Errors if the file already exists
/// unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.opsdeck/ directory")?;
    }

    fs::write(&path, OpsdeckConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
