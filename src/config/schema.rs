/// Configuration schema and defaults for opsdeck.
///
/// Defines the TOML-serializable structure with sections `[backend]`,
/// `[users]`, and `[history]`. Every field has a built-in default; users
/// only set the values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level opsdeck configuration.
///
/// Maps directly to the `~/.opsdeck/config.toml` and `.opsdeck.toml` file
/// schemas. All sections and fields are optional — missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsdeckConfig {
    pub backend: BackendConfig,
    pub users: UsersConfig,
    pub history: HistoryConfig,
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

/// Where the data-platform backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend REST API.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [users]
// ---------------------------------------------------------------------------

/// Defaults for the paginated user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Page size used when `--size` is not given.
    pub page_size: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

// ---------------------------------------------------------------------------
// [history]
// ---------------------------------------------------------------------------

/// Request history log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Record every backend request in `~/.opsdeck/request-log.jsonl`.
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Annotated default config file
// ---------------------------------------------------------------------------

impl OpsdeckConfig {
    /// The annotated TOML written by `opsdeck config init`.
    pub fn default_toml() -> String {
        r#"# opsdeck configuration
# Location: ~/.opsdeck/config.toml (global) or .opsdeck.toml (per project)
# Environment overrides: OPSDECK_BACKEND_URL, OPSDECK_TIMEOUT_MS,
# OPSDECK_PAGE_SIZE, OPSDECK_HISTORY

[backend]
# Base URL of the data-platform backend REST API.
base_url = "http://127.0.0.1:8080"
# Per-request timeout in milliseconds.
timeout_ms = 10000

[users]
# Default page size for `opsdeck users list`.
page_size = 100

[history]
# Record every backend request in ~/.opsdeck/request-log.jsonl.
enabled = true
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = OpsdeckConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.backend.timeout_ms, 10_000);
        assert_eq!(config.users.page_size, 100);
        assert!(config.history.enabled);
    }

    #[test]
    fn default_toml_parses_back() {
        let parsed: OpsdeckConfig = toml::from_str(&OpsdeckConfig::default_toml()).unwrap();
        assert_eq!(parsed.backend.base_url, "http://127.0.0.1:8080");
        assert_eq!(parsed.users.page_size, 100);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: OpsdeckConfig = toml::from_str(
            r#"
[backend]
base_url = "http://data.internal:9090"
"#,
        )
        .unwrap();
        assert_eq!(parsed.backend.base_url, "http://data.internal:9090");
        assert_eq!(parsed.backend.timeout_ms, 10_000);
        assert_eq!(parsed.users.page_size, 100);
    }
}
