//! Configuration types for sqlbench

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub search: SearchSettings,
}

/// Backend addresses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Practice backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Suggestor backend base URL; empty means `<base_url>/suggestor`
    #[serde(default)]
    pub suggestor_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            suggestor_url: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ApiSettings {
    pub fn resolved_suggestor_url(&self) -> String {
        if self.suggestor_url.trim().is_empty() {
            format!("{}/suggestor", self.base_url.trim().trim_end_matches('/'))
        } else {
            self.suggestor_url.trim().to_string()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditorSettings {
    /// Seed the draft with the problem's starter query when it has one
    #[serde(default)]
    pub use_starter_query: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Maximum actor suggestions requested per lookup
    #[serde(default = "default_actor_limit")]
    pub actor_limit: usize,

    /// Delay before a blurred suggestion list closes
    #[serde(default = "default_blur_grace_ms")]
    pub blur_grace_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            actor_limit: default_actor_limit(),
            blur_grace_ms: default_blur_grace_ms(),
        }
    }
}

impl SearchSettings {
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

fn default_actor_limit() -> usize {
    10
}

fn default_blur_grace_ms() -> u64 {
    150
}
