use crate::error::CoreResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeConfig {
    /// Delete cache groups (and the entries they flush) before the entry pass.
    pub purge_groups: bool,
    /// Pattern for the entry pass, e.g. `"visited:"` or `"cookie:"`.
    /// `None` enumerates every entry.
    pub url_search_pattern: Option<String>,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            purge_groups: true,
            url_search_pattern: None,
        }
    }
}

impl PurgeConfig {
    pub fn from_json(data: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(data)?)
    }
}
