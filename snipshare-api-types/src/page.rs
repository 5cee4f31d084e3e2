use serde::{Deserialize, Serialize};

/// Per-page settings the server embeds in the `#page-config` island.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct PageConfig {
    /// Prefix for every url the client builds, without a trailing slash.
    pub script_root: String,
    pub current_user_id: Option<i64>,
}

impl PageConfig {
    pub fn url(&self, path: &str) -> String {
        let root = self.script_root.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{root}{path}")
        } else {
            format!("{root}/{path}")
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user_id.is_some()
    }
}
