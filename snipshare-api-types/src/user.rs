use serde::{Deserialize, Serialize};

/// A user as listed in search results and the `#user-data` / `#shared-users` islands.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, Clone)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}
