use serde::{Deserialize, Serialize};

pub type SnippetId = i64;

#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, Clone)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// A snippet as the server sends it in search results and page islands.
///
/// Only `id` is required; everything else falls back to its default so that
/// trimmed down payloads (for example flat `results` lists) still decode.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct Snippet {
    pub id: SnippetId,
    pub user_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub code: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub likes: i64,
    pub is_liked: bool,
    pub author: Option<Author>,
    /// Set on flat result lists when the hit came from description similarity
    /// rather than a name match.
    pub is_description_match: bool,
}

impl Snippet {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn is_owned_by(&self, user_id: Option<i64>) -> bool {
        matches!((self.user_id, user_id), (Some(owner), Some(user)) if owner == user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_snippet() {
        let snippet: Snippet =
            serde_json::from_str(r#"{"id":1,"name":"Foo","is_description_match":false}"#).unwrap();
        assert_eq!(snippet.id, 1);
        assert_eq!(snippet.name, "Foo");
        assert!(snippet.tags.is_empty());
        assert_eq!(snippet.author, None);
    }

    #[test]
    fn ownership_requires_a_user() {
        let snippet = Snippet {
            id: 4,
            user_id: Some(9),
            ..Default::default()
        };
        assert!(snippet.is_owned_by(Some(9)));
        assert!(!snippet.is_owned_by(Some(2)));
        assert!(!snippet.is_owned_by(None));
    }

    #[test]
    fn description_is_trimmed() {
        let snippet = Snippet {
            description: Some("  prints hello \n".to_string()),
            ..Default::default()
        };
        assert_eq!(snippet.description_text(), "prints hello");
        assert_eq!(Snippet::default().description_text(), "");
    }
}
