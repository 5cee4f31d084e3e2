use crate::{Snippet, UserSummary};
use serde::{Deserialize, Serialize};

/// The sectioned payload returned by `/search` and `/defaultView`.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct SectionedResults {
    pub tags: Vec<String>,
    pub users: Vec<UserSummary>,
    pub snippets: Vec<Snippet>,
    pub similar: Vec<Snippet>,
    pub shared: Vec<Snippet>,
}

/// Older search endpoints answer with a single flat list where each snippet is
/// flagged with `is_description_match`.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq, Clone)]
pub struct FlatResults {
    pub results: Vec<Snippet>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum SearchResponse {
    Flat(FlatResults),
    Sectioned(SectionedResults),
}

impl Default for SearchResponse {
    fn default() -> Self {
        SearchResponse::Sectioned(SectionedResults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_payload_is_detected() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results":[{"id":1,"name":"Foo","is_description_match":false}]}"#,
        )
        .unwrap();
        match response {
            SearchResponse::Flat(flat) => assert_eq!(flat.results.len(), 1),
            other => panic!("expected flat results, got {other:?}"),
        }
    }

    #[test]
    fn sectioned_payload_tolerates_missing_sections() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"tags":["rust"],"users":[{"id":2,"name":"ana"}],"snippets":[]}"#,
        )
        .unwrap();
        match response {
            SearchResponse::Sectioned(sections) => {
                assert_eq!(sections.tags, vec!["rust".to_string()]);
                assert_eq!(sections.users[0].name, "ana");
                assert!(sections.similar.is_empty());
                assert!(sections.shared.is_empty());
            }
            other => panic!("expected sectioned results, got {other:?}"),
        }
    }
}
