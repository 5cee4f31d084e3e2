use itertools::Itertools;
use snipshare_api_types::{
    search::{FlatResults, SearchResponse, SectionedResults},
    Snippet, UserSummary,
};
use std::collections::HashSet;

pub const SEARCH_ERROR: &str = "Error occurred while searching.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Tags,
    Users,
    Snippets,
    Similar,
    Shared,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Tags,
        Section::Users,
        Section::Snippets,
        Section::Similar,
        Section::Shared,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Tags => "results-tags",
            Section::Users => "results-users",
            Section::Snippets => "results-snippets",
            Section::Similar => "results-similar",
            Section::Shared => "results-shared",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Section::Tags => "Tags",
            Section::Users => "Users",
            Section::Snippets => "Snippets",
            Section::Similar => "Similar Snippets",
            Section::Shared => "Shared With You",
        }
    }

    fn popular_label(self) -> Option<&'static str> {
        match self {
            Section::Tags => Some("Popular Tags"),
            Section::Users => Some("Most Liked Users"),
            Section::Snippets => Some("Most Liked Snippets"),
            Section::Similar | Section::Shared => None,
        }
    }
}

/// Everything the results area shows for one completed search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchView {
    pub tags: Vec<String>,
    pub users: Vec<UserSummary>,
    /// Name matches.
    pub snippets: Vec<Snippet>,
    /// Description similarity matches.
    pub similar: Vec<Snippet>,
    pub shared: Vec<Snippet>,
    pub error: Option<String>,
    /// Set for the `/defaultView` payload, which swaps counts for headings.
    pub popular: bool,
}

impl SearchView {
    pub fn from_response(response: SearchResponse, popular: bool) -> Self {
        let sections = match response {
            SearchResponse::Sectioned(sections) => sections,
            SearchResponse::Flat(FlatResults { results }) => {
                let (similar, snippets): (Vec<_>, Vec<_>) =
                    results.into_iter().partition(|s| s.is_description_match);
                SectionedResults {
                    snippets,
                    similar,
                    ..Default::default()
                }
            }
        };
        let mut seen = HashSet::new();
        let mut dedup = |snippets: Vec<Snippet>| -> Vec<Snippet> {
            snippets
                .into_iter()
                .filter(|snippet| seen.insert(snippet.id))
                .collect()
        };
        let snippets = dedup(sections.snippets);
        let similar = dedup(sections.similar);
        let shared = dedup(sections.shared);
        Self {
            tags: sections.tags.into_iter().unique().collect(),
            users: sections.users.into_iter().unique_by(|u| u.id).collect(),
            snippets,
            similar,
            shared,
            error: None,
            popular,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn len(&self, section: Section) -> usize {
        match section {
            Section::Tags => self.tags.len(),
            Section::Users => self.users.len(),
            Section::Snippets => self.snippets.len(),
            Section::Similar => self.similar.len(),
            Section::Shared => self.shared.len(),
        }
    }

    pub fn snippets_in(&self, section: Section) -> &[Snippet] {
        match section {
            Section::Snippets => &self.snippets,
            Section::Similar => &self.similar,
            Section::Shared => &self.shared,
            Section::Tags | Section::Users => &[],
        }
    }

    pub fn has_results(&self, section: Section) -> bool {
        self.len(section) > 0
    }

    /// The similarity disclaimer only makes sense when there is something it
    /// applies to.
    pub fn show_similarity_disclaimer(&self) -> bool {
        self.error.is_none() && !self.similar.is_empty()
    }

    pub fn heading(&self, section: Section) -> String {
        match section.popular_label() {
            Some(label) if self.popular => label.to_string(),
            _ => format!("{} ({})", section.label(), self.len(section)),
        }
    }
}

/// Collapsed/expanded state of each results section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionToggles {
    expanded: [bool; 5],
}

impl Default for SectionToggles {
    /// Everything open except similarity matches, which are opt in.
    fn default() -> Self {
        let mut toggles = Self {
            expanded: [true; 5],
        };
        toggles.expanded[Self::index(Section::Similar)] = false;
        toggles
    }
}

impl SectionToggles {
    fn index(section: Section) -> usize {
        Section::ALL
            .iter()
            .position(|s| *s == section)
            .unwrap_or_default()
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.expanded[Self::index(section)]
    }

    pub fn toggle(&mut self, section: Section) {
        let index = Self::index(section);
        self.expanded[index] = !self.expanded[index];
    }

    pub fn label(&self, section: Section) -> &'static str {
        if self.is_expanded(section) {
            "hide"
        } else {
            "show"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: snipshare_api_types::SnippetId, name: &str) -> Snippet {
        Snippet {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn flat_results_are_partitioned() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results":[{"id":1,"name":"Foo","is_description_match":false}]}"#,
        )
        .unwrap();
        let view = SearchView::from_response(response, false);
        assert_eq!(view.snippets.len(), 1);
        assert_eq!(view.snippets[0].name, "Foo");
        assert!(view.similar.is_empty());
        assert!(!view.show_similarity_disclaimer());
    }

    #[test]
    fn description_matches_get_their_own_section() {
        let mut similar = snippet(2, "Bar");
        similar.is_description_match = true;
        let response = SearchResponse::Flat(FlatResults {
            results: vec![snippet(1, "Foo"), similar],
        });
        let view = SearchView::from_response(response, false);
        assert_eq!(view.snippets_in(Section::Snippets)[0].id, 1);
        assert_eq!(view.snippets_in(Section::Similar)[0].id, 2);
        assert!(view.show_similarity_disclaimer());
    }

    #[test]
    fn duplicate_ids_render_once() {
        let response = SearchResponse::Sectioned(SectionedResults {
            snippets: vec![snippet(1, "Foo"), snippet(1, "Foo")],
            similar: vec![snippet(1, "Foo"), snippet(3, "Baz")],
            shared: vec![snippet(3, "Baz"), snippet(4, "Qux")],
            ..Default::default()
        });
        let view = SearchView::from_response(response, false);
        assert_eq!(view.snippets.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(view.similar.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(view.shared.iter().map(|s| s.id).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn popular_view_uses_headings() {
        let response = SearchResponse::Sectioned(SectionedResults {
            tags: vec!["rust".into()],
            ..Default::default()
        });
        let popular = SearchView::from_response(response.clone(), true);
        assert_eq!(popular.heading(Section::Tags), "Popular Tags");
        assert_eq!(popular.heading(Section::Shared), "Shared With You (0)");
        let searched = SearchView::from_response(response, false);
        assert_eq!(searched.heading(Section::Tags), "Tags (1)");
    }

    #[test]
    fn failure_has_no_results() {
        let view = SearchView::failed(SEARCH_ERROR);
        assert_eq!(view.error.as_deref(), Some(SEARCH_ERROR));
        assert!(Section::ALL.iter().all(|s| !view.has_results(*s)));
    }

    #[test]
    fn similar_section_starts_collapsed() {
        let toggles = SectionToggles::default();
        assert!(!toggles.is_expanded(Section::Similar));
        assert_eq!(toggles.label(Section::Similar), "show");
        assert!(Section::ALL
            .iter()
            .filter(|s| **s != Section::Similar)
            .all(|s| toggles.is_expanded(*s)));
    }

    #[test]
    fn sections_toggle_independently() {
        let mut toggles = SectionToggles::default();
        toggles.toggle(Section::Similar);
        assert!(toggles.is_expanded(Section::Similar));
        assert_eq!(toggles.label(Section::Similar), "hide");
        toggles.toggle(Section::Snippets);
        assert!(!toggles.is_expanded(Section::Snippets));
        assert_eq!(toggles.label(Section::Snippets), "show");
        toggles.toggle(Section::Similar);
        assert!(!toggles.is_expanded(Section::Similar));
    }
}
