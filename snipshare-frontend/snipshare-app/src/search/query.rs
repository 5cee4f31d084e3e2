use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use snipshare_api_types::page::PageConfig;

/// Characters left alone when encoding the query, matching what browsers do
/// for `URLSearchParams`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Whether a search covers every public snippet or only what the viewer owns
/// or was given access to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    Global,
    Private,
}

impl SearchScope {
    pub fn toggled(self) -> Self {
        match self {
            SearchScope::Global => SearchScope::Private,
            SearchScope::Private => SearchScope::Global,
        }
    }

    pub fn public_flag(self) -> &'static str {
        match self {
            SearchScope::Global => "1",
            SearchScope::Private => "0",
        }
    }

    pub fn from_public_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("0") => SearchScope::Private,
            _ => SearchScope::Global,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub scope: SearchScope,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, scope: SearchScope) -> Self {
        Self {
            query: query.into(),
            scope,
        }
    }

    fn query_string(&self) -> String {
        format!(
            "q={}&public={}",
            utf8_percent_encode(&self.query, QUERY_VALUE),
            self.scope.public_flag()
        )
    }

    /// The api url that answers this search.
    pub fn url(&self, config: &PageConfig) -> String {
        format!("{}?{}", config.url("/search"), self.query_string())
    }

    /// The page url pushed into history so a reload lands on the same search.
    pub fn history_url(&self, config: &PageConfig) -> String {
        if self.query.trim().is_empty() {
            return config.url("/");
        }
        format!("{}?{}", config.url("/"), self.query_string())
    }
}

/// The link a tag chip points to: a search including that tag.
pub fn tag_search_url(config: &PageConfig, tag: &str) -> String {
    format!(
        "{}?q={}",
        config.url("/"),
        utf8_percent_encode(&format!("+{tag}"), QUERY_VALUE)
    )
}

pub fn profile_url(config: &PageConfig, username: &str) -> String {
    config.url(&format!(
        "/profile/{}",
        utf8_percent_encode(username, QUERY_VALUE)
    ))
}

/// Where anonymous visitors are sent before they can like anything.
pub fn login_url(config: &PageConfig, next: &str) -> String {
    format!(
        "{}?next={}",
        config.url("/login"),
        utf8_percent_encode(next, QUERY_VALUE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PageConfig {
        PageConfig {
            script_root: String::new(),
            current_user_id: None,
        }
    }

    #[test]
    fn builds_search_url_with_scope() {
        let request = SearchRequest::new("foo", SearchScope::Global);
        assert_eq!(request.url(&config()), "/search?q=foo&public=1");
        let request = SearchRequest::new("foo", SearchScope::Private);
        assert_eq!(request.url(&config()), "/search?q=foo&public=0");
    }

    #[test]
    fn encodes_filter_characters() {
        let request = SearchRequest::new("+rust @ana", SearchScope::Global);
        assert_eq!(
            request.url(&config()),
            "/search?q=%2Brust%20%40ana&public=1"
        );
    }

    #[test]
    fn empty_query_history_goes_home() {
        let request = SearchRequest::new("   ", SearchScope::Global);
        assert_eq!(request.history_url(&config()), "/");
        let request = SearchRequest::new("sort", SearchScope::Private);
        assert_eq!(request.history_url(&config()), "/?q=sort&public=0");
    }

    #[test]
    fn scope_round_trips_through_flag() {
        for scope in [SearchScope::Global, SearchScope::Private] {
            assert_eq!(SearchScope::from_public_flag(Some(scope.public_flag())), scope);
            assert_eq!(scope.toggled().toggled(), scope);
        }
        assert_eq!(SearchScope::from_public_flag(None), SearchScope::Global);
    }

    #[test]
    fn tag_links_search_for_the_tag() {
        assert_eq!(tag_search_url(&config(), "c++"), "/?q=%2Bc%2B%2B");
        assert_eq!(profile_url(&config(), "ana"), "/profile/ana");
    }

    #[test]
    fn login_url_keeps_the_current_page() {
        assert_eq!(
            login_url(&config(), "/?q=rust&public=1"),
            "/login?next=%2F%3Fq%3Drust%26public%3D1"
        );
    }
}
