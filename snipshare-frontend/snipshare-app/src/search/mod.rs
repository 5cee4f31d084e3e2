//! Debounced, stale-aware search.
//!
//! A keystroke schedules a [`debounce::Ticket`]; once the quiet period is over
//! the ticket either fires (it is still the newest) or is dropped. A fired
//! search issues a request through the [`request_tracker::RequestTracker`],
//! and a response is only rendered while its request is still the
//! authoritative one.

pub mod debounce;
pub mod query;
pub mod request_tracker;
pub mod results;

use crate::error::AppResult;
use async_trait::async_trait;
use debounce::{Debouncer, Ticket};
use query::{SearchRequest, SearchScope};
use request_tracker::{CancelToken, RequestTracker};
use results::{SearchView, SEARCH_ERROR};
use snipshare_api_types::{page::PageConfig, search::SearchResponse};
use std::{
    future::Future,
    sync::{Arc, Mutex},
};

#[async_trait(?Send)]
pub trait SearchBackend {
    /// Fetches `url` and decodes it. Implementations should stop early once
    /// `cancel` fires, though the caller discards late answers either way.
    async fn search(&self, url: &str, cancel: &CancelToken) -> AppResult<SearchResponse>;

    /// The landing page payload (popular tags, users and snippets).
    async fn default_view(&self) -> AppResult<SearchResponse>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank. Carries the default view to fall back on.
    Cleared(SearchView),
    Rendered(SearchView),
    Failed(String),
    /// A newer request was issued while this one was in flight.
    Superseded,
}

impl SearchOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }

    /// Applies this outcome to what is currently on screen.
    pub fn apply(self, view: &mut SearchView) {
        match self {
            SearchOutcome::Cleared(default) | SearchOutcome::Rendered(default) => *view = default,
            SearchOutcome::Failed(message) => *view = SearchView::failed(message),
            SearchOutcome::Superseded => {}
        }
    }
}

pub struct SearchClient<B> {
    backend: Arc<B>,
    config: PageConfig,
    tracker: RequestTracker,
    debouncer: Debouncer,
    default_view: Arc<Mutex<Option<SearchView>>>,
}

impl<B> Clone for SearchClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            config: self.config.clone(),
            tracker: self.tracker.clone(),
            debouncer: self.debouncer.clone(),
            default_view: self.default_view.clone(),
        }
    }
}

impl<B> SearchClient<B>
where
    B: SearchBackend,
{
    pub fn new(backend: B, config: PageConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config,
            tracker: RequestTracker::new(),
            debouncer: Debouncer::new(),
            default_view: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    /// Records a keystroke. Any previously scheduled search is superseded.
    pub fn schedule(&self, text: impl Into<String>) -> Ticket {
        self.debouncer.schedule(text)
    }

    /// Drops a pending debounced search, used when a search is forced.
    pub fn cancel_scheduled(&self) {
        self.debouncer.cancel();
    }

    /// Waits out `quiet_period` and runs the search if `ticket` is still the
    /// newest keystroke. Returns `None` when a later keystroke took over.
    pub async fn fire_after<F>(
        &self,
        ticket: Ticket,
        quiet_period: F,
        scope: SearchScope,
        on_start: impl FnOnce(&SearchRequest),
    ) -> Option<SearchOutcome>
    where
        F: Future<Output = ()>,
    {
        quiet_period.await;
        let query = self.debouncer.fire(ticket)?;
        Some(self.run(&query, scope, on_start).await)
    }

    /// Runs a search right away. `on_start` sees the request before anything
    /// is sent, blank queries included.
    pub async fn run(
        &self,
        query: &str,
        scope: SearchScope,
        on_start: impl FnOnce(&SearchRequest),
    ) -> SearchOutcome {
        let request = SearchRequest::new(query, scope);
        on_start(&request);
        if query.trim().is_empty() {
            self.tracker.reset();
            return SearchOutcome::Cleared(self.cached_default_view());
        }
        let token = self.tracker.issue(request.url(&self.config));
        log::debug!("searching {}", token.url);
        let response = self
            .backend
            .search(&token.url, token.cancel_token())
            .await;
        if !self.tracker.complete(&token) {
            log::debug!("dropping stale response for {}", token.url);
            return SearchOutcome::Superseded;
        }
        match response {
            Ok(response) => SearchOutcome::Rendered(SearchView::from_response(response, false)),
            Err(e) => {
                log::error!("Error fetching search results: {e}");
                SearchOutcome::Failed(SEARCH_ERROR.to_string())
            }
        }
    }

    /// Fetches and caches the landing page results.
    pub async fn load_default_view(&self) -> SearchView {
        match self.backend.default_view().await {
            Ok(response) => {
                let view = SearchView::from_response(response, true);
                if let Ok(mut cached) = self.default_view.lock() {
                    *cached = Some(view.clone());
                }
                view
            }
            Err(e) => {
                log::error!("Error fetching default view: {e}");
                SearchView::failed(SEARCH_ERROR)
            }
        }
    }

    pub fn cached_default_view(&self) -> SearchView {
        self.default_view
            .lock()
            .ok()
            .and_then(|cached| cached.clone())
            .unwrap_or_else(|| SearchView {
                popular: true,
                ..Default::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use futures::{channel::oneshot, executor::block_on, future::ready};
    use snipshare_api_types::{
        search::{FlatResults, SectionedResults},
        Snippet,
    };
    use std::{
        cell::RefCell,
        collections::VecDeque,
        rc::Rc,
        task::Poll,
    };

    #[derive(Default)]
    struct MockBackend {
        calls: RefCell<Vec<String>>,
        pending: RefCell<VecDeque<oneshot::Receiver<AppResult<SearchResponse>>>>,
    }

    #[async_trait(?Send)]
    impl SearchBackend for MockBackend {
        async fn search(&self, url: &str, _cancel: &CancelToken) -> AppResult<SearchResponse> {
            self.calls.borrow_mut().push(url.to_string());
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(receiver) => receiver.await.map_err(|_| AppError::Cancelled)?,
                None => Ok(named("immediate")),
            }
        }

        async fn default_view(&self) -> AppResult<SearchResponse> {
            Ok(SearchResponse::Sectioned(SectionedResults {
                tags: vec!["popular".to_string()],
                ..Default::default()
            }))
        }
    }

    fn named(name: &str) -> SearchResponse {
        SearchResponse::Flat(FlatResults {
            results: vec![Snippet {
                id: name.len() as i64,
                name: name.to_string(),
                ..Default::default()
            }],
        })
    }

    async fn yield_now() {
        let mut yielded = false;
        futures::future::poll_fn(|cx| {
            if yielded {
                Poll::Ready(())
            } else {
                yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }

    fn client() -> SearchClient<MockBackend> {
        SearchClient::new(MockBackend::default(), PageConfig::default())
    }

    #[test]
    fn keystrokes_within_window_fire_one_search() {
        let client = client();
        let tickets: Vec<_> = ["f", "fo", "foo"]
            .into_iter()
            .map(|text| client.schedule(text))
            .collect();
        let outcomes: Vec<_> = block_on(async {
            let mut outcomes = vec![];
            for ticket in tickets {
                outcomes.push(client.fire_after(ticket, ready(()), SearchScope::Global, |_| {}).await);
            }
            outcomes
        });
        assert_eq!(outcomes.iter().filter(|o| o.is_some()).count(), 1);
        assert_eq!(
            *client.backend.calls.borrow(),
            vec!["/search?q=foo&public=1".to_string()]
        );
    }

    #[test]
    fn blank_query_never_hits_the_network() {
        let client = client();
        let mut view = SearchView::from_response(named("old"), false);
        let outcome = block_on(client.run("   ", SearchScope::Global, |_| {}));
        assert!(matches!(outcome, SearchOutcome::Cleared(_)));
        outcome.apply(&mut view);
        assert!(view.snippets.is_empty());
        assert!(client.backend.calls.borrow().is_empty());
        assert!(!client.is_loading());
    }

    #[test]
    fn blank_query_restores_default_view() {
        let client = client();
        block_on(client.load_default_view());
        let outcome = block_on(client.run("", SearchScope::Global, |_| {}));
        let SearchOutcome::Cleared(view) = outcome else {
            panic!("expected a cleared outcome");
        };
        assert!(view.popular);
        assert_eq!(view.tags, vec!["popular".to_string()]);
    }

    #[test]
    fn late_response_does_not_overwrite_newer_results() {
        let client = client();
        let (send_a, receive_a) = oneshot::channel();
        let (send_b, receive_b) = oneshot::channel();
        client
            .backend
            .pending
            .borrow_mut()
            .extend([receive_a, receive_b]);

        let completed = Rc::new(RefCell::new(Vec::new()));
        let search_a = {
            let completed = completed.clone();
            let client = client.clone();
            async move {
                let outcome = client.run("fo", SearchScope::Global, |_| {}).await;
                completed.borrow_mut().push(("a", outcome));
            }
        };
        let search_b = {
            let completed = completed.clone();
            let client = client.clone();
            async move {
                let outcome = client.run("foo", SearchScope::Global, |_| {}).await;
                completed.borrow_mut().push(("b", outcome));
            }
        };
        let server = async move {
            send_b.send(Ok(named("bbb"))).ok();
            yield_now().await;
            yield_now().await;
            send_a.send(Ok(named("a"))).ok();
        };
        block_on(async {
            futures::join!(search_a, search_b, server);
        });

        let completed = completed.take();
        assert_eq!(
            completed.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        let mut view = SearchView::default();
        for (_, outcome) in completed {
            outcome.apply(&mut view);
        }
        assert_eq!(view.snippets.len(), 1);
        assert_eq!(view.snippets[0].name, "bbb");
        assert!(!client.is_loading());
    }

    #[test]
    fn failures_render_an_error() {
        let client = client();
        let (send, receive) = oneshot::channel();
        client.backend.pending.borrow_mut().push_back(receive);
        send.send(Err(AppError::Status(500))).ok();
        let outcome = block_on(client.run("foo", SearchScope::Private, |_| {}));
        assert_eq!(outcome, SearchOutcome::Failed(SEARCH_ERROR.to_string()));
        assert_eq!(
            *client.backend.calls.borrow(),
            vec!["/search?q=foo&public=0".to_string()]
        );
        assert!(!client.is_loading());
    }

    #[test]
    fn superseded_request_is_cancelled() {
        let client = client();
        let first = client.tracker.issue("/search?q=a&public=1");
        let outcome = block_on(client.run("ab", SearchScope::Global, |_| {}));
        assert!(first.cancel_token().is_cancelled());
        assert!(matches!(outcome, SearchOutcome::Rendered(_)));
    }
}
