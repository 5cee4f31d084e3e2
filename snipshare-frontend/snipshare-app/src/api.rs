use crate::{
    error::{AppError, AppResult},
    global_state::cards::LikeAction,
    search::{request_tracker::CancelToken, SearchBackend},
};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use send_wrapper::SendWrapper;
use serde::de::DeserializeOwned;
use snipshare_api_types::{page::PageConfig, search::SearchResponse, SnippetId};
use web_sys::AbortController;

/// Sends `request`, aborting the transfer if `cancel` fires first.
async fn send(request: RequestBuilder, cancel: &CancelToken) -> AppResult<Response> {
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    let abort_controller = AbortController::new()?;
    let abort_signal = abort_controller.signal();
    let abort_controller = SendWrapper::new(abort_controller);
    cancel.on_cancel(move || abort_controller.abort());

    let response = request.abort_signal(Some(&abort_signal)).send().await?;
    if !response.ok() {
        return Err(AppError::Status(response.status()));
    }
    Ok(response)
}

pub async fn fetch_api<T>(path: &str, cancel: &CancelToken) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let json = send(Request::get(path), cancel).await?.text().await?;
    serde_json::from_str(&json).map_err(|e| {
        log::error!("{e} {path} returned: json text {json}");
        e.into()
    })
}

/// Talks to the page's own server over `fetch`.
pub struct HttpBackend {
    config: PageConfig,
}

impl HttpBackend {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl SearchBackend for HttpBackend {
    async fn search(&self, url: &str, cancel: &CancelToken) -> AppResult<SearchResponse> {
        fetch_api(url, cancel).await
    }

    async fn default_view(&self) -> AppResult<SearchResponse> {
        fetch_api(&self.config.url("/defaultView"), &CancelToken::new()).await
    }
}

pub async fn set_like(
    config: &PageConfig,
    id: SnippetId,
    action: LikeAction,
    cancel: &CancelToken,
) -> AppResult<()> {
    let url = config.url(&format!("/likes/{id}"));
    let request = match action {
        LikeAction::Like => Request::post(&url),
        LikeAction::Unlike => Request::delete(&url),
    };
    send(request, cancel).await.map(|_| ())
}

pub async fn delete_snippet(config: &PageConfig, id: SnippetId) -> AppResult<()> {
    let url = config.url(&format!("/deleteSnippet/{id}"));
    send(Request::get(&url), &CancelToken::new()).await.map(|_| ())
}

pub async fn delete_comment(config: &PageConfig, id: i64) -> AppResult<()> {
    let url = config.url(&format!("/comment/{id}/delete"));
    send(Request::post(&url), &CancelToken::new()).await.map(|_| ())
}
