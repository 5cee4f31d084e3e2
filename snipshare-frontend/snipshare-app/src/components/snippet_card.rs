use crate::{
    api::{delete_snippet, set_like},
    browser::{confirm, current_path, highlight, navigate, reload},
    config::{read_json_island_or_default, use_page_config},
    global_state::{
        cards::{use_card_board, CardKey, LikeAction},
        toasts::{notify, use_toast, ToastLevel},
    },
    search::query::{login_url, tag_search_url},
};
use icondata as i;
use leptos::{ev::MouseEvent, html::Code, prelude::*, task::spawn_local};
use leptos_icons::*;
use leptos_use::{use_clipboard, UseClipboardReturn};
use snipshare_api_types::Snippet;

pub const NO_DESCRIPTION: &str = "No description available.";
const COPIED: &str = "Code snippet copied to clipboard!";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("clipboard api is unavailable")]
pub struct ClipboardUnavailable;

/// One copy button's pending write. The confirmation only shows once the
/// clipboard reports the write landed.
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyRequest {
    pending: bool,
}

impl CopyRequest {
    pub fn start(&mut self, supported: bool) -> Result<(), ClipboardUnavailable> {
        if !supported {
            return Err(ClipboardUnavailable);
        }
        self.pending = true;
        Ok(())
    }

    /// Feeds the clipboard's `copied` flag, returns true when a pending write
    /// just completed.
    pub fn settle(&mut self, copied: bool) -> bool {
        let done = self.pending && copied;
        if done {
            self.pending = false;
        }
        done
    }
}

#[component]
pub fn TagChip(tag: String) -> impl IntoView {
    let href = tag_search_url(&use_page_config(), &tag);
    view! {
        <a class="tag is-info search-tag" href=href on:click=|e| e.stop_propagation()>
            {tag}
        </a>
    }
}

/// One snippet. `list` tells apart cards of the same snippet rendered in
/// different sections of the page.
#[component]
pub fn SnippetCard(snippet: Snippet, list: &'static str) -> impl IntoView {
    let board = use_card_board();
    board.register(&snippet);
    let toasts = use_toast();
    let config = StoredValue::new(use_page_config());
    let id = snippet.id;
    let key = CardKey { list, id };
    let owned = config.with_value(|c| snippet.is_owned_by(c.current_user_id));
    let code = StoredValue::new(snippet.code.clone());
    let name = StoredValue::new(snippet.name.clone());

    let expanded = Memo::new(move |_| board.expanded.with(|e| e.is_expanded(key)));
    let like = Memo::new(move |_| board.likes.with(|ledger| ledger.state(id)));

    let code_ref = NodeRef::<Code>::new();
    Effect::new(move |_| {
        if !expanded.get() {
            return;
        }
        if let Some(element) = code_ref.get() {
            if let Err(e) = highlight(&element) {
                log::debug!("skipping highlight: {e}");
            }
        }
    });

    let UseClipboardReturn {
        is_supported,
        copied,
        copy,
        ..
    } = use_clipboard();
    let copy_request = StoredValue::new(CopyRequest::default());
    Effect::new(move |_| {
        let copied = copied.get();
        if copy_request.try_update_value(|r| r.settle(copied)) == Some(true) {
            notify(toasts, ToastLevel::Success, COPIED);
        }
    });
    let on_copy = move |e: MouseEvent| {
        e.stop_propagation();
        match copy_request.try_update_value(|r| r.start(is_supported.get_untracked())) {
            Some(Ok(())) => code.with_value(|code| copy(code.as_str())),
            Some(Err(e)) => log::error!("unable to copy snippet {id}: {e}"),
            None => {}
        }
    };

    let on_like = move |e: MouseEvent| {
        e.stop_propagation();
        let config = config.get_value();
        if !config.is_logged_in() {
            navigate(&login_url(&config, &current_path()));
            return;
        }
        let (action, cancel) = board.toggle_like(id);
        spawn_local(async move {
            if let Err(e) = set_like(&config, id, action, &cancel).await {
                if !cancel.is_cancelled() {
                    let verb = match action {
                        LikeAction::Like => "like",
                        LikeAction::Unlike => "unlike",
                    };
                    log::error!("unable to {verb} snippet {id}: {e}");
                }
            }
        });
    };

    let on_delete = move |e: MouseEvent| {
        e.stop_propagation();
        let prompt = name.with_value(|name| format!("Are you sure you want to delete \"{name}\"?"));
        if !confirm(&prompt) {
            return;
        }
        let config = config.get_value();
        spawn_local(async move {
            match delete_snippet(&config, id).await {
                Ok(()) => reload(),
                Err(e) => {
                    log::error!("unable to delete snippet {id}: {e}");
                    notify(toasts, ToastLevel::Error, "Unable to delete snippet.");
                }
            }
        });
    };

    let description = match snippet.description_text() {
        "" => NO_DESCRIPTION.to_string(),
        text => text.to_string(),
    };
    let author = snippet.author.clone().map(|author| {
        let picture = author
            .profile_picture
            .unwrap_or_else(|| "default_image.png".to_string());
        let picture = config.with_value(|c| c.url(&format!("/static/profile_pictures/{picture}")));
        view! {
            <span class="snippet-author">
                <img class="snippet-author-picture is-rounded" src=picture alt="" />
                <span>{author.name}</span>
            </span>
        }
    });

    view! {
        <div class="card snippet-card mb-3" class=("is-expanded", move || expanded.get()) data-id=id.to_string()>
            <header
                class="card-header is-clickable"
                on:click=move |_| board.expanded.update(|e| e.toggle(key))
            >
                <p class="card-header-title">
                    {snippet.name.clone()}
                    {(!snippet.is_public).then(|| view! {
                        <span class="tag is-warning ml-2" title="Private">
                            <Icon icon=i::FaLockSolid />
                        </span>
                    })}
                </p>
                <span class="card-header-icon">
                    <Icon icon=Signal::derive(move || if expanded.get() {
                        i::FaChevronDownSolid
                    } else {
                        i::FaChevronRightSolid
                    }) />
                </span>
            </header>
            <div class="card-content">
                {author}
                <div class="tags mt-2">
                    {snippet.tags.iter().cloned().map(|tag| view! { <TagChip tag /> }).collect_view()}
                </div>
                <Show when=move || expanded.get()>
                    <p class="snippet-description">{description.clone()}</p>
                    <pre class="snippet-code">
                        <code node_ref=code_ref>{code.get_value()}</code>
                    </pre>
                </Show>
            </div>
            <footer class="card-footer">
                <a class="card-footer-item copy-button" title="Copy code" on:click=on_copy>
                    <Icon icon=i::FaCopySolid />
                </a>
                <a
                    class="card-footer-item like-button"
                    class=("has-text-danger", move || like.get().liked)
                    title=move || if like.get().liked { "Unlike" } else { "Like" }
                    on:click=on_like
                >
                    <Icon icon=Signal::derive(move || if like.get().liked {
                        i::FaHeartSolid
                    } else {
                        i::FaHeartRegular
                    }) />
                    <span class="like-count ml-1">{move || like.get().count}</span>
                </a>
                <a
                    class="card-footer-item"
                    title="Open snippet"
                    on:click=move |e: MouseEvent| {
                        e.stop_propagation();
                        navigate(&config.with_value(|c| c.url(&format!("/snippet/{id}"))));
                    }
                >
                    <Icon icon=i::FaUpRightFromSquareSolid />
                </a>
                <Show when=move || owned>
                    <a
                        class="card-footer-item"
                        title="Edit snippet"
                        on:click=move |e: MouseEvent| {
                            e.stop_propagation();
                            navigate(&config.with_value(|c| c.url(&format!("/editSnippet/{id}"))));
                        }
                    >
                        <Icon icon=i::FaPenSolid />
                    </a>
                    <a class="card-footer-item has-text-danger" title="Delete snippet" on:click=on_delete>
                        <Icon icon=i::FaTrashSolid />
                    </a>
                </Show>
            </footer>
        </div>
    }
}

/// Cards for the snippets the server embedded in the `#snippets` island,
/// used on profile and tag pages.
#[component]
pub fn PageSnippets() -> impl IntoView {
    let snippets: Vec<Snippet> = read_json_island_or_default("snippets");
    if snippets.is_empty() {
        return view! { <p class="has-text-grey">"No snippets yet."</p> }.into_any();
    }
    view! {
        <div class="page-snippets">
            {snippets
                .into_iter()
                .map(|snippet| view! { <SnippetCard snippet list="page" /> })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_confirms_only_after_the_write() {
        let mut request = CopyRequest::default();
        assert_eq!(request.start(true), Ok(()));
        assert!(!request.settle(false));
        assert!(request.settle(true));
        // the flag staying up does not confirm twice
        assert!(!request.settle(true));
    }

    #[test]
    fn copy_without_clipboard_api_fails() {
        let mut request = CopyRequest::default();
        assert_eq!(request.start(false), Err(ClipboardUnavailable));
        assert!(!request.settle(true));
    }
}
