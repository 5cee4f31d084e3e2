pub mod api;
pub mod browser;
pub mod components;
pub mod config;
pub mod counters;
pub mod editor;
pub mod error;
pub mod global_state;
pub mod profile;
pub mod search;
pub mod tags;
pub mod timestamps;
pub mod users;

use crate::components::{
    char_counter::bind_counters, code_editor::listen_for_tab_keys, comments::Comments,
    profile_editor::*, search_page::SearchPage, snippet_card::PageSnippets,
    tag_editor::TagEditor, theme_button::ThemeButton, toast::ToastContainer,
    visibility_picker::VisibilityPicker,
};
use crate::global_state::{
    cards::CardBoard,
    theme::ThemeSettings,
    toasts::Toasts,
};
use crate::users::Visibility;
use leptos::{mount::mount_to, prelude::*};
use snipshare_api_types::page::PageConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Context every island shares. Each island is its own reactive root, so the
/// values are created once and provided to all of them.
#[derive(Clone)]
struct PageContext {
    config: PageConfig,
    toasts: Toasts,
    cards: CardBoard,
    theme: ThemeSettings,
}

impl PageContext {
    fn new() -> Self {
        Self {
            config: config::read_json_island_or_default(config::PAGE_CONFIG_ID),
            toasts: Toasts(RwSignal::new(Vec::new())),
            cards: CardBoard::new(),
            theme: ThemeSettings::new(),
        }
    }

    fn provide(&self) {
        provide_context(self.config.clone());
        provide_context(self.toasts);
        provide_context(self.cards);
        provide_context(self.theme);
    }
}

fn element(id: &str) -> Option<HtmlElement> {
    document()
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn mount_island<F, N>(parent: HtmlElement, context: &PageContext, view: F)
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let context = context.clone();
    mount_to(parent, move || {
        context.provide();
        view()
    })
    .forget();
}

/// Mounts every widget whose placeholder is on the current page and wires the
/// behaviours of the server rendered markup.
pub fn mount_islands() {
    let owner = Owner::new();
    owner.set();
    let context = PageContext::new();
    log::debug!("mounting islands with {:?}", context.config);

    if let Some(body) = document().body() {
        mount_island(body, &context, || view! { <ToastContainer /> });
    }
    if let Some(root) = element("theme-toggle-root") {
        mount_island(root, &context, || view! { <ThemeButton /> });
    }
    if let Some(root) = element("search-root") {
        mount_island(root, &context, || view! { <SearchPage /> });
    }
    if let Some(root) = element("snippets-root") {
        mount_island(root, &context, || view! { <PageSnippets /> });
    }
    if let Some(root) = element("tag-editor") {
        mount_island(root, &context, || view! { <TagEditor /> });
    }
    if let Some(root) = element("visibility-picker") {
        let initial = Visibility::from_field(
            &root.get_attribute("data-is-public").unwrap_or_default(),
        );
        mount_island(root, &context, move || view! { <VisibilityPicker initial /> });
    }
    if let Some(root) = element("profile-editor") {
        mount_island(root, &context, || view! { <ProfileEditor /> });
    }
    if let Some(root) = element("comments-root") {
        mount_island(root, &context, || view! { <Comments /> });
    }

    listen_for_tab_keys();
    listen_for_modal_toggles();
    bind_counters();
    // the islands keep using the shared context for the page's lifetime
    std::mem::forget(owner);
}
