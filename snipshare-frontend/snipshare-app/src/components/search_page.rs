use crate::{
    api::HttpBackend,
    browser::{navigate, push_history, query_param},
    components::snippet_card::{SnippetCard, TagChip},
    config::{use_page_config, SEARCH_DELAY_MS},
    search::{
        query::{profile_url, SearchRequest, SearchScope},
        results::{SearchView, Section, SectionToggles},
        SearchClient, SearchOutcome,
    },
};
use gloo_timers::future::TimeoutFuture;
use icondata as i;
use leptos::{ev, html::Input, prelude::*, task::spawn_local};
use leptos_icons::*;
use snipshare_api_types::UserSummary;
use web_sys::KeyboardEvent;

/// The home page search box and the result sections below it.
#[component]
pub fn SearchPage() -> impl IntoView {
    let config = use_page_config();
    let client = StoredValue::new(SearchClient::new(
        HttpBackend::new(config.clone()),
        config,
    ));
    let input_ref = NodeRef::<Input>::new();
    let query = RwSignal::new(String::new());
    let scope = RwSignal::new(SearchScope::Global);
    let loading = RwSignal::new(false);
    let view = RwSignal::new(SearchView {
        popular: true,
        ..Default::default()
    });
    let toggles = RwSignal::new(SectionToggles::default());

    let on_start = move |request: &SearchRequest| {
        push_history(&request.history_url(&client.with_value(|c| c.config().clone())));
        if !request.query.trim().is_empty() {
            loading.set(true);
        }
    };
    let apply = move |outcome: SearchOutcome| {
        if !outcome.is_superseded() {
            view.update(|v| outcome.apply(v));
        }
        loading.set(client.with_value(|c| c.is_loading()));
    };
    // Skips the debounce, e.g. after a scope change.
    let search_now = move || {
        let client = client.get_value();
        client.cancel_scheduled();
        let text = query.get_untracked();
        let scope = scope.get_untracked();
        spawn_local(async move {
            apply(client.run(&text, scope, on_start).await);
        });
    };
    let toggle_scope = move || {
        scope.update(|s| *s = s.toggled());
        search_now();
    };

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        query.set(text.clone());
        let client = client.get_value();
        let ticket = client.schedule(text);
        spawn_local(async move {
            let quiet_period = TimeoutFuture::new(SEARCH_DELAY_MS);
            let fired = client
                .fire_after(ticket, quiet_period, scope.get_untracked(), on_start)
                .await;
            if let Some(outcome) = fired {
                apply(outcome);
            }
        });
    };
    let on_keydown = move |e: KeyboardEvent| {
        if e.key() == "Tab" && !query.get_untracked().is_empty() {
            e.prevent_default();
            toggle_scope();
        }
    };

    let focus_handle = window_event_listener(ev::keydown, move |e: KeyboardEvent| {
        if e.ctrl_key() && e.key() == "k" {
            e.prevent_default();
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });
    on_cleanup(move || focus_handle.remove());

    // landing page results, unless a search already took over
    spawn_local(async move {
        let default = client.get_value().load_default_view().await;
        if query.get_untracked().trim().is_empty() {
            view.set(default);
        }
    });

    if let Some(initial) = query_param("q").filter(|q| !q.trim().is_empty()) {
        scope.set(SearchScope::from_public_flag(query_param("public").as_deref()));
        query.set(initial);
        search_now();
    }

    view! {
        <div class="search-page">
            <div class="field has-addons">
                <div class="control">
                    <button
                        id="search-type"
                        type="button"
                        class="button"
                        class=("is-success", move || scope.get() == SearchScope::Global)
                        class=("is-danger", move || scope.get() == SearchScope::Private)
                        title=move || match scope.get() {
                            SearchScope::Global => "Searching all public snippets",
                            SearchScope::Private => "Searching your snippets",
                        }
                        on:click=move |_| toggle_scope()
                    >
                        <Icon icon=Signal::derive(move || match scope.get() {
                            SearchScope::Global => i::FaGlobeSolid,
                            SearchScope::Private => i::FaLockSolid,
                        }) />
                    </button>
                </div>
                <div class="control is-expanded has-icons-left" class=("is-loading", move || loading.get())>
                    <input
                        id="search-input"
                        node_ref=input_ref
                        class="input"
                        type="text"
                        placeholder="Search snippets, +tags, -tags or @users (Ctrl K)"
                        autocomplete="off"
                        prop:value=move || query.get()
                        on:input=on_input
                        on:keydown=on_keydown
                    />
                    <span class="icon is-left">
                        <Icon icon=i::AiSearchOutlined />
                    </span>
                </div>
            </div>
            <div id="results">
                {move || {
                    view.with(|v| v.error.clone())
                        .map(|error| view! { <p class="has-text-danger">{error}</p> })
                }}
                <Show when=move || view.with(|v| v.error.is_none())>
                    <ResultsSection section=Section::Tags view toggles>
                        <div class="tags">
                            <For
                                each=move || view.with(|v| v.tags.clone())
                                key=|tag| tag.clone()
                                children=move |tag| view! { <TagChip tag /> }
                            />
                        </div>
                    </ResultsSection>
                    <ResultsSection section=Section::Users view toggles>
                        <div class="columns is-multiline">
                            <For
                                each=move || view.with(|v| v.users.clone())
                                key=|user| user.id
                                children=move |user| view! { <UserCard user /> }
                            />
                        </div>
                    </ResultsSection>
                    <SnippetSection section=Section::Snippets view toggles />
                    <ResultsSection section=Section::Similar view toggles>
                        <Show when=move || view.with(|v| v.show_similarity_disclaimer())>
                            <p class="help mb-2">
                                "These snippets have descriptions similar to your search but may not match it exactly."
                            </p>
                        </Show>
                        <SnippetList section=Section::Similar view />
                    </ResultsSection>
                    <SnippetSection section=Section::Shared view toggles />
                </Show>
            </div>
        </div>
    }
}

/// A collapsible results block, hidden entirely while it has no results.
#[component]
fn ResultsSection(
    section: Section,
    view: RwSignal<SearchView>,
    toggles: RwSignal<SectionToggles>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || view.with(|v| v.has_results(section))>
            <section class="results-section mb-5">
                <div
                    class="level is-clickable"
                    on:click=move |_| toggles.update(|t| t.toggle(section))
                >
                    <p class="level-left title is-5">{move || view.with(|v| v.heading(section))}</p>
                    <a class="level-right results-show-all">
                        {move || toggles.with(|t| t.label(section))}
                    </a>
                </div>
                <div
                    id=section.id()
                    class="results-container"
                    class=("is-hidden", move || !toggles.with(|t| t.is_expanded(section)))
                >
                    {children()}
                </div>
            </section>
        </Show>
    }
}

#[component]
fn SnippetSection(
    section: Section,
    view: RwSignal<SearchView>,
    toggles: RwSignal<SectionToggles>,
) -> impl IntoView {
    view! {
        <ResultsSection section view toggles>
            <SnippetList section view />
        </ResultsSection>
    }
}

#[component]
fn SnippetList(section: Section, view: RwSignal<SearchView>) -> impl IntoView {
    view! {
        <For
            each=move || view.with(|v| v.snippets_in(section).to_vec())
            key=|snippet| snippet.id
            children=move |snippet| view! { <SnippetCard snippet list=section.id() /> }
        />
    }
}

#[component]
fn UserCard(user: UserSummary) -> impl IntoView {
    let config = use_page_config();
    let href = profile_url(&config, &user.name);
    let picture = user
        .profile_picture
        .clone()
        .unwrap_or_else(|| "default_image.png".to_string());
    let picture = config.url(&format!("/static/profile_pictures/{picture}"));
    view! {
        <div class="column is-one-quarter">
            <div class="box user-card is-clickable" on:click=move |_| navigate(&href)>
                <figure class="image is-48x48">
                    <img class="is-rounded user-card-picture" src=picture alt=format!("{}'s profile picture", user.name) />
                </figure>
                <p class="user-card-name title is-6 mt-2">{user.name.clone()}</p>
            </div>
        </div>
    }
}
