use crate::{
    config::{is_edit_page, read_json_island_or_default, MAX_TAG_LENGTH},
    global_state::toasts::{notify, use_toast, ToastLevel},
    tags::{TagError, TagSet},
};
use icondata as i;
use leptos::prelude::*;
use leptos_icons::*;
use web_sys::KeyboardEvent;

/// Tag input of the snippet form. Submits its value through the hidden `tags`
/// field as a comma separated list.
#[component]
pub fn TagEditor() -> impl IntoView {
    let toasts = use_toast();
    let presets: Vec<String> = read_json_island_or_default("preset-tags");
    let mut initial = TagSet::new(presets);
    if is_edit_page() {
        let existing: Vec<String> = read_json_island_or_default("tags");
        for tag in existing {
            if let Err(e) = initial.restore(&tag) {
                log::warn!("dropping stored tag {tag:?}: {e}");
            }
        }
    }
    let tags = RwSignal::new(initial);
    let input = RwSignal::new(String::new());
    let dropdown_open = RwSignal::new(false);
    // feedback shown in place of the usual placeholder until the next edit
    let feedback = RwSignal::new(None::<&'static str>);

    let visible_presets = Memo::new(move |_| {
        let filter = input.get();
        tags.with(|tags| tags.visible_presets(&filter))
    });

    let commit = move |text: String| {
        let mut result = Ok(String::new());
        tags.update(|tags| result = tags.add(&text));
        match result {
            Ok(tag) => {
                log::debug!("added tag {tag}");
                input.set(String::new());
                feedback.set(None);
                dropdown_open.set(false);
            }
            Err(e @ TagError::TooLong(_)) => {
                notify(toasts, ToastLevel::Error, e.to_string());
            }
            Err(TagError::Empty) => {
                input.set(String::new());
                feedback.set(Some("Cannot add an empty tag"));
            }
            Err(TagError::Duplicate) => {
                input.set(String::new());
                feedback.set(Some("Already Tagged"));
            }
            Err(TagError::LimitReached(_)) => {
                input.set(String::new());
                feedback.set(Some("Tag limit reached"));
            }
        }
    };

    let on_keydown = move |e: KeyboardEvent| {
        if e.key() == "Enter" || e.key() == "," {
            // Enter would otherwise submit the snippet form
            e.prevent_default();
            commit(input.get_untracked());
        }
    };
    let on_input = move |ev| {
        let text = event_target_value(&ev);
        feedback.set(None);
        let open = !text.trim().is_empty()
            && tags.with_untracked(|tags| !tags.visible_presets(&text).is_empty());
        input.set(text);
        dropdown_open.set(open);
    };
    let remove = move |tag: String| {
        tags.update(|tags| {
            tags.remove(&tag);
        });
        feedback.set(None);
    };

    let placeholder = move || {
        feedback
            .get()
            .unwrap_or_else(|| tags.with(|tags| tags.placeholder()))
    };

    view! {
        <div class="tag-editor">
            <input type="hidden" name="tags" prop:value=move || tags.with(|t| t.hidden_value()) />
            <div class="tags are-medium mb-2">
                <For
                    each=move || tags.with(|t| t.tags().to_vec())
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let label = tag.clone();
                        view! {
                            <span class="tag is-info">
                                {label}
                                <button
                                    type="button"
                                    class="delete is-small"
                                    aria-label="Remove tag"
                                    on:click=move |_| remove(tag.clone())
                                ></button>
                            </span>
                        }
                    }
                />
            </div>
            <div class="field has-addons">
                <div class="control is-expanded">
                    <input
                        id="tag-input"
                        class="input"
                        type="text"
                        autocomplete="off"
                        maxlength=MAX_TAG_LENGTH.to_string()
                        placeholder=placeholder
                        disabled=move || tags.with(|t| t.is_full())
                        prop:value=move || input.get()
                        on:input=on_input
                        on:keydown=on_keydown
                    />
                </div>
                <div class="control">
                    <button
                        type="button"
                        class="button"
                        title="Show preset tags"
                        on:click=move |_| dropdown_open.update(|open| *open = !*open)
                    >
                        <Icon icon=Signal::derive(move || if dropdown_open.get() {
                            i::FaChevronUpSolid
                        } else {
                            i::FaChevronDownSolid
                        }) />
                    </button>
                </div>
            </div>
            <p class="help">
                <span class="tag-count">{move || tags.with(|t| t.count_label())}</span>
                " tags, "
                <span class="tag-length">{move || tags.with(|t| t.length_label(&input.get()))}</span>
                " characters"
            </p>
            <Show when=move || dropdown_open.get() && !visible_presets.with(Vec::is_empty)>
                <div class="dropdown-content preset-tags">
                    <For
                        each=move || visible_presets.get()
                        key=|preset| preset.clone()
                        children=move |preset| {
                            let label = preset.clone();
                            view! {
                                <a
                                    class="dropdown-item"
                                    on:mousedown=move |e| {
                                        e.prevent_default();
                                        commit(preset.clone());
                                    }
                                >
                                    {label}
                                </a>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
