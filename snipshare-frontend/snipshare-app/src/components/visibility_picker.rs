use crate::{
    browser::on_enclosing_form_submit,
    config::{is_edit_page, read_json_island_or_default},
    error::AppResult,
    users::{UserPicker, Visibility},
};
use icondata as i;
use leptos::{html::Div, prelude::*};
use leptos_icons::*;
use snipshare_api_types::UserSummary;
use web_sys::{HtmlElement, KeyboardEvent};

/// Public/private switch of the snippet form, plus the people a private
/// snippet is shared with.
#[component]
pub fn VisibilityPicker(initial: Visibility) -> impl IntoView {
    let users: Vec<UserSummary> = read_json_island_or_default("user-data");
    let mut picker = UserPicker::new(users);
    if is_edit_page() {
        let shared: Vec<UserSummary> = read_json_island_or_default("shared-users");
        picker = picker.with_selected(shared);
    }
    let picker = RwSignal::new(picker);
    let visibility = RwSignal::new(initial);
    let filter = RwSignal::new(String::new());
    let matches = Memo::new(move |_| {
        let filter = filter.get();
        picker.with(|p| p.matches(&filter))
    });

    let hidden_ref = NodeRef::<Div>::new();
    let sync_hidden = move || {
        if let Some(container) = hidden_ref.get_untracked() {
            let fields = picker.with_untracked(|p| p.hidden_fields());
            if let Err(e) = write_hidden_fields(&container, &fields) {
                log::error!("unable to write permitted users: {e}");
            }
        }
    };
    Effect::new(move |_| {
        picker.track();
        sync_hidden();
    });
    hidden_ref.on_load(move |container| {
        sync_hidden();
        if let Err(e) = on_enclosing_form_submit(&container, move |_| sync_hidden()) {
            log::warn!("permitted users will not resync on submit: {e}");
        }
    });

    let on_keydown = move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            e.prevent_default();
        }
    };
    let select = move |user: UserSummary| {
        picker.update(|p| {
            p.select(user);
        });
        filter.set(String::new());
    };
    let deselect = move |id: i64| {
        picker.update(|p| {
            p.deselect(id);
        });
    };

    view! {
        <div class="visibility-picker">
            <input
                type="hidden"
                name="is_public"
                prop:value=move || visibility.get().field_value()
            />
            <button
                id="visibility-toggle"
                type="button"
                class="button"
                class=("is-success", move || !visibility.get().is_private())
                class=("is-danger", move || visibility.get().is_private())
                on:click=move |_| visibility.update(|v| *v = v.toggled())
            >
                <span class="icon">
                    <Icon icon=Signal::derive(move || if visibility.get().is_private() {
                        i::FaLockSolid
                    } else {
                        i::FaGlobeSolid
                    }) />
                </span>
                <span>{move || visibility.get().label()}</span>
            </button>
            <div node_ref=hidden_ref class="permitted-users"></div>
            <Show when=move || visibility.get().is_private()>
                <div class="user-picker mt-3">
                    <div class="tags">
                        <For
                            each=move || picker.with(|p| p.selected().to_vec())
                            key=|user| user.id
                            children=move |user| {
                                let id = user.id;
                                view! {
                                    <span class="tag is-primary">
                                        {user.name}
                                        <button
                                            type="button"
                                            class="delete is-small"
                                            aria-label="Remove user"
                                            on:click=move |_| deselect(id)
                                        ></button>
                                    </span>
                                }
                            }
                        />
                    </div>
                    <input
                        id="user-search"
                        class="input"
                        type="text"
                        autocomplete="off"
                        placeholder="Share with..."
                        prop:value=move || filter.get()
                        on:input=move |ev| filter.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <Show when=move || !filter.with(|f| f.trim().is_empty())>
                        <div class="user-results box mt-1">
                            <Show
                                when=move || !matches.with(Vec::is_empty)
                                fallback=|| view! { <p class="has-text-grey">"No users found"</p> }
                            >
                                <For
                                    each=move || matches.get()
                                    key=|user| user.id
                                    children=move |user| {
                                        let name = user.name.clone();
                                        view! {
                                            <a class="user-result is-block" on:click=move |_| select(user.clone())>
                                                {name}
                                            </a>
                                        }
                                    }
                                />
                            </Show>
                        </div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

/// Replaces the contents of `container` with one hidden input per field.
fn write_hidden_fields(container: &HtmlElement, fields: &[(&str, String)]) -> AppResult<()> {
    container.set_inner_html("");
    let document = document();
    for (name, value) in fields {
        let input = document.create_element("input")?;
        input.set_attribute("type", "hidden")?;
        input.set_attribute("name", name)?;
        input.set_attribute("value", value)?;
        container.append_child(&input)?;
    }
    Ok(())
}
