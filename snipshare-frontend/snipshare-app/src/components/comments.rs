//! Behaviour for the server rendered comment thread: relative timestamps,
//! reply and replies toggles, deleting.

use crate::{
    api::delete_comment,
    browser::{alert, confirm, reload},
    config::{use_page_config, COMMENT_TICK_MS},
    timestamps::{absolute_label, time_ago},
};
use chrono::Utc;
use leptos::{ev, prelude::*, task::spawn_local};
use leptos_use::{use_interval, UseIntervalReturn};
use snipshare_api_types::page::PageConfig;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

const ACTION_SELECTOR: &str = "[data-reply-toggle],[data-replies-toggle],[data-delete-comment]";

/// A click on one of the comment controls, carrying the comment id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentAction {
    ToggleReplyForm(i64),
    ToggleReplies(i64),
    Delete(i64),
}

impl CommentAction {
    pub fn from_attribute(name: &str, value: &str) -> Option<Self> {
        let id = value.trim().parse().ok()?;
        match name {
            "data-reply-toggle" => Some(CommentAction::ToggleReplyForm(id)),
            "data-replies-toggle" => Some(CommentAction::ToggleReplies(id)),
            "data-delete-comment" => Some(CommentAction::Delete(id)),
            _ => None,
        }
    }

    fn from_element(element: &Element) -> Option<Self> {
        ["data-reply-toggle", "data-replies-toggle", "data-delete-comment"]
            .into_iter()
            .find_map(|name| {
                let value = element.get_attribute(name)?;
                Self::from_attribute(name, &value)
            })
    }

    /// Id of the element shown or hidden by a toggle.
    pub fn target_id(&self) -> Option<String> {
        match self {
            CommentAction::ToggleReplyForm(id) => Some(format!("reply-form-{id}")),
            CommentAction::ToggleReplies(id) => Some(format!("replies-{id}")),
            CommentAction::Delete(_) => None,
        }
    }
}

/// `(removed, added)` chevron classes once a replies section is `open`.
pub fn chevron_classes(open: bool) -> (&'static str, &'static str) {
    if open {
        ("fa-chevron-right", "fa-chevron-down")
    } else {
        ("fa-chevron-down", "fa-chevron-right")
    }
}

#[component]
pub fn Comments() -> impl IntoView {
    let UseIntervalReturn { counter, .. } = use_interval(COMMENT_TICK_MS);
    Effect::new(move |_| {
        counter.track();
        refresh_timestamps();
    });
    listen_for_actions(use_page_config());
}

fn refresh_timestamps() {
    let Ok(elements) = document().query_selector_all(".timestamp[data-timestamp]") else {
        return;
    };
    let now = Utc::now().naive_utc();
    for index in 0..elements.length() {
        let Some(element) = elements
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let stamp = element.get_attribute("data-timestamp").unwrap_or_default();
        element.set_text_content(Some(&time_ago(&stamp, now)));
        if let Some(title) = absolute_label(&stamp) {
            let _ = element.set_attribute("title", &title);
        }
    }
}

fn listen_for_actions(config: PageConfig) {
    window_event_listener(ev::click, move |event: MouseEvent| {
        let action = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(ACTION_SELECTOR).ok().flatten())
            .and_then(|control| CommentAction::from_element(&control).map(|a| (a, control)));
        if let Some((action, control)) = action {
            event.prevent_default();
            run(action, &control, &config);
        }
    });
}

fn run(action: CommentAction, control: &Element, config: &PageConfig) {
    match action {
        CommentAction::ToggleReplyForm(_) | CommentAction::ToggleReplies(_) => {
            let Some(target) = action
                .target_id()
                .and_then(|id| document().get_element_by_id(&id))
            else {
                log::warn!("no section for {action:?}");
                return;
            };
            let open = target.class_list().toggle("is-hidden").map(|hidden| !hidden);
            if let (CommentAction::ToggleReplies(_), Ok(open)) = (action, open) {
                if let Ok(Some(chevron)) = control.query_selector(".replies-chevron") {
                    let (removed, added) = chevron_classes(open);
                    let _ = chevron.class_list().replace(removed, added);
                }
            }
        }
        CommentAction::Delete(id) => {
            if !confirm("Are you sure you want to delete this comment?") {
                return;
            }
            let config = config.clone();
            spawn_local(async move {
                match delete_comment(&config, id).await {
                    Ok(()) => reload(),
                    Err(e) => {
                        log::error!("unable to delete comment {id}: {e}");
                        alert("Unable to delete comment.");
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_control_attributes() {
        assert_eq!(
            CommentAction::from_attribute("data-reply-toggle", "12"),
            Some(CommentAction::ToggleReplyForm(12))
        );
        assert_eq!(
            CommentAction::from_attribute("data-delete-comment", " 3 "),
            Some(CommentAction::Delete(3))
        );
        assert_eq!(CommentAction::from_attribute("data-reply-toggle", "abc"), None);
        assert_eq!(CommentAction::from_attribute("data-other", "1"), None);
    }

    #[test]
    fn toggles_point_at_their_sections() {
        assert_eq!(
            CommentAction::ToggleReplyForm(4).target_id().as_deref(),
            Some("reply-form-4")
        );
        assert_eq!(
            CommentAction::ToggleReplies(4).target_id().as_deref(),
            Some("replies-4")
        );
        assert_eq!(CommentAction::Delete(4).target_id(), None);
    }

    #[test]
    fn chevron_points_down_when_open() {
        assert_eq!(chevron_classes(true).1, "fa-chevron-down");
        assert_eq!(chevron_classes(false).1, "fa-chevron-right");
    }
}
