use crate::editor::{byte_to_utf16, indent, normalize_newlines, unindent, utf16_to_byte};
use leptos::{ev, prelude::*};
use wasm_bindgen::JsCast;
use web_sys::{HtmlTextAreaElement, KeyboardEvent};

/// Makes Tab and Shift+Tab indent inside every `textarea.code-editor` instead
/// of moving focus.
pub fn listen_for_tab_keys() {
    window_event_listener(ev::keydown, |event: KeyboardEvent| {
        if event.key() != "Tab" {
            return;
        }
        let Some(textarea) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlTextAreaElement>().ok())
            .filter(|textarea| textarea.class_list().contains("code-editor"))
        else {
            return;
        };
        event.prevent_default();

        let code = normalize_newlines(&textarea.value());
        let start = textarea.selection_start().ok().flatten().unwrap_or_default();
        let end = textarea.selection_end().ok().flatten().unwrap_or(start);
        let (start, end) = (utf16_to_byte(&code, start), utf16_to_byte(&code, end));
        let edit = if event.shift_key() {
            unindent(&code, start, end)
        } else {
            indent(&code, start, end)
        };
        textarea.set_value(&edit.code);
        let selection = textarea.set_selection_range(
            byte_to_utf16(&edit.code, edit.start),
            byte_to_utf16(&edit.code, edit.end),
        );
        if let Err(e) = selection {
            log::warn!("unable to restore selection: {e:?}");
        }
    });
}
