use crate::counters::counter_text;
use leptos::{ev, prelude::*};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};

/// Keeps `#<data-counter>` in step with every input carrying `data-counter`
/// and a `maxlength`.
pub fn bind_counters() {
    if let Ok(inputs) = document().query_selector_all("[data-counter][maxlength]") {
        for index in 0..inputs.length() {
            if let Some(element) = inputs
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            {
                update_counter(&element);
            }
        }
    }
    window_event_listener(ev::input, |event| {
        if let Some(element) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .filter(|element| element.has_attribute("data-counter"))
        {
            update_counter(&element);
        }
    });
}

fn update_counter(input: &Element) {
    let (Some(counter_id), Some(max)) = (
        input.get_attribute("data-counter"),
        input
            .get_attribute("maxlength")
            .and_then(|max| max.parse::<usize>().ok()),
    ) else {
        return;
    };
    let Some(counter) = document().get_element_by_id(&counter_id) else {
        log::warn!("no counter element #{counter_id}");
        return;
    };
    let value = if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(textarea) = input.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else {
        return;
    };
    let (label, title) = counter_text(&value, max);
    counter.set_text_content(Some(&label));
    let _ = counter.set_attribute("title", &title);
}
