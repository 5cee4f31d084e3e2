//! Thin wrappers over the window apis the widgets need.

use crate::error::{AppError, AppResult};
use leptos::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

pub fn navigate(url: &str) {
    if let Err(e) = window().location().set_href(url) {
        log::error!("unable to navigate to {url}: {e:?}");
    }
}

pub fn reload() {
    if let Err(e) = window().location().reload() {
        log::error!("unable to reload: {e:?}");
    }
}

pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

pub fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        log::warn!("unable to show alert: {e:?}");
    }
}

/// Replaces the address bar url without navigating.
pub fn push_history(url: &str) {
    let result = window()
        .history()
        .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(url)));
    if let Err(e) = result {
        log::warn!("unable to update history: {e:?}");
    }
}

pub fn query_param(name: &str) -> Option<String> {
    let search = window().location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
}

/// Path and query of the current page, used as the login `next` target.
pub fn current_path() -> String {
    let location = window().location();
    format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    )
}

/// Runs the page's highlight.js over `element` if the library is loaded.
pub fn highlight(element: &web_sys::Element) -> AppResult<()> {
    let hljs = js_sys::Reflect::get(&window(), &JsValue::from_str("hljs"))?;
    if hljs.is_undefined() {
        return Err(AppError::BrowserApi("hljs is not loaded".to_string()));
    }
    let highlight = js_sys::Reflect::get(&hljs, &JsValue::from_str("highlightElement"))?;
    let highlight: js_sys::Function = highlight
        .dyn_into()
        .map_err(|_| AppError::BrowserApi("hljs.highlightElement".to_string()))?;
    highlight.call1(&hljs, element)?;
    Ok(())
}

/// Calls `handler` whenever the form around `element` is submitted, before the
/// browser sends it.
pub fn on_enclosing_form_submit(
    element: &web_sys::Element,
    handler: impl Fn(web_sys::Event) + 'static,
) -> AppResult<()> {
    let form = element
        .closest("form")?
        .ok_or_else(|| AppError::MissingElement("form".to_string()))?;
    let on_submit = Closure::<dyn Fn(web_sys::Event)>::new(handler);
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // the form lives as long as the page does
    on_submit.forget();
    Ok(())
}
