use crate::global_state::toasts::{use_toast, Toast, ToastLevel};
use icondata as i;
use leptos::prelude::*;
use leptos_icons::Icon;

#[component]
pub fn ToastItem(toast: Toast) -> impl IntoView {
    let toasts = use_toast();

    let color_class = match toast.level {
        ToastLevel::Success => "is-success",
        ToastLevel::Error => "is-danger",
    };
    let icon = match toast.level {
        ToastLevel::Success => i::BsCheckCircle,
        ToastLevel::Error => i::BsExclamationCircle,
    };
    let id = toast.id;

    view! {
        <div class=format!("notification toast {color_class}") role="alert">
            <button
                class="delete"
                aria-label="Close"
                on:click=move |_| {
                    if let Some(toasts) = toasts {
                        toasts.remove(id);
                    }
                }
            ></button>
            <span class="icon-text">
                <span class="icon">
                    <Icon icon width="1.2em" height="1.2em" />
                </span>
                <span>{toast.message}</span>
            </span>
        </div>
    }
}

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_toast();

    view! {
        <div class="toast-container">
            {toasts.map(|toasts| view! {
                <For
                    each=move || toasts.0.get()
                    key=|toast| toast.id
                    children=|toast| view! { <ToastItem toast /> }
                />
            })}
        </div>
    }
}
