use crate::global_state::theme::{provide_theme_settings, ThemeMode};
use icondata as i;
use leptos::prelude::*;
use leptos_icons::Icon;

/// A compact navbar button that cycles theme mode Dark -> Light -> System
#[component]
pub fn ThemeButton() -> impl IntoView {
    let settings = provide_theme_settings();
    let mode = settings.mode;

    let icon = Signal::derive(move || match mode.get() {
        ThemeMode::Dark => i::FaMoonSolid,
        ThemeMode::Light => i::FaSunSolid,
        ThemeMode::System => i::FaLightbulbSolid,
    });

    let label = Signal::derive(move || match mode.get() {
        ThemeMode::Dark => "Dark",
        ThemeMode::Light => "Light",
        ThemeMode::System => "System",
    });

    view! {
        <button
            id="theme-toggle"
            type="button"
            class="button is-ghost"
            title=move || format!("Theme: {}", label.get())
            on:click=move |_| settings.cycle()
        >
            <Icon icon=icon />
        </button>
    }
}
