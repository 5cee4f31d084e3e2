use leptos::prelude::*;
use log::{debug, warn};
use std::str::FromStr;

const STORAGE_KEY: &str = "theme";

/// The visual theme mode of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// Follow the browser preference.
    #[default]
    System,
    Dark,
    Light,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// The mode the theme button switches to.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::System,
            ThemeMode::System => ThemeMode::Dark,
        }
    }

    /// Class put on `<html>`; the system mode relies on media queries instead.
    pub fn html_class(&self) -> Option<&'static str> {
        match self {
            ThemeMode::System => None,
            ThemeMode::Dark => Some("theme-dark"),
            ThemeMode::Light => Some("theme-light"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            "system" | "" | "null" => Ok(ThemeMode::System),
            _ => Err(()),
        }
    }
}

/// Theme state for the page.
/// - Persisted to sessionStorage
/// - Applies `theme-dark` / `theme-light` to <html>
#[derive(Clone, Copy)]
pub struct ThemeSettings {
    pub mode: RwSignal<ThemeMode>,
}

impl ThemeSettings {
    pub fn new() -> Self {
        let mode = RwSignal::new(load_mode_from_storage().unwrap_or_default());
        apply_to_dom(mode.get_untracked());

        Effect::new(move |_| {
            let m = mode.get();
            apply_to_dom(m);
            persist(m);
        });

        ThemeSettings { mode }
    }

    pub fn cycle(&self) {
        self.mode.update(|mode| *mode = mode.next());
    }
}

/// Provide ThemeSettings into context if not already present and return it.
pub fn provide_theme_settings() -> ThemeSettings {
    if let Some(existing) = use_context::<ThemeSettings>() {
        return existing;
    }
    let settings = ThemeSettings::new();
    provide_context(settings);
    settings
}

fn persist(mode: ThemeMode) {
    let Some(storage) = window().session_storage().ok().flatten() else {
        warn!("sessionStorage unavailable, theme will not persist");
        return;
    };
    let result = match mode {
        ThemeMode::System => storage.remove_item(STORAGE_KEY),
        mode => storage.set_item(STORAGE_KEY, mode.as_str()),
    };
    if let Err(e) = result {
        warn!("unable to store theme: {e:?}");
    }
}

fn load_mode_from_storage() -> Option<ThemeMode> {
    let storage = window().session_storage().ok().flatten()?;
    let value = storage.get_item(STORAGE_KEY).ok().flatten()?;
    ThemeMode::from_str(&value).ok()
}

fn apply_to_dom(mode: ThemeMode) {
    let Some(html) = document().document_element() else {
        return;
    };
    let classes = html.class_list();
    let _ = classes.remove_2("theme-dark", "theme-light");
    if let Some(class) = mode.html_class() {
        let _ = classes.add_1(class);
    }
    debug!("theme set to {}", mode.as_str());
}
