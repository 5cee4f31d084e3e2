//! Fixed tuning values and the per-page settings read from JSON islands.

use crate::error::{AppError, AppResult};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use snipshare_api_types::page::PageConfig;

pub const SEARCH_DELAY_MS: u32 = 250;

pub const MAX_TAGS: usize = 15;
pub const MAX_TAG_LENGTH: usize = 20;

pub const MAX_PROFILE_PICTURE_BYTES: f64 = 5.0 * 1024.0 * 1024.0;
pub const MAX_CROP_SIZE: u32 = 1024;
pub const AUTO_CROP_AREA: f64 = 0.8;
pub const CROP_JPEG_QUALITY: f64 = 0.5;

pub const COMMENT_TICK_MS: u64 = 60_000;

pub const PAGE_CONFIG_ID: &str = "page-config";

/// Reads and decodes the text content of `<script id="{id}" type="application/json">`.
pub fn read_json_island<T>(id: &str) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let element = document()
        .get_element_by_id(id)
        .ok_or_else(|| AppError::MissingElement(id.to_string()))?;
    let text = element.text_content().unwrap_or_default();
    Ok(serde_json::from_str(&text)?)
}

/// Like [`read_json_island`] but falls back to the default value, logging why.
pub fn read_json_island_or_default<T>(id: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match read_json_island(id) {
        Ok(value) => value,
        Err(AppError::MissingElement(_)) => {
            log::debug!("no #{id} island on this page");
            T::default()
        }
        Err(e) => {
            log::warn!("unable to read #{id}: {e}");
            T::default()
        }
    }
}

pub fn is_edit_page() -> bool {
    document().get_element_by_id("edit").is_some()
}

pub fn use_page_config() -> PageConfig {
    use_context::<PageConfig>().unwrap_or_default()
}
