use crate::{
    browser::{alert, on_enclosing_form_submit},
    config::{read_json_island_or_default, CROP_JPEG_QUALITY},
    error::{AppError, AppResult},
    profile::{check_picture_size, validate_links, CropBox},
};
use icondata as i;
use leptos::{
    ev,
    html::{Div, Img, Input},
    prelude::*,
};
use leptos_icons::*;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, FileReader, HtmlCanvasElement, HtmlImageElement};

pub const PICTURE_FIELD: &str = "profile_picture_base64";
pub const LINK_FIELD: &str = "social_links[]";

/// Social links and profile picture fields of the profile edit form.
#[component]
pub fn ProfileEditor() -> impl IntoView {
    let stored: Vec<String> = read_json_island_or_default("social-links");
    let next_key = StoredValue::new(0usize);
    let new_link = move |value: String| {
        let key = next_key.get_value();
        next_key.set_value(key + 1);
        (key, RwSignal::new(value))
    };
    let mut initial: Vec<_> = stored.into_iter().map(new_link).collect();
    if initial.is_empty() {
        initial.push(new_link(String::new()));
    }
    let links = RwSignal::new(initial);

    let source = RwSignal::new(None::<String>);
    let dimensions = RwSignal::new(None::<(f64, f64)>);
    let crop = RwSignal::new(None::<CropBox>);
    let file_ref = NodeRef::<Input>::new();
    let image_ref = NodeRef::<Img>::new();
    let picture_ref = NodeRef::<Input>::new();
    let root_ref = NodeRef::<Div>::new();

    let on_submit = move |event: web_sys::Event| {
        let values: Vec<String> = links.with_untracked(|links| {
            links.iter().map(|(_, link)| link.get_untracked()).collect()
        });
        if let Err(e) = validate_links(values.iter().map(String::as_str)) {
            event.prevent_default();
            alert(&e.to_string());
            return;
        }
        let Some(crop) = crop.get_untracked() else {
            return;
        };
        let rendered = image_ref
            .get_untracked()
            .ok_or_else(|| AppError::MissingElement("profile picture preview".to_string()))
            .and_then(|image| render_crop(&image, crop));
        match rendered {
            Ok(data_url) => {
                if let Some(field) = picture_ref.get_untracked() {
                    field.set_value(&data_url);
                }
            }
            Err(e) => log::error!("unable to crop profile picture: {e}"),
        }
    };
    root_ref.on_load(move |root| {
        if let Err(e) = on_enclosing_form_submit(&root, on_submit) {
            log::warn!("profile form is not validated: {e}");
        }
    });

    let on_file = move |_| {
        let Some(file) = file_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        if let Err(e) = check_picture_size(file.size()) {
            alert(&e.to_string());
            if let Some(input) = file_ref.get_untracked() {
                input.set_value("");
            }
            return;
        }
        if let Err(e) = read_data_url(&file, move |data_url| {
            crop.set(None);
            source.set(Some(data_url));
        }) {
            log::error!("unable to read profile picture: {e}");
        }
    };
    let on_image_load = move |_| {
        let Some(image) = image_ref.get_untracked() else {
            return;
        };
        let size = (
            f64::from(image.natural_width()),
            f64::from(image.natural_height()),
        );
        dimensions.set(Some(size));
        crop.set(Some(CropBox::initial(size.0, size.1)));
    };

    // slider updates, all clamped to the loaded image
    let adjust = move |change: &dyn Fn(CropBox, f64, f64) -> CropBox| {
        if let Some((width, height)) = dimensions.get_untracked() {
            crop.update(|crop| {
                if let Some(current) = crop {
                    *current = change(*current, width, height);
                }
            });
        }
    };
    let slider_value = |ev: web_sys::Event| event_target_value(&ev).parse::<f64>().ok();

    let overlay_style = move || {
        let (Some(c), Some((w, h))) = (crop.get(), dimensions.get()) else {
            return "display: none".to_string();
        };
        format!(
            "left: {}%; top: {}%; width: {}%; height: {}%",
            c.x / w * 100.0,
            c.y / h * 100.0,
            c.size / w * 100.0,
            c.size / h * 100.0
        )
    };
    let max_size = move || {
        dimensions
            .get()
            .map(|(w, h)| w.min(h))
            .unwrap_or(1.0)
            .to_string()
    };

    view! {
        <div node_ref=root_ref class="profile-editor">
            <div class="field social-links">
                <label class="label">"Links"</label>
                <For
                    each=move || links.get()
                    key=|(key, _)| *key
                    children=move |(key, link)| view! {
                        <div class="field has-addons">
                            <div class="control is-expanded">
                                <input
                                    class="input"
                                    type="url"
                                    name=LINK_FIELD
                                    placeholder="https://"
                                    prop:value=move || link.get()
                                    on:input=move |ev| link.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="control">
                                <button
                                    type="button"
                                    class="button"
                                    title="Remove link"
                                    on:click=move |_| links.update(|links| links.retain(|(k, _)| *k != key))
                                >
                                    <Icon icon=i::FaXmarkSolid />
                                </button>
                            </div>
                        </div>
                    }
                />
                <button
                    type="button"
                    class="button is-small add-link"
                    on:click=move |_| links.update(|links| links.push(new_link(String::new())))
                >
                    <span class="icon"><Icon icon=i::FaPlusSolid /></span>
                    <span>"Add link"</span>
                </button>
            </div>
            <div class="field profile-picture">
                <label class="label">"Profile picture"</label>
                <input node_ref=file_ref type="file" accept="image/*" on:change=on_file />
                <input node_ref=picture_ref type="hidden" name=PICTURE_FIELD />
                <Show when=move || source.with(Option::is_some)>
                    <div class="crop-preview mt-2">
                        <img
                            node_ref=image_ref
                            src=move || source.get().unwrap_or_default()
                            alt="Profile picture preview"
                            on:load=on_image_load
                        />
                        <div class="crop-box" style=overlay_style></div>
                    </div>
                    <div class="crop-controls">
                        <label>
                            "Size"
                            <input
                                type="range"
                                min="1"
                                max=max_size
                                prop:value=move || crop.get().map(|c| c.size).unwrap_or_default().to_string()
                                on:input=move |ev| {
                                    if let Some(size) = slider_value(ev) {
                                        adjust(&|c, w, h| c.resized(size, w, h));
                                    }
                                }
                            />
                        </label>
                        <label>
                            "Horizontal"
                            <input
                                type="range"
                                min="0"
                                max=move || dimensions.get().map(|(w, _)| w).unwrap_or(1.0).to_string()
                                prop:value=move || crop.get().map(|c| c.x).unwrap_or_default().to_string()
                                on:input=move |ev| {
                                    if let Some(x) = slider_value(ev) {
                                        adjust(&|c, w, h| c.moved(x, c.y, w, h));
                                    }
                                }
                            />
                        </label>
                        <label>
                            "Vertical"
                            <input
                                type="range"
                                min="0"
                                max=move || dimensions.get().map(|(_, h)| h).unwrap_or(1.0).to_string()
                                prop:value=move || crop.get().map(|c| c.y).unwrap_or_default().to_string()
                                on:input=move |ev| {
                                    if let Some(y) = slider_value(ev) {
                                        adjust(&|c, w, h| c.moved(c.x, y, w, h));
                                    }
                                }
                            />
                        </label>
                    </div>
                </Show>
            </div>
        </div>
    }
}

/// Reads `file` as a data url and hands it to `done` once loaded.
fn read_data_url(file: &web_sys::File, done: impl FnOnce(String) + 'static) -> AppResult<()> {
    let reader = FileReader::new()?;
    let loaded = reader.clone();
    let on_load = Closure::once(move || match loaded.result() {
        Ok(result) => match result.as_string() {
            Some(data_url) => done(data_url),
            None => log::error!("file reader returned a non string result"),
        },
        Err(e) => log::error!("file reader failed: {e:?}"),
    });
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();
    reader.read_as_data_url(file)?;
    Ok(())
}

/// Draws the cropped square of `image` onto a canvas and encodes it as JPEG.
fn render_crop(image: &HtmlImageElement, crop: CropBox) -> AppResult<String> {
    let output = crop.output_size();
    let canvas: HtmlCanvasElement = document()
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| AppError::BrowserApi("canvas".to_string()))?;
    canvas.set_width(output);
    canvas.set_height(output);
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| AppError::BrowserApi("2d context".to_string()))?
        .dyn_into()
        .map_err(|_| AppError::BrowserApi("2d context".to_string()))?;
    let output = f64::from(output);
    context.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        image, crop.x, crop.y, crop.size, crop.size, 0.0, 0.0, output, output,
    )?;
    Ok(canvas.to_data_url_with_type_and_encoder_options(
        "image/jpeg",
        &JsValue::from_f64(CROP_JPEG_QUALITY),
    )?)
}

/// Opens `.modal` dialogs from `[data-modal-open="<id>"]` buttons and closes
/// them from `[data-modal-close]` controls or a click on the backdrop.
pub fn listen_for_modal_toggles() {
    window_event_listener(ev::click, |event: web_sys::MouseEvent| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        if let Ok(Some(opener)) = target.closest("[data-modal-open]") {
            let modal = opener
                .get_attribute("data-modal-open")
                .and_then(|id| document().get_element_by_id(&id));
            if let Some(modal) = modal {
                event.prevent_default();
                let _ = modal.class_list().add_1("is-active");
            }
            return;
        }
        if let Ok(Some(closer)) = target.closest("[data-modal-close], .modal-background") {
            if let Ok(Some(modal)) = closer.closest(".modal") {
                let _ = modal.class_list().remove_1("is-active");
            }
        }
    });
}
