use super::model::{DetailView, GalleryLayout, TileView, PLACEHOLDER_TEXT};
use crate::constants::TILE_INDEX_ATTR;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn div(document: &web::Document, class: &str) -> Result<web::Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(class);
    Ok(el)
}

fn text_el(
    document: &web::Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<web::Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.set_text_content(Some(text));
    Ok(el)
}

/// Replace the container's children with the given layout.
pub fn render(
    document: &web::Document,
    container: &web::Element,
    layout: &GalleryLayout,
) -> Result<(), JsValue> {
    container.set_inner_html("");
    match layout {
        GalleryLayout::Placeholder => {
            let msg = text_el(document, "div", "loading-message", PLACEHOLDER_TEXT)?;
            container.append_child(&msg)?;
        }
        GalleryLayout::Tiles(tiles) => {
            for (index, tile) in tiles.iter().enumerate() {
                container.append_child(&build_tile(document, index, tile)?.into())?;
            }
        }
    }
    Ok(())
}

fn build_tile(
    document: &web::Document,
    index: usize,
    tile: &TileView,
) -> Result<web::Element, JsValue> {
    let item = div(document, "gallery-item")?;
    let frame = div(document, "artwork-box")?;

    let img: web::HtmlImageElement = document.create_element("img")?.dyn_into()?;
    img.set_attribute("loading", "lazy")?;
    img.set_src(&tile.thumbnail_url);
    img.set_alt(&tile.alt);
    img.set_attribute("data-full-image", &tile.detail.image_url)?;
    img.set_attribute(TILE_INDEX_ATTR, &index.to_string())?;

    frame.append_child(&img)?;
    item.append_child(&frame)?;
    item.append_child(&text_el(document, "div", "sold-label", tile.sold_label)?.into())?;
    Ok(item)
}

fn event_element(ev: &web::MouseEvent) -> Option<web::Element> {
    ev.target().and_then(|t| t.dyn_into::<web::Element>().ok())
}

/// Install the two delegated click listeners the gallery needs for the whole
/// session: tile clicks on the container open `details[index]`, and clicks on
/// a close button or an overlay backdrop anywhere in the document dismiss it.
pub fn wire_clicks(
    document: &web::Document,
    container: &web::Element,
    details: Rc<RefCell<Vec<DetailView>>>,
) -> Result<(), JsValue> {
    let doc = document.clone();
    let on_tile = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let selector = format!("[{}]", TILE_INDEX_ATTR);
        let Some(tile) = event_element(&ev).and_then(|el| el.closest(&selector).ok().flatten())
        else {
            return;
        };
        let detail = tile
            .get_attribute(TILE_INDEX_ATTR)
            .and_then(|i| i.parse::<usize>().ok())
            .and_then(|i| details.borrow().get(i).cloned());
        if let Some(detail) = detail {
            if let Err(e) = open_detail(&doc, &detail) {
                log::error!("[gallery] could not open detail view: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(_)>);
    container.add_event_listener_with_callback("click", on_tile.as_ref().unchecked_ref())?;
    on_tile.forget();

    let on_dismiss = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let Some(el) = event_element(&ev) else {
            return;
        };
        // backdrop only when the overlay itself was hit, not its content
        let modal = if el.matches(".modal-close-button").unwrap_or(false) {
            el.closest(".artwork-modal").ok().flatten()
        } else if el.matches(".artwork-modal").unwrap_or(false) {
            Some(el)
        } else {
            None
        };
        if let Some(modal) = modal {
            modal.remove();
        }
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("click", on_dismiss.as_ref().unchecked_ref())?;
    on_dismiss.forget();
    Ok(())
}

/// Append a dismissible overlay with the full image and metadata to the body.
pub fn open_detail(document: &web::Document, detail: &DetailView) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let modal = div(document, "artwork-modal")?;
    let content = div(document, "artwork-modal-content")?;

    let full: web::HtmlImageElement = document.create_element("img")?.dyn_into()?;
    full.set_src(&detail.image_url);
    full.set_alt(&detail.title);

    let info = div(document, "artwork-info")?;
    info.append_child(&text_el(document, "h2", "", &detail.title)?.into())?;
    info.append_child(&text_el(document, "p", "artwork-date", &detail.year)?.into())?;
    info.append_child(&text_el(document, "p", "artwork-medium", &detail.medium)?.into())?;
    info.append_child(&text_el(document, "p", "artwork-dimensions", &detail.dimensions)?.into())?;
    if let Some(desc) = &detail.description {
        info.append_child(&text_el(document, "p", "artwork-description", desc)?.into())?;
    }
    info.append_child(&text_el(document, "p", "artwork-status", detail.status)?.into())?;

    let close = text_el(document, "button", "modal-close-button", "\u{00d7}")?;

    content.append_child(&full)?;
    content.append_child(&info)?;
    content.append_child(&close)?;
    modal.append_child(&content)?;
    body.append_child(&modal)?;
    Ok(())
}
