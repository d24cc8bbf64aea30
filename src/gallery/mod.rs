use crate::constants::{FILTER_ATTR, GALLERY_CONTAINER_ID, MANIFEST_ATTR, MANIFEST_URL, SORT_ATTR};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod fetch;
mod model;
mod view;

pub use model::*;

/// Show the placeholder, load the manifest, then draw the tiles.
///
/// A failed load leaves the placeholder in place and is returned to the
/// caller. Pages without a gallery container are skipped. The container may
/// name a filter (`data-filter="available"`) and an order
/// (`data-sort="year-desc"`) for the tiles.
pub async fn start(document: web::Document) -> anyhow::Result<()> {
    let Some(container) = document.get_element_by_id(GALLERY_CONTAINER_ID) else {
        log::info!("[gallery] no #{} on this page", GALLERY_CONTAINER_ID);
        return Ok(());
    };
    let url = container
        .get_attribute(MANIFEST_ATTR)
        .unwrap_or_else(|| MANIFEST_URL.to_string());
    let filter = container.get_attribute(FILTER_ATTR);
    let sort = container.get_attribute(SORT_ATTR);
    let options = RenderOptions::from_attrs(filter.as_deref(), sort.as_deref());

    let details = Rc::new(RefCell::new(Vec::new()));
    view::wire_clicks(&document, &container, details.clone())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut gallery = Gallery::default();
    view::render(&document, &container, &gallery.layout(&options))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let loaded = fetch::fetch_manifest(&url).await;
    gallery
        .apply_load(loaded)
        .map_err(|e| anyhow::anyhow!("{} ({})", e, url))?;

    let layout = gallery.layout(&options);
    *details.borrow_mut() = layout.details();
    view::render(&document, &container, &layout).map_err(|e| anyhow::anyhow!("{:?}", e))
}
