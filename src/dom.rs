use crate::constants::{BACKGROUND_MOUNT_ID, FIELD_CONFIG_ATTR};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const MOUNTED_CANVAS_STYLE: &str = "display:block;width:100%;height:100%";
const FALLBACK_CANVAS_STYLE: &str =
    "display:block;position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:-1";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Where the render surface ended up.
pub struct Mount {
    pub canvas: web::HtmlCanvasElement,
    /// `None` when the page had no mount element and the body was used.
    pub host: Option<web::Element>,
}

impl Mount {
    /// Raw JSON override for the field configuration, if the host carries one.
    pub fn field_config_json(&self) -> Option<String> {
        self.host
            .as_ref()
            .and_then(|h| h.get_attribute(FIELD_CONFIG_ATTR))
    }
}

/// Create the background canvas and attach it to the mount element, or to
/// the document body when the mount element is missing.
pub fn mount_canvas(document: &web::Document) -> anyhow::Result<Mount> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let host = match document.get_element_by_id(BACKGROUND_MOUNT_ID) {
        Some(el) => {
            _ = canvas.set_attribute("style", MOUNTED_CANVAS_STYLE);
            el.append_child(&canvas)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            log::info!("added renderer to #{}", BACKGROUND_MOUNT_ID);
            Some(el)
        }
        None => {
            log::error!("could not find #{} element", BACKGROUND_MOUNT_ID);
            let body = document
                .body()
                .ok_or_else(|| anyhow::anyhow!("no document body"))?;
            _ = canvas.set_attribute("style", FALLBACK_CANVAS_STYLE);
            body.append_child(&canvas)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            log::info!("added renderer directly to body as fallback");
            None
        }
    };
    Ok(Mount { canvas, host })
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store matched to its CSS size times DPR.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Viewport size in CSS pixels.
#[inline]
pub fn viewport_size() -> (f32, f32) {
    web::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width as f32, height as f32)
        })
        .unwrap_or((0.0, 0.0))
}
