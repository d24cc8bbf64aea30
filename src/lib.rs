#![cfg(target_arch = "wasm32")]
use crate::config::FieldConfig;
use crate::field::PyramidField;
use crate::input::PointerState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

mod camera;
mod config;
mod constants;
mod dom;
mod events;
mod field;
mod frame;
mod gallery;
mod input;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("spacewave-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(launch);
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        launch();
    }
    Ok(())
}

fn launch() {
    spawn_local(async move {
        if let Err(e) = init_background().await {
            log::error!("background init error: {:?}", e);
        }
    });
    spawn_local(async move {
        if let Err(e) = init_gallery().await {
            log::error!("gallery init error: {:?}", e);
        }
    });
}

fn field_config(mount: &dom::Mount) -> FieldConfig {
    let Some(json) = mount.field_config_json() else {
        return FieldConfig::default();
    };
    match FieldConfig::from_json(&json) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("ignoring field config override: {}", e);
            FieldConfig::default()
        }
    }
}

async fn init_background() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Falls back to <body> when the mount element is missing
    let mount = dom::mount_canvas(&document)?;
    dom::wire_canvas_resize(&mount.canvas);

    let config = field_config(&mount);
    let pyramid_count = config.pyramid_count();
    let field = Rc::new(RefCell::new(PyramidField::new(config)));
    let pointer = Rc::new(RefCell::new(PointerState::default()));

    events::wire_input_handlers(events::InputWiring {
        document: document.clone(),
        canvas: mount.canvas.clone(),
        field: field.clone(),
        pointer: pointer.clone(),
    });
    events::wire_palette_keydown(field.clone());

    let gpu = frame::init_gpu(&mount.canvas, pyramid_count).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        field,
        pointer,
        mount.canvas.clone(),
        gpu,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}

async fn init_gallery() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    gallery::start(document).await
}
