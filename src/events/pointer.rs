use crate::dom;
use crate::field::PyramidField;
use crate::input::PointerState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub field: Rc<RefCell<PyramidField>>,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_mousemove(&w);
    wire_touchmove(&w);
    wire_palette_click(&w);
}

fn wire_mousemove(w: &InputWiring) {
    let pointer = w.pointer.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (vw, vh) = dom::viewport_size();
        pointer
            .borrow_mut()
            .set_client(ev.client_x() as f32, ev.client_y() as f32, vw, vh);
    }) as Box<dyn FnMut(_)>);
    _ = w
        .document
        .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touchmove(w: &InputWiring) {
    let pointer = w.pointer.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(t) = ev.touches().get(0) {
            let (vw, vh) = dom::viewport_size();
            pointer
                .borrow_mut()
                .set_client(t.client_x() as f32, t.client_y() as f32, vw, vh);
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    // non-passive so preventDefault can stop page scrolling
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = w
        .document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    closure.forget();
}

fn wire_palette_click(w: &InputWiring) {
    let field = w.field.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        field.borrow_mut().cycle_palette();
    }) as Box<dyn FnMut()>);
    _ = w
        .canvas
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
