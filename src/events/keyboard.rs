use crate::constants::PALETTE_KEY;
use crate::field::PyramidField;
use crate::input::{is_palette_shortcut, KeyChord};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn is_typing_target(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

// 'C' advances the pyramid palette unless the user is typing somewhere
pub fn wire_palette_keydown(field: Rc<RefCell<PyramidField>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                let chord = KeyChord {
                    repeat: ev.repeat(),
                    shift: ev.shift_key(),
                    ctrl: ev.ctrl_key(),
                    alt: ev.alt_key(),
                    meta: ev.meta_key(),
                };
                if is_palette_shortcut(&ev.key(), PALETTE_KEY, chord) && !is_typing_target(&ev) {
                    field.borrow_mut().cycle_palette();
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
