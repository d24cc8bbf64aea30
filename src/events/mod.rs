pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_palette_keydown;
pub use pointer::{wire_input_handlers, InputWiring};
