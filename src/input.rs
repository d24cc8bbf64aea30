use glam::Vec2;

/// Latest pointer position in normalized device coordinates. Written by the
/// move handlers, read once per frame.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Vec2,
    pub moved: bool,
}

impl PointerState {
    pub fn set_client(&mut self, client_x: f32, client_y: f32, view_w: f32, view_h: f32) {
        if let Some(ndc) = client_to_ndc(client_x, client_y, view_w, view_h) {
            self.ndc = ndc;
            self.moved = true;
        }
    }
}

/// Map viewport pixel coordinates to NDC: x right, y up, both -1..1.
/// `None` for an empty viewport.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, view_w: f32, view_h: f32) -> Option<Vec2> {
    if !(view_w > 0.0 && view_h > 0.0) {
        return None;
    }
    let x = (client_x / view_w) * 2.0 - 1.0;
    let y = -(client_y / view_h) * 2.0 + 1.0;
    let ndc = Vec2::new(x, y);
    ndc.is_finite().then_some(ndc)
}

/// Modifier and repeat state of a keydown.
#[derive(Default, Clone, Copy, Debug)]
pub struct KeyChord {
    pub repeat: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Whether a keydown should cycle the palette: the bare key, pressed once,
/// with no modifier held. Matching ignores case so Caps Lock still works.
pub fn is_palette_shortcut(key: &str, palette_key: &str, chord: KeyChord) -> bool {
    if chord.repeat || chord.shift || chord.ctrl || chord.alt || chord.meta {
        return false;
    }
    key.eq_ignore_ascii_case(palette_key)
}
