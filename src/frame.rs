use crate::camera::Camera;
use crate::constants::{CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use crate::field::PyramidField;
use crate::input::PointerState;
use crate::render;
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Pointer rays are intersected with the plane the pyramid bases sit on.
const TARGET_PLANE_Y: f32 = 0.0;

pub struct FrameContext {
    pub field: Rc<RefCell<PyramidField>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub camera: Camera,
    pub gpu: Option<render::GpuState>,
    pub last_instant: Instant,
    pub frames: u64,
}

impl FrameContext {
    pub fn new(
        field: Rc<RefCell<PyramidField>>,
        pointer: Rc<RefCell<PointerState>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState>,
    ) -> Self {
        Self {
            field,
            pointer,
            canvas,
            camera: default_camera(),
            gpu,
            last_instant: Instant::now(),
            frames: 0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // resize only touches projection and surface size
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.set_viewport(w, h);

        // until the first move the field stays posed around the origin
        let pointer = *self.pointer.borrow();
        let hit = pointer
            .moved
            .then(|| self.camera.project_to_ground(pointer.ndc, TARGET_PLANE_Y))
            .flatten();
        let mut field = self.field.borrow_mut();
        field.step(hit);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&field, &self.camera) {
                log::error!("render error: {:?}", e);
            }
        }

        self.frames += 1;
        if self.frames == 1 {
            log::info!(
                "[frame] first frame rendered ({}x{}, dt={:.1}ms)",
                w,
                h,
                dt.as_secs_f32() * 1000.0
            );
        }
    }
}

pub fn default_camera() -> Camera {
    Camera::new(
        Vec3::from_array(CAMERA_EYE),
        Vec3::ZERO,
        CAMERA_FOV_DEG,
        CAMERA_NEAR,
        CAMERA_FAR,
    )
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    pyramid_count: usize,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, pyramid_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("GPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
