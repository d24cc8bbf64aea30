use glam::{Mat4, Vec2, Vec3, Vec4};

// Below this |dir.y| the sight ray is treated as parallel to the ground.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, fovy_degrees: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    /// Update the aspect ratio from surface dimensions; zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space sight ray through normalized device coordinates
    /// (`x` right, `y` up, both in -1..1).
    ///
    /// Returns `(ray_origin, ray_direction)`; the direction is unit length.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).normalize_or_zero();
        (ro, rd)
    }

    /// Project device coordinates onto the ground plane `y = ground_y`.
    pub fn project_to_ground(&self, ndc: Vec2, ground_y: f32) -> Option<Vec3> {
        let (ro, rd) = self.ray_from_ndc(ndc);
        intersect_horizontal_plane(ro, rd, ground_y)
    }
}

/// Intersect a ray with the horizontal plane `y = plane_y`.
///
/// `None` when the ray runs parallel to the plane, points away from it, or
/// the hit is not a finite point.
#[inline]
pub fn intersect_horizontal_plane(ray_origin: Vec3, ray_dir: Vec3, plane_y: f32) -> Option<Vec3> {
    if !(ray_dir.y.abs() > PARALLEL_EPSILON) {
        return None;
    }
    let t = (plane_y - ray_origin.y) / ray_dir.y;
    if t < 0.0 {
        return None;
    }
    let hit = ray_origin + ray_dir * t;
    hit.is_finite().then_some(hit)
}
