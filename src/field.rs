use crate::config::{ColorMode, FieldConfig};
use crate::constants::TIP_VERTEX_INDEX;
use glam::{Vec2, Vec3};

/// Triangle list shared by every pyramid: base square, then four sides.
pub const PYRAMID_INDICES: [u16; 18] = [
    0, 1, 3, 1, 2, 3, // base
    0, 4, 1, // front
    1, 4, 2, // right
    2, 4, 3, // back
    3, 4, 0, // left
];
pub const PYRAMID_VERTEX_COUNT: usize = 5;

/// Convert 0xRRGGBB into linear 0..1 components.
#[inline]
pub fn color_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Pointer influence on a pyramid `distance` away: 1 at the pointer, falling
/// to 0 at `radius` and beyond. `smooth` shapes the falloff.
#[inline]
pub fn influence(distance: f32, radius: f32, smooth: f32) -> f32 {
    let normalized = distance / radius;
    (1.0 - normalized.powf(smooth)).clamp(0.0, 1.0)
}

/// Height multiplier for a given influence, in `1..=max_stretch`.
#[inline]
pub fn stretch_factor(influence: f32, max_stretch: f32) -> f32 {
    if influence <= 0.0 {
        return 1.0;
    }
    let s = influence.min(1.0).sqrt();
    // written as a blend so s == 1 lands on max_stretch exactly
    ((1.0 - s) + max_stretch * s).max(1.0).min(max_stretch.max(1.0))
}

/// Where a tip should sit this frame, relative to its base center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TipPose {
    pub offset: Vec2,
    pub height: f32,
    pub influence: f32,
}

pub fn tip_pose(base: Vec2, target: Vec2, original_height: f32, config: &FieldConfig) -> TipPose {
    let to_target = target - base;
    let d = to_target.length();
    let infl = influence(d, config.influence_radius, config.smooth_factor);
    let offset = if d > 0.0 && infl > 0.0 {
        (to_target / d) * config.max_tip_offset() * infl
    } else {
        Vec2::ZERO
    };
    TipPose {
        offset,
        height: original_height * stretch_factor(infl, config.max_stretch_factor),
        influence: infl,
    }
}

/// One pyramid mesh. Owns its vertex and normal data; only the tip vertex is
/// ever rewritten after construction.
#[derive(Clone, Debug)]
pub struct Pyramid {
    base: Vec2,
    positions: [Vec3; PYRAMID_VERTEX_COUNT],
    normals: [Vec3; PYRAMID_VERTEX_COUNT],
    original_height: f32,
    color: Vec3,
}

impl Pyramid {
    pub fn new(x: f32, z: f32, base_size: f32, height: f32, color: Vec3) -> Self {
        let h = base_size / 2.0;
        let positions = [
            Vec3::new(x - h, 0.0, z - h),
            Vec3::new(x + h, 0.0, z - h),
            Vec3::new(x + h, 0.0, z + h),
            Vec3::new(x - h, 0.0, z + h),
            Vec3::new(x, height, z),
        ];
        let mut p = Self {
            base: Vec2::new(x, z),
            positions,
            normals: [Vec3::ZERO; PYRAMID_VERTEX_COUNT],
            original_height: height,
            color,
        };
        p.recompute_normals();
        p
    }

    /// Base center on the ground plane as `(x, z)`.
    #[inline]
    pub fn base_center(&self) -> Vec2 {
        self.base
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3; PYRAMID_VERTEX_COUNT] {
        &self.positions
    }

    #[inline]
    pub fn base_vertices(&self) -> &[Vec3] {
        &self.positions[..TIP_VERTEX_INDEX]
    }

    #[inline]
    pub fn tip(&self) -> Vec3 {
        self.positions[TIP_VERTEX_INDEX]
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3; PYRAMID_VERTEX_COUNT] {
        &self.normals
    }

    #[inline]
    pub fn original_height(&self) -> f32 {
        self.original_height
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn apply_pose(&mut self, pose: &TipPose) {
        self.positions[TIP_VERTEX_INDEX] = Vec3::new(
            self.base.x + pose.offset.x,
            pose.height,
            self.base.y + pose.offset.y,
        );
        self.recompute_normals();
    }

    /// Smooth per-vertex normals: each vertex gets the normalized sum of the
    /// area-weighted normals of the faces touching it.
    fn recompute_normals(&mut self) {
        let mut acc = [Vec3::ZERO; PYRAMID_VERTEX_COUNT];
        for tri in PYRAMID_INDICES.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (va, vb, vc) = (self.positions[a], self.positions[b], self.positions[c]);
            let n = (vc - vb).cross(va - vb);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        for (dst, n) in self.normals.iter_mut().zip(acc) {
            *dst = n.normalize_or_zero();
        }
    }
}

/// The whole animated grid plus the pointer target and palette selection.
pub struct PyramidField {
    config: FieldConfig,
    pyramids: Vec<Pyramid>,
    target: Vec3,
    palette_index: usize,
}

impl PyramidField {
    pub fn new(config: FieldConfig) -> Self {
        let base_color = config
            .palette
            .first()
            .copied()
            .map(color_from_hex)
            .unwrap_or(Vec3::ONE);
        let half_x = (config.grid_x as f32 - 1.0) / 2.0;
        let half_z = (config.grid_z as f32 - 1.0) / 2.0;
        let mut pyramids = Vec::with_capacity(config.pyramid_count());
        for i in 0..config.grid_x {
            for j in 0..config.grid_z {
                let x = (i as f32 - half_x) * config.spacing;
                let z = (j as f32 - half_z) * config.spacing;
                pyramids.push(Pyramid::new(
                    x,
                    z,
                    config.base_size,
                    config.height,
                    base_color,
                ));
            }
        }
        log::info!(
            "[field] created {} pyramids ({}x{})",
            pyramids.len(),
            config.grid_x,
            config.grid_z
        );
        Self {
            config,
            pyramids,
            target: Vec3::ZERO,
            palette_index: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn pyramids(&self) -> &[Pyramid] {
        &self.pyramids
    }

    /// Pyramid at grid cell `(i, j)`, x index first.
    pub fn pyramid_at(&self, i: u32, j: u32) -> Option<&Pyramid> {
        if i >= self.config.grid_x || j >= self.config.grid_z {
            return None;
        }
        self.pyramids
            .get(i as usize * self.config.grid_z as usize + j as usize)
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Accept a fresh ground-plane hit; `None` keeps the last valid target.
    pub fn set_target(&mut self, hit: Option<Vec3>) -> bool {
        match hit {
            Some(p) if p.is_finite() => {
                self.target = p;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    pub fn base_color(&self) -> Vec3 {
        self.config
            .palette
            .get(self.palette_index)
            .copied()
            .map(color_from_hex)
            .unwrap_or(Vec3::ONE)
    }

    /// Advance to the next palette entry (wrapping) and return its color.
    pub fn cycle_palette(&mut self) -> Vec3 {
        let n = self.config.palette.len().max(1);
        self.palette_index = (self.palette_index + 1) % n;
        let c = self.base_color();
        log::info!(
            "[field] palette -> #{:06x}",
            self.config.palette.get(self.palette_index).copied().unwrap_or(0xffffff)
        );
        c
    }

    /// Re-pose every tip toward the current target and refresh colors.
    pub fn update(&mut self) {
        let target = Vec2::new(self.target.x, self.target.z);
        let base_color = self.base_color();
        let highlight = color_from_hex(self.config.highlight_color);
        let mode = self.config.color_mode;
        for p in &mut self.pyramids {
            let pose = tip_pose(p.base, target, p.original_height, &self.config);
            p.apply_pose(&pose);
            p.color = match mode {
                ColorMode::Palette => base_color,
                ColorMode::Highlight => base_color.lerp(highlight, pose.influence),
            };
        }
    }

    /// Convenience for the frame loop: take this frame's hit, then update.
    pub fn step(&mut self, hit: Option<Vec3>) {
        self.set_target(hit);
        self.update();
    }
}
