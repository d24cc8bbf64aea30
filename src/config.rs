use crate::constants::*;
use serde::Deserialize;

/// How a pyramid's displayed color is chosen each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// The currently selected palette entry, regardless of pointer distance.
    Palette,
    /// Base color blended toward `highlight_color` by pointer influence.
    Highlight,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one cell per axis (got {x}x{z})")]
    EmptyGrid { x: u32, z: u32 },
    #[error("grid of {x}x{z} exceeds {max} pyramids")]
    GridTooLarge { x: u32, z: u32, max: usize },
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },
    #[error("max stretch factor must be at least 1 (got {0})")]
    StretchBelowOne(f32),
    #[error("tip movement factor must not be negative (got {0})")]
    NegativeTipMovement(f32),
    #[error("palette must contain at least one color")]
    EmptyPalette,
}

/// Pyramid field tuning. Any subset of fields may be supplied as JSON; the
/// rest fall back to the defaults in `constants.rs`. The first palette entry
/// is the starting base color.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub grid_x: u32,
    pub grid_z: u32,
    pub spacing: f32,
    pub base_size: f32,
    pub height: f32,
    pub tip_movement_factor: f32,
    pub influence_radius: f32,
    pub smooth_factor: f32,
    pub max_stretch_factor: f32,
    pub color_mode: ColorMode,
    pub highlight_color: u32,
    pub palette: Vec<u32>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            grid_x: GRID_X,
            grid_z: GRID_Z,
            spacing: GRID_SPACING,
            base_size: PYRAMID_BASE_SIZE,
            height: PYRAMID_HEIGHT,
            tip_movement_factor: TIP_MOVEMENT_FACTOR,
            influence_radius: INFLUENCE_RADIUS,
            smooth_factor: SMOOTH_FACTOR,
            max_stretch_factor: MAX_STRETCH_FACTOR,
            color_mode: ColorMode::Palette,
            highlight_color: HIGHLIGHT_COLOR,
            palette: PALETTE.to_vec(),
        }
    }
}

impl FieldConfig {
    /// The earlier look: linear falloff across the whole grid, tips lean but
    /// never stretch, and proximity brightens toward the highlight color.
    pub fn classic() -> Self {
        Self {
            influence_radius: CLASSIC_INFLUENCE_RADIUS,
            smooth_factor: 1.0,
            max_stretch_factor: 1.0,
            color_mode: ColorMode::Highlight,
            palette: vec![MODEL_COLOR],
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let cfg: FieldConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_x == 0 || self.grid_z == 0 {
            return Err(ConfigError::EmptyGrid {
                x: self.grid_x,
                z: self.grid_z,
            });
        }
        // u64 so huge axes cannot wrap on 32-bit targets
        if u64::from(self.grid_x) * u64::from(self.grid_z) > MAX_PYRAMIDS as u64 {
            return Err(ConfigError::GridTooLarge {
                x: self.grid_x,
                z: self.grid_z,
                max: MAX_PYRAMIDS,
            });
        }
        let positive = [
            ("spacing", self.spacing),
            ("base size", self.base_size),
            ("height", self.height),
            ("influence radius", self.influence_radius),
            ("smooth factor", self.smooth_factor),
        ];
        for (name, value) in positive {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(self.max_stretch_factor >= 1.0) {
            return Err(ConfigError::StretchBelowOne(self.max_stretch_factor));
        }
        if !(self.tip_movement_factor >= 0.0) {
            return Err(ConfigError::NegativeTipMovement(self.tip_movement_factor));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Largest lateral distance a tip may lean away from its base center.
    #[inline]
    pub fn max_tip_offset(&self) -> f32 {
        self.base_size * self.tip_movement_factor
    }

    #[inline]
    pub fn pyramid_count(&self) -> usize {
        self.grid_x as usize * self.grid_z as usize
    }
}
