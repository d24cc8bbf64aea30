// Scene, interaction and page tuning constants.
//
// These keep magic numbers out of the code; `FieldConfig::default()` is built
// from the field values below.

// Grid layout
pub const GRID_X: u32 = 40;
pub const GRID_Z: u32 = 40;
pub const GRID_SPACING: f32 = 1.0;
pub const MAX_PYRAMIDS: usize = 1600; // upper bound for overridden grids

// Pyramid geometry
pub const PYRAMID_BASE_SIZE: f32 = 1.0;
pub const PYRAMID_HEIGHT: f32 = 2.0;
pub const TIP_VERTEX_INDEX: usize = 4;

// Pointer influence
pub const TIP_MOVEMENT_FACTOR: f32 = 0.5; // fraction of the base size the tip may travel
pub const INFLUENCE_RADIUS: f32 = 10.0;
pub const SMOOTH_FACTOR: f32 = 0.7; // exponent on normalized distance; <1 widens the plateau
pub const MAX_STRETCH_FACTOR: f32 = 2.5; // tip height multiplier right under the pointer

// Earlier variant: linear falloff over a wide radius, no stretch
pub const CLASSIC_INFLUENCE_RADIUS: f32 = 40.0;

// Colors (0xRRGGBB)
pub const MODEL_COLOR: u32 = 0xcccccc;
pub const HIGHLIGHT_COLOR: u32 = 0xffffff;
pub const PALETTE: [u32; 6] = [0xcccccc, 0x6fa8dc, 0xe06666, 0x93c47d, 0xffd966, 0x8e7cc3];
pub const BACKGROUND_COLOR: u32 = 0x111111;

// Ground plane
pub const GROUND_SIZE: f32 = 50.0;
pub const GROUND_Y: f32 = -0.01; // just under the pyramid bases
pub const GROUND_COLOR: u32 = 0x333333;

// Camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 15.0, 20.0];

// Lighting (Phong)
pub const AMBIENT_INTENSITY: f32 = 0.7;
pub const DIRECTIONAL_LIGHTS: [([f32; 3], f32); 3] = [
    ([5.0, 10.0, 5.0], 1.0),
    ([-5.0, 8.0, -5.0], 0.8),
    ([0.0, 10.0, -10.0], 0.6),
];
pub const SHININESS: f32 = 30.0;
pub const SPECULAR_COLOR: u32 = 0x444444;

// Page wiring
pub const BACKGROUND_MOUNT_ID: &str = "interactive-background";
pub const FIELD_CONFIG_ATTR: &str = "data-field-config";
pub const GALLERY_CONTAINER_ID: &str = "gallery-container";
pub const MANIFEST_ATTR: &str = "data-manifest";
pub const MANIFEST_URL: &str = "data/artworks.json";
pub const FILTER_ATTR: &str = "data-filter";
pub const SORT_ATTR: &str = "data-sort";
pub const TILE_INDEX_ATTR: &str = "data-tile-index";
pub const PALETTE_KEY: &str = "c";
