// Host-side tests for the pyramid field.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod config {
    include!("../src/config.rs");
}
mod field {
    include!("../src/field.rs");
}

use config::*;
use constants::PALETTE;
use field::*;
use glam::{Vec2, Vec3};

fn small_config(grid: u32, radius: f32) -> FieldConfig {
    FieldConfig {
        grid_x: grid,
        grid_z: grid,
        spacing: 1.0,
        influence_radius: radius,
        ..FieldConfig::default()
    }
}

// Deterministic wander over the grid for multi-frame tests
fn wander(step: usize) -> Vec3 {
    let t = step as f32 * 0.37;
    Vec3::new(6.0 * t.sin(), 0.0, 5.0 * (1.3 * t).cos())
}

#[test]
fn influence_is_full_at_pointer_and_zero_at_or_beyond_radius() {
    assert_eq!(influence(0.0, 10.0, 0.7), 1.0);
    assert_eq!(influence(10.0, 10.0, 0.7), 0.0);
    assert_eq!(influence(25.0, 10.0, 0.7), 0.0);
    let mid = influence(5.0, 10.0, 0.7);
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn influence_is_monotonic_in_distance() {
    for smooth in [0.3_f32, 0.7, 1.0, 2.0] {
        let mut prev = influence(0.0, 8.0, smooth);
        for i in 1..=200 {
            let d = i as f32 * 0.05;
            let v = influence(d, 8.0, smooth);
            assert!(v <= prev, "influence rose at d={d} smooth={smooth}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}

#[test]
fn smaller_smooth_factor_gives_lower_influence_inside_radius() {
    // x^s grows as s shrinks for x in (0,1), so the falloff starts sooner
    let soft = influence(4.0, 10.0, 0.7);
    let linear = influence(4.0, 10.0, 1.0);
    assert!(soft < linear);
    assert!((linear - 0.6).abs() < 1e-6);
}

#[test]
fn stretch_factor_stays_between_one_and_max() {
    for max in [1.0_f32, 1.5, 2.5, 4.0] {
        assert_eq!(stretch_factor(0.0, max), 1.0);
        assert_eq!(stretch_factor(1.0, max), max);
        for i in 0..=100 {
            let s = stretch_factor(i as f32 / 100.0, max);
            assert!(s >= 1.0 && s <= max, "stretch {s} out of range for max {max}");
        }
    }
}

#[test]
fn tip_over_base_center_is_fully_stretched_and_centered() {
    let cfg = FieldConfig::default();
    let pose = tip_pose(Vec2::new(2.0, -3.0), Vec2::new(2.0, -3.0), 2.0, &cfg);
    assert_eq!(pose.influence, 1.0);
    assert_eq!(pose.offset, Vec2::ZERO);
    assert_eq!(pose.height, 2.0 * cfg.max_stretch_factor);
}

#[test]
fn tip_outside_radius_is_at_rest() {
    let cfg = small_config(1, 3.0);
    let pose = tip_pose(Vec2::new(0.5, 0.5), Vec2::new(-2.5, 0.5), 2.0, &cfg);
    assert_eq!(pose.influence, 0.0);
    assert_eq!(pose.offset, Vec2::ZERO);
    assert_eq!(pose.height, 2.0);
}

#[test]
fn tip_leans_toward_target_within_max_offset() {
    let cfg = FieldConfig::default();
    let base = Vec2::new(1.0, 1.0);
    let target = Vec2::new(4.0, 5.0);
    let pose = tip_pose(base, target, 2.0, &cfg);
    assert!(pose.influence > 0.0);
    let dir = (target - base).normalize();
    assert!(pose.offset.normalize().dot(dir) > 0.9999);
    assert!(pose.offset.length() <= cfg.max_tip_offset() + 1e-6);
    let expected = cfg.max_tip_offset() * pose.influence;
    assert!((pose.offset.length() - expected).abs() < 1e-5);
}

#[test]
fn grid_is_centered_on_origin() {
    let field = PyramidField::new(small_config(2, 1.0));
    let centers: Vec<Vec2> = field.pyramids().iter().map(|p| p.base_center()).collect();
    assert_eq!(
        centers,
        vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(-0.5, 0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
        ]
    );

    let cfg = FieldConfig {
        grid_x: 3,
        grid_z: 1,
        spacing: 2.0,
        ..FieldConfig::default()
    };
    let field = PyramidField::new(cfg);
    let xs: Vec<f32> = field.pyramids().iter().map(|p| p.base_center().x).collect();
    assert_eq!(xs, vec![-2.0, 0.0, 2.0]);
    assert_eq!(field.pyramid_at(1, 0).map(|p| p.base_center()), Some(Vec2::ZERO));
    assert!(field.pyramid_at(3, 0).is_none());
}

#[test]
fn default_grid_has_sixteen_hundred_pyramids() {
    let field = PyramidField::new(FieldConfig::default());
    assert_eq!(field.pyramids().len(), 1600);
}

#[test]
fn pyramid_mesh_has_square_base_and_raised_tip() {
    let p = Pyramid::new(3.0, -1.0, 1.0, 2.0, Vec3::ONE);
    assert_eq!(
        p.base_vertices(),
        &[
            Vec3::new(2.5, 0.0, -1.5),
            Vec3::new(3.5, 0.0, -1.5),
            Vec3::new(3.5, 0.0, -0.5),
            Vec3::new(2.5, 0.0, -0.5),
        ]
    );
    assert_eq!(p.tip(), Vec3::new(3.0, 2.0, -1.0));
    assert_eq!(p.original_height(), 2.0);
}

#[test]
fn pointer_over_corner_cell_stretches_it_and_leaves_opposite_at_rest() {
    let cfg = small_config(2, 1.0);
    let h = cfg.height;
    let max = cfg.max_stretch_factor;
    let mut field = PyramidField::new(cfg);
    field.step(Some(Vec3::new(-0.5, 0.0, -0.5)));

    let near = field.pyramid_at(0, 0).unwrap();
    assert_eq!(near.tip(), Vec3::new(-0.5, h * max, -0.5));

    let far = field.pyramid_at(1, 1).unwrap();
    assert_eq!(far.tip(), Vec3::new(0.5, h, 0.5));
}

#[test]
fn base_vertices_never_move() {
    let mut field = PyramidField::new(small_config(6, 4.0));
    let before: Vec<Vec<[u32; 3]>> = field
        .pyramids()
        .iter()
        .map(|p| p.base_vertices().iter().map(|v| v.to_array().map(f32::to_bits)).collect())
        .collect();
    for step in 0..120 {
        field.step(Some(wander(step)));
    }
    let after: Vec<Vec<[u32; 3]>> = field
        .pyramids()
        .iter()
        .map(|p| p.base_vertices().iter().map(|v| v.to_array().map(f32::to_bits)).collect())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn tip_height_stays_within_bounds_over_many_frames() {
    let cfg = small_config(8, 3.0);
    let (h, max) = (cfg.height, cfg.max_stretch_factor);
    let mut field = PyramidField::new(cfg);
    for step in 0..200 {
        field.step(Some(wander(step)));
        for p in field.pyramids() {
            let y = p.tip().y;
            assert!(y >= h && y <= h * max, "tip height {y} out of range");
        }
    }
}

#[test]
fn missing_hit_keeps_previous_target() {
    let mut field = PyramidField::new(small_config(2, 1.0));
    let t = Vec3::new(0.5, 0.0, 0.5);
    assert!(field.set_target(Some(t)));
    assert!(!field.set_target(None));
    assert_eq!(field.target(), t);
    assert!(!field.set_target(Some(Vec3::new(f32::NAN, 0.0, 0.0))));
    assert_eq!(field.target(), t);

    field.step(None);
    let p = field.pyramid_at(1, 1).unwrap();
    assert_eq!(p.tip().y, p.original_height() * field.config().max_stretch_factor);
    assert!(field.pyramids().iter().all(|p| p.tip().is_finite()));
}

#[test]
fn palette_mode_ignores_pointer_distance() {
    let mut field = PyramidField::new(small_config(4, 2.0));
    field.step(Some(Vec3::new(-1.5, 0.0, -1.5)));
    let base = field.base_color();
    assert_eq!(base, color_from_hex(PALETTE[0]));
    assert!(field.pyramids().iter().all(|p| p.color() == base));
}

#[test]
fn palette_cycles_and_wraps() {
    let mut field = PyramidField::new(small_config(2, 1.0));
    let n = field.config().palette.len();
    for i in 1..=n {
        let c = field.cycle_palette();
        assert_eq!(field.palette_index(), i % n);
        assert_eq!(c, color_from_hex(PALETTE[i % n]));
    }
    field.cycle_palette();
    field.update();
    let expected = color_from_hex(PALETTE[1]);
    assert!(field.pyramids().iter().all(|p| p.color() == expected));
}

#[test]
fn highlight_mode_blends_by_influence() {
    let cfg = FieldConfig {
        color_mode: ColorMode::Highlight,
        ..small_config(2, 1.0)
    };
    let highlight = color_from_hex(cfg.highlight_color);
    let mut field = PyramidField::new(cfg);
    let base = field.base_color();
    field.step(Some(Vec3::new(-0.5, 0.0, -0.5)));
    assert!(field
        .pyramid_at(0, 0)
        .unwrap()
        .color()
        .abs_diff_eq(highlight, 1e-6));
    assert_eq!(field.pyramid_at(1, 1).unwrap().color(), base);
}

#[test]
fn classic_preset_leans_without_stretching() {
    let cfg = FieldConfig {
        grid_x: 3,
        grid_z: 3,
        ..FieldConfig::classic()
    };
    let h = cfg.height;
    let mut field = PyramidField::new(cfg);
    field.step(Some(Vec3::new(3.0, 0.0, 0.0)));
    for p in field.pyramids() {
        assert_eq!(p.tip().y, h);
    }
    let center = field.pyramid_at(1, 1).unwrap();
    assert!(center.tip().x > 0.0);
    assert_eq!(center.tip().z, 0.0);
}

#[test]
fn normals_are_unit_and_point_outward_at_rest() {
    let p = Pyramid::new(0.0, 0.0, 1.0, 2.0, Vec3::ONE);
    for n in p.normals() {
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
    // the apex only touches the four sides, which cancel horizontally
    let apex = p.normals()[4];
    assert!(apex.y > 0.999);
    // base corners mix the downward base with two sides
    for n in &p.normals()[..4] {
        let corner_dir = Vec2::new(n.x, n.z);
        assert!(corner_dir.length() > 0.0);
    }
}

#[test]
fn normals_follow_a_leaning_tip() {
    let cfg = small_config(1, 5.0);
    let mut field = PyramidField::new(cfg);
    let rest = field.pyramids()[0].normals()[4];
    field.step(Some(Vec3::new(2.0, 0.0, 0.0)));
    let leaned = field.pyramids()[0].normals()[4];
    assert_ne!(rest, leaned);
    assert!((leaned.length() - 1.0).abs() < 1e-5);
}

#[test]
fn color_from_hex_splits_channels() {
    assert_eq!(color_from_hex(0xffffff), Vec3::ONE);
    assert_eq!(color_from_hex(0x000000), Vec3::ZERO);
    let c = color_from_hex(0xff8000);
    assert_eq!(c.x, 1.0);
    assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(c.z, 0.0);
}
