use super::helpers::srgb_to_linear;
use crate::constants::{GROUND_COLOR, GROUND_SIZE, GROUND_Y};
use crate::field::{color_from_hex, PyramidField, PYRAMID_INDICES, PYRAMID_VERTEX_COUNT};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneVertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
    // rgb linear, a = specular mask
    pub(crate) color: [f32; 4],
}

impl SceneVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Index list for `count` pyramids laid out back to back in one buffer.
pub(crate) fn pyramid_indices(count: usize) -> Vec<u32> {
    let mut out = Vec::with_capacity(count * PYRAMID_INDICES.len());
    for k in 0..count {
        let base = (k * PYRAMID_VERTEX_COUNT) as u32;
        out.extend(PYRAMID_INDICES.iter().map(|&i| base + i as u32));
    }
    out
}

/// Copy every pyramid's current vertices, normals and color into `out`.
pub(crate) fn pack_pyramids(field: &PyramidField, out: &mut Vec<SceneVertex>) {
    out.clear();
    for p in field.pyramids() {
        let c = srgb_to_linear(p.color());
        let color = [c.x, c.y, c.z, 1.0];
        for (pos, n) in p.positions().iter().zip(p.normals()) {
            out.push(SceneVertex {
                position: pos.to_array(),
                normal: n.to_array(),
                color,
            });
        }
    }
}

pub(crate) fn ground_quad() -> ([SceneVertex; 4], [u32; 6]) {
    let h = GROUND_SIZE / 2.0;
    let c = srgb_to_linear(color_from_hex(GROUND_COLOR));
    let v = |x: f32, z: f32| SceneVertex {
        position: [x, GROUND_Y, z],
        normal: [0.0, 1.0, 0.0],
        color: [c.x, c.y, c.z, 0.0],
    };
    ([v(-h, -h), v(-h, h), v(h, h), v(h, -h)], [0, 1, 2, 0, 2, 3])
}
