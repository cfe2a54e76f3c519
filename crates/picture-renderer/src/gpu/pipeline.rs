//! GPU-side layouts and fixed state for the picture pipeline.

use bytemuck::{Pod, Zeroable};

use crate::host::{BlendMode, QuadGeometry};

// ── blend ─────────────────────────────────────────────────────────────────

const PREMUL_OVER: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::One,
    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
    operation: wgpu::BlendOperation::Add,
};

/// Blend state for `mode`, assuming premultiplied-alpha fragments.
pub(super) fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    let color = match mode {
        BlendMode::Normal => PREMUL_OVER,
        BlendMode::Add => wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        BlendMode::Multiply => wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Dst,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        BlendMode::Screen => wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrc,
            operation: wgpu::BlendOperation::Add,
        },
    };
    let alpha = match mode {
        BlendMode::Add => color,
        _ => PREMUL_OVER,
    };
    wgpu::BlendState { color, alpha }
}

/// Slot of `mode` in per-shader pipeline arrays (ordered like `BlendMode::ALL`).
#[inline]
pub(super) fn blend_index(mode: BlendMode) -> usize {
    match mode {
        BlendMode::Normal => 0,
        BlendMode::Add => 1,
        BlendMode::Multiply => 2,
        BlendMode::Screen => 3,
    }
}

// ── uniforms ──────────────────────────────────────────────────────────────

/// Layout (48 bytes):
///
///  offset  0  viewport       [f32; 2]
///  offset  8  _pad           [f32; 2]
///  offset 16  texture_clamp  [f32; 4]   uTextureClamp
///  offset 32  color          [f32; 4]   uColor
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub(super) struct PictureUniforms {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2],
    pub texture_clamp: [f32; 4],
    pub color: [f32; 4],
}

pub(super) fn uniforms_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<PictureUniforms>() as u64)
        .expect("PictureUniforms has non-zero size")
}

// ── vertices ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub(super) struct PictureVertex {
    pub pos: [f32; 2], // logical px
    pub uv: [f32; 2],
}

impl PictureVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PictureVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Interleaves staged positions and UVs into GPU vertices.
pub(super) fn interleave(geometry: &QuadGeometry) -> [PictureVertex; 4] {
    let v = &geometry.vertices;
    let t = &geometry.uvs;
    core::array::from_fn(|i| PictureVertex {
        pos: [v[i * 2], v[i * 2 + 1]],
        uv: [t[i * 2], t[i * 2 + 1]],
    })
}

/// TL, TR, BR / TL, BR, BL.
pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_48_bytes() {
        assert_eq!(std::mem::size_of::<PictureUniforms>(), 48);
        assert_eq!(uniforms_min_binding_size().get(), 48);
    }

    #[test]
    fn interleave_pairs_corners() {
        let g = QuadGeometry {
            vertices: [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            uvs: [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
        };
        let out = interleave(&g);
        assert_eq!(out[2], PictureVertex { pos: [4.0, 5.0], uv: [0.4, 0.5] });
        assert_eq!(out[3], PictureVertex { pos: [6.0, 7.0], uv: [0.6, 0.7] });
    }

    #[test]
    fn blend_slots_follow_all_order() {
        for (i, mode) in BlendMode::ALL.into_iter().enumerate() {
            assert_eq!(blend_index(mode), i);
        }
    }

    #[test]
    fn normal_blend_is_premultiplied_over() {
        let b = blend_state(BlendMode::Normal);
        assert_eq!(b.color.src_factor, wgpu::BlendFactor::One);
        assert_eq!(b.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
        assert_eq!(b.alpha, b.color);
    }
}
