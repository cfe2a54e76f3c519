//! Shader and quad resources owned by renderer plugins.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use wgpu::util::DeviceExt;

use crate::host::{BlendMode, ShaderVariant};

use super::pipeline::{
    blend_state, uniforms_min_binding_size, PictureUniforms, PictureVertex, QUAD_INDICES,
};
use super::RenderCtx;

/// Picture shader program: one pipeline per blend mode, a uniform block,
/// and the texture bind group layout.
#[derive(Clone)]
pub struct WgpuShader(pub(super) Rc<ShaderResources>);

pub(super) struct ShaderResources {
    pub variant: ShaderVariant,
    pub format: wgpu::TextureFormat,
    pub pipelines: [wgpu::RenderPipeline; 4],
    pub texture_layout: wgpu::BindGroupLayout,
    pub ubo: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,

    // CPU copy of the uniform block; written to `ubo` right before each draw.
    pub uniforms: Cell<PictureUniforms>,
    pub sampler_unit: Cell<u32>,
}

impl WgpuShader {
    pub(super) fn create(ctx: &RenderCtx<'_>, variant: ShaderVariant) -> Result<Self> {
        anyhow::ensure!(
            !ctx.surface_format.has_depth_aspect(),
            "picture shader needs a color target, got {:?}",
            ctx.surface_format
        );

        let source = match variant {
            ShaderVariant::Normal => include_str!("shaders/picture.wgsl"),
        };
        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("picture shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let uniform_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("picture uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(uniforms_min_binding_size()),
                },
                count: None,
            }],
        });

        let texture_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("picture texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("picture pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            immediate_size: 0,
        });

        let pipelines = BlendMode::ALL.map(|mode| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("picture pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[PictureVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(blend_state(mode)),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("picture uniform ubo"),
            size: std::mem::size_of::<PictureUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("picture uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        let shader = Self(Rc::new(ShaderResources {
            variant,
            format: ctx.surface_format,
            pipelines,
            texture_layout,
            ubo,
            uniform_bind_group,
            uniforms: Cell::new(PictureUniforms::default()),
            sampler_unit: Cell::new(0),
        }));
        log::debug!("picture shader {:?} created for {:?}", shader.variant(), shader.format());
        Ok(shader)
    }

    pub fn variant(&self) -> ShaderVariant {
        self.0.variant
    }

    /// Target format the pipelines were built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.0.format
    }
}

/// Quad vertex/index buffers. Vertices are rewritten on every upload.
#[derive(Clone)]
pub struct WgpuQuad(pub(super) Rc<QuadResources>);

pub(super) struct QuadResources {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl WgpuQuad {
    pub(super) fn create(ctx: &RenderCtx<'_>) -> Self {
        let vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("picture quad vbo"),
            size: (4 * std::mem::size_of::<PictureVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("picture quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self(Rc::new(QuadResources { vbo, ibo }))
    }
}
