use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::tess::{PrimitiveKind, PrimitiveSink};

use super::{RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PolygonVertex {
    pub pos: [f32; 2],
    /// Premultiplied RGBA.
    pub color: [f32; 4],
}

impl PolygonVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PolygonVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side triangle list for one frame.
///
/// Implements [`PrimitiveSink`]: every convex polygon is fanned from its first
/// vertex into triangles carrying the current premultiplied colour.
#[derive(Debug, Default)]
pub struct PolygonBatch {
    vertices: Vec<PolygonVertex>,
    clear: Color,
    color: [f32; 4],
}

impl PolygonBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[PolygonVertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> Color {
        self.clear
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl PrimitiveSink for PolygonBatch {
    fn begin_frame(&mut self, clear: Color) {
        self.vertices.clear();
        self.clear = clear;
        self.color = Color::BLACK.to_premul_f32();
    }

    fn set_color(&mut self, color: Color) {
        self.color = color.to_premul_f32();
    }

    fn fill_polygon(&mut self, _kind: PrimitiveKind, points: &[Vec2]) {
        if points.len() < 3 {
            return;
        }
        let [first, rest @ ..] = points else { return };
        let color = self.color;
        let vertex = |p: &Vec2| PolygonVertex { pos: p.to_f32(), color };

        for pair in rest.windows(2) {
            self.vertices.push(vertex(first));
            self.vertices.push(vertex(&pair[0]));
            self.vertices.push(vertex(&pair[1]));
        }
    }
}

/// Uploads a [`PolygonBatch`] and draws it in a single clearing pass.
#[derive(Default)]
pub struct PolygonRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl PolygonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears `target` with the batch's clear colour and draws its triangles.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, batch: &PolygonBatch) {
        self.ensure_pipeline(ctx);

        let vertices = batch.vertices();
        if !vertices.is_empty() {
            self.ensure_vertex_capacity(ctx, vertices.len());
            if let Some(vbo) = self.vertex_vbo.as_ref() {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
            }
        }

        let [r, g, b, a] = batch.clear_color().to_premul_f32();
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quill polygon pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if vertices.is_empty() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(vbo) = self.vertex_vbo.as_ref() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..vertices.len() as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quill polygon shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/polygon.wgsl").into()),
        });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("quill polygon pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quill polygon pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PolygonVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Joint and segment winding varies with direction; never cull.
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
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        log::debug!("render: growing vertex buffer to {new_cap} vertices");

        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quill polygon vbo"),
            size: (new_cap * std::mem::size_of::<PolygonVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}
