//! GPU plumbing shared by the shape renderers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::paint::Paint;
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    fn for_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self {
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

pub(super) fn viewport_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ViewportUniform>() as u64),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<ViewportUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport_ubo(ctx: &RenderCtx<'_>, ubo: &wgpu::Buffer) {
    ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::for_ctx(ctx)));
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex and index buffers, instanced by every shape pipeline.
pub(super) struct QuadGeometry {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
}

impl QuadGeometry {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    /// Binds the quad to slot 0 and `instances` to slot 1.
    pub(super) fn bind<'p>(&self, rpass: &mut wgpu::RenderPass<'p>, instances: &wgpu::Buffer) {
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
    }
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable GPU vertex buffer holding per-instance data.
///
/// Capacity grows to the next power of two (minimum 64) and never shrinks.
pub(super) struct InstanceBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    pub(super) const fn new(label: &'static str) -> Self {
        Self { label, buffer: None, capacity: 0 }
    }

    /// Uploads `data`, growing the buffer first when needed.
    pub(super) fn upload<T: Pod>(&mut self, ctx: &RenderCtx<'_>, data: &[T]) {
        if data.is_empty() {
            return;
        }

        if data.len() > self.capacity || self.buffer.is_none() {
            let cap = data.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = cap;
        }

        if let Some(buffer) = self.buffer.as_ref() {
            ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        }
    }

    #[inline]
    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Builds an instanced unit-quad pipeline with premultiplied alpha blending.
///
/// The shader must expose `vs_main` and `fs_main`; the quad occupies vertex
/// location 0 and instance attributes start at location 1.
pub(super) fn create_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_src: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
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
}

/// Pipeline whose only binding is the viewport uniform.
///
/// Rebuilt when the surface format changes.
pub(super) struct ViewportPipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: QuadGeometry,
}

impl ViewportPipeline {
    /// Returns the cached pipeline, creating it when missing or stale.
    pub(super) fn ensure<'s>(
        slot: &'s mut Option<ViewportPipeline>,
        ctx: &RenderCtx<'_>,
        label: &str,
        shader_src: &str,
        instance_layout: wgpu::VertexBufferLayout<'static>,
    ) -> &'s mut ViewportPipeline {
        if slot.as_ref().is_some_and(|p| p.format != ctx.surface_format) {
            *slot = None;
        }

        slot.get_or_insert_with(|| {
            let bind_group_layout =
                ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some(label),
                    entries: &[viewport_layout_entry()],
                });
            let viewport_ubo = create_viewport_ubo(ctx, label);
            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                }],
            });
            let pipeline =
                create_quad_pipeline(ctx, label, shader_src, &bind_group_layout, instance_layout);

            ViewportPipeline {
                format: ctx.surface_format,
                pipeline,
                bind_group,
                viewport_ubo,
                quad: QuadGeometry::new(ctx, label),
            }
        })
    }

    pub(super) fn write_viewport(&self, ctx: &RenderCtx<'_>) {
        write_viewport_ubo(ctx, &self.viewport_ubo);
    }

    /// Draws `range` of the instances in `instances`.
    pub(super) fn draw(
        &self,
        rpass: &mut wgpu::RenderPass<'_>,
        instances: &wgpu::Buffer,
        range: std::ops::Range<u32>,
    ) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.quad.bind(rpass, instances);
        rpass.draw_indexed(0..6, 0, range);
    }
}

// ── paint resolution ──────────────────────────────────────────────────────

/// Paint flattened for the gradient-capable rect shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct ResolvedPaint {
    pub color0: [f32; 4],
    pub color1: [f32; 4],
    pub grad_p0: [f32; 2],
    pub grad_p1: [f32; 2],
}

/// Flattens `paint` into two colors and a gradient axis.
///
/// Solid fills get a zero-length axis, so the shader uses `color0`. Gradients
/// keep their first and last stop; extra stops emit one debug message.
pub(super) fn resolve_paint(paint: &Paint, warned_multi_stop: &mut bool) -> ResolvedPaint {
    let solid = |col: [f32; 4]| ResolvedPaint {
        color0: col,
        color1: col,
        grad_p0: [0.0, 0.0],
        grad_p1: [0.0, 0.0],
    };

    match paint {
        Paint::Solid(c) => solid(c.to_array()),
        Paint::LinearGradient(g) => {
            let (Some(first), Some(last)) = (g.stops.first(), g.stops.last()) else {
                return solid([0.0; 4]);
            };
            if g.stops.len() < 2 {
                return solid(first.color.to_array());
            }
            if g.stops.len() > 2 && !*warned_multi_stop {
                log::debug!("only 2-stop gradients supported; using first and last stop");
                *warned_multi_stop = true;
            }
            ResolvedPaint {
                color0: first.color.to_array(),
                color1: last.color.to_array(),
                grad_p0: [g.start.x, g.start.y],
                grad_p1: [g.end.x, g.end.y],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{Color, ColorStop, LinearGradient};

    #[test]
    fn solid_paint_has_degenerate_axis() {
        let mut warned = false;
        let r = resolve_paint(&Paint::Solid(Color::GRAY), &mut warned);
        assert_eq!(r.color0, r.color1);
        assert_eq!(r.grad_p0, r.grad_p1);
        assert!(!warned);
    }

    #[test]
    fn multi_stop_gradient_keeps_endpoints() {
        let g = LinearGradient::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            vec![
                ColorStop::new(0.0, Color::BLACK),
                ColorStop::new(0.5, Color::GRAY),
                ColorStop::new(1.0, Color::WHITE),
            ],
        );
        let mut warned = false;
        let r = resolve_paint(&Paint::LinearGradient(g), &mut warned);
        assert_eq!(r.color0, Color::BLACK.to_array());
        assert_eq!(r.color1, Color::WHITE.to_array());
        assert_eq!(r.grad_p1, [0.0, 10.0]);
        assert!(warned);
    }

    #[test]
    fn empty_gradient_is_transparent() {
        let g = LinearGradient::new(Vec2::zero(), Vec2::new(1.0, 0.0), Vec::new());
        let mut warned = false;
        let r = resolve_paint(&Paint::LinearGradient(g), &mut warned);
        assert_eq!(r.color0, [0.0; 4]);
    }
}
