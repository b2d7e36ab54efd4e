use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::PolylineCmd;

use super::common::{InstanceBuffer, ViewportPipeline};

/// Renderer for `DrawCmd::Polyline`.
///
/// Every segment becomes one instanced quad, extended by half the stroke
/// width past both endpoints so that corners of closed outlines meet.
pub struct LineRenderer {
    pipeline: Option<ViewportPipeline>,
    instances: Vec<LineInstance>,
    instance_vbo: InstanceBuffer,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            instances: Vec::new(),
            instance_vbo: InstanceBuffer::new("anomaly line instance vbo"),
        }
    }
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.instances.clear();
    }

    /// Queues every segment of `cmd` and returns the instance range.
    pub fn queue(&mut self, cmd: &PolylineCmd) -> Range<u32> {
        let start = self.instances.len() as u32;
        let half_width = cmd.width * 0.5;
        let color = cmd.color.to_array();

        for (a, b) in cmd.segments() {
            if !(a.is_finite() && b.is_finite()) {
                continue;
            }
            self.instances.push(LineInstance {
                p0: [a.x, a.y],
                p1: [b.x, b.y],
                half_width,
                color,
            });
        }

        start..self.instances.len() as u32
    }

    #[inline]
    pub fn queued(&self) -> usize {
        self.instances.len()
    }

    pub fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        let pipeline = ViewportPipeline::ensure(
            &mut self.pipeline,
            ctx,
            "anomaly line pipeline",
            include_str!("shaders/line.wgsl"),
            LineInstance::layout(),
        );
        pipeline.write_viewport(ctx);
        self.instance_vbo.upload(ctx, &self.instances);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(pipeline), Some(vbo)) = (self.pipeline.as_ref(), self.instance_vbo.buffer()) else {
            return;
        };
        pipeline.draw(rpass, vbo, range);
    }
}

/// Instance data layout (36 bytes):
///
///  offset  0  p0          [f32; 2]   loc 1
///  offset  8  p1          [f32; 2]   loc 2
///  offset 16  half_width  f32        loc 3
///  offset 20  color       [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    half_width: f32,
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32,
        4 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn square(closed: bool) -> PolylineCmd {
        PolylineCmd {
            points: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ],
            closed,
            width: 2.0,
            color: Color::GRAY,
        }
    }

    #[test]
    fn closed_square_is_four_segments() {
        let mut r = LineRenderer::new();
        assert_eq!(r.queue(&square(true)), 0..4);
        assert_eq!(r.queue(&square(false)), 4..7);
        assert_eq!(r.instances[0].half_width, 1.0);
        assert_eq!(r.instances[3].p1, [0.0, 0.0]);
    }

    #[test]
    fn non_finite_segments_are_skipped() {
        let mut r = LineRenderer::new();
        let mut cmd = square(false);
        cmd.points[1] = Vec2::new(f32::NAN, 0.0);
        assert_eq!(r.queue(&cmd), 0..1);
    }

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 36);
    }
}
