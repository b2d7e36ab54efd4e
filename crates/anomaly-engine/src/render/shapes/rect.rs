use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::RectCmd;

use super::common::{resolve_paint, InstanceBuffer, ViewportPipeline};

/// Renderer for `DrawCmd::Rect`: solid fills and two-stop linear gradients.
///
/// Color is linear premultiplied RGBA (`paint::Color`).
pub struct RectRenderer {
    pipeline: Option<ViewportPipeline>,
    instances: Vec<RectInstance>,
    instance_vbo: InstanceBuffer,
    warned_multi_stop: bool,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            instances: Vec::new(),
            instance_vbo: InstanceBuffer::new("anomaly rect instance vbo"),
            warned_multi_stop: false,
        }
    }
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops instances queued for the previous frame.
    pub fn begin(&mut self) {
        self.instances.clear();
    }

    /// Queues `cmd` and returns its instance range. Empty rects yield an empty range.
    pub fn queue(&mut self, cmd: &RectCmd) -> Range<u32> {
        let start = self.instances.len() as u32;

        let r = cmd.rect.normalized();
        if !r.is_empty() && r.is_finite() {
            let paint = resolve_paint(&cmd.paint, &mut self.warned_multi_stop);
            self.instances.push(RectInstance {
                origin: [r.origin.x, r.origin.y],
                size: [r.size.x, r.size.y],
                color0: paint.color0,
                color1: paint.color1,
                grad_p0: paint.grad_p0,
                grad_p1: paint.grad_p1,
            });
        }

        start..self.instances.len() as u32
    }

    /// Number of instances queued this frame.
    #[inline]
    pub fn queued(&self) -> usize {
        self.instances.len()
    }

    /// Creates GPU resources on first use and uploads queued instances.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.is_empty() {
            return;
        }
        let pipeline = ViewportPipeline::ensure(
            &mut self.pipeline,
            ctx,
            "anomaly rect pipeline",
            include_str!("shaders/rect.wgsl"),
            RectInstance::layout(),
        );
        pipeline.write_viewport(ctx);
        self.instance_vbo.upload(ctx, &self.instances);
    }

    /// Draws a range previously returned by [`queue`](Self::queue).
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(pipeline), Some(vbo)) = (self.pipeline.as_ref(), self.instance_vbo.buffer()) else {
            return;
        };
        pipeline.draw(rpass, vbo, range);
    }
}

/// Instance data layout (64 bytes):
///
///  offset  0  origin   [f32; 2]   loc 1
///  offset  8  size     [f32; 2]   loc 2
///  offset 16  color0   [f32; 4]   loc 3
///  offset 32  color1   [f32; 4]   loc 4
///  offset 48  grad_p0  [f32; 2]   loc 5
///  offset 56  grad_p1  [f32; 2]   loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color0: [f32; 4],
    color1: [f32; 4],
    grad_p0: [f32; 2],
    grad_p1: [f32; 2],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x2,
        6 => Float32x2
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::{Color, Paint};

    fn cmd(rect: Rect) -> RectCmd {
        RectCmd::new(rect, Paint::Solid(Color::WHITE))
    }

    #[test]
    fn queue_returns_contiguous_ranges() {
        let mut r = RectRenderer::new();
        assert_eq!(r.queue(&cmd(Rect::new(0.0, 0.0, 10.0, 1.0))), 0..1);
        assert_eq!(r.queue(&cmd(Rect::new(0.0, 1.0, 10.0, 1.0))), 1..2);
        assert_eq!(r.queued(), 2);

        r.begin();
        assert_eq!(r.queued(), 0);
        assert_eq!(r.queue(&cmd(Rect::new(0.0, 0.0, 1.0, 1.0))), 0..1);
    }

    #[test]
    fn empty_rect_queues_nothing() {
        let mut r = RectRenderer::new();
        assert!(r.queue(&cmd(Rect::new(5.0, 5.0, 0.0, 3.0))).is_empty());
        assert_eq!(r.queued(), 0);
    }

    #[test]
    fn negative_size_is_normalized() {
        let mut r = RectRenderer::new();
        r.queue(&cmd(Rect::new(10.0, 10.0, -4.0, -2.0)));
        assert_eq!(r.instances[0].origin, [6.0, 8.0]);
        assert_eq!(r.instances[0].size, [4.0, 2.0]);
    }
}
