use std::ops::Range;

use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::shapes::{LineRenderer, RectRenderer, TextRenderer};
use super::{RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BatchKind {
    Rect,
    Line,
    Text,
}

/// Consecutive paint-order items drawn by one renderer.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: BatchKind,
    instances: Range<u32>,
}

/// Appends `range` to the last batch when it continues it, else starts a new one.
fn extend_batches(batches: &mut Vec<Batch>, kind: BatchKind, range: Range<u32>) {
    if range.is_empty() {
        return;
    }
    match batches.last_mut() {
        Some(last) if last.kind == kind && last.instances.end == range.start => {
            last.instances.end = range.end;
        }
        _ => batches.push(Batch { kind, instances: range }),
    }
}

/// Draws a whole [`DrawList`] in paint order.
///
/// Items are queued into the per-shape renderers, uploaded once, then drawn
/// as runs of the same kind. Each run gets its own render pass, so layering
/// across shape kinds follows the list's z order.
#[derive(Default)]
pub struct SceneRenderer {
    rects: RectRenderer,
    lines: LineRenderer,
    text: TextRenderer,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.rects.begin();
        self.lines.begin();
        self.text.begin();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            let (kind, range) = match &item.cmd {
                DrawCmd::Rect(cmd) => (BatchKind::Rect, self.rects.queue(cmd)),
                DrawCmd::Polyline(cmd) => (BatchKind::Line, self.lines.queue(cmd)),
                DrawCmd::Text(cmd) => (BatchKind::Text, self.text.queue(ctx, cmd, fonts)),
            };
            extend_batches(&mut self.batches, kind, range);
        }

        if self.batches.is_empty() {
            return;
        }

        self.rects.upload(ctx);
        self.lines.upload(ctx);
        self.text.upload(ctx);

        for batch in &self.batches {
            let mut rpass = target.begin_load_pass("anomaly scene pass");
            let range = batch.instances.clone();
            match batch.kind {
                BatchKind::Rect => self.rects.draw(&mut rpass, range),
                BatchKind::Line => self.lines.draw(&mut rpass, range),
                BatchKind::Text => self.text.draw(&mut rpass, range),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_ranges_of_same_kind_merge() {
        let mut batches = Vec::new();
        extend_batches(&mut batches, BatchKind::Rect, 0..1);
        extend_batches(&mut batches, BatchKind::Rect, 1..2);
        extend_batches(&mut batches, BatchKind::Line, 0..3);
        extend_batches(&mut batches, BatchKind::Line, 3..3);
        extend_batches(&mut batches, BatchKind::Rect, 2..4);

        assert_eq!(
            batches,
            vec![
                Batch { kind: BatchKind::Rect, instances: 0..2 },
                Batch { kind: BatchKind::Line, instances: 0..3 },
                Batch { kind: BatchKind::Rect, instances: 2..4 },
            ]
        );
    }
}
