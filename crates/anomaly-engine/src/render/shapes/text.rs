use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, ShelfPacker};
use crate::scene::shapes::TextCmd;
use crate::text::FontSystem;

use super::common::{
    create_quad_pipeline, create_viewport_ubo, viewport_layout_entry, write_viewport_ubo,
    InstanceBuffer, QuadGeometry,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// GPU objects, created together on first use and rebuilt on format change.
struct TextGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: QuadGeometry,
    atlas: wgpu::Texture,
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue on first use into an R8 atlas, keyed by
/// `GlyphRasterConfig` (font, glyph index, pixel size). When the atlas fills
/// up, the remaining glyphs of that frame are skipped and the atlas is
/// rebuilt from scratch at the start of the next frame.
pub struct TextRenderer {
    gpu: Option<TextGpu>,
    packer: ShelfPacker,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    atlas_full: bool,
    warned_unknown_font: bool,

    instances: Vec<GlyphInstance>,
    instance_vbo: InstanceBuffer,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            packer: ShelfPacker::new(ATLAS_SIZE, GLYPH_PADDING),
            glyph_cache: HashMap::new(),
            atlas_full: false,
            warned_unknown_font: false,
            instances: Vec::new(),
            instance_vbo: InstanceBuffer::new("anomaly text instance vbo"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.instances.clear();
        if self.atlas_full {
            log::debug!("text atlas full; rebuilding ({} cached glyphs)", self.glyph_cache.len());
            self.glyph_cache.clear();
            self.packer.reset();
            self.atlas_full = false;
        }
    }

    /// Lays out `cmd`, rasterizing any new glyphs, and returns its instance range.
    pub fn queue(&mut self, ctx: &RenderCtx<'_>, cmd: &TextCmd, fonts: &FontSystem) -> Range<u32> {
        let start = self.instances.len() as u32;

        let Some(font) = fonts.get(cmd.font) else {
            if !self.warned_unknown_font {
                log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
                self.warned_unknown_font = true;
            }
            return start..start;
        };

        self.ensure_gpu(ctx);

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x,
            y: cmd.origin.y,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

        // Copy positions out so the layout borrow ends before the cache is mutated.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        let color = cmd.color.to_array();
        for (key, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                let Some(entry) =
                    self.place_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                else {
                    continue;
                };
                self.glyph_cache.insert(key, entry);
            }

            let Some(cached) = self.glyph_cache.get(&key) else { continue };
            self.instances.push(GlyphInstance {
                dst_min: [x, y],
                dst_max: [x + w as f32, y + h as f32],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
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
        if let Some(gpu) = self.gpu.as_ref() {
            write_viewport_ubo(ctx, &gpu.viewport_ubo);
        }
        self.instance_vbo.upload(ctx, &self.instances);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(gpu), Some(vbo)) = (self.gpu.as_ref(), self.instance_vbo.buffer()) else {
            return;
        };
        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        gpu.quad.bind(rpass, vbo);
        rpass.draw_indexed(0..6, 0, range);
    }

    // ── atlas ──────────────────────────────────────────────────────────────

    fn place_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        if self.atlas_full || w == 0 || h == 0 {
            return None;
        }

        let Some((gx, gy)) = self.packer.allocate(w, h) else {
            log::warn!(
                "TextRenderer: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); \
                 skipping glyphs until next frame"
            );
            self.atlas_full = true;
            return None;
        };

        let atlas = &self.gpu.as_ref()?.atlas;
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let size = self.packer.size() as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / size, gy as f32 / size],
            uv_max: [(gx + w) as f32 / size, (gy + h) as f32 / size],
        })
    }

    // ── lazy init ──────────────────────────────────────────────────────────

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) {
        if self.gpu.as_ref().is_some_and(|g| g.format == ctx.surface_format) {
            return;
        }

        let atlas = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("anomaly text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("anomaly text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("anomaly text bgl"),
            entries: &[
                viewport_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let viewport_ubo = create_viewport_ubo(ctx, "anomaly text viewport ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("anomaly text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = create_quad_pipeline(
            ctx,
            "anomaly text pipeline",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        // A fresh atlas invalidates every cached UV.
        self.glyph_cache.clear();
        self.packer.reset();
        self.atlas_full = false;

        self.gpu = Some(TextGpu {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad: QuadGeometry::new(ctx, "anomaly text quad"),
            atlas,
        });
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
