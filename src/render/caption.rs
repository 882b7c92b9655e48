use crate::assets::font::FontBytes;
use crate::foundation::core::Dimensions;
use crate::foundation::error::{IntensifyError, IntensifyResult};

/// Caption height as a fraction of the frame height.
pub const CAPTION_SIZE_RATIO: f32 = 0.045;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    fn to_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

pub const CAPTION_FILL: TextBrushRgba8 = TextBrushRgba8::opaque(255, 255, 0);
pub const CAPTION_OUTLINE: TextBrushRgba8 = TextBrushRgba8::opaque(0, 0, 0);

/// Where and how large the caption is drawn inside a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionPlacement {
    pub font_size: f32,
    /// Horizontal centre of the text.
    pub anchor_x: f32,
    /// Baseline of the first line.
    pub baseline_y: f32,
    pub outline_width: f32,
}

impl CaptionPlacement {
    pub fn for_frame(frame: Dimensions) -> Self {
        let width = frame.width as f32;
        let height = frame.height as f32;
        let font_size = height * CAPTION_SIZE_RATIO;
        Self {
            font_size,
            anchor_x: (width / 2.0).round(),
            baseline_y: (height - 1.5 * font_size).round(),
            outline_width: font_size / 10.0,
        }
    }
}

/// Stateful helper for building Parley text layouts.
///
/// Fonts are registered once; layouts name a family and fall back to the platform's sans-serif
/// fonts for anything it cannot shape.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register raw font bytes and return the family name they provide.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> IntensifyResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| IntensifyError::font("no font families registered from font bytes"))?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| IntensifyError::font("registered font family has no name"))?
            .to_string())
    }

    /// Name of the first installed family behind the generic `sans-serif` family.
    pub fn system_sans_serif(&mut self) -> IntensifyResult<String> {
        let family_id = self
            .font_ctx
            .collection
            .generic_families(parley::fontique::GenericFamily::SansSerif)
            .next()
            .ok_or_else(|| IntensifyError::font("no system sans-serif font installed"))?;
        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| IntensifyError::font("system font family has no name"))?
            .to_string())
    }

    /// Shape and lay out unwrapped text in `family`, centering every line on the widest one.
    pub fn layout_plain(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> IntensifyResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(IntensifyError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let stack = format!("\"{}\", sans-serif", family.replace('"', ""));
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        let width = layout.width();
        layout.align(
            Some(width),
            parley::Alignment::Center,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

/// A rasterized caption, premultiplied RGBA8 at frame size, transparent outside the text.
#[derive(Clone, Debug)]
pub struct CaptionLayer {
    pub width: u32,
    pub height: u32,
    pub(crate) premul: Vec<u8>,
}

impl CaptionLayer {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Number of pixels with any coverage.
    pub fn covered_pixels(&self) -> usize {
        self.premul.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

/// Draws outlined, centered captions with one font.
pub struct CaptionRenderer {
    engine: TextLayoutEngine,
    font_bytes: Option<FontBytes>,
    family: String,
}

impl CaptionRenderer {
    /// Renderer for the given font file contents.
    ///
    /// Fails with [`IntensifyError::Font`] when the bytes do not hold a usable font.
    pub fn new(font_bytes: FontBytes) -> IntensifyResult<Self> {
        let mut engine = TextLayoutEngine::new();
        let family = engine.register_font(font_bytes.as_slice())?;
        Ok(Self {
            engine,
            font_bytes: Some(font_bytes),
            family,
        })
    }

    /// Renderer for the platform's default sans-serif font.
    pub fn system() -> IntensifyResult<Self> {
        let mut engine = TextLayoutEngine::new();
        let family = engine.system_sans_serif()?;
        Ok(Self {
            engine,
            font_bytes: None,
            family,
        })
    }

    /// Font file contents, when the renderer was built from bytes rather than a system font.
    pub fn font_bytes(&self) -> Option<&FontBytes> {
        self.font_bytes.as_ref()
    }

    pub fn family_name(&self) -> &str {
        &self.family
    }

    /// Rasterize `text` into a transparent layer sized for `frame`.
    ///
    /// The outline is stroked first and the fill drawn on top, so the outline only shows around
    /// the glyph edges.
    #[tracing::instrument(skip(self))]
    pub fn render_layer(&mut self, text: &str, frame: Dimensions) -> IntensifyResult<CaptionLayer> {
        let w: u16 = frame
            .width
            .try_into()
            .map_err(|_| IntensifyError::render("caption frame width exceeds u16"))?;
        let h: u16 = frame
            .height
            .try_into()
            .map_err(|_| IntensifyError::render("caption frame height exceeds u16"))?;

        let placement = CaptionPlacement::for_frame(frame);
        let layout =
            self.engine
                .layout_plain(text, &self.family, placement.font_size, CAPTION_FILL)?;

        let first_baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(0.0);
        let origin_x = placement.anchor_x - layout.width() / 2.0;
        let origin_y = placement.baseline_y - first_baseline;
        tracing::debug!(
            font_size = placement.font_size,
            origin_x,
            origin_y,
            "laid out caption"
        );

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(origin_x),
            f64::from(origin_y),
        )));

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(
            placement.outline_width,
        )));
        ctx.set_paint(CAPTION_OUTLINE.to_color());
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .stroke_glyphs(glyphs);
            }
        }

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(brush.to_color());
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(CaptionLayer {
            width: frame.width,
            height: frame.height,
            premul: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
