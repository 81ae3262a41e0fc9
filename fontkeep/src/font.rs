// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sized font resources backed by the shared atlas.

use core::fmt;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use linebender_resource_handle::{Blob, FontData};
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::BoundingBox;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::atlas::{AtlasRegion, GlyphAtlas};
use crate::error::LoadError;

/// Padding in pixels added to each side of a glyph to prevent texture bleeding.
pub const GLYPH_PADDING: u32 = 1;

/// Vertical metrics of a face at a given size, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the alignment box.
    pub ascender: f32,
    /// Distance from the baseline to the bottom of the alignment box.
    /// Negative for faces that extend below the baseline.
    pub descender: f32,
    /// Recommended additional spacing between lines.
    pub line_gap: f32,
    /// Baseline-to-baseline distance: `ascender - descender + line_gap`.
    pub height: f32,
    /// Offset of the underline from the baseline.
    pub underline_position: f32,
    /// Thickness of the underline.
    pub underline_thickness: f32,
}

/// A glyph that has been loaded into a [`TextureFont`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    /// The code point this glyph was loaded for.
    pub codepoint: char,
    /// Glyph index within the font. `.notdef` (0) for unmapped code points.
    pub glyph_id: u32,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Horizontal distance from the pen position to the left edge of the bitmap.
    pub offset_x: i32,
    /// Vertical distance from the baseline to the top edge of the bitmap.
    pub offset_y: i32,
    /// Horizontal advance in pixels.
    pub advance_x: f32,
    /// Location of the bitmap in the atlas, excluding padding.
    ///
    /// Empty for glyphs without ink, such as the space.
    pub region: AtlasRegion,
    /// Left texture coordinate.
    pub s0: f32,
    /// Top texture coordinate.
    pub t0: f32,
    /// Right texture coordinate.
    pub s1: f32,
    /// Bottom texture coordinate.
    pub t1: f32,
}

impl Glyph {
    /// Returns `true` if the glyph occupies space in the atlas.
    pub fn has_bitmap(&self) -> bool {
        !self.region.is_empty()
    }
}

/// One typeface at one point size.
///
/// The identity of a font is the path it was loaded from and its size; both
/// are fixed at creation. The set of loaded glyphs only grows.
pub struct TextureFont {
    path: PathBuf,
    size: f32,
    font: FontData,
    metrics: FontMetrics,
    /// Atlas dimensions used for texture coordinates.
    atlas_size: (u32, u32),
    glyphs: HashMap<char, Glyph>,
}

impl TextureFont {
    /// Loads the font at `path` for use with `atlas` at `size` pixels per em.
    ///
    /// No glyphs are loaded.
    pub fn new(atlas: &GlyphAtlas, path: impl AsRef<Path>, size: f32) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !(size.is_finite() && size > 0.0) {
            return Err(LoadError::InvalidSize(size));
        }
        let bytes = std::fs::read(path)?;
        let font = FontData::new(Blob::from(bytes), 0);
        let metrics = {
            let font_ref = FontRef::from_index(font.data.data(), font.index)?;
            let metrics = font_ref.metrics(Size::new(size), LocationRef::default());
            let underline = metrics.underline.unwrap_or_default();
            FontMetrics {
                ascender: metrics.ascent,
                descender: metrics.descent,
                line_gap: metrics.leading,
                height: metrics.ascent - metrics.descent + metrics.leading,
                underline_position: underline.offset,
                underline_thickness: underline.thickness,
            }
        };
        log::debug!(
            "Loaded {} at size {size} ({} bytes)",
            path.display(),
            font.data.len()
        );
        Ok(Self {
            path: path.to_owned(),
            size,
            font,
            metrics,
            atlas_size: (atlas.width(), atlas.height()),
            glyphs: HashMap::new(),
        })
    }

    /// The path this font was loaded from, exactly as given.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The size in pixels per em.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The underlying font data.
    pub fn data(&self) -> &FontData {
        &self.font
    }

    /// Vertical metrics at this size.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Returns the glyph loaded for `codepoint`, if any.
    pub fn glyph(&self, codepoint: char) -> Option<&Glyph> {
        self.glyphs.get(&codepoint)
    }

    /// Returns `true` if a glyph for `codepoint` has been loaded.
    pub fn has_glyph(&self, codepoint: char) -> bool {
        self.glyphs.contains_key(&codepoint)
    }

    /// Number of loaded glyphs.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Iterates over the loaded glyphs in no particular order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    /// Loads the glyphs for every code point of `text` that is not loaded yet.
    ///
    /// Returns the number of code points that could not be loaded because
    /// the atlas ran out of space.
    pub fn load_glyphs(&mut self, atlas: &mut GlyphAtlas, text: &str) -> usize {
        debug_assert_eq!(
            self.atlas_size,
            (atlas.width(), atlas.height()),
            "font used with a different atlas than it was created for"
        );
        let Ok(font_ref) = FontRef::from_index(self.font.data.data(), self.font.index) else {
            // Validated in `new`.
            return text.chars().filter(|c| !self.glyphs.contains_key(c)).count();
        };
        let charmap = font_ref.charmap();
        let glyph_metrics = font_ref.glyph_metrics(Size::new(self.size), LocationRef::default());

        let mut missed = 0;
        for codepoint in text.chars() {
            if self.glyphs.contains_key(&codepoint) {
                continue;
            }
            let glyph_id = charmap.map(codepoint).unwrap_or(GlyphId::NOTDEF);
            let bounds = glyph_metrics.bounds(glyph_id).unwrap_or_default();
            let advance_x = glyph_metrics.advance_width(glyph_id).unwrap_or_default();
            let pixel_box = PixelBox::from_bounds(bounds);

            let region = if pixel_box.is_empty() {
                AtlasRegion::default()
            } else {
                let padded = atlas.allocate(
                    pixel_box.width + GLYPH_PADDING * 2,
                    pixel_box.height + GLYPH_PADDING * 2,
                );
                let Some(padded) = padded else {
                    log::warn!(
                        "Texture atlas is full, cannot load {codepoint:?} from {} (size={:.1})",
                        self.path.display(),
                        self.size
                    );
                    missed += 1;
                    continue;
                };
                AtlasRegion {
                    x: padded.x + GLYPH_PADDING,
                    y: padded.y + GLYPH_PADDING,
                    width: pixel_box.width,
                    height: pixel_box.height,
                }
            };

            let glyph = self.make_glyph(codepoint, glyph_id, pixel_box, advance_x, region);
            self.glyphs.insert(codepoint, glyph);
        }
        missed
    }

    fn make_glyph(
        &self,
        codepoint: char,
        glyph_id: GlyphId,
        pixel_box: PixelBox,
        advance_x: f32,
        region: AtlasRegion,
    ) -> Glyph {
        let (atlas_width, atlas_height) = (self.atlas_size.0 as f32, self.atlas_size.1 as f32);
        Glyph {
            codepoint,
            glyph_id: glyph_id.to_u32(),
            width: pixel_box.width,
            height: pixel_box.height,
            offset_x: pixel_box.left,
            offset_y: pixel_box.top,
            advance_x,
            region,
            s0: region.x as f32 / atlas_width,
            t0: region.y as f32 / atlas_height,
            s1: (region.x + region.width) as f32 / atlas_width,
            t1: (region.y + region.height) as f32 / atlas_height,
        }
    }
}

impl fmt::Debug for TextureFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureFont")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("metrics", &self.metrics)
            .field("glyphs", &self.glyphs.len())
            .finish_non_exhaustive()
    }
}

/// Glyph bounds snapped outward to whole pixels, y up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PixelBox {
    left: i32,
    top: i32,
    width: u32,
    height: u32,
}

impl PixelBox {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "glyph extents at sane sizes fit comfortably in i32"
    )]
    fn from_bounds(bounds: BoundingBox) -> Self {
        let left = bounds.x_min.floor() as i32;
        let right = bounds.x_max.ceil() as i32;
        let bottom = bounds.y_min.floor() as i32;
        let top = bounds.y_max.ceil() as i32;
        Self {
            left,
            top,
            width: right.saturating_sub(left).max(0).unsigned_abs(),
            height: top.saturating_sub(bottom).max(0).unsigned_abs(),
        }
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
