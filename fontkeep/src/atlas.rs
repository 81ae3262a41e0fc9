// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared glyph atlas.
//!
//! A single atlas backs every font created by one registry. Rectangles are
//! packed with guillotiere and the pixels live in one buffer next to it.

use core::fmt;

use guillotiere::{AtlasAllocator, size2};

/// Dimensions and pixel format of a [`GlyphAtlas`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Width in pixels.
    ///
    /// The default value is 512.
    pub width: u32,
    /// Height in pixels.
    ///
    /// The default value is 512.
    pub height: u32,
    /// Bytes per pixel: 1 (alpha), 3 (RGB) or 4 (RGBA).
    ///
    /// The default value is 1.
    pub depth: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            depth: 1,
        }
    }
}

/// A rectangle reserved in the atlas, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AtlasRegion {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width of the region.
    pub width: u32,
    /// Height of the region.
    pub height: u32,
}

impl AtlasRegion {
    /// Returns `true` if the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Raster storage shared by all fonts of a registry.
pub struct GlyphAtlas {
    width: u32,
    height: u32,
    depth: u32,
    allocator: AtlasAllocator,
    /// Number of pixels handed out so far.
    used: u64,
    data: Vec<u8>,
}

impl GlyphAtlas {
    /// Creates an empty atlas.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero or larger than `i32::MAX`, or if
    /// `depth` is not 1, 3 or 4.
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        assert!(width > 0 && height > 0, "atlas dimensions must be non-zero");
        assert!(
            matches!(depth, 1 | 3 | 4),
            "atlas depth must be 1, 3 or 4, got {depth}"
        );
        let (Ok(alloc_width), Ok(alloc_height)) = (i32::try_from(width), i32::try_from(height))
        else {
            panic!("atlas dimensions {width}x{height} are too large");
        };
        let len = width as usize * height as usize * depth as usize;
        Self {
            width,
            height,
            depth,
            allocator: AtlasAllocator::new(size2(alloc_width, alloc_height)),
            used: 0,
            data: vec![0; len],
        }
    }

    /// Creates an empty atlas from a configuration.
    pub fn from_config(config: AtlasConfig) -> Self {
        Self::new(config.width, config.height, config.depth)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Raw pixel data, row-major, `width * depth` bytes per row.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels currently reserved.
    pub fn used(&self) -> u64 {
        self.used
    }

    /// Fraction of the atlas area that is reserved, from 0.0 to 1.0.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the ratio lies in 0..=1 and only needs f32 precision"
    )]
    pub fn coverage(&self) -> f32 {
        let total = u64::from(self.width) * u64::from(self.height);
        (self.used as f64 / total as f64) as f32
    }

    /// Reserves a `width` by `height` rectangle.
    ///
    /// Returns `None` if the atlas has no room left for it. A zero-sized
    /// request always succeeds and does not consume space.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<AtlasRegion> {
        if width == 0 || height == 0 {
            return Some(AtlasRegion {
                x: 0,
                y: 0,
                width,
                height,
            });
        }
        if width > self.width || height > self.height {
            return None;
        }
        // Both fit in i32 since the atlas dimensions do.
        let size = size2(i32::try_from(width).ok()?, i32::try_from(height).ok()?);
        let allocation = self.allocator.allocate(size)?;
        self.used += u64::from(width) * u64::from(height);
        let origin = allocation.rectangle.min;
        Some(AtlasRegion {
            x: origin.x.unsigned_abs(),
            y: origin.y.unsigned_abs(),
            width,
            height,
        })
    }

    /// Copies pixel rows into a reserved region.
    ///
    /// `stride` is the number of bytes between the starts of two rows in
    /// `pixels`; each row provides `region.width * depth` bytes.
    ///
    /// # Panics
    ///
    /// Panics if the region lies outside the atlas or `pixels` is too short.
    pub fn set_region(&mut self, region: AtlasRegion, pixels: &[u8], stride: usize) {
        assert!(
            self.contains(region),
            "region {region:?} is outside of the atlas"
        );
        let depth = self.depth as usize;
        let row_len = region.width as usize * depth;
        let atlas_stride = self.width as usize * depth;
        for row in 0..region.height as usize {
            let src = &pixels[row * stride..row * stride + row_len];
            let start = (region.y as usize + row) * atlas_stride + region.x as usize * depth;
            self.data[start..start + row_len].copy_from_slice(src);
        }
    }

    /// Releases every region and zeroes the pixel data.
    ///
    /// Regions handed out before the call become dangling; fonts holding them
    /// must be discarded as well.
    pub fn clear(&mut self) {
        self.allocator.clear();
        self.used = 0;
        self.data.fill(0);
    }

    fn contains(&self, region: AtlasRegion) -> bool {
        let right = region.x.checked_add(region.width);
        let bottom = region.y.checked_add(region.height);
        right.is_some_and(|right| right <= self.width)
            && bottom.is_some_and(|bottom| bottom <= self.height)
    }
}

impl fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("depth", &self.depth)
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}
