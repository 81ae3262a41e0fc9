// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font registry.

use core::fmt;
use std::path::{Path, PathBuf};

use crate::atlas::{AtlasConfig, GlyphAtlas};
use crate::cache_string::{CacheString, DEFAULT_CACHE_STRING};
use crate::error::{LoadError, MatchError};
use crate::font::TextureFont;
use crate::markup::Markup;
use crate::matching::{FontMatcher, FontQuery, NullMatcher, system_matcher};

/// Handle to a font owned by a [`FontRegistry`].
///
/// Looking up the same path and size again yields the same handle for the
/// lifetime of the registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(usize);

impl FontId {
    /// Position of the font in load order, starting at zero.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Options for creating a [`FontRegistry`].
#[derive(Clone, Debug)]
pub struct RegistryOptions {
    /// Dimensions and depth of the shared atlas.
    pub atlas: AtlasConfig,
    /// Code points pre-loaded into each new font.
    ///
    /// The default value is a single space.
    pub cache_string: String,
    /// If `true`, description lookups go through the platform's font matching
    /// service. Otherwise they always fail.
    ///
    /// The default value is `true`.
    pub system_fonts: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            atlas: AtlasConfig::default(),
            cache_string: DEFAULT_CACHE_STRING.to_owned(),
            system_fonts: true,
        }
    }
}

/// Owns every font of a rendering context together with their shared atlas.
///
/// Fonts are created on first request and kept until the registry is dropped.
/// At most one font exists per (path, size) pair: paths compare by their exact
/// bytes and sizes by exact equality, so `"./a.ttf"` and `"a.ttf"` are two
/// different fonts.
pub struct FontRegistry {
    // Field order is drop order.
    fonts: Vec<TextureFont>,
    atlas: GlyphAtlas,
    cache: CacheString,
    matcher: Box<dyn FontMatcher>,
}

impl FontRegistry {
    /// Creates a registry with a `width` by `height` atlas of `depth` bytes
    /// per pixel, using the platform's font matcher.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero or if `depth` is not 1, 3 or 4.
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self::from_parts(
            GlyphAtlas::new(width, height, depth),
            CacheString::default(),
            system_matcher(),
        )
    }

    /// Creates a registry from options.
    ///
    /// # Panics
    ///
    /// Panics if the atlas configuration is invalid, see [`FontRegistry::new`].
    pub fn with_options(options: RegistryOptions) -> Self {
        let matcher = if options.system_fonts {
            system_matcher()
        } else {
            Box::new(NullMatcher)
        };
        Self::from_parts(
            GlyphAtlas::from_config(options.atlas),
            CacheString::new(&options.cache_string),
            matcher,
        )
    }

    /// Creates a registry that resolves descriptions with `matcher`.
    ///
    /// # Panics
    ///
    /// Panics if the atlas dimensions are invalid, see [`FontRegistry::new`].
    pub fn with_matcher(
        width: u32,
        height: u32,
        depth: u32,
        matcher: impl FontMatcher + 'static,
    ) -> Self {
        Self::from_parts(
            GlyphAtlas::new(width, height, depth),
            CacheString::default(),
            Box::new(matcher),
        )
    }

    fn from_parts(atlas: GlyphAtlas, cache: CacheString, matcher: Box<dyn FontMatcher>) -> Self {
        log::debug!(
            "Created font registry with a {}x{}x{} atlas and the {} matcher",
            atlas.width(),
            atlas.height(),
            atlas.depth(),
            matcher.name()
        );
        Self {
            fonts: Vec::new(),
            atlas,
            cache,
            matcher,
        }
    }

    /// Returns the font for `path` at `size`, loading it on first request.
    ///
    /// A newly loaded font gets the glyphs of the current cache string. On
    /// failure a diagnostic is logged, `None` is returned and the registry
    /// is left unchanged.
    pub fn get_by_file(&mut self, path: impl AsRef<Path>, size: f32) -> Option<FontId> {
        let path = path.as_ref();
        match self.get_by_file_with_error(path, size) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!(
                    "Unable to load \"{}\" (size={size:.1}): {err}",
                    path.display()
                );
                None
            }
        }
    }

    /// Like [`FontRegistry::get_by_file`], but returns the reason of a failed
    /// load instead of logging it.
    pub fn get_by_file_with_error(
        &mut self,
        path: impl AsRef<Path>,
        size: f32,
    ) -> Result<FontId, LoadError> {
        let path = path.as_ref();
        debug_assert!(!path.as_os_str().is_empty(), "font path must not be empty");

        if let Some(id) = self.find(path, size) {
            return Ok(id);
        }

        let font = TextureFont::new(&self.atlas, path, size)?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        let missed = self.fonts[id.0].load_glyphs(&mut self.atlas, self.cache.as_str());
        if missed > 0 {
            log::debug!(
                "{missed} cached glyphs of \"{}\" did not fit in the atlas",
                path.display()
            );
        }
        Ok(id)
    }

    /// Returns the font for a family name and style, loading it on first
    /// request.
    ///
    /// The description is resolved to a file by the registry's matcher, and
    /// the file is then loaded at exactly `size` as by
    /// [`FontRegistry::get_by_file`].
    pub fn get_by_description(
        &mut self,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
    ) -> Option<FontId> {
        self.get_by_query(&FontQuery::new(family, size, bold, italic))
    }

    /// Returns the font described by `markup`.
    ///
    /// Only the family, size, bold and italic fields are used.
    pub fn get_by_markup(&mut self, markup: &Markup) -> Option<FontId> {
        self.get_by_query(&markup.query())
    }

    /// Resolves a description to a font file without loading it.
    ///
    /// A failed resolution is logged like in
    /// [`FontRegistry::get_by_description`].
    pub fn match_description(
        &mut self,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
    ) -> Option<PathBuf> {
        self.resolve(&FontQuery::new(family, size, bold, italic))
    }

    fn resolve(&mut self, query: &FontQuery<'_>) -> Option<PathBuf> {
        match self.matcher.match_font(query) {
            Ok(path) => Some(path),
            Err(MatchError::Unsupported) => {
                log::warn!(
                    "Font lookup by description is not implemented on this platform ({} matcher)",
                    self.matcher.name()
                );
                None
            }
            Err(_) => {
                log::warn!("No \"{query}\" font available.");
                None
            }
        }
    }

    fn get_by_query(&mut self, query: &FontQuery<'_>) -> Option<FontId> {
        let path = self.resolve(query)?;
        self.get_by_file(&path, query.size)
    }

    /// Returns an already loaded font without loading anything.
    pub fn find(&self, path: impl AsRef<Path>, size: f32) -> Option<FontId> {
        let path = path.as_ref().as_os_str();
        self.fonts
            .iter()
            .position(|font| font.path().as_os_str() == path && font.size() == size)
            .map(FontId)
    }

    /// The code points pre-loaded into each new font.
    pub fn cache_string(&self) -> &str {
        self.cache.as_str()
    }

    /// Replaces the code points pre-loaded into fonts created from now on.
    ///
    /// Fonts that are already loaded are not touched.
    pub fn set_cache_string(&mut self, text: &str) {
        self.cache.set(text);
    }

    /// Loads the glyphs of `text` into the font `id`.
    ///
    /// Returns the number of code points that could not be loaded. For an id
    /// that does not belong to this registry that is every code point.
    pub fn load_glyphs(&mut self, id: FontId, text: &str) -> usize {
        match self.fonts.get_mut(id.0) {
            Some(font) => font.load_glyphs(&mut self.atlas, text),
            None => text.chars().count(),
        }
    }

    /// Returns the font for `id`.
    pub fn font(&self, id: FontId) -> Option<&TextureFont> {
        self.fonts.get(id.0)
    }

    /// All fonts in load order.
    pub fn fonts(&self) -> &[TextureFont] {
        &self.fonts
    }

    /// Number of loaded fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if no font has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The atlas shared by all fonts.
    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    /// The matcher used for description lookups.
    pub fn matcher(&self) -> &dyn FontMatcher {
        &*self.matcher
    }
}

impl fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontRegistry")
            .field("fonts", &self.fonts)
            .field("atlas", &self.atlas)
            .field("cache", &self.cache)
            .field("matcher", &self.matcher.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontTable;

    #[test]
    fn new_registry_is_empty() {
        let registry = FontRegistry::with_matcher(64, 32, 1, NullMatcher);
        assert!(registry.is_empty());
        assert_eq!(registry.cache_string(), " ");
        assert_eq!(registry.atlas().width(), 64);
        assert_eq!(registry.atlas().height(), 32);
        assert_eq!(registry.atlas().used(), 0);
    }

    #[test]
    fn options_configure_the_registry() {
        let registry = FontRegistry::with_options(RegistryOptions {
            atlas: AtlasConfig {
                width: 128,
                height: 64,
                depth: 4,
            },
            cache_string: "abc".to_owned(),
            system_fonts: false,
        });
        assert_eq!(registry.atlas().depth(), 4);
        assert_eq!(registry.cache_string(), "abc");
        assert_eq!(registry.matcher().name(), "null");
    }

    #[test]
    fn default_options() {
        let options = RegistryOptions::default();
        assert_eq!(options.atlas, AtlasConfig::default());
        assert_eq!(options.cache_string, " ");
        assert!(options.system_fonts, "system fonts are on by default");
    }

    #[test]
    #[should_panic(expected = "atlas depth must be 1, 3 or 4")]
    fn rejects_invalid_depth() {
        let _ = FontRegistry::new(16, 16, 2);
    }

    #[test]
    fn load_glyphs_with_unknown_id_misses_everything() {
        let mut registry = FontRegistry::with_matcher(64, 64, 1, NullMatcher);
        assert_eq!(registry.load_glyphs(FontId(3), "héllo"), 5);
    }

    #[test]
    fn match_description_uses_the_matcher() {
        let table = FontTable::new().with(
            "Demo",
            crate::Weight::Regular,
            crate::Slant::Roman,
            "demo.ttf",
        );
        let mut registry = FontRegistry::with_matcher(64, 64, 1, table);
        assert_eq!(
            registry.match_description("demo", 12.0, false, false),
            Some(PathBuf::from("demo.ttf"))
        );
        assert_eq!(registry.match_description("other", 12.0, false, false), None);
        assert!(registry.is_empty(), "matching must not load fonts");
    }

    mod capture {
        use core::cell::RefCell;

        use log::{Level, LevelFilter, Log, Metadata, Record};

        thread_local! {
            static WARNINGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        }

        struct ThreadLogger;

        impl Log for ThreadLogger {
            fn enabled(&self, metadata: &Metadata<'_>) -> bool {
                metadata.level() <= Level::Warn
            }

            fn log(&self, record: &Record<'_>) {
                if self.enabled(record.metadata()) {
                    WARNINGS.with(|w| w.borrow_mut().push(record.args().to_string()));
                }
            }

            fn flush(&self) {}
        }

        static LOGGER: ThreadLogger = ThreadLogger;

        /// Runs `f` and returns the warnings it logged on this thread.
        pub(super) fn warnings(f: impl FnOnce()) -> Vec<String> {
            // Another test may have installed the logger already.
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Warn);
            WARNINGS.with(|w| w.borrow_mut().clear());
            f();
            WARNINGS.with(|w| w.take())
        }
    }

    #[test]
    fn failed_match_description_is_logged() {
        let mut registry = FontRegistry::with_matcher(64, 64, 1, FontTable::new());
        let warnings = capture::warnings(|| {
            assert_eq!(registry.match_description("Nope", 12.0, true, false), None);
        });
        assert_eq!(
            warnings,
            ["No \"Nope (size=12.0, bold=1, italic=0)\" font available."]
        );
    }

    #[test]
    fn unsupported_match_description_is_logged() {
        let mut registry = FontRegistry::with_matcher(64, 64, 1, NullMatcher);
        let warnings = capture::warnings(|| {
            assert_eq!(registry.match_description("Nope", 12.0, false, false), None);
        });
        assert_eq!(warnings.len(), 1);
        assert!(
            warnings[0].contains("not implemented on this platform"),
            "unexpected diagnostic {warnings:?}"
        );
    }

    #[test]
    fn unresolvable_description_leaves_registry_unchanged() {
        let mut registry = FontRegistry::with_matcher(64, 64, 1, FontTable::new());
        assert_eq!(registry.get_by_description("Nope", 12.0, true, false), None);
        assert!(registry.is_empty());
        assert_eq!(registry.atlas().used(), 0);
    }

    #[test]
    fn unsupported_matcher_returns_none() {
        let mut registry = FontRegistry::with_matcher(64, 64, 1, NullMatcher);
        assert_eq!(registry.get_by_markup(&Markup::default()), None);
        assert!(registry.is_empty());
    }
}
