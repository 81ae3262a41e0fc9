// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fontkeep owns the fonts of a rendering context.
//!
//! A [`FontRegistry`] hands out fonts by file and size or by a family
//! description, and makes sure each (path, size) pair is loaded only once.
//! All fonts share one [`GlyphAtlas`], and every newly loaded font is
//! pre-warmed with the glyphs of the registry's cache string.
//!
//! ```no_run
//! use fontkeep::{FontRegistry, Markup};
//!
//! let mut registry = FontRegistry::new(512, 512, 1);
//! registry.set_cache_string("abcdefghijklmnopqrstuvwxyz ");
//!
//! let by_file = registry.get_by_file("fonts/DejaVuSans.ttf", 16.0);
//! let by_name = registry.get_by_markup(&Markup::new("sans-serif", 16.0).bold(true));
//! # let _ = (by_file, by_name);
//! ```
//!
//! ## Features
//!
//! - `system` (enabled by default): Resolve descriptions through Fontconfig on
//!   Linux. The library is loaded at runtime, so systems without it only lose
//!   description lookups. Other platforms and builds without this feature use
//!   [`NullMatcher`].
//!
//! Failed lookups return `None` and report the reason through the [`log`]
//! crate at the `warn` level.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod atlas;
mod cache_string;
mod error;
mod font;
mod markup;
mod matching;
mod registry;

pub use linebender_resource_handle::{Blob, FontData};
pub use skrifa;

pub use atlas::{AtlasConfig, AtlasRegion, GlyphAtlas};
pub use cache_string::{CacheString, DEFAULT_CACHE_STRING, dup_code_points};
pub use error::{LoadError, MatchError};
pub use font::{FontMetrics, GLYPH_PADDING, Glyph, TextureFont};
pub use markup::Markup;
#[cfg(all(feature = "system", target_os = "linux"))]
pub use matching::FontconfigMatcher;
pub use matching::{FontMatcher, FontQuery, FontTable, NullMatcher, Slant, SystemMatcher, Weight};
pub use registry::{FontId, FontRegistry, RegistryOptions};
