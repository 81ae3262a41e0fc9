// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of font descriptions to font files.
//!
//! A [`FontMatcher`] turns a family name, size and style flags into the path
//! of a font file. The registry owns one matcher and only consults it for
//! description lookups; file lookups never touch it.

#[cfg(all(feature = "system", target_os = "linux"))]
mod fontconfig;

use core::fmt;
use std::path::{Path, PathBuf};

use crate::MatchError;

#[cfg(all(feature = "system", target_os = "linux"))]
pub use fontconfig::FontconfigMatcher;

/// The matcher installed by [`FontRegistry::new`](crate::FontRegistry::new).
#[cfg(all(feature = "system", target_os = "linux"))]
pub type SystemMatcher = FontconfigMatcher;

/// The matcher installed by [`FontRegistry::new`](crate::FontRegistry::new).
#[cfg(not(all(feature = "system", target_os = "linux")))]
pub type SystemMatcher = NullMatcher;

/// Returns a boxed instance of the platform's system matcher.
pub(crate) fn system_matcher() -> Box<dyn FontMatcher> {
    Box::new(SystemMatcher::default())
}

/// Requested weight of a face.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    /// Regular weight.
    #[default]
    Regular,
    /// Bold weight.
    Bold,
}

impl Weight {
    /// Maps a bold flag to a weight.
    pub const fn from_bold(bold: bool) -> Self {
        if bold { Self::Bold } else { Self::Regular }
    }

    /// Returns `true` for [`Weight::Bold`].
    pub const fn is_bold(self) -> bool {
        matches!(self, Self::Bold)
    }
}

/// Requested slant of a face.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slant {
    /// Upright.
    #[default]
    Roman,
    /// Italic or oblique.
    Italic,
}

impl Slant {
    /// Maps an italic flag to a slant.
    pub const fn from_italic(italic: bool) -> Self {
        if italic { Self::Italic } else { Self::Roman }
    }

    /// Returns `true` for [`Slant::Italic`].
    pub const fn is_italic(self) -> bool {
        matches!(self, Self::Italic)
    }
}

/// A font description handed to a [`FontMatcher`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FontQuery<'a> {
    /// Family name, possibly generic such as `"sans-serif"`.
    pub family: &'a str,
    /// Point size. Matchers may use it to pick optical sizes; the registry
    /// always loads the result at the caller's size.
    pub size: f32,
    /// Requested weight.
    pub weight: Weight,
    /// Requested slant.
    pub slant: Slant,
}

impl<'a> FontQuery<'a> {
    /// Creates a query from style flags.
    pub fn new(family: &'a str, size: f32, bold: bool, italic: bool) -> Self {
        Self {
            family,
            size,
            weight: Weight::from_bold(bold),
            slant: Slant::from_italic(italic),
        }
    }
}

impl fmt::Display for FontQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (size={:.1}, bold={}, italic={})",
            self.family,
            self.size,
            u8::from(self.weight.is_bold()),
            u8::from(self.slant.is_italic()),
        )
    }
}

/// A service that resolves font descriptions to font files.
pub trait FontMatcher: Send {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns `false` if this matcher can never resolve anything, for example
    /// because the platform service is missing.
    fn is_available(&self) -> bool;

    /// Returns the path of the best font for `query`.
    fn match_font(&mut self, query: &FontQuery<'_>) -> Result<PathBuf, MatchError>;
}

/// Matcher for platforms without a font matching service.
///
/// Every query fails with [`MatchError::Unsupported`].
#[derive(Copy, Clone, Debug, Default)]
pub struct NullMatcher;

impl FontMatcher for NullMatcher {
    fn name(&self) -> &'static str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn match_font(&mut self, _query: &FontQuery<'_>) -> Result<PathBuf, MatchError> {
        Err(MatchError::Unsupported)
    }
}

/// A matcher backed by an explicit list of font files.
///
/// Useful for applications that ship their own fonts, and on platforms
/// without a system service. Family names compare ASCII case-insensitively.
/// When the family is known but not in the requested style, the first file
/// registered for the family is returned.
#[derive(Clone, Debug, Default)]
pub struct FontTable {
    entries: Vec<FontTableEntry>,
}

#[derive(Clone, Debug)]
struct FontTableEntry {
    family: String,
    weight: Weight,
    slant: Slant,
    path: PathBuf,
}

impl FontTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` as the face of `family` with the given style.
    pub fn insert(&mut self, family: &str, weight: Weight, slant: Slant, path: impl AsRef<Path>) {
        self.entries.push(FontTableEntry {
            family: family.to_owned(),
            weight,
            slant,
            path: path.as_ref().to_owned(),
        });
    }

    /// Builder form of [`FontTable::insert`].
    #[must_use]
    pub fn with(mut self, family: &str, weight: Weight, slant: Slant, path: impl AsRef<Path>) -> Self {
        self.insert(family, weight, slant, path);
        self
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no face is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FontMatcher for FontTable {
    fn name(&self) -> &'static str {
        "table"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn match_font(&mut self, query: &FontQuery<'_>) -> Result<PathBuf, MatchError> {
        let mut family = self
            .entries
            .iter()
            .filter(|entry| entry.family.eq_ignore_ascii_case(query.family));
        let first = family.clone().next().ok_or(MatchError::NoMatch)?;
        let best = family
            .find(|entry| entry.weight == query.weight && entry.slant == query.slant)
            .unwrap_or(first);
        Ok(best.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_style() {
        let query = FontQuery::new("serif", 10.0, true, false);
        assert_eq!(query.weight, Weight::Bold);
        assert_eq!(query.slant, Slant::Roman);
        let query = FontQuery::new("serif", 10.0, false, true);
        assert_eq!(query.weight, Weight::Regular);
        assert_eq!(query.slant, Slant::Italic);
    }

    #[test]
    fn query_display_matches_diagnostic_format() {
        let query = FontQuery::new("Nope Sans", 13.0, true, false);
        assert_eq!(query.to_string(), "Nope Sans (size=13.0, bold=1, italic=0)");
    }

    #[test]
    fn null_matcher_is_unsupported() {
        let mut matcher = NullMatcher;
        assert!(!matcher.is_available());
        let query = FontQuery::new("sans-serif", 12.0, false, false);
        assert_eq!(matcher.match_font(&query), Err(MatchError::Unsupported));
    }

    #[test]
    fn table_prefers_exact_style() {
        let mut table = FontTable::new()
            .with("Demo", Weight::Regular, Slant::Roman, "demo.ttf")
            .with("Demo", Weight::Bold, Slant::Roman, "demo-bold.ttf")
            .with("Demo", Weight::Regular, Slant::Italic, "demo-italic.ttf");
        assert_eq!(table.len(), 3);

        let bold = FontQuery::new("demo", 12.0, true, false);
        assert_eq!(table.match_font(&bold), Ok(PathBuf::from("demo-bold.ttf")));
        let italic = FontQuery::new("DEMO", 12.0, false, true);
        assert_eq!(
            table.match_font(&italic),
            Ok(PathBuf::from("demo-italic.ttf"))
        );
    }

    #[test]
    fn table_falls_back_within_family() {
        let mut table = FontTable::new().with("Demo", Weight::Regular, Slant::Roman, "demo.ttf");
        let query = FontQuery::new("Demo", 12.0, true, true);
        assert_eq!(table.match_font(&query), Ok(PathBuf::from("demo.ttf")));
    }

    #[test]
    fn table_rejects_unknown_family() {
        let mut table = FontTable::new().with("Demo", Weight::Regular, Slant::Roman, "demo.ttf");
        let query = FontQuery::new("Other", 12.0, false, false);
        assert_eq!(table.match_font(&query), Err(MatchError::NoMatch));
    }
}
