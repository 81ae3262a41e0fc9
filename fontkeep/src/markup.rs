// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style descriptor for a run of text.

use crate::FontQuery;

/// Describes how a run of text should look.
///
/// Only `family`, `size`, `bold` and `italic` take part in font lookup. The
/// remaining fields are presentational and are carried for renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct Markup {
    /// Family name.
    ///
    /// The default value is `"sans-serif"`.
    pub family: String,
    /// Point size.
    ///
    /// The default value is 12.
    pub size: f32,
    /// Whether a bold face is requested.
    pub bold: bool,
    /// Whether an italic face is requested.
    pub italic: bool,
    /// Vertical offset of the baseline, in pixels.
    pub rise: f32,
    /// Extra horizontal space between glyphs, in pixels.
    pub spacing: f32,
    /// Gamma applied to glyph coverage.
    ///
    /// The default value is 1.0.
    pub gamma: f32,
    /// Draw an underline.
    pub underline: bool,
    /// Draw an overline.
    pub overline: bool,
    /// Draw a line through the text.
    pub strikethrough: bool,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 12.0,
            bold: false,
            italic: false,
            rise: 0.0,
            spacing: 0.0,
            gamma: 1.0,
            underline: false,
            overline: false,
            strikethrough: false,
        }
    }
}

impl Markup {
    /// Creates a markup for `family` at `size`, other fields at their defaults.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    /// Sets the bold flag.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Sets the italic flag.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Sets the baseline rise.
    #[must_use]
    pub fn rise(mut self, rise: f32) -> Self {
        self.rise = rise;
        self
    }

    /// Sets the glyph spacing.
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the coverage gamma.
    #[must_use]
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the underline flag.
    #[must_use]
    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Sets the overline flag.
    #[must_use]
    pub fn overline(mut self, overline: bool) -> Self {
        self.overline = overline;
        self
    }

    /// Sets the strikethrough flag.
    #[must_use]
    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// The font description used to look up a face for this markup.
    pub fn query(&self) -> FontQuery<'_> {
        FontQuery::new(&self.family, self.size, self.bold, self.italic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Slant, Weight};

    #[test]
    fn defaults() {
        let markup = Markup::default();
        assert_eq!(markup.family, "sans-serif");
        assert_eq!(markup.size, 12.0);
        assert_eq!(markup.gamma, 1.0);
        assert!(!markup.bold && !markup.italic, "default style is regular");
    }

    #[test]
    fn query_ignores_presentational_fields() {
        let plain = Markup::new("Serif", 20.0).bold(true);
        let decorated = plain
            .clone()
            .underline(true)
            .strikethrough(true)
            .rise(3.0)
            .spacing(1.5)
            .gamma(2.2);
        assert_eq!(plain.query(), decorated.query());

        let query = decorated.query();
        assert_eq!(query.family, "Serif");
        assert_eq!(query.size, 20.0);
        assert_eq!(query.weight, Weight::Bold);
        assert_eq!(query.slant, Slant::Roman);
    }
}
