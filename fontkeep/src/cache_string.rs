// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph pre-load set applied to newly created fonts.

use core::fmt;

/// Code points loaded into a font when the registry creates it.
pub const DEFAULT_CACHE_STRING: &str = " ";

/// Owned copy of a code-point sequence.
///
/// The returned buffer shares nothing with `text`.
pub fn dup_code_points(text: &str) -> Box<str> {
    Box::from(text)
}

/// Owned glyph pre-load set.
#[derive(Clone, PartialEq, Eq)]
pub struct CacheString {
    text: Box<str>,
}

impl CacheString {
    /// Creates a cache string holding a copy of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: dup_code_points(text),
        }
    }

    /// Returns the code points as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns an iterator over the code points.
    pub fn chars(&self) -> core::str::Chars<'_> {
        self.text.chars()
    }

    /// Returns the number of code points.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if there is nothing to pre-load.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the contents with a copy of `text`, dropping the old buffer.
    pub fn set(&mut self, text: &str) {
        self.text = dup_code_points(text);
    }
}

impl Default for CacheString {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_STRING)
    }
}

impl AsRef<str> for CacheString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for CacheString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for CacheString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
