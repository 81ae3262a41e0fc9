// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Fontkeep Dev
//!
//! This crate provides utilities for developing Fontkeep: the bundled test
//! fonts and a couple of text samples.

use std::path::{Path, PathBuf};

/// The directory that contains the bundled font files.
pub fn font_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/dejavu_fonts")
}

/// Path of the regular DejaVu Sans face.
pub fn sans_regular() -> PathBuf {
    font_dir().join("DejaVuSans.ttf")
}

/// Path of the bold DejaVu Sans face.
pub fn sans_bold() -> PathBuf {
    font_dir().join("DejaVuSans-Bold.ttf")
}

/// Path of the oblique DejaVu Sans face.
pub fn sans_oblique() -> PathBuf {
    font_dir().join("DejaVuSans-Oblique.ttf")
}

/// A path inside the assets directory that is guaranteed not to exist.
pub fn missing_font() -> PathBuf {
    font_dir().join("missing.ttf")
}

/// A file inside the assets directory that exists but is not a font.
pub fn not_a_font() -> PathBuf {
    font_dir().join("LICENSE")
}

/// The font family that is available in the assets/fonts directory.
pub const FONT_FAMILY: &str = "DejaVu Sans";

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// A collection of text samples.
#[derive(Debug)]
pub struct TextSamples {
    /// Plain ASCII pangram.
    pub latin: Sample,
    /// Latin text with accented characters.
    pub accented: Sample,
}

impl TextSamples {
    /// Creates a new collection of text samples.
    pub const fn new() -> Self {
        let latin = include_str!("../assets/text_samples/latin.txt");
        let accented = include_str!("../assets/text_samples/accented.txt");
        Self {
            latin: Sample {
                name: "latin",
                text: latin,
            },
            accented: Sample {
                name: "accented",
                text: accented,
            },
        }
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}
