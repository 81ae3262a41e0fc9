// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for font loading and font matching.

use core::fmt;
use std::io;

use skrifa::raw::ReadError;

/// Error returned when a font resource cannot be created from a file.
#[derive(Debug)]
#[non_exhaustive]
pub enum LoadError {
    /// The font file could not be read.
    Io(io::Error),
    /// The file was read but does not contain a usable font.
    Font(ReadError),
    /// The requested point size is not a finite, positive number.
    InvalidSize(f32),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read font file: {err}"),
            Self::Font(err) => write!(f, "invalid font data: {err}"),
            Self::InvalidSize(size) => write!(f, "invalid font size {size}"),
        }
    }
}

impl core::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Font(err) => Some(err),
            Self::InvalidSize(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadError> for LoadError {
    fn from(err: ReadError) -> Self {
        Self::Font(err)
    }
}

/// Error returned by a [`FontMatcher`](crate::FontMatcher) when a
/// description cannot be resolved to a font file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchError {
    /// The matching service found no font for the query.
    NoMatch,
    /// The best match does not carry a file path.
    MissingFile,
    /// No matching service is available on this platform or system.
    Unsupported,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NoMatch => "no matching font",
            Self::MissingFile => "matched font has no file",
            Self::Unsupported => "font matching is not supported on this platform",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for MatchError {}
