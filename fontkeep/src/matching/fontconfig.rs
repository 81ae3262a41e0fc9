// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fontconfig matcher.
//!
//! The library is opened with `dlopen` on first use. If it cannot be found the
//! matcher reports itself unavailable and never makes an FFI call.

#![allow(unsafe_code, reason = "Fontconfig is only reachable through its C API")]

use core::{ffi::CStr, ptr::NonNull};
use std::{
    cell::OnceCell,
    ffi::{CString, OsStr},
    os::unix::ffi::OsStrExt,
    path::PathBuf,
};

use fontconfig_sys::{
    FcChar8, FcConfig, FcMatchPattern, FcPattern, FcResultMatch,
    constants::{
        FC_FAMILY, FC_FILE, FC_SIZE, FC_SLANT, FC_SLANT_ITALIC, FC_SLANT_ROMAN, FC_WEIGHT,
        FC_WEIGHT_BOLD, FC_WEIGHT_REGULAR,
    },
    statics::{LIB, LIB_RESULT},
};

use super::{FontMatcher, FontQuery, Slant, Weight};
use crate::MatchError;

impl Weight {
    fn to_fontconfig(self) -> i32 {
        match self {
            Self::Regular => FC_WEIGHT_REGULAR,
            Self::Bold => FC_WEIGHT_BOLD,
        }
    }
}

impl Slant {
    fn to_fontconfig(self) -> i32 {
        match self {
            Self::Roman => FC_SLANT_ROMAN,
            Self::Italic => FC_SLANT_ITALIC,
        }
    }
}

/// Wrapper for an application owned `FcPattern`.
struct Pattern {
    inner: NonNull<FcPattern>,
}

impl Pattern {
    fn new() -> Option<Self> {
        // SAFETY: only reached once `LIB_RESULT` is known to be `Ok`.
        unsafe { Self::from_raw((LIB.FcPatternCreate)()) }
    }

    /// Takes ownership of `raw`.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a pattern the caller owns a reference to.
    unsafe fn from_raw(raw: *mut FcPattern) -> Option<Self> {
        NonNull::new(raw).map(|inner| Self { inner })
    }

    fn add_string(&mut self, object: &CStr, s: &CStr) -> bool {
        // All values passed to FcPatternAddWhatever are copied.
        unsafe {
            (LIB.FcPatternAddString)(self.inner.as_ptr(), object.as_ptr(), s.as_ptr().cast())
                != 0
        }
    }

    fn add_integer(&mut self, object: &CStr, value: i32) -> bool {
        unsafe { (LIB.FcPatternAddInteger)(self.inner.as_ptr(), object.as_ptr(), value) != 0 }
    }

    fn add_double(&mut self, object: &CStr, value: f64) -> bool {
        unsafe { (LIB.FcPatternAddDouble)(self.inner.as_ptr(), object.as_ptr(), value) != 0 }
    }

    fn default_substitute(&mut self) {
        unsafe { (LIB.FcDefaultSubstitute)(self.inner.as_ptr()) };
    }

    /// Returns the first string value of `object`, borrowed from the pattern.
    fn get_c_string<'a>(&'a self, object: &CStr) -> Option<&'a CStr> {
        let mut dest: *mut FcChar8 = core::ptr::null_mut();
        let result = unsafe {
            (LIB.FcPatternGetString)(self.inner.as_ptr(), object.as_ptr(), 0, &raw mut dest)
        };
        if result != FcResultMatch {
            return None;
        }
        let dest = NonNull::new(dest)?;
        Some(unsafe { CStr::from_ptr(dest.as_ptr().cast()) })
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        unsafe { (LIB.FcPatternDestroy)(self.inner.as_ptr()) };
    }
}

/// Wrapper for an application owned `FcConfig`.
struct Config {
    inner: NonNull<FcConfig>,
}

impl Config {
    /// Loads the configuration files and builds the font list.
    fn load() -> Option<Self> {
        if LIB_RESULT.is_err() {
            return None;
        }
        // fontconfig returns a new config object each time this is called.
        let inner = NonNull::new(unsafe { (LIB.FcInitLoadConfigAndFonts)() })?;
        Some(Self { inner })
    }

    fn substitute(&self, pattern: &mut Pattern) -> bool {
        unsafe {
            (LIB.FcConfigSubstitute)(self.inner.as_ptr(), pattern.inner.as_ptr(), FcMatchPattern)
                != 0
        }
    }

    fn font_match(&self, pattern: &Pattern) -> Option<Pattern> {
        let mut result = 0;
        let matched = unsafe {
            Pattern::from_raw((LIB.FcFontMatch)(
                self.inner.as_ptr(),
                pattern.inner.as_ptr(),
                &raw mut result,
            ))
        }?;
        (result == FcResultMatch).then_some(matched)
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        unsafe { (LIB.FcConfigDestroy)(self.inner.as_ptr()) };
    }
}

/// Resolves descriptions through the system's Fontconfig setup.
#[derive(Default)]
pub struct FontconfigMatcher {
    /// `None` once loading has failed.
    config: OnceCell<Option<Config>>,
}

// `Config` is only touched through `&mut self` or after initialization, and
// fontconfig objects are not tied to the thread that created them.
unsafe impl Send for FontconfigMatcher {}

impl FontconfigMatcher {
    /// Creates a matcher. No library call happens until the first query.
    pub fn new() -> Self {
        Self::default()
    }

    fn config(&self) -> Option<&Config> {
        self.config
            .get_or_init(|| {
                let config = Config::load();
                if config.is_none() {
                    log::debug!("fontconfig is not available");
                }
                config
            })
            .as_ref()
    }

    fn build_pattern(query: &FontQuery<'_>) -> Option<Pattern> {
        let family = CString::new(query.family).ok()?;
        let mut pattern = Pattern::new()?;
        let added = pattern.add_string(FC_FAMILY, &family)
            && pattern.add_double(FC_SIZE, f64::from(query.size))
            && pattern.add_integer(FC_WEIGHT, query.weight.to_fontconfig())
            && pattern.add_integer(FC_SLANT, query.slant.to_fontconfig());
        added.then_some(pattern)
    }
}

impl FontMatcher for FontconfigMatcher {
    fn name(&self) -> &'static str {
        "fontconfig"
    }

    /// Loads the library and the configuration if that has not happened yet.
    fn is_available(&self) -> bool {
        self.config().is_some()
    }

    fn match_font(&mut self, query: &FontQuery<'_>) -> Result<PathBuf, MatchError> {
        let config = self.config().ok_or(MatchError::Unsupported)?;
        let Some(mut pattern) = Self::build_pattern(query) else {
            log::warn!("fontconfig error: could not match family '{}'", query.family);
            return Err(MatchError::NoMatch);
        };
        config.substitute(&mut pattern);
        pattern.default_substitute();

        let Some(matched) = config.font_match(&pattern) else {
            log::warn!("fontconfig error: could not match family '{}'", query.family);
            return Err(MatchError::NoMatch);
        };
        let Some(file) = matched.get_c_string(FC_FILE) else {
            log::warn!("fontconfig error: could not match family '{}'", query.family);
            return Err(MatchError::MissingFile);
        };
        let path = PathBuf::from(OsStr::from_bytes(file.to_bytes()));
        log::debug!("fontconfig matched {query} to {}", path.display());
        Ok(path)
    }
}

impl core::fmt::Debug for FontconfigMatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontconfigMatcher")
            .field("initialized", &self.config.get().is_some())
            .finish_non_exhaustive()
    }
}
