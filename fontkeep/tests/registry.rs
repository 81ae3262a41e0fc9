// Copyright 2025 the Fontkeep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup behavior of the font registry against the bundled fonts.

use fontkeep::{
    FontRegistry, FontTable, LoadError, Markup, NullMatcher, RegistryOptions, Slant, Weight,
};
use fontkeep_dev::{FONT_FAMILY, TextSamples};

fn dejavu_table() -> FontTable {
    FontTable::new()
        .with(
            FONT_FAMILY,
            Weight::Regular,
            Slant::Roman,
            fontkeep_dev::sans_regular(),
        )
        .with(
            FONT_FAMILY,
            Weight::Bold,
            Slant::Roman,
            fontkeep_dev::sans_bold(),
        )
        .with(
            FONT_FAMILY,
            Weight::Regular,
            Slant::Italic,
            fontkeep_dev::sans_oblique(),
        )
}

fn registry() -> FontRegistry {
    FontRegistry::with_matcher(512, 512, 1, dejavu_table())
}

#[test]
fn same_file_and_size_yields_same_font() {
    let mut registry = registry();
    let path = fontkeep_dev::sans_regular();
    let first = registry.get_by_file(&path, 16.0).unwrap();
    let second = registry.get_by_file(&path, 16.0).unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
}

#[test]
fn different_sizes_are_different_fonts() {
    let mut registry = registry();
    let path = fontkeep_dev::sans_regular();
    let small = registry.get_by_file(&path, 12.0).unwrap();
    let large = registry.get_by_file(&path, 12.5).unwrap();
    assert_ne!(small, large);
    assert_eq!(registry.font(small).unwrap().size(), 12.0);
    assert_eq!(registry.font(large).unwrap().size(), 12.5);
}

#[test]
fn fonts_keep_load_order() {
    let mut registry = registry();
    let a = registry.get_by_file(fontkeep_dev::sans_bold(), 10.0).unwrap();
    let b = registry.get_by_file(fontkeep_dev::sans_regular(), 10.0).unwrap();
    let c = registry
        .get_by_file(fontkeep_dev::sans_oblique(), 10.0)
        .unwrap();
    assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
    let paths: Vec<_> = registry.fonts().iter().map(|f| f.path().to_owned()).collect();
    assert_eq!(
        paths,
        [
            fontkeep_dev::sans_bold(),
            fontkeep_dev::sans_regular(),
            fontkeep_dev::sans_oblique()
        ]
    );
}

#[test]
fn paths_are_compared_literally() {
    let mut registry = registry();
    let plain = fontkeep_dev::sans_regular();
    let dotted = fontkeep_dev::font_dir().join("./DejaVuSans.ttf");
    let a = registry.get_by_file(&plain, 14.0).unwrap();
    let b = registry.get_by_file(&dotted, 14.0).unwrap();
    assert_ne!(a, b, "no path normalization is performed");
    assert_eq!(registry.len(), 2);
}

#[test]
fn failed_load_leaves_registry_unchanged() {
    let mut registry = registry();
    assert_eq!(registry.get_by_file(fontkeep_dev::missing_font(), 12.0), None);
    assert_eq!(registry.get_by_file(fontkeep_dev::not_a_font(), 12.0), None);
    assert!(registry.is_empty());
    assert_eq!(registry.atlas().used(), 0);

    let err = registry
        .get_by_file_with_error(fontkeep_dev::missing_font(), 12.0)
        .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "got {err:?}");
}

#[test]
fn failed_load_then_successful_load() {
    let mut registry = registry();
    let before = registry.len();
    assert_eq!(registry.get_by_file(fontkeep_dev::missing_font(), 12.0), None);
    assert_eq!(registry.len(), before);

    let loaded = registry.get_by_file(fontkeep_dev::sans_regular(), 12.0);
    assert!(loaded.is_some());
    assert_eq!(registry.len(), before + 1);
}

#[test]
fn miss_then_hit() {
    let mut registry = registry();
    let path = fontkeep_dev::sans_regular();
    assert_eq!(registry.find(&path, 20.0), None);
    let loaded = registry.get_by_file(&path, 20.0).unwrap();
    assert_eq!(registry.find(&path, 20.0), Some(loaded));
    let used = registry.atlas().used();
    assert_eq!(registry.get_by_file(&path, 20.0), Some(loaded));
    assert_eq!(registry.atlas().used(), used, "a hit must not touch the atlas");
}

#[test]
fn new_fonts_get_only_the_default_cache_string() {
    let mut registry = registry();
    let id = registry.get_by_file(fontkeep_dev::sans_regular(), 16.0).unwrap();
    let font = registry.font(id).unwrap();
    assert_eq!(font.glyph_count(), 1);
    assert!(font.has_glyph(' '));
}

#[test]
fn cache_string_applies_to_fonts_created_later() {
    let mut registry = registry();
    let early = registry.get_by_file(fontkeep_dev::sans_regular(), 16.0).unwrap();

    registry.set_cache_string("abc");
    assert_eq!(registry.cache_string(), "abc");
    let late = registry.get_by_file(fontkeep_dev::sans_regular(), 18.0).unwrap();

    let early = registry.font(early).unwrap();
    assert_eq!(early.glyph_count(), 1, "existing fonts are not re-warmed");
    assert!(!early.has_glyph('a'));

    let late = registry.font(late).unwrap();
    assert_eq!(late.glyph_count(), 3);
    assert!(late.has_glyph('a') && late.has_glyph('b') && late.has_glyph('c'));
    assert!(!late.has_glyph(' '));
}

#[test]
fn cache_string_from_options() {
    let samples = TextSamples::new();
    let mut registry = FontRegistry::with_options(RegistryOptions {
        cache_string: samples.latin.text.to_owned(),
        system_fonts: false,
        ..RegistryOptions::default()
    });
    let id = registry.get_by_file(fontkeep_dev::sans_regular(), 12.0).unwrap();
    let font = registry.font(id).unwrap();
    for c in samples.latin.text.chars() {
        assert!(font.has_glyph(c), "{c:?} should have been pre-loaded");
    }
}

#[test]
fn load_glyphs_extends_a_registered_font() {
    let mut registry = registry();
    let id = registry.get_by_file(fontkeep_dev::sans_regular(), 16.0).unwrap();
    let text = TextSamples::new().accented.text;
    assert_eq!(registry.load_glyphs(id, text), 0);
    let font = registry.font(id).unwrap();
    assert!(text.chars().all(|c| font.has_glyph(c)));
}

#[test]
fn description_loads_at_the_requested_size() {
    let mut registry = registry();
    let id = registry
        .get_by_description(FONT_FAMILY, 13.0, false, false)
        .unwrap();
    let font = registry.font(id).unwrap();
    assert_eq!(font.size(), 13.0);
    assert_eq!(font.path(), fontkeep_dev::sans_regular());
}

#[test]
fn description_and_file_lookup_share_fonts() {
    let mut registry = registry();
    let by_name = registry
        .get_by_description(FONT_FAMILY, 15.0, true, false)
        .unwrap();
    let by_file = registry.get_by_file(fontkeep_dev::sans_bold(), 15.0).unwrap();
    assert_eq!(by_name, by_file);
    let again = registry
        .get_by_description(FONT_FAMILY, 15.0, true, false)
        .unwrap();
    assert_eq!(again, by_name);
    assert_eq!(registry.len(), 1);
}

#[test]
fn unmatchable_family_returns_none() {
    let mut registry = registry();
    assert_eq!(
        registry.get_by_description("No Such Family", 12.0, false, true),
        None
    );
    assert!(registry.is_empty());
}

#[test]
fn unsupported_matcher_returns_none() {
    let mut registry = FontRegistry::with_matcher(128, 128, 1, NullMatcher);
    assert_eq!(
        registry.get_by_description(FONT_FAMILY, 12.0, false, false),
        None
    );
    assert_eq!(registry.match_description(FONT_FAMILY, 12.0, false, false), None);
    assert!(registry.is_empty());
}

#[test]
fn markup_forwards_family_size_and_style() {
    let mut registry = registry();
    let markup = Markup::new(FONT_FAMILY, 11.0)
        .italic(true)
        .underline(true)
        .gamma(1.8);
    let id = registry.get_by_markup(&markup).unwrap();
    let font = registry.font(id).unwrap();
    assert_eq!(font.path(), fontkeep_dev::sans_oblique());
    assert_eq!(font.size(), 11.0);
}

#[test]
fn registry_can_move_between_threads() {
    let mut registry = registry();
    let id = registry.get_by_file(fontkeep_dev::sans_regular(), 12.0).unwrap();
    let handle = std::thread::spawn(move || registry.font(id).map(|font| font.size()));
    assert_eq!(handle.join().unwrap(), Some(12.0));
}
