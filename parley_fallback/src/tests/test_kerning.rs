// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{LayoutArgs, LayoutOptions, TextLayout};

use super::utils::{assert_close, chars, single_run, TestFont};

fn cjk_font() -> TestFont {
    TestFont::new(1)
        .with_glyphs("\u{3001}\u{3002}\u{300C}\u{300D}", 1, 16.)
        .with_glyph('A', 10, 8.)
}

fn kerning() -> LayoutOptions {
    LayoutOptions {
        asian_kerning: true,
        ..LayoutOptions::default()
    }
}

#[test]
fn comma_before_full_stop_is_compressed() {
    let text = chars("\u{3001}\u{3002}");
    let args = LayoutArgs::new(&text, 0..2)
        .unwrap()
        .with_options(kerning());
    let layout = TextLayout::layout(&args, &[cjk_font().handle()]).unwrap();
    let glyphs = layout.merged_glyphs();
    assert_close(glyphs[0].1.advance, 12., "comma loses a quarter");
    assert_close(glyphs[0].1.orig_advance, 16., "font advance is kept");
    assert_close(glyphs[1].1.x, 12., "full stop moves left");
    assert_close(glyphs[1].1.advance, 16., "last glyph untouched");
    assert_close(layout.text_width(), 28., "compressed width");
}

#[test]
fn shifts_accumulate() {
    let text = chars("\u{300D}\u{3001}\u{300C}");
    let args = LayoutArgs::new(&text, 0..3).unwrap();
    let mut run = single_run(cjk_font(), &args);
    run.apply_asian_kerning(&text);
    let glyphs = run.glyphs();
    assert_close(glyphs[0].advance, 12., "closing bracket");
    assert_close(glyphs[1].x, 12., "comma");
    assert_close(glyphs[1].advance, 12., "comma before opening bracket");
    assert_close(glyphs[2].x, 24., "opening bracket");
    assert_close(run.text_width(), 40., "compressed width");
}

#[test]
fn opening_bracket_before_comma_is_kept() {
    let text = chars("\u{300C}\u{3001}");
    let args = LayoutArgs::new(&text, 0..2).unwrap();
    let mut run = single_run(cjk_font(), &args);
    run.apply_asian_kerning(&text);
    assert_close(run.text_width(), 32., "no compression");
}

#[test]
fn latin_neighbors_are_ignored() {
    let text = chars("A\u{3002}\u{3001}A");
    let args = LayoutArgs::new(&text, 0..4).unwrap();
    let mut run = single_run(cjk_font(), &args);
    run.apply_asian_kerning(&text);
    // Only the full stop before the comma qualifies.
    assert_close(run.glyphs()[1].advance, 12., "full stop");
    assert_close(run.glyphs()[2].advance, 16., "comma before Latin");
    assert_close(run.text_width(), 44., "one compression");
}

#[test]
fn last_character_of_range_has_no_partner() {
    let text = chars("\u{3001}\u{3002}");
    let args = LayoutArgs::new(&text, 0..1).unwrap();
    let mut run = single_run(cjk_font(), &args);
    run.apply_asian_kerning(&text);
    assert_close(run.text_width(), 16., "the pair crosses the range end");
}

#[test]
fn kerning_is_skipped_for_vertical_and_justified_text() {
    let text = chars("\u{3001}\u{3002}");
    let vertical = LayoutArgs::new(&text, 0..2)
        .unwrap()
        .with_options(LayoutOptions {
            vertical: true,
            ..kerning()
        });
    let layout = TextLayout::layout(&vertical, &[cjk_font().handle()]).unwrap();
    assert_close(layout.text_width(), 32., "vertical text");

    let justified = LayoutArgs::new(&text, 0..2)
        .unwrap()
        .with_options(kerning())
        .with_layout_width(40.);
    let layout = TextLayout::layout(&justified, &[cjk_font().handle()]).unwrap();
    assert_close(layout.text_width(), 40., "justification wins");
    assert_close(layout.merged_glyphs()[1].1.x, 20., "spread evenly");
}
