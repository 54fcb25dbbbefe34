// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::vec::Vec;

use crate::{BidiRun, LayoutArgs, LayoutOptions, TextLayout};

use super::utils::{assert_close, chars, single_run, TestFont};

fn ab_font() -> TestFont {
    TestFont::new(1).with_glyph('A', 1, 10.).with_glyph('B', 2, 12.)
}

fn kashida() -> LayoutOptions {
    LayoutOptions {
        kashida_justification: true,
        ..LayoutOptions::default()
    }
}

#[test]
fn total_width_sums_advances() {
    let text = chars("AB");
    let args = LayoutArgs::new(&text, 0..2).unwrap();
    let layout = TextLayout::layout(&args, &[ab_font().handle()]).unwrap();
    assert!(matches!(layout, TextLayout::Single(_)), "one font gives one level");
    assert_close(layout.text_width(), 22., "width of AB");
}

#[test]
fn partial_widths_add_up() {
    let text = chars("ABBA");
    let args = LayoutArgs::new(&text, 0..4).unwrap();
    let run = single_run(ab_font(), &args);
    let total = run.text_width();
    for split in 0..=4 {
        let left = run.partial_text_width(0, split);
        let right = run.partial_text_width(split, 4 - split);
        assert_close(left + right, total, "split widths");
    }
    assert_close(run.partial_text_width(1, 2), 24., "middle characters");
}

#[test]
fn out_of_range_queries_degrade() {
    let text = chars("AB");
    let args = LayoutArgs::new(&text, 0..2).unwrap();
    let run = single_run(ab_font(), &args);
    assert_close(run.partial_text_width(5, 3), 0., "past the end");
    assert_eq!(run.text_break(100., 0., 1.), None, "everything fits");
    assert!(!run.is_kashida_pos_valid(7), "no glyph at 7");

    let empty = LayoutArgs::new(&text, 1..1).unwrap();
    let run = single_run(ab_font(), &empty);
    assert!(run.caret_positions().is_empty(), "no characters, no carets");
    assert_close(run.text_width(), 0., "empty width");
}

#[test]
fn dx_array_credits_ligature_to_first_character() {
    let text = chars("fix");
    let font = TestFont::new(1)
        .with_glyphs("fix", 1, 5.)
        .with_ligature(['f', 'i'], 20, 8.);
    let args = LayoutArgs::new(&text, 0..3).unwrap();
    let run = single_run(font, &args);
    let mut widths = Vec::new();
    let total = run.fill_dx_array(&mut widths);
    assert_eq!(widths, [8., 0., 5.], "per character widths");
    assert_close(total, run.text_width(), "fill returns the width");
}

#[test]
fn dx_array_is_relative_to_range_start() {
    let text = chars("ABAB");
    let args = LayoutArgs::new(&text, 1..3).unwrap();
    let run = single_run(ab_font(), &args);
    let mut widths = vec![99.; 7];
    run.fill_dx_array(&mut widths);
    assert_eq!(widths, [12., 10.], "characters 1 and 2");
}

#[test]
fn ltr_carets_touch() {
    let text = chars("AB");
    let args = LayoutArgs::new(&text, 0..2).unwrap();
    let carets = single_run(ab_font(), &args).caret_positions();
    assert_eq!(carets.len(), 4, "two entries per character");
    assert_eq!(
        carets,
        [Some(0.), Some(10.), Some(10.), Some(22.)],
        "left and right carets"
    );
    assert_eq!(carets[1], carets[2], "right of A is left of B");
}

#[test]
fn rtl_carets_are_mirrored() {
    let text = chars("AB");
    let args = LayoutArgs::new(&text, 0..2)
        .unwrap()
        .with_runs([BidiRun::rtl(0..2)])
        .unwrap();
    let run = single_run(ab_font(), &args);
    // B is drawn first.
    assert_eq!(run.glyphs()[0].char_index, 1, "visual order");
    assert_eq!(
        run.caret_positions(),
        [Some(22.), Some(12.), Some(12.), Some(0.)],
        "logical left caret is the visual right edge"
    );
}

#[test]
fn rtl_carets_stay_in_widened_cells() {
    let text = chars("AB");
    let args = LayoutArgs::new(&text, 0..2)
        .unwrap()
        .with_runs([BidiRun::rtl(0..2)])
        .unwrap();

    let mut run = single_run(ab_font(), &args);
    run.apply_dx_array(&[15., 30.]);
    assert_eq!(
        run.caret_positions(),
        [Some(30.), Some(15.), Some(15.), Some(0.)],
        "carets bound the cells, not the ink"
    );

    let mut run = single_run(ab_font(), &args);
    run.justify(44.);
    assert_close(run.glyphs()[0].x, 11., "B ink at the right of its cell");
    assert_close(run.glyphs()[1].x, 34., "A ink at the right of its cell");
    assert_eq!(
        run.caret_positions(),
        [Some(44.), Some(23.), Some(23.), Some(0.)],
        "carets span the justified width"
    );
}

#[test]
fn marks_keep_cluster_carets() {
    let text = chars("a\u{301}b");
    let font = TestFont::new(1)
        .with_glyph('a', 1, 10.)
        .with_glyph('b', 2, 10.)
        .with_mark('\u{301}', 3);
    let args = LayoutArgs::new(&text, 0..3).unwrap();
    let carets = single_run(font, &args).caret_positions();
    assert_eq!(
        carets,
        [Some(0.), Some(10.), None, None, Some(10.), Some(20.)],
        "the mark does not move the caret of its base"
    );
}

#[test]
fn text_break_finds_first_overflow() {
    let text = chars("AB");
    let args = LayoutArgs::new(&text, 0..2).unwrap();
    let layout = TextLayout::layout(&args, &[ab_font().handle()]).unwrap();
    assert_eq!(layout.text_break(15., 0., 1.), Some(1), "A fits, AB does not");
    assert_eq!(layout.text_break(22., 0., 1.), None, "exact fit");
    assert_eq!(layout.text_break(5., 0., 1.), Some(0), "nothing fits");
    assert_eq!(layout.text_break(10., 0., 0.5), Some(1), "scaled widths");
    assert_eq!(layout.text_break(21., 0., 1.), Some(1), "one unit short");
    assert_eq!(
        layout.text_break(22., 1., 1.),
        Some(1),
        "extra spacing after A pushes B out"
    );
}

#[test]
fn kashida_positions_respect_ligatures() {
    let text = chars("\u{628}\u{62a}\u{62b}\u{62c}");
    let font = TestFont::new(1)
        .with_glyphs("\u{628}\u{62a}\u{62b}\u{62c}", 1, 10.)
        .with_ligature(['\u{62a}', '\u{62b}'], 30, 14.)
        .with_kashida("\u{628}\u{62a}\u{62b}\u{62c}");
    let args = LayoutArgs::new(&text, 0..4)
        .unwrap()
        .with_runs([BidiRun::rtl(0..4)])
        .unwrap()
        .with_options(kashida());
    let run = single_run(font, &args);
    let order: Vec<_> = run.glyphs().iter().map(|g| g.char_index).collect();
    assert_eq!(order, [3, 1, 0], "visual order of the right-to-left run");

    assert!(run.is_kashida_pos_valid(3), "first glyph");
    assert!(!run.is_kashida_pos_valid(1), "ligature start");
    assert!(run.is_kashida_pos_valid(0), "preceded by the next character");
    assert!(!run.is_kashida_pos_valid(2), "inside the ligature");
}

#[test]
fn kashida_needs_option_and_font_permission() {
    let text = chars("\u{628}\u{62c}");
    let font = || {
        TestFont::new(1)
            .with_glyphs("\u{628}\u{62c}", 1, 10.)
            .with_kashida("\u{628}")
    };
    let args = LayoutArgs::new(&text, 0..2)
        .unwrap()
        .with_runs([BidiRun::rtl(0..2)])
        .unwrap();

    let plain = single_run(font(), &args);
    assert!(
        plain.glyphs().iter().all(|g| !g.allow_kashida()),
        "marks are dropped without the option"
    );
    assert!(!plain.is_kashida_pos_valid(0), "kashida justification not requested");

    let run = single_run(font(), &args.with_options(kashida()));
    assert!(run.is_kashida_pos_valid(0), "allowed by the font");
    assert!(!run.is_kashida_pos_valid(1), "the font does not allow kashida here");
}

#[test]
fn kashida_rejects_missing_glyphs() {
    let text = chars("\u{628}?\u{628}");
    let font = TestFont::new(1)
        .with_glyph('\u{628}', 1, 10.)
        .with_kashida("\u{628}?");
    let args = LayoutArgs::new(&text, 0..3)
        .unwrap()
        .with_runs([BidiRun::rtl(0..3)])
        .unwrap()
        .with_options(kashida());
    let run = single_run(font, &args);
    assert!(run.glyphs()[1].is_notdef(), "placeholder for '?'");
    assert!(!run.is_kashida_pos_valid(1), "the font cannot render '?'");
    assert!(run.is_kashida_pos_valid(0), "preceded by the placeholder of the next character");
}
