use super::*;
use crate::text::font::BuiltinFont;

const MAX: f32 = 1152.0;

fn fit(text: &str, size: u32) -> FittedText {
    let fonts = FontResolver::builtin_only();
    let mut shaper = TextShaper::new();
    let initial = fonts.resolve(size, false, false);
    fit_text(&mut shaper, &fonts, text, initial, MAX, TextStyle::default()).unwrap()
}

#[test]
fn text_that_fits_keeps_requested_size() {
    let out = fit("Hello World", 48);
    assert_eq!(out.font.size_px(), 48);
    assert!(out.width <= MAX);
}

#[test]
fn wide_text_shrinks_in_steps_until_it_fits() {
    // 100 chars at 0.6 * size: 20px is 1200 wide, 18px is 1080.
    let text = "x".repeat(100);
    let out = fit(&text, 48);
    assert_eq!(out.font.size_px(), 18);
    assert!(out.width <= MAX);

    // 90 chars: 22px is 1188 wide, 20px is 1080.
    let out = fit(&"y".repeat(90), 48);
    assert_eq!(out.font.size_px(), 20);
}

#[test]
fn shrinking_stops_at_the_floor() {
    let text = "z".repeat(400);
    let out = fit(&text, 72);
    assert_eq!(out.font.size_px(), FIT_FLOOR_PX);
    assert!(out.width > MAX);
}

#[test]
fn odd_requested_size_never_undershoots_the_floor() {
    let text = "w".repeat(400);
    let out = fit(&text, 19);
    assert_eq!(out.font.size_px(), FIT_FLOOR_PX);
}

#[test]
fn sizes_below_the_floor_are_left_alone() {
    let text = "v".repeat(400);
    let out = fit(&text, 12);
    assert_eq!(out.font.size_px(), 12);
}

#[test]
fn fitted_size_is_bounded_for_many_lengths() {
    for len in (0..500).step_by(7) {
        let text = "m".repeat(len);
        let out = fit(&text, 64);
        let size = out.font.size_px();
        assert!(size <= 64);
        assert!(size >= FIT_FLOOR_PX);
        assert!(out.width <= MAX || size == FIT_FLOOR_PX, "len {len}");
    }
}

#[test]
fn fit_keeps_emphasis_through_resolution() {
    let fonts = FontResolver::builtin_only();
    let mut shaper = TextShaper::new();
    let style = TextStyle {
        bold: true,
        italic: true,
        underline: false,
    };
    let initial = Font::Builtin(BuiltinFont::with_size(40));
    let out = fit_text(&mut shaper, &fonts, &"b".repeat(100), initial, MAX, style).unwrap();
    assert_eq!(out.font.size_px(), 18);
}

#[test]
fn layout_centers_and_applies_ascent_correction() {
    let fonts = FontResolver::builtin_only();
    let mut shaper = TextShaper::new();
    let line = layout_line(
        &mut shaper,
        &fonts,
        Canvas::THUMBNAIL,
        "Hello World",
        48,
        TextStyle::default(),
        720.0 * 0.38,
    )
    .unwrap();
    assert_eq!(line.font_size, 48);
    // 11 chars * 28.8 = 316.8 wide.
    assert_eq!(line.x, ((1280.0 - line.width) / 2.0).floor());
    assert_eq!(line.x, 481.0);
    // 273.6 - 28.8 = 244.8, truncated.
    assert_eq!(line.y, 244.0);
}

#[test]
fn empty_text_is_centered_at_midpoint() {
    let fonts = FontResolver::builtin_only();
    let mut shaper = TextShaper::new();
    for text in ["", "   "] {
        let line = layout_line(
            &mut shaper,
            &fonts,
            Canvas::THUMBNAIL,
            text,
            24,
            TextStyle::default(),
            432.0,
        )
        .unwrap();
        assert!(line.width <= 50.0);
        assert!((line.x + line.width / 2.0 - 640.0).abs() <= 1.0);
    }
}

#[test]
fn line_breaks_collapse_to_spaces() {
    assert_eq!(single_line("a\r\nb\nc\rd"), "a b c d");
    assert!(matches!(single_line("plain"), Cow::Borrowed(_)));
}
