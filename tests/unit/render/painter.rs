use super::*;
use crate::text::font::{BuiltinFont, Font};
use crate::text::shaper::TextShaper;

fn px(img: &RgbImage, x: u32, y: u32) -> [u8; 3] {
    img.get_pixel(x, y).0
}

#[test]
fn background_covers_every_pixel() {
    let mut p = Painter::new(Canvas::new(16, 8).unwrap()).unwrap();
    p.fill_background(Rgb8::new(255, 0, 0));
    let img = p.finish().unwrap();
    assert_eq!(img.dimensions(), (16, 8));
    assert!(img.pixels().all(|p| p.0 == [255, 0, 0]));
}

#[test]
fn later_paint_lands_on_top() {
    let mut p = Painter::new(Canvas::new(16, 16).unwrap()).unwrap();
    p.fill_background(Rgb8::BLACK);
    p.fill_rect(4.0, 4.0, 8.0, 8.0, Rgb8::WHITE);
    let img = p.finish().unwrap();
    assert_eq!(px(&img, 5, 5), [255, 255, 255]);
    assert_eq!(px(&img, 1, 1), [0, 0, 0]);
    assert_eq!(px(&img, 9, 9), [0, 0, 0]);
}

#[test]
fn background_image_must_match_canvas() {
    let mut p = Painter::new(Canvas::new(4, 4).unwrap()).unwrap();
    let wrong = RgbImage::new(3, 4);
    assert!(p.draw_background_image(&wrong).is_err());

    let mut right = RgbImage::new(4, 4);
    right.put_pixel(2, 1, image::Rgb([10, 200, 30]));
    p.draw_background_image(&right).unwrap();
    let img = p.finish().unwrap();
    assert_eq!(px(&img, 2, 1), [10, 200, 30]);
    assert_eq!(px(&img, 0, 0), [0, 0, 0]);
}

#[test]
fn builtin_glyphs_paint_boxes_and_leave_spaces_clear() {
    let mut shaper = TextShaper::new();
    let font = Font::Builtin(BuiltinFont::with_size(20));
    let line = shaper.shape("A A", &font).unwrap();

    let mut p = Painter::new(Canvas::new(64, 32).unwrap()).unwrap();
    p.fill_background(Rgb8::BLACK);
    p.fill_text(&line, 0.0, 0.0, Rgb8::WHITE);
    let img = p.finish().unwrap();

    // First box spans x 2..10, y 4..18 at 20px.
    assert_eq!(px(&img, 5, 10), [255, 255, 255]);
    // The space occupies x 12..24 with no box.
    assert_eq!(px(&img, 17, 10), [0, 0, 0]);
    // Third char box starts at 24 + 2.
    assert_eq!(px(&img, 30, 10), [255, 255, 255]);
}

#[test]
fn oversized_canvas_is_a_render_failure() {
    let err = Painter::new(Canvas::new(70_000, 10).unwrap()).err().unwrap();
    assert!(matches!(err, ThumbError::RenderFailure(_)));
}
