use super::*;
use crate::assets::templates::template_by_id;

#[test]
fn defaults_match_the_form() {
    let req = ThumbnailRequest::default();
    assert_eq!(req.title, "Your Title");
    assert_eq!(req.subtitle, "Your Subtitle");
    assert_eq!((req.title_size, req.subtitle_size), (48, 24));
    assert_eq!(req.bg_color, Rgb8::new(255, 0, 0));
    assert_eq!(req.text_color, Rgb8::WHITE);
    assert_eq!(req.shadow_color, Rgb8::BLACK);
    assert_eq!(req.shadow_offset, ShadowOffset { x: 2, y: 2 });
    assert!(!req.shadow_enabled);
    assert_eq!(req.bg_type, BackgroundKind::Color);
    assert_eq!(req.text_styles, TextStyle::default());
    assert!(req.validate().is_ok());
}

#[test]
fn form_fields_override_defaults() {
    let req = ThumbnailRequest::from_form_fields([
        ("title", "Hello"),
        ("title_size", "64"),
        ("bg_color", "#00ff00"),
        ("text_styles", "bold, underline,sparkle"),
        ("shadow_enabled", "on"),
        ("shadow_offset_x", "-3"),
        ("bg_type", "image"),
        ("unrelated", "x"),
    ])
    .unwrap();
    assert_eq!(req.title, "Hello");
    assert_eq!(req.subtitle, "Your Subtitle");
    assert_eq!(req.title_size, 64);
    assert_eq!(req.bg_color, Rgb8::new(0, 255, 0));
    assert!(req.text_styles.bold && req.text_styles.underline && !req.text_styles.italic);
    assert!(req.shadow_enabled);
    assert_eq!(req.shadow_offset, ShadowOffset { x: -3, y: 2 });
    assert_eq!(req.bg_type, BackgroundKind::Image);
}

#[test]
fn shadow_needs_literal_on() {
    let req = ThumbnailRequest::from_form_fields([("shadow_enabled", "true")]).unwrap();
    assert!(!req.shadow_enabled);
}

#[test]
fn bad_form_values_are_invalid_input() {
    for (key, value) in [
        ("title_size", "big"),
        ("shadow_offset_y", "1.5"),
        ("text_color", "#GGGGGG"),
    ] {
        let err = ThumbnailRequest::from_form_fields([(key, value)]).unwrap_err();
        assert!(matches!(err, ThumbError::InvalidInput(_)), "{key}");
    }
}

#[test]
fn json_uses_defaults_and_accepts_both_style_forms() {
    let req: ThumbnailRequest =
        serde_json::from_str(r#"{"title":"Hi","text_styles":"italic"}"#).unwrap();
    assert_eq!(req.title, "Hi");
    assert_eq!(req.title_size, 48);
    assert!(req.text_styles.italic);

    let req: ThumbnailRequest = serde_json::from_str(
        r##"{"text_styles":["bold","underline"],"bg_type":"image","text_color":"rgb(1,2,3)"}"##,
    )
    .unwrap();
    assert!(req.text_styles.bold && req.text_styles.underline);
    assert_eq!(req.bg_type, BackgroundKind::Image);
    assert_eq!(req.text_color, Rgb8::new(1, 2, 3));
    assert!(req.bg_image.is_none());
}

#[test]
fn json_round_trips_styles_as_a_list() {
    let mut req = ThumbnailRequest::default();
    req.text_styles = TextStyle::parse_list("bold,italic");
    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["text_styles"], serde_json::json!(["bold", "italic"]));
    assert_eq!(v["bg_color"], "#FF0000");
    let back: ThumbnailRequest = serde_json::from_value(v).unwrap();
    assert_eq!(back, req);
}

#[test]
fn validate_bounds_sizes() {
    let mut req = ThumbnailRequest::default();
    req.title_size = 0;
    assert!(matches!(req.validate(), Err(ThumbError::InvalidInput(_))));
    req.title_size = MAX_FONT_SIZE_PX;
    assert!(req.validate().is_ok());
    req.subtitle_size = MAX_FONT_SIZE_PX + 1;
    assert!(req.validate().is_err());
}

#[test]
fn template_seeds_text_and_colors() {
    let t = template_by_id(3).unwrap();
    let req = ThumbnailRequest::from_template(t);
    assert_eq!(req.title, "YOUR TITLE HERE");
    assert_eq!(req.subtitle, "Your subtitle text");
    assert_eq!(req.bg_color, Rgb8::new(0xFF, 0xCC, 0x00));
    assert_eq!(req.text_color, Rgb8::BLACK);
    // One text color for both lines.
    assert_ne!(t.subtitle_color, t.title_color);
    assert_eq!(req.title_size, 48);
}

#[test]
fn background_image_switches_kind() {
    let req = ThumbnailRequest::default().with_background_image("bg.png", vec![1, 2, 3]);
    assert_eq!(req.bg_type, BackgroundKind::Image);
    let img = req.bg_image.as_ref().unwrap();
    assert_eq!(img.filename, "bg.png");
    assert!(format!("{img:?}").contains("bytes: 3"));
}

#[test]
fn filter_percent_scale() {
    let req = FilterRequest::from_percent(vec![], "a.png", FilterKind::Brightness, 150.0);
    assert_eq!(req.intensity, 1.5);
    let req = FilterRequest::from_percent(vec![], "a.png", FilterKind::Sepia, 100.0);
    assert_eq!(req.intensity, 1.0);
}
