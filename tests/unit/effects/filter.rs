use super::*;

fn sample() -> RgbImage {
    RgbImage::from_fn(16, 9, |x, y| {
        Rgb([
            (x * 16) as u8,
            (y * 28) as u8,
            ((x * 7 + y * 13) % 256) as u8,
        ])
    })
}

#[test]
fn kind_parses_case_insensitively() {
    assert_eq!("Sepia".parse::<FilterKind>().unwrap(), FilterKind::Sepia);
    assert_eq!(" grayscale ".parse::<FilterKind>().unwrap(), FilterKind::Grayscale);
    for k in FilterKind::ALL {
        assert_eq!(k.to_string().parse::<FilterKind>().unwrap(), k);
    }
}

#[test]
fn unknown_kind_is_unsupported() {
    let err = "blur".parse::<FilterKind>().unwrap_err();
    assert!(matches!(err, ThumbError::UnsupportedFilter(_)));
    assert!(err.is_client_error());
}

#[test]
fn sepia_matches_reference_pixel() {
    assert_eq!(sepia([200, 150, 100]), [212, 189, 147]);
    assert_eq!(sepia([255, 255, 255]), [255, 255, 238]);
    assert_eq!(sepia([0, 0, 0]), [0, 0, 0]);
}

#[test]
fn sepia_ignores_intensity() {
    let img = sample();
    let a = apply_filter(&img, FilterKind::Sepia, 0.1).unwrap();
    let b = apply_filter(&img, FilterKind::Sepia, 1.9).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.get_pixel(0, 0).0, sepia(img.get_pixel(0, 0).0));
}

#[test]
fn grayscale_has_equal_channels() {
    let out = apply_filter(&sample(), FilterKind::Grayscale, 1.0).unwrap();
    assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
}

#[test]
fn luma_uses_rounded_fixed_point_weights() {
    assert_eq!(luma([255, 255, 255]), 255);
    assert_eq!(luma([0, 0, 0]), 0);
    assert_eq!(luma([255, 0, 0]), 76);
    assert_eq!(luma([0, 255, 0]), 150);
    assert_eq!(luma([0, 0, 255]), 29);
}

#[test]
fn enhancements_are_identity_at_one() {
    let img = sample();
    for kind in [FilterKind::Brightness, FilterKind::Contrast, FilterKind::Saturate] {
        assert_eq!(apply_filter(&img, kind, 1.0).unwrap(), img, "{kind}");
    }
}

#[test]
fn enhancements_collapse_to_degenerate_at_zero() {
    let img = sample();

    let black = apply_filter(&img, FilterKind::Brightness, 0.0).unwrap();
    assert!(black.pixels().all(|p| p.0 == [0, 0, 0]));

    let flat = apply_filter(&img, FilterKind::Contrast, 0.0).unwrap();
    let first = *flat.get_pixel(0, 0);
    assert!(flat.pixels().all(|p| *p == first));
    assert!(first[0] == first[1] && first[1] == first[2]);

    let gray = apply_filter(&img, FilterKind::Saturate, 0.0).unwrap();
    let grayscale = apply_filter(&img, FilterKind::Grayscale, 1.0).unwrap();
    assert_eq!(gray, grayscale);
}

#[test]
fn brightness_scales_and_clamps() {
    let img = RgbImage::from_pixel(2, 2, Rgb([100, 200, 3]));
    let out = apply_filter(&img, FilterKind::Brightness, 1.5).unwrap();
    assert_eq!(out.get_pixel(1, 1).0, [150, 255, 4]);
    let out = apply_filter(&img, FilterKind::Brightness, 0.5).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [50, 100, 1]);
}

#[test]
fn contrast_pushes_away_from_mean() {
    let mut img = RgbImage::from_pixel(2, 1, Rgb([50, 50, 50]));
    img.put_pixel(1, 0, Rgb([150, 150, 150]));
    let out = apply_filter(&img, FilterKind::Contrast, 2.0).unwrap();
    // Mean luma is 100.
    assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(out.get_pixel(1, 0).0, [200, 200, 200]);
}

#[test]
fn invalid_intensity_is_rejected() {
    let img = sample();
    for bad in [f32::NAN, f32::INFINITY, -0.5] {
        let err = apply_filter(&img, FilterKind::Brightness, bad).unwrap_err();
        assert!(matches!(err, ThumbError::InvalidInput(_)));
    }
}

#[test]
fn output_is_a_new_image_of_the_same_size() {
    let img = sample();
    for kind in FilterKind::ALL {
        let out = apply_filter(&img, kind, 1.3).unwrap();
        assert_eq!(out.dimensions(), img.dimensions());
    }
    assert_eq!(img, sample());
}
