use super::*;
use crate::foundation::core::Rgba8Premul;

const FULL: Vec2 = Vec2::new(0.0, 0.0);

#[test]
fn bounding_rect_uses_far_edge_offsets() {
    let vp = Size::new(400.0, 200.0);
    assert_eq!(bounding_rect(FULL, FULL, vp), Rect::new(0.0, 0.0, 400.0, 200.0));
    assert_eq!(
        bounding_rect(Vec2::new(0.25, 0.5), Vec2::new(-0.5, 0.0), vp),
        Rect::new(100.0, 100.0, 200.0, 200.0)
    );
}

#[test]
fn crop_of_landscape_source_into_square_box() {
    let opts = ResizeOptions {
        fit: Fit::Crop,
        bounds_scale: Vec2::new(0.5, 0.5),
    };
    let plan = compute(
        Size::new(200.0, 100.0),
        Size::new(400.0, 400.0),
        FULL,
        FULL,
        opts,
    );
    assert_eq!(plan.dest, Rect::new(100.0, 100.0, 300.0, 300.0));
    assert_eq!(plan.dest.center(), Point::new(200.0, 200.0));
    assert_eq!(plan.crop, Rect::new(50.0, 0.0, 150.0, 100.0));
}

#[test]
fn crop_of_portrait_source_into_wide_box() {
    let plan = compute(
        Size::new(100.0, 200.0),
        Size::new(400.0, 100.0),
        FULL,
        FULL,
        ResizeOptions::default(),
    );
    assert_eq!(plan.dest, Rect::new(0.0, 0.0, 400.0, 100.0));
    assert_eq!(plan.crop, Rect::new(0.0, 87.5, 100.0, 112.5));
}

#[test]
fn scale_fits_inside_the_box() {
    let opts = ResizeOptions {
        fit: Fit::Scale,
        ..ResizeOptions::default()
    };
    let plan = compute(
        Size::new(200.0, 100.0),
        Size::new(400.0, 400.0),
        FULL,
        FULL,
        opts,
    );
    assert_eq!(plan.dest, Rect::new(0.0, 100.0, 400.0, 300.0));
    assert_eq!(plan.crop, Rect::new(0.0, 0.0, 200.0, 100.0));

    let tall = compute(
        Size::new(100.0, 400.0),
        Size::new(400.0, 200.0),
        FULL,
        FULL,
        opts,
    );
    assert_eq!(tall.dest, Rect::new(175.0, 0.0, 225.0, 200.0));
}

#[test]
fn process_renders_the_crop() {
    // left half red, right half blue
    let mut data = Vec::new();
    for _ in 0..2 {
        data.extend_from_slice(&[255, 0, 0, 255, 255, 0, 0, 255, 0, 0, 255, 255, 0, 0, 255, 255]);
    }
    let tex = Texture::from_premul_rgba8(4, 2, data).unwrap();
    let out = process(
        &tex,
        Size::new(2.0, 2.0),
        FULL,
        FULL,
        ResizeOptions::default(),
    )
    .unwrap();
    assert_eq!(out.bounds, Rect::new(0.0, 0.0, 2.0, 2.0));
    assert_eq!((out.texture.width(), out.texture.height()), (2, 2));
    assert_eq!(out.texture.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(out.texture.pixel(1, 1), Some([0, 0, 255, 255]));
}

#[test]
fn process_rejects_empty_input_and_box() {
    let empty = Texture::solid(0, 0, Rgba8Premul::transparent());
    assert!(process(&empty, Size::new(10.0, 10.0), FULL, FULL, ResizeOptions::default()).is_err());

    let tex = Texture::solid(2, 2, Rgba8Premul::transparent());
    let collapsed = ResizeOptions {
        bounds_scale: Vec2::ZERO,
        ..ResizeOptions::default()
    };
    assert!(process(&tex, Size::new(10.0, 10.0), FULL, FULL, collapsed).is_err());
}
