use super::*;

#[test]
fn premul_rounds_like_integer_math() {
    let px = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(px.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}

#[test]
fn color_to_premul_clamps_channels() {
    let c = Color::rgb(2.0, -1.0, 1.0);
    assert_eq!(c.to_premul_rgba8(1.0).to_array(), [255, 0, 255, 255]);
    assert_eq!(Color::WHITE.to_premul_rgba8(0.0).to_array(), [0, 0, 0, 0]);
}

#[test]
fn pixel_extent_rounds_and_floors_negative() {
    assert_eq!(pixel_extent(Size::new(99.6, 10.2)), (100, 10));
    assert_eq!(pixel_extent(Size::new(-3.0, 4.0)), (0, 4));
}
