use super::*;

#[test]
fn scalar_and_vector_endpoints() {
    assert_eq!(f64::lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(f64::lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(f64::lerp(2.0, 4.0, 0.5), 3.0);
    assert_eq!(
        Vec2::lerp(Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0), 0.5),
        Vec2::new(5.0, 5.0)
    );
    assert_eq!(
        Point::lerp(Point::ORIGIN, Point::new(10.0, 20.0), 0.25),
        Point::new(2.5, 5.0)
    );
}

#[test]
fn rect_interpolates_corners_independently() {
    let start = Rect::new(0.0, 0.0, 0.0, 100.0);
    let end = Rect::new(0.0, 0.0, 200.0, 100.0);
    let mid = Rect::lerp(start, end, 0.5);
    assert_eq!(mid, Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn color_interpolates_per_channel() {
    let c = Color::lerp(Color::BLACK, Color::rgb(1.0, 0.5, 0.0), 0.5);
    assert!((c.r - 0.5).abs() < 1e-6);
    assert!((c.g - 0.25).abs() < 1e-6);
    assert_eq!(c.b, 0.0);
}
