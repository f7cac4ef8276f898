use super::*;
use crate::render::surface::ScopedState;

const RED: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

fn red_2x2() -> Texture {
    Texture::solid(2, 2, RED)
}

fn count_opaque(s: &CpuSurface) -> usize {
    s.data().chunks_exact(4).filter(|p| p[3] == 255).count()
}

#[test]
fn rejects_zero_and_oversized_surfaces() {
    assert!(CpuSurface::new(0, 4).is_err());
    assert!(CpuSurface::new(70_000, 1).is_err());
}

#[test]
fn identity_draw_covers_destination_only() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let r = Rect::new(0.0, 0.0, 2.0, 2.0);
    s.draw_texture(&red_2x2(), r, r, Paint::default());
    assert_eq!(s.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(2, 2), Some([0, 0, 0, 0]));
    assert_eq!(count_opaque(&s), 4);
}

#[test]
fn transform_scales_the_quad() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.set_transform(Affine::scale(2.0));
    let r = Rect::new(0.0, 0.0, 2.0, 2.0);
    s.draw_texture(&red_2x2(), r, r, Paint::default());
    assert_eq!(count_opaque(&s), 16);
}

#[test]
fn viewport_offsets_and_clips() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.set_viewport(Rect::new(1.0, 1.0, 2.0, 4.0));
    let r = Rect::new(0.0, 0.0, 2.0, 2.0);
    s.draw_texture(&red_2x2(), r, r, Paint::default());
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(1, 2), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(count_opaque(&s), 2);
}

#[test]
fn source_rect_selects_texels() {
    let tex = Texture::from_premul_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut s = CpuSurface::new(2, 2).unwrap();
    s.draw_texture(
        &tex,
        Rect::new(1.0, 0.0, 2.0, 1.0),
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Paint::default(),
    );
    assert!(s.data().chunks_exact(4).all(|p| p == [0, 0, 255, 255]));
}

#[test]
fn degenerate_source_rect_samples_a_single_texel() {
    let tex = Texture::from_premul_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut s = CpuSurface::new(2, 1).unwrap();
    s.draw_texture(
        &tex,
        Rect::new(1.0, 0.0, 1.0, 1.0),
        Rect::new(0.0, 0.0, 2.0, 1.0),
        Paint::default(),
    );
    assert!(s.data().chunks_exact(4).all(|p| p == [0, 0, 255, 255]));
}

#[test]
fn zero_alpha_and_degenerate_transform_draw_nothing() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let r = Rect::new(0.0, 0.0, 2.0, 2.0);
    s.draw_texture(&red_2x2(), r, r, Paint::default().with_alpha(0.0));
    s.set_transform(Affine::scale_non_uniform(0.0, 1.0));
    s.draw_texture(&red_2x2(), r, r, Paint::default());
    assert_eq!(count_opaque(&s), 0);
}

#[test]
fn tint_and_alpha_modulate() {
    let mut s = CpuSurface::new(1, 1).unwrap();
    let white = Texture::solid(1, 1, Rgba8Premul::from_straight_rgba(255, 255, 255, 255));
    let r = Rect::new(0.0, 0.0, 1.0, 1.0);
    s.draw_texture(
        &white,
        r,
        r,
        Paint::default()
            .with_tint(Color::rgb(0.0, 1.0, 0.0))
            .with_alpha(0.5),
    );
    assert_eq!(s.pixel(0, 0), Some([0, 128, 0, 128]));
}

#[test]
fn scoped_state_restores_transform_and_viewport() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    {
        let mut scoped = ScopedState::new(&mut s);
        scoped.set_transform(Affine::translate((1.0, 1.0)));
        scoped.set_viewport(Rect::new(0.0, 0.0, 1.0, 1.0));
        scoped.concat_transform(Affine::scale(2.0));
        assert_eq!(scoped.transform(), Affine::translate((1.0, 1.0)) * Affine::scale(2.0));
    }
    assert_eq!(s.transform(), Affine::IDENTITY);
    assert_eq!(s.viewport(), Rect::new(0.0, 0.0, 4.0, 4.0));
    s.pop_state();
    assert_eq!(s.transform(), Affine::IDENTITY);
}

#[test]
fn clear_and_snapshot() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    s.clear(RED);
    let tex = s.to_texture();
    assert_eq!(tex.pixel(1, 1), Some([255, 0, 0, 255]));
    let img = s.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
}

#[test]
fn fill_rect_rasterizes_through_vello() {
    let mut s = CpuSurface::new(8, 8).unwrap();
    s.fill_rect(Rect::new(2.0, 2.0, 6.0, 6.0), Color::rgb(0.0, 0.0, 1.0), 1.0)
        .unwrap();
    assert_eq!(s.pixel(4, 4), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
}
