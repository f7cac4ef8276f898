use std::{cell::Cell, rc::Rc};

use super::*;
use crate::foundation::core::{Affine, Rect};
use crate::render::texture::Texture;

#[test]
fn update_repaints_and_republishes() {
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    let mut p = GraphicsProvider::with_painter(4, 4, move |s: &mut CpuSurface| {
        c.set(c.get() + 1);
        let tex = Texture::solid(1, 1, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
        s.draw_texture(
            &tex,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Default::default(),
        );
    })
    .unwrap();
    let after_install = calls.get();
    p.take_texture();

    p.update();
    assert_eq!(calls.get(), after_install + 1);
    assert!(p.has_new_texture());
    let tex = p.take_texture().unwrap();
    assert_eq!(tex.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(tex.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn painter_state_changes_do_not_leak() {
    let mut p = GraphicsProvider::with_painter(2, 2, |s: &mut CpuSurface| {
        s.set_transform(Affine::scale(3.0));
        s.set_viewport(Rect::new(0.0, 0.0, 1.0, 1.0));
    })
    .unwrap();
    p.update();
    assert_eq!(p.surface().transform(), Affine::IDENTITY);
    assert_eq!(p.surface().viewport(), Rect::new(0.0, 0.0, 2.0, 2.0));
}

#[test]
fn background_clears_every_frame() {
    let mut p = GraphicsProvider::new(2, 1).unwrap();
    p.set_background(Color::rgb(0.0, 1.0, 0.0), 1.0);
    p.update();
    let tex = p.take_texture().unwrap();
    assert_eq!(tex.pixel(1, 0), Some([0, 255, 0, 255]));
    assert!(p.is_ready());
    assert_eq!(p.size(), Size::new(2.0, 1.0));
    assert_eq!(p.kind(), ProviderKind::Graphics);
}

#[test]
fn rejects_empty_canvas() {
    assert!(GraphicsProvider::new(0, 0).is_err());
}
