use std::io::Cursor;

use super::*;

fn write_png(path: &Path, w: u32, h: u32) {
    let img = ::image::RgbaImage::from_pixel(w, h, ::image::Rgba([0, 0, 255, 255]));
    let mut buf = Vec::new();
    ::image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ::image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spritekit-image-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn from_path_loads_synchronously() {
    let dir = temp_dir("path");
    let path = dir.join("a.png");
    write_png(&path, 4, 3);

    let mut p = ImageProvider::from_path(&path);
    assert!(p.is_ready());
    assert_eq!(p.size(), crate::foundation::core::Size::new(4.0, 3.0));
    assert!(p.has_new_texture());
    let tex = p.take_texture().unwrap();
    assert_eq!(tex.pixel(0, 0), Some([0, 0, 255, 255]));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_leaves_provider_not_ready() {
    let mut p = ImageProvider::new();
    p.set_source("/definitely/not/here.png");
    assert!(!p.is_ready());
    assert_eq!(p.source(), None);
    assert_eq!(p.size(), crate::provider::FALLBACK_SIZE);
}

#[test]
fn failed_reload_keeps_previous_texture() {
    let dir = temp_dir("keep");
    write_png(&dir.join("ok.png"), 2, 2);

    let mut p = ImageProvider::with_assets_root(&dir);
    p.set_source("ok.png");
    assert!(p.is_ready());
    p.take_texture();
    p.set_source("../escape.png");
    assert!(p.is_ready());
    assert!(!p.has_new_texture());
    assert_eq!(p.source(), Some("ok.png"));
    assert_eq!(p.assets_root(), Some(dir.as_path()));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn update_is_a_no_op() {
    let mut p = ImageProvider::from_texture(Texture::solid(
        1,
        1,
        crate::foundation::core::Rgba8Premul::transparent(),
    ));
    p.take_texture();
    p.update();
    assert!(!p.has_new_texture());
}
