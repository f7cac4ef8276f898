use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100, 50, 200, 128]);
    let tex = decode_image(&buf).unwrap();
    assert_eq!((tex.width(), tex.height()), (1, 1));
    assert_eq!(
        tex.data(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn load_image_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("spritekit-decode-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("two.png");
    std::fs::write(&path, png_bytes(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255])).unwrap();

    let tex = load_image(&path).unwrap();
    assert_eq!(tex.pixel(1, 0), Some([0, 255, 0, 255]));
    assert!(load_image(&dir.join("missing.png")).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/./b\\c.png").unwrap(), "a/b/c.png");
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn resolve_source_with_and_without_root() {
    assert_eq!(
        resolve_source(None, "/tmp/x.png").unwrap(),
        PathBuf::from("/tmp/x.png")
    );
    assert!(resolve_source(None, "  ").is_err());
    assert_eq!(
        resolve_source(Some(Path::new("assets")), "img/x.png").unwrap(),
        Path::new("assets").join("img/x.png")
    );
    assert!(resolve_source(Some(Path::new("assets")), "../x.png").is_err());
}
