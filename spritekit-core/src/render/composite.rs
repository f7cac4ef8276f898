use crate::foundation::error::{SpriteError, SpriteResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};
use crate::render::surface::BlendMode;

pub(crate) type PremulRgba8 = [u8; 4];

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Source-over with an extra opacity on the source.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Saturating additive blend.
pub(crate) fn add(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let s = scale(src, opacity);
    [
        add_sat_u8(dst[0], s[0]),
        add_sat_u8(dst[1], s[1]),
        add_sat_u8(dst[2], s[2]),
        add_sat_u8(dst[3], s[3]),
    ]
}

/// Multiply every premultiplied channel by `opacity`.
pub(crate) fn scale(src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    src.map(|c| mul_div255_u8(u16::from(c), op))
}

/// Modulate color channels by an 8-bit tint; alpha is untouched so the result stays premultiplied.
pub(crate) fn tint(src: PremulRgba8, tint: [u16; 3]) -> PremulRgba8 {
    [
        mul_div255_u8(u16::from(src[0]), tint[0]),
        mul_div255_u8(u16::from(src[1]), tint[1]),
        mul_div255_u8(u16::from(src[2]), tint[2]),
        src[3],
    ]
}

pub(crate) fn blend(mode: BlendMode, dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    match mode {
        BlendMode::Over => over(dst, src, opacity),
        BlendMode::Additive => add(dst, src, opacity),
        BlendMode::Copy => scale(src, opacity),
    }
}

/// Premultiplied source-over of two equally sized buffers.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> SpriteResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SpriteError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
