use crate::foundation::error::{IntensifyError, IntensifyResult};
use crate::foundation::math::{
    mul_div255_u16, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};
use crate::render::frame::FrameRGBA;

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let v = u16::from(src[i]) + mul_div255_u16(u16::from(dst[i]), inv);
        out[i] = v.min(255) as u8;
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> IntensifyResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(IntensifyError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite a premultiplied layer of the same size over a straight-alpha frame.
pub fn composite_layer(frame: &mut FrameRGBA, layer_premul: &[u8]) -> IntensifyResult<()> {
    premultiply_rgba8_in_place(&mut frame.data);
    let res = over_in_place(&mut frame.data, layer_premul);
    unpremultiply_rgba8_in_place(&mut frame.data);
    res
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
