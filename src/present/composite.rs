use rayon::prelude::*;

use crate::assets::decode::RasterImage;
use crate::foundation::core::{PixelSize, Rect};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Pack an opaque colour into a `0x00RRGGBB` framebuffer pixel.
pub fn pack_xrgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Split a `0x00RRGGBB` pixel into its channels.
pub fn unpack_xrgb(px: u32) -> [u8; 3] {
    [(px >> 16) as u8, (px >> 8) as u8, px as u8]
}

/// Composite a premultiplied pixel over an opaque framebuffer pixel.
pub fn over_xrgb(dst: u32, src: PremulRgba8) -> u32 {
    match src[3] {
        0 => dst,
        255 => pack_xrgb(src[0], src[1], src[2]),
        a => {
            let inv = 255 - u16::from(a);
            let d = unpack_xrgb(dst);
            let ch = |i: usize| src[i].saturating_add(mul_div255(u16::from(d[i]), inv));
            pack_xrgb(ch(0), ch(1), ch(2))
        }
    }
}

/// Draw `frame` scaled into `dest` (window pixels) over a cleared framebuffer.
///
/// Sampling is nearest-neighbour at pixel centres. Pixels outside `dest` get `background`.
/// Rows are filled in parallel. A framebuffer smaller than `window` is left untouched.
pub fn blit(
    frame: &RasterImage,
    dest: Rect,
    framebuf: &mut [u32],
    window: PixelSize,
    background: u32,
) {
    if window.is_empty() || framebuf.len() < window.area() {
        return;
    }
    let width = window.width as usize;
    let columns: Vec<Option<u32>> = (0..window.width)
        .map(|x| source_coord(f64::from(x) + 0.5, dest.x0, dest.width(), frame.width))
        .collect();
    let stride = frame.width as usize * 4;
    let pixels = frame.rgba8_premul.as_slice();

    framebuf[..window.area()]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let Some(sy) = source_coord(y as f64 + 0.5, dest.y0, dest.height(), frame.height)
            else {
                row.fill(background);
                return;
            };
            let src_row = sy as usize * stride;
            for (px, sx) in row.iter_mut().zip(&columns) {
                *px = match sx {
                    Some(sx) => {
                        let i = src_row + *sx as usize * 4;
                        match pixels.get(i..i + 4) {
                            Some(s) => over_xrgb(background, [s[0], s[1], s[2], s[3]]),
                            None => background,
                        }
                    }
                    None => background,
                };
            }
        });
}

/// Map a window coordinate onto a source texel index along one axis.
fn source_coord(p: f64, origin: f64, extent: f64, size: u32) -> Option<u32> {
    if extent.is_nan() || extent <= 0.0 || size == 0 {
        return None;
    }
    let t = (p - origin) / extent;
    if !(0.0..1.0).contains(&t) {
        return None;
    }
    Some(((t * f64::from(size)) as u32).min(size - 1))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/present/composite.rs"]
mod tests;
