use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{SeqviewError, SeqviewResult};

/// Decoded frame in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Pixel dimensions of the raster.
    pub fn size(&self) -> crate::PixelSize {
        crate::PixelSize::new(self.width, self.height)
    }

    /// Premultiplied RGBA at `(x, y)`; `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode encoded image bytes (any format enabled in `image`) into a premultiplied raster.
pub fn decode_frame(bytes: &[u8]) -> SeqviewResult<RasterImage> {
    decode_with_context(bytes, "image from memory")
}

/// Read and decode one frame from disk.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn decode_frame_file(path: &Path) -> SeqviewResult<RasterImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| SeqviewError::decode(format!("read '{}': {e}", path.display())))?;
    let raster = decode_with_context(&bytes, &format!("'{}'", path.display()))?;
    tracing::debug!(width = raster.width, height = raster.height, "decoded frame");
    Ok(raster)
}

fn decode_with_context(bytes: &[u8], what: &str) -> SeqviewResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SeqviewError::decode(format!("decode {what}: {e}")))?;
    Ok(raster_from_rgba8(dyn_img.to_rgba8()))
}

/// Grey checkerboard stand-in for a frame that failed to decode.
pub fn placeholder_raster(width: u32, height: u32) -> RasterImage {
    const CELL: u32 = 16;
    let width = width.max(1);
    let height = height.max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let v = if ((x / CELL) + (y / CELL)) % 2 == 0 {
                0x60
            } else {
                0x30
            };
            data.extend_from_slice(&[v, v, v, 0xff]);
        }
    }
    RasterImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

fn raster_from_rgba8(rgba: image::RgbaImage) -> RasterImage {
    let (width, height) = rgba.dimensions();
    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    RasterImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
