use font8x8::legacy::BASIC_LEGACY;

use crate::foundation::core::{Fps, PixelSize};
use crate::playback::scheduler::FrameNotice;

const GLYPH: u32 = 8;
const TEXT_SCALE: u32 = 2;
const PADDING: u32 = 6;
const TEXT_COLOR: u32 = 0x00f0_f0f0;

/// One-line playback summary shown in the overlay and the window title.
pub fn status_line(notice: &FrameNotice, len: usize, fps: Fps, zoom: f64) -> String {
    format!(
        "frame {}/{}  {}  {}  {} fps  zoom {:.2}x",
        notice.frame.0 + 1,
        len,
        if notice.playing { "playing" } else { "paused" },
        notice.mode,
        fps,
        zoom,
    )
}

fn glyph_for_char(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

/// Draw `text` with its top-left corner at `origin`, each font pixel `scale` screen pixels wide.
///
/// Clipped to the window. Returns the horizontal advance in pixels.
pub fn draw_text(
    framebuf: &mut [u32],
    window: PixelSize,
    origin: (u32, u32),
    text: &str,
    scale: u32,
    color: u32,
) -> u32 {
    let scale = scale.max(1);
    let cell = GLYPH * scale;
    let mut pen_x = origin.0;
    for ch in text.chars() {
        let glyph = glyph_for_char(ch);
        for (row, bits) in glyph.iter().enumerate() {
            for x_bit in 0..GLYPH {
                if (bits >> x_bit) & 1 == 0 {
                    continue;
                }
                let x0 = pen_x + x_bit * scale;
                let y0 = origin.1 + row as u32 * scale;
                fill_rect(framebuf, window, (x0, y0), (scale, scale), |_| color);
            }
        }
        pen_x = pen_x.saturating_add(cell);
    }
    pen_x - origin.0
}

/// Darkened band along the bottom edge with `text` on it.
pub fn draw_status(framebuf: &mut [u32], window: PixelSize, text: &str) {
    let band = GLYPH * TEXT_SCALE + 2 * PADDING;
    if window.is_empty() || window.height < band {
        return;
    }
    let top = window.height - band;
    fill_rect(framebuf, window, (0, top), (window.width, band), |px| {
        (px >> 1) & 0x007f_7f7f
    });
    draw_text(
        framebuf,
        window,
        (PADDING, top + PADDING),
        text,
        TEXT_SCALE,
        TEXT_COLOR,
    );
}

fn fill_rect(
    framebuf: &mut [u32],
    window: PixelSize,
    (x0, y0): (u32, u32),
    (w, h): (u32, u32),
    shade: impl Fn(u32) -> u32,
) {
    let x1 = x0.saturating_add(w).min(window.width);
    let y1 = y0.saturating_add(h).min(window.height);
    for y in y0..y1 {
        let row = y as usize * window.width as usize;
        for x in x0..x1 {
            if let Some(px) = framebuf.get_mut(row + x as usize) {
                *px = shade(*px);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/overlay.rs"]
mod tests;
