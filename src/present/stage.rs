use std::collections::HashSet;
use std::sync::Arc;

use crate::assets::decode::{RasterImage, placeholder_raster};
use crate::assets::store::FrameStore;
use crate::config::DecodeFailurePolicy;
use crate::foundation::core::{Fps, FrameIndex, PixelSize};
use crate::foundation::error::SeqviewResult;
use crate::playback::scheduler::FrameNotice;
use crate::present::composite::blit;
use crate::present::input::GestureEvent;
use crate::present::overlay::{draw_status, status_line};
use crate::viewport::transform::Viewport;

/// Frame store front that applies the decode failure policy.
///
/// Under [`DecodeFailurePolicy::Placeholder`] a failed index is remembered so the warning is logged
/// once and later requests get the checkerboard without touching the disk again.
#[derive(Debug)]
pub struct FrameSource<S> {
    store: S,
    policy: DecodeFailurePolicy,
    failed: HashSet<usize>,
    placeholder_size: PixelSize,
}

impl<S: FrameStore> FrameSource<S> {
    /// Wrap `store`. Placeholders default to `fallback` until a real frame has been decoded.
    pub fn new(store: S, policy: DecodeFailurePolicy, fallback: PixelSize) -> Self {
        Self {
            store,
            policy,
            failed: HashSet::new(),
            placeholder_size: fallback,
        }
    }

    /// Number of frames behind this source.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// `true` when the underlying store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch `index`, substituting a placeholder for decode failures when the policy allows.
    pub fn fetch(&mut self, index: FrameIndex) -> SeqviewResult<Arc<RasterImage>> {
        if self.failed.contains(&index.0) {
            return Ok(self.placeholder());
        }
        match self.store.load(index) {
            Ok(raster) => {
                self.placeholder_size = raster.size();
                Ok(raster)
            }
            Err(err) if err.is_decode() && self.policy == DecodeFailurePolicy::Placeholder => {
                tracing::warn!(frame = index.0, error = %err, "showing placeholder for frame");
                self.failed.insert(index.0);
                Ok(self.placeholder())
            }
            Err(err) => Err(err),
        }
    }

    fn placeholder(&self) -> Arc<RasterImage> {
        Arc::new(placeholder_raster(
            self.placeholder_size.width,
            self.placeholder_size.height,
        ))
    }
}

/// Everything that ends up on screen, independent of the window system.
///
/// Owns the framebuffer, the viewport and the last notice. Mutators mark the stage dirty;
/// [`render`](Self::render) redraws only when something changed.
#[derive(Debug)]
pub struct Stage {
    window: PixelSize,
    framebuf: Vec<u32>,
    viewport: Viewport,
    background: u32,
    overlay: bool,
    len: usize,
    fps: Fps,
    notice: Option<FrameNotice>,
    frame: Option<Arc<RasterImage>>,
    dirty: bool,
}

impl Stage {
    /// Empty stage for a sequence of `len` frames shown at `fps`.
    pub fn new(window: PixelSize, background: u32, overlay: bool, len: usize, fps: Fps) -> Self {
        Self {
            window,
            framebuf: vec![background; window.area()],
            viewport: Viewport::new(),
            background,
            overlay,
            len,
            fps,
            notice: None,
            frame: None,
            dirty: true,
        }
    }

    /// Current window size.
    pub fn window(&self) -> PixelSize {
        self.window
    }

    /// Viewport state.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Last notice shown, if any.
    pub fn notice(&self) -> Option<FrameNotice> {
        self.notice
    }

    /// Whether the status overlay is visible.
    pub fn overlay_visible(&self) -> bool {
        self.overlay
    }

    /// Whether the next [`render`](Self::render) will redraw.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Track a new window size. No-op when unchanged.
    pub fn resize(&mut self, window: PixelSize) {
        if window == self.window {
            return;
        }
        tracing::debug!(width = window.width, height = window.height, "window resized");
        self.window = window;
        self.framebuf.resize(window.area(), self.background);
        self.refit();
        self.dirty = true;
    }

    /// Show `frame` for `notice`.
    pub fn show(&mut self, notice: FrameNotice, frame: Arc<RasterImage>) {
        self.notice = Some(notice);
        self.frame = Some(frame);
        self.refit();
        self.dirty = true;
    }

    /// Feed one pointer gesture event to the viewport.
    pub fn gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Begin(kind, _) => tracing::debug!(?kind, "gesture begin"),
            GestureEvent::End(kind) => tracing::debug!(?kind, "gesture end"),
            GestureEvent::Update(..) => {}
        }
        event.apply(&mut self.viewport);
        self.dirty = true;
    }

    /// Reset zoom and pan.
    pub fn fit(&mut self) {
        self.viewport.reset_to_fit();
        self.dirty = true;
    }

    /// Show or hide the status overlay.
    pub fn toggle_overlay(&mut self) {
        self.overlay = !self.overlay;
        self.dirty = true;
    }

    /// Status text for the last notice.
    pub fn status(&self) -> Option<String> {
        self.notice
            .map(|n| status_line(&n, self.len, self.fps, self.viewport.scale()))
    }

    /// Redraw if dirty. Returns `true` when the framebuffer changed.
    pub fn render(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        match &self.frame {
            Some(frame) => {
                let dest = self.viewport.visible_rect(self.window);
                blit(frame, dest, &mut self.framebuf, self.window, self.background);
            }
            None => self.framebuf.fill(self.background),
        }
        if self.overlay {
            if let Some(text) = self.status() {
                draw_status(&mut self.framebuf, self.window, &text);
            }
        }
        true
    }

    /// Framebuffer in `0x00RRGGBB`, row-major, `window.area()` pixels.
    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuf
    }

    fn refit(&mut self) {
        if let Some(frame) = &self.frame {
            self.viewport.resize(self.window, frame.size());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/stage.rs"]
mod tests;
