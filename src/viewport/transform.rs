use crate::foundation::core::{PixelSize, Point, Rect, Vec2};
use crate::viewport::curve::ZOOM_CURVE;

/// Smallest allowed zoom multiplier.
pub const MIN_SCALE: f64 = 0.1;

/// Which drag gesture is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Horizontal drag changes the zoom multiplier.
    Zoom,
    /// Drag moves the image.
    Pan,
}

/// Viewport snapshot taken when a gesture begins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureAnchor {
    /// Gesture this anchor belongs to.
    pub kind: GestureKind,
    /// `scale` at gesture start.
    pub scale: f64,
    /// `offset` at gesture start.
    pub offset: Vec2,
    /// Pointer position at gesture start, in window pixels.
    pub pointer: Point,
}

/// Mapping from normalized image space to window pixels, plus interactive zoom/pan state.
///
/// `scale` multiplies the fit factor (1.0 = image fits the window). `offset` is the shift of the
/// image centre from the window centre, as a fraction of the fitted, unzoomed image size.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    fit: f64,
    image: PixelSize,
    gesture: Option<GestureAnchor>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Centred, zoom-neutral viewport with a unit fit factor.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            fit: 1.0,
            image: PixelSize::new(1, 1),
            gesture: None,
        }
    }

    /// Current zoom multiplier.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current centre offset (fractions of the fitted image size).
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Cached uniform fit factor.
    pub fn fit(&self) -> f64 {
        self.fit
    }

    /// Image size cached by the last [`resize`](Self::resize).
    pub fn image_size(&self) -> PixelSize {
        self.image
    }

    /// Active gesture snapshot, if a drag is in progress.
    pub fn gesture(&self) -> Option<GestureAnchor> {
        self.gesture
    }

    /// Recompute the fit factor `min(ww / iw, wh / ih)` for a window and image size.
    ///
    /// Zero-sized windows or images leave the previous geometry in place.
    pub fn resize(&mut self, window: PixelSize, image: PixelSize) {
        if window.is_empty() || image.is_empty() {
            return;
        }
        let w = window.to_vec2();
        let i = image.to_vec2();
        self.fit = (w.x / i.x).min(w.y / i.y);
        self.image = image;
    }

    /// Start a zoom drag at `pointer_x`. Cancels an active pan.
    pub fn begin_zoom(&mut self, pointer_x: f64) {
        self.begin(GestureKind::Zoom, Point::new(pointer_x, 0.0));
    }

    /// Apply the zoom drag for the current pointer position.
    ///
    /// The multiplier comes from [`ZOOM_CURVE`]; offsets scale with it so the window centre keeps
    /// showing the same image point. The [`MIN_SCALE`] floor is applied to the multiplier itself,
    /// which keeps offsets proportional at the floor.
    pub fn update_zoom(&mut self, pointer_x: f64) {
        let Some(anchor) = self.active(GestureKind::Zoom) else {
            return;
        };
        let dx = pointer_x - anchor.pointer.x;
        let mut m = ZOOM_CURVE.eval(dx);
        if anchor.scale * m < MIN_SCALE {
            m = MIN_SCALE / anchor.scale;
        }
        self.scale = anchor.scale * m;
        self.offset = anchor.offset * m;
    }

    /// Finish a zoom drag. No-op if no zoom drag is active.
    pub fn end_zoom(&mut self) {
        self.end(GestureKind::Zoom);
    }

    /// Start a pan drag at `pointer`. Cancels an active zoom.
    pub fn begin_pan(&mut self, pointer: Point) {
        self.begin(GestureKind::Pan, pointer);
    }

    /// Apply the pan drag for the current pointer position.
    ///
    /// Travel is normalized by the fitted image size only, not by the current zoom, so a pointer
    /// movement of N pixels always moves the image by N pixels at `scale == 1`.
    pub fn update_pan(&mut self, pointer: Point) {
        let Some(anchor) = self.active(GestureKind::Pan) else {
            return;
        };
        let on_screen = self.image.to_vec2() * self.fit;
        let travel = pointer - anchor.pointer;
        self.offset = anchor.offset + Vec2::new(travel.x / on_screen.x, travel.y / on_screen.y);
    }

    /// Finish a pan drag. No-op if no pan drag is active.
    pub fn end_pan(&mut self) {
        self.end(GestureKind::Pan);
    }

    /// Re-centre at zoom 1 and drop any in-flight gesture.
    pub fn reset_to_fit(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
        self.gesture = None;
    }

    /// Destination rectangle of the image in window pixels for the current state.
    pub fn visible_rect(&self, window: PixelSize) -> Rect {
        let base = self.image.to_vec2() * self.fit;
        let shift = Vec2::new(self.offset.x * base.x, self.offset.y * base.y);
        let centre = (window.to_vec2() * 0.5 + shift).to_point();
        let half = base * (self.scale * 0.5);
        Rect::from_points(centre - half, centre + half)
    }

    fn begin(&mut self, kind: GestureKind, pointer: Point) {
        if let Some(prev) = self.gesture {
            if prev.kind != kind {
                tracing::debug!(cancelled = ?prev.kind, started = ?kind, "gesture switched");
            }
        }
        self.gesture = Some(GestureAnchor {
            kind,
            scale: self.scale,
            offset: self.offset,
            pointer,
        });
    }

    fn active(&self, kind: GestureKind) -> Option<GestureAnchor> {
        self.gesture.filter(|g| g.kind == kind)
    }

    fn end(&mut self, kind: GestureKind) {
        if self.active(kind).is_some() {
            self.gesture = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/transform.rs"]
mod tests;
