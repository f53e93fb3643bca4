use minifb::Key;

use crate::foundation::core::Point;
use crate::playback::command::PlaybackCommand;
use crate::playback::mode::PlaybackMode;
use crate::viewport::transform::{GestureKind, Viewport};

/// What a key press asks the viewer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerAction {
    /// Forward to the playback scheduler.
    Playback(PlaybackCommand),
    /// Reset zoom and pan.
    Fit,
    /// Show or hide the status line.
    ToggleOverlay,
    /// Leave the presentation loop.
    Quit,
}

/// Key map of the viewer. Unbound keys return `None`.
pub fn command_for_key(key: Key) -> Option<ViewerAction> {
    let action = match key {
        Key::Space => ViewerAction::Playback(PlaybackCommand::TogglePlayPause),
        Key::Right => ViewerAction::Playback(PlaybackCommand::SeekForward),
        Key::Left => ViewerAction::Playback(PlaybackCommand::SeekBackward),
        Key::Period => ViewerAction::Playback(PlaybackCommand::StepForward),
        Key::Comma => ViewerAction::Playback(PlaybackCommand::StepBackward),
        Key::R => ViewerAction::Playback(PlaybackCommand::SetMode(PlaybackMode::RealTime)),
        Key::E => ViewerAction::Playback(PlaybackCommand::SetMode(PlaybackMode::EveryFrame)),
        Key::F => ViewerAction::Fit,
        Key::O => ViewerAction::ToggleOverlay,
        Key::Escape => ViewerAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Polled pointer state for one loop iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Pointer position in window pixels, if known.
    pub position: Option<Point>,
    /// Zoom button (right) held.
    pub zoom_down: bool,
    /// Pan button (left) held.
    pub pan_down: bool,
}

/// Gesture transition derived from two consecutive pointer samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Button pressed at a position.
    Begin(GestureKind, Point),
    /// Pointer moved while the button is held.
    Update(GestureKind, Point),
    /// Button released.
    End(GestureKind),
}

impl GestureEvent {
    /// Forward the event to the matching viewport operation.
    pub fn apply(self, viewport: &mut Viewport) {
        match self {
            Self::Begin(GestureKind::Zoom, p) => viewport.begin_zoom(p.x),
            Self::Begin(GestureKind::Pan, p) => viewport.begin_pan(p),
            Self::Update(GestureKind::Zoom, p) => viewport.update_zoom(p.x),
            Self::Update(GestureKind::Pan, p) => viewport.update_pan(p),
            Self::End(GestureKind::Zoom) => viewport.end_zoom(),
            Self::End(GestureKind::Pan) => viewport.end_pan(),
        }
    }
}

/// Turns polled button/position state into press, drag and release events.
///
/// One gesture is active at a time. Pressing the other button takes over; releasing it hands
/// back to the first button if that one is still held.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    active: Option<GestureKind>,
    last: Option<Point>,
    zoom_was_down: bool,
    pan_was_down: bool,
}

impl PointerTracker {
    /// Fresh tracker with no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gesture currently being tracked.
    pub fn active(&self) -> Option<GestureKind> {
        self.active
    }

    /// Compare `sample` with the previous one and return the resulting events in order.
    pub fn update(&mut self, sample: PointerSample) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let zoom_pressed = sample.zoom_down && !self.zoom_was_down;
        let pan_pressed = sample.pan_down && !self.pan_was_down;
        self.zoom_was_down = sample.zoom_down;
        self.pan_was_down = sample.pan_down;

        let pos = sample.position.or(self.last);

        // release of the active button
        if let Some(kind) = self.active {
            if !Self::held(kind, sample) {
                events.push(GestureEvent::End(kind));
                self.active = None;
            }
        }

        let pressed = if zoom_pressed {
            Some(GestureKind::Zoom)
        } else if pan_pressed {
            Some(GestureKind::Pan)
        } else if self.active.is_none() {
            // a button that stayed down through another gesture, or was pressed off-window
            [GestureKind::Zoom, GestureKind::Pan]
                .into_iter()
                .find(|&k| Self::held(k, sample))
        } else {
            None
        };

        match (pressed, pos) {
            (Some(kind), Some(p)) if self.active != Some(kind) => {
                if let Some(prev) = self.active.take() {
                    events.push(GestureEvent::End(prev));
                }
                events.push(GestureEvent::Begin(kind, p));
                self.active = Some(kind);
            }
            _ => {
                if let (Some(kind), Some(p)) = (self.active, sample.position) {
                    if self.last != Some(p) {
                        events.push(GestureEvent::Update(kind, p));
                    }
                }
            }
        }

        if sample.position.is_some() {
            self.last = sample.position;
        }
        events
    }

    fn held(kind: GestureKind, sample: PointerSample) -> bool {
        match kind {
            GestureKind::Zoom => sample.zoom_down,
            GestureKind::Pan => sample.pan_down,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/input.rs"]
mod tests;
