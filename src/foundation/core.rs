use std::time::Duration;

use crate::foundation::error::{SeqviewError, SeqviewResult};

pub use kurbo::{Point, Rect, Vec2};

/// 0-based position in the image sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    /// Move by `delta` frames, clamped to `[0, len - 1]`.
    ///
    /// `len == 0` clamps to frame 0.
    pub fn offset_clamped(self, delta: i64, len: usize) -> Self {
        let max_inclusive = len.saturating_sub(1);
        let moved = if delta >= 0 {
            self.0.saturating_add(usize::try_from(delta).unwrap_or(usize::MAX))
        } else {
            self.0
                .saturating_sub(usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX))
        };
        Self(moved.min(max_inclusive))
    }

    /// Advance by `frames`, wrapping modulo `len` (looping playback).
    pub fn advance_wrapping(self, frames: u64, len: usize) -> Self {
        if len == 0 {
            return Self(0);
        }
        let len64 = len as u64;
        let step = frames % len64;
        let pos = (self.0 as u64 % len64 + step) % len64;
        Self(pos as usize)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback rate in frames per second. Always finite and `> 0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Fps(f64);

impl Fps {
    const MIN_FRAME_DURATION: Duration = Duration::from_micros(100);
    const MAX_FRAME_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

    /// Highest accepted rate; one frame lasts `MIN_FRAME_DURATION` here.
    pub const MAX: f64 = 10_000.0;

    /// Validate a frame rate.
    ///
    /// Zero, negative, non-finite and rates above [`Fps::MAX`] are configuration errors. Faster
    /// rates could not be honoured by the tick timer, which never fires more often than every
    /// 100us.
    pub fn new(fps: f64) -> SeqviewResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(SeqviewError::config(format!(
                "fps must be a finite number > 0 (got {fps})"
            )));
        }
        if fps > Self::MAX {
            return Err(SeqviewError::config(format!(
                "fps must be at most {} (got {fps})",
                Self::MAX
            )));
        }
        Ok(Self(fps))
    }

    /// Raw frames-per-second value.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Timer period for one frame, clamped to a sane `[100us, 1 day]` window.
    pub fn frame_duration(self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.0)
            .unwrap_or(Self::MAX_FRAME_DURATION)
            .clamp(Self::MIN_FRAME_DURATION, Self::MAX_FRAME_DURATION)
    }

    /// Whole frames elapsed in `elapsed`: `floor(elapsed * fps)`.
    pub fn frames_in(self, elapsed: Duration) -> u64 {
        (elapsed.as_secs_f64() * self.0).floor().max(0.0) as u64
    }

    /// Frames covered by one seek: about one second of playback, never less than one frame.
    pub fn seek_frames(self) -> u64 {
        (self.0.round() as u64).max(1)
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Integer pixel dimensions of a window or an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Construct from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Dimensions as a `kurbo` vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
