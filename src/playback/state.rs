use std::time::Instant;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SeqviewError, SeqviewResult};
use crate::playback::command::PlaybackCommand;
use crate::playback::mode::PlaybackMode;

/// Playback state machine.
///
/// All time-dependent operations take `now` explicitly, which keeps the state machine pure; the
/// [`Scheduler`](crate::Scheduler) worker feeds it real `Instant`s.
///
/// RealTime positions are always recomputed from the absolute time since `anchor`, never
/// accumulated per tick, so tick jitter cannot introduce drift.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    mode: PlaybackMode,
    playing: bool,
    current: FrameIndex,
    anchor: Instant,
    len: usize,
    fps: Fps,
}

impl PlaybackState {
    /// Start a session: frame 0, playing, RealTime.
    pub fn new(len: usize, fps: Fps, now: Instant) -> SeqviewResult<Self> {
        if len == 0 {
            return Err(SeqviewError::config("image sequence must not be empty"));
        }
        Ok(Self {
            mode: PlaybackMode::RealTime,
            playing: true,
            current: FrameIndex(0),
            anchor: now,
            len,
            fps,
        })
    }

    /// Current playback policy.
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Frame stored at the last command boundary (or the last EveryFrame tick).
    pub fn current_frame(&self) -> FrameIndex {
        self.current
    }

    /// Sequence length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; empty sequences are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Configured frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frame that should be on screen at `now`, without mutating the state.
    pub fn visible_frame(&self, now: Instant) -> FrameIndex {
        if self.playing && self.mode == PlaybackMode::RealTime {
            self.current
                .advance_wrapping(self.frames_since_anchor(now), self.len)
        } else {
            self.current
        }
    }

    /// Apply one user command at `now`.
    pub fn apply(&mut self, cmd: PlaybackCommand, now: Instant) {
        self.reconcile(now);
        match cmd {
            PlaybackCommand::TogglePlayPause => {
                self.playing = !self.playing;
            }
            PlaybackCommand::SeekForward => {
                self.current = self.current.offset_clamped(self.seek_delta(), self.len);
            }
            PlaybackCommand::SeekBackward => {
                self.current = self
                    .current
                    .offset_clamped(-self.seek_delta(), self.len);
            }
            PlaybackCommand::StepForward => {
                self.playing = false;
                self.current = self.current.offset_clamped(1, self.len);
            }
            PlaybackCommand::StepBackward => {
                self.playing = false;
                self.current = self.current.offset_clamped(-1, self.len);
            }
            PlaybackCommand::SetMode(mode) => {
                self.mode = mode;
            }
        }
    }

    /// Periodic timer firing. Returns the frame to show, or `None` while paused.
    ///
    /// RealTime ticks are a read-only projection of the anchored position. EveryFrame ticks
    /// advance exactly one frame and re-anchor.
    pub fn tick(&mut self, now: Instant) -> Option<FrameIndex> {
        if !self.playing {
            return None;
        }
        match self.mode {
            PlaybackMode::RealTime => Some(self.visible_frame(now)),
            PlaybackMode::EveryFrame => {
                self.current = self.current.advance_wrapping(1, self.len);
                self.anchor = now;
                Some(self.current)
            }
        }
    }

    /// Fold elapsed RealTime playback into `current` and re-anchor at `now`.
    fn reconcile(&mut self, now: Instant) {
        if self.playing && self.mode == PlaybackMode::RealTime {
            self.current = self
                .current
                .advance_wrapping(self.frames_since_anchor(now), self.len);
        }
        self.anchor = now;
    }

    fn frames_since_anchor(&self, now: Instant) -> u64 {
        self.fps.frames_in(now.saturating_duration_since(self.anchor))
    }

    fn seek_delta(&self) -> i64 {
        i64::try_from(self.fps.seek_frames()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
