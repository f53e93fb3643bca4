use crate::playback::mode::PlaybackMode;

/// User intent delivered to the scheduler, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    /// Flip between playing and paused.
    TogglePlayPause,
    /// Jump about one second forward (clamped at the last frame).
    SeekForward,
    /// Jump about one second backward (clamped at frame 0).
    SeekBackward,
    /// Pause and move one frame forward.
    StepForward,
    /// Pause and move one frame backward.
    StepBackward,
    /// Switch the playback policy.
    SetMode(PlaybackMode),
}
