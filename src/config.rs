//! Startup configuration: the optional JSON settings file and the validated session.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Fps, PixelSize};
use crate::foundation::error::{SeqviewError, SeqviewResult};
use crate::playback::mode::PlaybackMode;

/// What to do when a frame cannot be decoded during playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeFailurePolicy {
    /// End the session with the decode error.
    #[default]
    Abort,
    /// Log a warning and show a checkerboard in place of the frame.
    Placeholder,
}

/// Viewer tuning knobs, read from a JSON file. Every field is optional.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerSettings {
    /// Initial window width in pixels.
    pub window_width: u32,
    /// Initial window height in pixels.
    pub window_height: u32,
    /// Clear colour behind the image, RGB.
    pub background: [u8; 3],
    /// Whether the status overlay starts visible.
    pub overlay: bool,
    /// Maximum number of decoded frames kept in memory.
    pub cache_capacity: usize,
    /// Reaction to undecodable frames.
    pub decode_failure: DecodeFailurePolicy,
    /// Playback policy the session starts in.
    pub initial_mode: PlaybackMode,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 540,
            background: [18, 20, 28],
            overlay: true,
            cache_capacity: 256,
            decode_failure: DecodeFailurePolicy::Abort,
            initial_mode: PlaybackMode::RealTime,
        }
    }
}

impl ViewerSettings {
    /// Parse settings from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> SeqviewResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| SeqviewError::config(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SeqviewResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SeqviewError::config(format!("open settings '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject zero-sized windows and a zero-capacity cache.
    pub fn validate(&self) -> SeqviewResult<()> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(SeqviewError::config(format!(
                "window size must be non-zero (got {}x{})",
                self.window_width, self.window_height
            )));
        }
        if self.cache_capacity == 0 {
            return Err(SeqviewError::config("cache_capacity must be at least 1"));
        }
        Ok(())
    }

    /// Initial window size.
    pub fn window_size(&self) -> PixelSize {
        PixelSize::new(self.window_width, self.window_height)
    }

    /// Background as a packed `0x00RRGGBB` framebuffer pixel.
    pub fn background_xrgb(&self) -> u32 {
        let [r, g, b] = self.background;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

/// Everything a viewing session needs, validated before any thread or window exists.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Frame files in playback order.
    pub paths: Vec<PathBuf>,
    /// Playback rate.
    pub fps: Fps,
    /// Viewer settings.
    pub settings: ViewerSettings,
}

impl SessionConfig {
    /// Validate the frame rate, the sequence and the settings.
    pub fn new(paths: Vec<PathBuf>, fps: f64, settings: ViewerSettings) -> SeqviewResult<Self> {
        let fps = Fps::new(fps)?;
        if paths.is_empty() {
            return Err(SeqviewError::config("no frames given"));
        }
        settings.validate()?;
        Ok(Self {
            paths,
            fps,
            settings,
        })
    }

    /// Number of frames in the session.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false` for a validated session.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
