//! seqview plays an ordered list of still images as a movie.
//!
//! The crate is split into two cooperating halves:
//!
//! 1. **Playback scheduling**: a worker thread owns a [`PlaybackState`] and decides which
//!    [`FrameIndex`] should be on screen, under either [`PlaybackMode::RealTime`] (wall clock) or
//!    [`PlaybackMode::EveryFrame`] (one frame per tick). It is driven by [`PlaybackCommand`]s and
//!    answers with [`FrameNotice`]s.
//! 2. **Presentation**: a single-threaded loop polls a window, turns keys into commands and
//!    pointer drags into [`Viewport`] gestures, fetches frames from a [`FrameStore`], and
//!    composites them into the framebuffer with a status overlay.
//!
//! The two halves share nothing but the channels inside [`Scheduler`].
//!
//! # Getting started
//!
//! ```no_run
//! use seqview::{SessionConfig, ViewerSettings, run_viewer};
//!
//! let session = SessionConfig::new(
//!     vec!["frames/0001.png".into(), "frames/0002.png".into()],
//!     24.0,
//!     ViewerSettings::default(),
//! )?;
//! run_viewer(session)?;
//! # Ok::<(), seqview::SeqviewError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod playback;
mod present;
mod viewport;

pub use assets::decode::{RasterImage, decode_frame, decode_frame_file, placeholder_raster};
pub use assets::store::{FrameStore, FsFrameStore};
pub use config::{DecodeFailurePolicy, SessionConfig, ViewerSettings};
pub use foundation::core::{Fps, FrameIndex, PixelSize, Point, Rect, Vec2};
pub use foundation::error::{SeqviewError, SeqviewResult};
pub use playback::command::PlaybackCommand;
pub use playback::mode::PlaybackMode;
pub use playback::scheduler::{FrameNotice, Scheduler};
pub use playback::state::PlaybackState;
pub use present::composite::{PremulRgba8, blit, over_xrgb, pack_xrgb, unpack_xrgb};
pub use present::input::{
    GestureEvent, PointerSample, PointerTracker, ViewerAction, command_for_key,
};
pub use present::overlay::{draw_status, draw_text, status_line};
pub use present::stage::{FrameSource, Stage};
pub use present::window::run_viewer;
pub use viewport::curve::{PiecewiseLinear, ZOOM_CURVE};
pub use viewport::transform::{GestureAnchor, GestureKind, MIN_SCALE, Viewport};
