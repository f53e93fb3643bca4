use std::ops::ControlFlow;

use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::assets::store::FsFrameStore;
use crate::config::SessionConfig;
use crate::foundation::core::{FrameIndex, PixelSize, Point};
use crate::foundation::error::{SeqviewError, SeqviewResult};
use crate::playback::scheduler::Scheduler;
use crate::present::input::{PointerSample, PointerTracker, ViewerAction, command_for_key};
use crate::present::stage::{FrameSource, Stage};

const TITLE: &str = "seqview";
/// Upper bound on window refreshes per second.
const PRESENT_FPS: usize = 120;

/// Open a window and play the session until Escape or the window is closed.
///
/// The first frame is decoded before anything else starts, so an unreadable sequence fails
/// without a window flashing up. Returns `Ok(())` on a normal quit.
#[tracing::instrument(level = "info", skip_all, fields(frames = session.len(), fps = %session.fps))]
pub fn run_viewer(session: SessionConfig) -> SeqviewResult<()> {
    let SessionConfig {
        paths,
        fps,
        settings,
    } = session;

    let store = FsFrameStore::new(paths, settings.cache_capacity);
    let mut frames = FrameSource::new(store, settings.decode_failure, settings.window_size());
    let len = frames.len();
    frames.fetch(FrameIndex(0))?;

    let scheduler = Scheduler::spawn_with_mode(len, fps, settings.initial_mode)?;

    let initial = settings.window_size();
    let mut window = Window::new(
        TITLE,
        initial.width as usize,
        initial.height as usize,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| SeqviewError::window(format!("open window: {e}")))?;
    window.set_target_fps(PRESENT_FPS);
    tracing::info!(
        width = initial.width,
        height = initial.height,
        "window opened"
    );

    let mut stage = Stage::new(
        initial,
        settings.background_xrgb(),
        settings.overlay,
        len,
        fps,
    );
    let mut pointer = PointerTracker::new();

    while window.is_open() {
        let (w, h) = window.get_size();
        let size = PixelSize::new(
            u32::try_from(w).unwrap_or(u32::MAX),
            u32::try_from(h).unwrap_or(u32::MAX),
        );
        stage.resize(size);

        if handle_keys(&window, &scheduler, &mut stage)?.is_break() {
            break;
        }

        for event in pointer.update(poll_pointer(&window)) {
            stage.gesture(event);
        }

        if let Some(notice) = scheduler.next_notice() {
            let frame = frames.fetch(notice.frame)?;
            stage.show(notice, frame);
        }

        if stage.render() {
            if let Some(status) = stage.status() {
                window.set_title(&format!("{TITLE}  {status}"));
            }
        }

        present(&mut window, &stage)?;
    }

    tracing::info!("viewer closed");
    Ok(())
}

fn handle_keys(
    window: &Window,
    scheduler: &Scheduler,
    stage: &mut Stage,
) -> SeqviewResult<ControlFlow<()>> {
    for key in window.get_keys_pressed(KeyRepeat::No) {
        match command_for_key(key) {
            Some(ViewerAction::Playback(cmd)) => scheduler.send(cmd)?,
            Some(ViewerAction::Fit) => stage.fit(),
            Some(ViewerAction::ToggleOverlay) => stage.toggle_overlay(),
            Some(ViewerAction::Quit) => return Ok(ControlFlow::Break(())),
            None => {}
        }
    }
    Ok(ControlFlow::Continue(()))
}

fn poll_pointer(window: &Window) -> PointerSample {
    PointerSample {
        position: window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| Point::new(f64::from(x), f64::from(y))),
        zoom_down: window.get_mouse_down(MouseButton::Right),
        pan_down: window.get_mouse_down(MouseButton::Left),
    }
}

fn present(window: &mut Window, stage: &Stage) -> SeqviewResult<()> {
    let size = stage.window();
    if size.is_empty() {
        // minimized: keep pumping events without a buffer
        window.update();
        return Ok(());
    }
    window
        .update_with_buffer(
            stage.framebuffer(),
            size.width as usize,
            size.height as usize,
        )
        .map_err(|e| SeqviewError::window(format!("present frame: {e}")))
}
