use std::ops::ControlFlow;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select, tick, unbounded};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SeqviewError, SeqviewResult};
use crate::playback::command::PlaybackCommand;
use crate::playback::mode::PlaybackMode;
use crate::playback::state::PlaybackState;

/// Notices the worker may queue ahead of the display before a send blocks it.
const NOTICE_BUFFER: usize = 1;

/// "Render this frame now", plus a copy of the playback status for overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameNotice {
    /// Frame index to render.
    pub frame: FrameIndex,
    /// Whether playback was running when the notice was produced.
    pub playing: bool,
    /// Playback policy in effect.
    pub mode: PlaybackMode,
}

impl FrameNotice {
    /// `true` for frames of running EveryFrame playback, which must each reach the screen.
    pub fn must_display(&self) -> bool {
        self.playing && self.mode == PlaybackMode::EveryFrame
    }
}

/// Handle to the playback worker thread.
///
/// The worker owns its [`PlaybackState`] privately. The only way in is the ordered command
/// channel; the only way out is the [`FrameNotice`] channel. Dropping the handle closes both
/// channels and the worker exits on its next wake-up.
///
/// The notice channel is bounded: while the display has not taken the previous notice, the
/// worker waits, so EveryFrame playback slows down to the display instead of skipping frames.
/// Commands queue meanwhile and are applied in order once the worker resumes.
#[derive(Debug)]
pub struct Scheduler {
    commands: Sender<PlaybackCommand>,
    notices: Receiver<FrameNotice>,
    _handle: thread::JoinHandle<()>,
}

impl Scheduler {
    /// Validate the session and start the worker in RealTime mode. The first notice (frame 0) is
    /// sent immediately.
    pub fn spawn(len: usize, fps: Fps) -> SeqviewResult<Self> {
        Self::spawn_with_mode(len, fps, PlaybackMode::RealTime)
    }

    /// Like [`spawn`](Self::spawn), starting in `mode`.
    pub fn spawn_with_mode(len: usize, fps: Fps, mode: PlaybackMode) -> SeqviewResult<Self> {
        let now = Instant::now();
        let mut state = PlaybackState::new(len, fps, now)?;
        if mode != state.mode() {
            state.apply(PlaybackCommand::SetMode(mode), now);
        }
        let (cmd_tx, cmd_rx) = unbounded::<PlaybackCommand>();
        let (notice_tx, notice_rx) = bounded::<FrameNotice>(NOTICE_BUFFER);

        let handle = thread::Builder::new()
            .name("seqview_scheduler".to_owned())
            .spawn(move || run_worker(state, &cmd_rx, &notice_tx))
            .map_err(|e| SeqviewError::scheduler(format!("spawn worker thread: {e}")))?;

        tracing::info!(len, fps = fps.as_f64(), %mode, "playback scheduler started");

        Ok(Self {
            commands: cmd_tx,
            notices: notice_rx,
            _handle: handle,
        })
    }

    /// Queue a command. Fails only if the worker has gone away.
    pub fn send(&self, cmd: PlaybackCommand) -> SeqviewResult<()> {
        self.commands
            .send(cmd)
            .map_err(|err| SeqviewError::scheduler(format!("worker unreachable: {err}")))
    }

    /// Next notice to draw, without blocking.
    ///
    /// Waiting RealTime and paused notices collapse to the newest one. A notice that
    /// [`must_display`](FrameNotice::must_display) is returned on its own and later notices stay
    /// queued for the next call.
    pub fn next_notice(&self) -> Option<FrameNotice> {
        take_next_notice(&self.notices)
    }

    /// The raw notice receiver, for callers that want to block or select on it.
    pub fn receiver(&self) -> &Receiver<FrameNotice> {
        &self.notices
    }
}

fn take_next_notice(notices: &Receiver<FrameNotice>) -> Option<FrameNotice> {
    let mut latest = None;
    while let Ok(notice) = notices.try_recv() {
        if notice.must_display() {
            return Some(notice);
        }
        latest = Some(notice);
    }
    latest
}

fn run_worker(
    mut state: PlaybackState,
    commands: &Receiver<PlaybackCommand>,
    notices: &Sender<FrameNotice>,
) {
    let ticker = tick(state.fps().frame_duration());

    let first = state.visible_frame(Instant::now());
    if emit(notices, &state, first).is_continue() {
        while service_once(&mut state, commands, &ticker, notices).is_continue() {}
    }

    tracing::debug!("playback scheduler stopped");
}

/// Wait for one command or tick and handle it.
///
/// Commands already queued when a tick fires are applied before the tick.
fn service_once(
    state: &mut PlaybackState,
    commands: &Receiver<PlaybackCommand>,
    ticker: &Receiver<Instant>,
    notices: &Sender<FrameNotice>,
) -> ControlFlow<()> {
    select! {
        recv(commands) -> msg => match msg {
            Ok(cmd) => handle_command(state, cmd, notices),
            Err(_) => ControlFlow::Break(()),
        },
        recv(ticker) -> _ => match drain_pending(state, commands, notices) {
            ControlFlow::Continue(()) => handle_tick(state, notices),
            ControlFlow::Break(()) => ControlFlow::Break(()),
        },
    }
}

fn drain_pending(
    state: &mut PlaybackState,
    commands: &Receiver<PlaybackCommand>,
    notices: &Sender<FrameNotice>,
) -> ControlFlow<()> {
    loop {
        match commands.try_recv() {
            Ok(cmd) => handle_command(state, cmd, notices)?,
            Err(TryRecvError::Empty) => return ControlFlow::Continue(()),
            Err(TryRecvError::Disconnected) => return ControlFlow::Break(()),
        }
    }
}

fn handle_command(
    state: &mut PlaybackState,
    cmd: PlaybackCommand,
    notices: &Sender<FrameNotice>,
) -> ControlFlow<()> {
    let now = Instant::now();
    state.apply(cmd, now);
    let frame = state.visible_frame(now);
    tracing::debug!(
        ?cmd,
        frame = frame.0,
        playing = state.is_playing(),
        mode = %state.mode(),
        "playback command"
    );
    emit(notices, state, frame)
}

fn handle_tick(state: &mut PlaybackState, notices: &Sender<FrameNotice>) -> ControlFlow<()> {
    match state.tick(Instant::now()) {
        Some(frame) => {
            tracing::trace!(frame = frame.0, "tick");
            emit(notices, state, frame)
        }
        None => ControlFlow::Continue(()),
    }
}

fn emit(
    notices: &Sender<FrameNotice>,
    state: &PlaybackState,
    frame: FrameIndex,
) -> ControlFlow<()> {
    let notice = FrameNotice {
        frame,
        playing: state.is_playing(),
        mode: state.mode(),
    };
    if notices.send(notice).is_err() {
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
