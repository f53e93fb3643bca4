use super::*;

fn notice(frame: usize, playing: bool, mode: PlaybackMode) -> FrameNotice {
    FrameNotice {
        frame: FrameIndex(frame),
        playing,
        mode,
    }
}

fn everyframe_state(len: usize) -> PlaybackState {
    let now = Instant::now();
    let mut state = PlaybackState::new(len, Fps::new(24.0).unwrap(), now).unwrap();
    state.apply(PlaybackCommand::SetMode(PlaybackMode::EveryFrame), now);
    state
}

#[test]
fn command_racing_a_tick_is_applied_before_it() {
    // select! picks among ready arms at random; repeat so both orders are exercised
    for _ in 0..64 {
        let mut state = everyframe_state(10);
        let (cmd_tx, cmd_rx) = unbounded();
        let (tick_tx, tick_rx) = bounded(1);
        let (notice_tx, notice_rx) = unbounded();

        cmd_tx.send(PlaybackCommand::StepForward).unwrap();
        tick_tx.send(Instant::now()).unwrap();
        while !tick_rx.is_empty() {
            assert!(service_once(&mut state, &cmd_rx, &tick_rx, &notice_tx).is_continue());
        }

        // the step paused playback, so the tick that raced it shows nothing
        let seen: Vec<FrameNotice> = notice_rx.try_iter().collect();
        assert_eq!(seen, vec![notice(1, false, PlaybackMode::EveryFrame)]);
    }
}

#[test]
fn everyframe_tick_without_commands_advances_one_frame() {
    let mut state = everyframe_state(3);
    let (_cmd_tx, cmd_rx) = unbounded::<PlaybackCommand>();
    let (tick_tx, tick_rx) = bounded(1);
    let (notice_tx, notice_rx) = unbounded();

    tick_tx.send(Instant::now()).unwrap();
    assert!(service_once(&mut state, &cmd_rx, &tick_rx, &notice_tx).is_continue());
    assert_eq!(
        notice_rx.try_iter().collect::<Vec<_>>(),
        vec![notice(1, true, PlaybackMode::EveryFrame)]
    );
}

#[test]
fn closed_command_channel_stops_the_worker() {
    let mut state = everyframe_state(3);
    let (cmd_tx, cmd_rx) = unbounded::<PlaybackCommand>();
    let (_tick_tx, tick_rx) = bounded::<Instant>(1);
    let (notice_tx, _notice_rx) = unbounded();
    drop(cmd_tx);
    assert!(service_once(&mut state, &cmd_rx, &tick_rx, &notice_tx).is_break());
}

#[test]
fn closed_notice_channel_stops_the_worker() {
    let mut state = everyframe_state(3);
    let (_cmd_tx, cmd_rx) = unbounded::<PlaybackCommand>();
    let (tick_tx, tick_rx) = bounded(1);
    let (notice_tx, notice_rx) = unbounded::<FrameNotice>();
    drop(notice_rx);
    tick_tx.send(Instant::now()).unwrap();
    assert!(service_once(&mut state, &cmd_rx, &tick_rx, &notice_tx).is_break());
}

#[test]
fn backlog_collapses_except_for_running_everyframe_notices() {
    let (tx, rx) = unbounded();
    tx.send(notice(1, true, PlaybackMode::RealTime)).unwrap();
    tx.send(notice(5, true, PlaybackMode::RealTime)).unwrap();
    tx.send(notice(6, true, PlaybackMode::EveryFrame)).unwrap();
    tx.send(notice(7, true, PlaybackMode::EveryFrame)).unwrap();
    tx.send(notice(7, false, PlaybackMode::EveryFrame)).unwrap();
    tx.send(notice(8, false, PlaybackMode::EveryFrame)).unwrap();

    assert_eq!(
        take_next_notice(&rx),
        Some(notice(6, true, PlaybackMode::EveryFrame))
    );
    assert_eq!(
        take_next_notice(&rx),
        Some(notice(7, true, PlaybackMode::EveryFrame))
    );
    assert_eq!(
        take_next_notice(&rx),
        Some(notice(8, false, PlaybackMode::EveryFrame))
    );
    assert_eq!(take_next_notice(&rx), None);
}

#[test]
fn spawn_with_mode_reports_the_initial_mode() {
    let s = Scheduler::spawn_with_mode(4, Fps::new(24.0).unwrap(), PlaybackMode::EveryFrame)
        .unwrap();
    let first = s
        .receiver()
        .recv_timeout(std::time::Duration::from_secs(2))
        .unwrap();
    assert_eq!(first.frame, FrameIndex(0));
    assert_eq!(first.mode, PlaybackMode::EveryFrame);
}
