//! Tests for the stopwatch component.

use super::*;
use crate::clock::ManualClock;
use crate::Component;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn manual() -> (Model, ManualClock) {
    let clock = ManualClock::new();
    let sw = new(&[with_clock(clock.clone())]);
    (sw, clock)
}

fn key(c: char) -> Msg {
    Box::new(KeyMsg {
        key: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
    }) as Msg
}

fn deliver_tick(sw: &mut Model) -> bool {
    match sw.tick_msg() {
        Some(tick) => sw.update(Box::new(tick)).is_some(),
        None => false,
    }
}

#[test]
fn test_new_defaults() {
    let sw = new(&[]);
    assert_eq!(sw.state(), State::Paused);
    assert!(!sw.running());
    assert_eq!(sw.elapsed(), Duration::ZERO);
    assert_eq!(sw.elapsed_ms(), 0);
    assert!(sw.task().is_none());
    assert_eq!(sw.interval, DEFAULT_INTERVAL);
    assert_eq!(sw.interval, ms(10));
    assert_eq!(sw.format, Format::MinutesSecondsHundredths);
    assert!(sw.mounted());
    assert!(sw.focused());
    assert_eq!(sw.display(), "00:00:00");
}

#[test]
fn test_unique_ids() {
    let a = new(&[]);
    let b = new(&[]);
    assert!(a.id() > 0);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_zero_interval_falls_back_to_default() {
    let sw = new(&[with_interval(Duration::ZERO)]);
    assert_eq!(sw.interval, DEFAULT_INTERVAL);

    let sw = new_with_interval(ms(250));
    assert_eq!(sw.interval, ms(250));
}

#[test]
fn test_start_schedules_one_task() {
    let (mut sw, _clock) = manual();

    assert!(sw.start().is_some());
    assert_eq!(sw.state(), State::Running);
    let task = sw.task().expect("running stopwatch has a task");

    // Starting again must not schedule a second task.
    assert!(sw.start().is_none());
    assert_eq!(sw.task(), Some(task));

    // A single stop fully stops.
    sw.stop();
    assert_eq!(sw.state(), State::Paused);
    assert!(sw.task().is_none());
}

#[test]
fn test_tick_samples_from_anchor() {
    let (mut sw, clock) = manual();
    let _ = sw.start();

    clock.advance(ms(37));
    assert!(deliver_tick(&mut sw));
    assert_eq!(sw.elapsed_ms(), 37);

    // A late tick still reports the true elapsed time.
    clock.advance(ms(1_003));
    assert!(deliver_tick(&mut sw));
    assert_eq!(sw.elapsed_ms(), 1_040);
    assert_eq!(sw.display(), "00:01:04");
}

#[test]
fn test_elapsed_is_non_decreasing_across_ticks() {
    let (mut sw, clock) = manual();
    let _ = sw.start();

    let mut last = sw.elapsed();
    for step in [3, 0, 10, 7, 0, 25] {
        clock.advance(ms(step));
        assert!(deliver_tick(&mut sw));
        assert!(sw.elapsed() >= last);
        last = sw.elapsed();
    }
    assert_eq!(sw.elapsed_ms(), 45);
}

#[test]
fn test_stop_keeps_elapsed() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(820));
    sw.stop();

    assert_eq!(sw.elapsed_ms(), 820);

    // Time passing while paused is not counted.
    clock.advance(ms(5_000));
    assert_eq!(sw.elapsed_ms(), 820);
}

#[test]
fn test_stop_twice_is_same_as_once() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(120));

    sw.stop();
    let after_first = (sw.state(), sw.elapsed(), sw.task());
    clock.advance(ms(300));
    sw.stop();
    let after_second = (sw.state(), sw.elapsed(), sw.task());

    assert_eq!(after_first, after_second);
}

#[test]
fn test_stop_while_paused_is_noop() {
    let (mut sw, _clock) = manual();
    sw.stop();
    assert_eq!(sw.state(), State::Paused);
    assert_eq!(sw.elapsed(), Duration::ZERO);
}

#[test]
fn test_pause_resume_continuity() {
    let (mut sw, clock) = manual();

    let _ = sw.start();
    clock.advance(ms(500));
    sw.stop();

    clock.advance(ms(2_000));

    let _ = sw.start();
    clock.advance(ms(500));
    sw.stop();

    assert_eq!(sw.elapsed_ms(), 1_000);
}

#[test]
fn test_reset_from_any_state() {
    let (mut sw, clock) = manual();

    sw.reset();
    assert_eq!(sw.state(), State::Paused);
    assert_eq!(sw.elapsed_ms(), 0);

    let _ = sw.start();
    clock.advance(ms(900));
    assert!(deliver_tick(&mut sw));
    sw.reset();
    assert_eq!(sw.state(), State::Paused);
    assert_eq!(sw.elapsed_ms(), 0);
    assert!(sw.task().is_none());

    let _ = sw.start();
    clock.advance(ms(300));
    sw.stop();
    sw.reset();
    assert_eq!(sw.state(), State::Paused);
    assert_eq!(sw.elapsed_ms(), 0);
    assert_eq!(sw.display(), "00:00:00");
}

#[test]
fn test_resume_after_reset_starts_from_zero() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(700));
    sw.reset();

    let _ = sw.start();
    clock.advance(ms(40));
    sw.stop();
    assert_eq!(sw.elapsed_ms(), 40);
}

#[test]
fn test_stale_tick_is_rejected_after_stop() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    let in_flight = sw.tick_msg().expect("running stopwatch has a tick");

    clock.advance(ms(100));
    sw.stop();
    clock.advance(ms(100));

    assert!(sw.update(Box::new(in_flight)).is_none());
    assert_eq!(sw.elapsed_ms(), 100);
    assert_eq!(sw.state(), State::Paused);
}

#[test]
fn test_tick_from_previous_session_is_rejected() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    let old = sw.tick_msg().expect("tick");
    sw.stop();

    let _ = sw.start();
    clock.advance(ms(60));
    assert!(sw.update(Box::new(old)).is_none());
    assert_eq!(sw.elapsed_ms(), 0);

    assert!(deliver_tick(&mut sw));
    assert_eq!(sw.elapsed_ms(), 60);
}

#[test]
fn test_duplicate_tick_does_not_fork_the_task() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    let tick = sw.tick_msg().expect("tick");

    clock.advance(ms(10));
    assert!(sw.update(Box::new(tick.clone())).is_some());
    // The same tick arriving again belongs to a superseded generation.
    assert!(sw.update(Box::new(tick)).is_none());
}

#[test]
fn test_tick_for_other_stopwatch_is_ignored() {
    let (mut a, clock) = manual();
    let mut b = new(&[with_clock(clock.clone())]);
    let _ = a.start();
    let _ = b.start();

    clock.advance(ms(30));
    let tick_for_b = b.tick_msg().expect("tick");
    assert!(a.update(Box::new(tick_for_b)).is_none());
    assert_eq!(a.elapsed_ms(), 0);
}

#[test]
fn test_unmount_cancels_and_freezes() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(250));
    assert!(deliver_tick(&mut sw));
    let in_flight = sw.tick_msg().expect("tick");

    sw.unmount();
    assert!(!sw.mounted());
    assert!(!sw.running());
    assert!(sw.task().is_none());

    let frozen = sw.elapsed();
    clock.advance(ms(1_000));
    assert!(sw.update(Box::new(in_flight)).is_none());
    assert!(sw.start().is_none());
    sw.reset();
    assert!(sw.update(key('s')).is_none());

    assert_eq!(sw.elapsed(), frozen);
    assert!(!sw.running());

    // Unmounting again is harmless.
    sw.unmount();
}

#[test]
fn test_toggle() {
    let (mut sw, clock) = manual();
    assert!(sw.toggle().is_some());
    assert!(sw.running());

    clock.advance(ms(15));
    assert!(sw.toggle().is_none());
    assert!(!sw.running());
    assert_eq!(sw.elapsed_ms(), 15);
}

#[test]
fn test_keys_drive_controls() {
    let (mut sw, clock) = manual();

    assert!(sw.update(key('s')).is_some());
    assert!(sw.running());

    clock.advance(ms(2_340));
    assert!(sw.update(key('x')).is_none());
    assert!(!sw.running());
    assert_eq!(sw.display(), "00:02:34");

    assert!(sw.update(key(' ')).is_some());
    assert!(sw.running());

    assert!(sw.update(key('r')).is_none());
    assert!(!sw.running());
    assert_eq!(sw.elapsed_ms(), 0);

    assert!(sw.update(key('z')).is_none());
}

#[test]
fn test_keys_ignored_when_blurred() {
    let (mut sw, _clock) = manual();
    sw.blur();
    assert!(!sw.focused());

    assert!(sw.update(key('s')).is_none());
    assert!(!sw.running());

    assert!(sw.focus().is_none());
    assert!(sw.update(key('s')).is_some());
    assert!(sw.running());
}

#[test]
fn test_ticks_processed_when_blurred() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    sw.blur();

    clock.advance(ms(80));
    assert!(deliver_tick(&mut sw));
    assert_eq!(sw.elapsed_ms(), 80);
}

#[test]
fn test_unrelated_message_is_ignored() {
    let (mut sw, _clock) = manual();
    assert!(sw.update(Box::new("hello") as Msg).is_none());
}

#[test]
fn test_observers_see_every_change() {
    let (mut sw, clock) = manual();
    let seen: Arc<Mutex<Vec<Snapshot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    sw.subscribe(move |s| sink.lock().unwrap().push(*s));

    let _ = sw.start();
    clock.advance(ms(20));
    assert!(deliver_tick(&mut sw));
    // No time passed: nothing changed, nothing reported.
    assert!(deliver_tick(&mut sw));
    sw.stop();
    sw.reset();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![
            Snapshot { running: true, elapsed: Duration::ZERO },
            Snapshot { running: true, elapsed: ms(20) },
            Snapshot { running: false, elapsed: ms(20) },
            Snapshot { running: false, elapsed: Duration::ZERO },
        ]
    );
}

#[test]
fn test_unsubscribe() {
    let (mut sw, _clock) = manual();
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    let id = sw.subscribe(move |_| *sink.lock().unwrap() += 1);

    let _ = sw.start();
    assert!(sw.unsubscribe(id));
    assert!(!sw.unsubscribe(id));
    sw.stop();

    assert_eq!(*count.lock().unwrap(), 1);
}

#[test]
fn test_set_clock_keeps_measured_time() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(300));

    let other = ManualClock::new();
    sw.set_clock(Arc::new(other.clone()));
    other.advance(ms(200));
    sw.stop();

    assert_eq!(sw.elapsed_ms(), 500);
}

#[test]
fn test_set_clock_notifies_observers() {
    let (mut sw, clock) = manual();
    let last: Arc<Mutex<Option<Snapshot>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&last);
    sw.subscribe(move |s| *sink.lock().unwrap() = Some(*s));

    let _ = sw.start();
    clock.advance(ms(300));
    sw.set_clock(Arc::new(ManualClock::new()));

    assert_eq!(sw.elapsed_ms(), 300);
    assert_eq!(*last.lock().unwrap(), Some(sw.snapshot()));
}

#[test]
fn test_clone_is_an_independent_paused_stopwatch() {
    let (mut a, clock) = manual();
    let _ = a.start();
    clock.advance(ms(50));
    assert!(deliver_tick(&mut a));

    let mut b = a.clone();
    assert_ne!(a.id(), b.id());
    assert_eq!(b.state(), State::Paused);
    assert!(b.task().is_none());
    assert_eq!(b.elapsed_ms(), 50);

    let tick = a.tick_msg().expect("original keeps its task");
    assert!(b.update(Box::new(tick.clone())).is_none());
    assert!(a.update(Box::new(tick)).is_some());

    // The clone runs on its own from where the original was sampled.
    let _ = b.start();
    clock.advance(ms(25));
    b.stop();
    assert_eq!(b.elapsed_ms(), 75);
}

#[test]
fn test_full_help_lists_every_control() {
    use crate::key::KeyMap as _;

    let keymap = default_key_map();
    let columns = keymap.full_help();
    let descs: Vec<&str> = columns
        .iter()
        .flatten()
        .map(|b| b.help().desc.as_str())
        .collect();
    assert_eq!(descs, vec!["start", "stop", "reset", "start/stop"]);
    assert_eq!(keymap.short_help().len(), 3);
}

#[test]
fn test_hour_wraps_in_default_format() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(3_600_000));
    sw.stop();

    assert_eq!(sw.display(), "00:00:00");

    sw.format = Format::HoursMinutesSecondsHundredths;
    assert_eq!(sw.display(), "01:00:00:00");
}

#[test]
fn test_view_shows_display_and_controls() {
    let (mut sw, clock) = manual();
    let _ = sw.start();
    clock.advance(ms(61_230));
    sw.stop();

    let view = strip_ansi_escapes::strip_str(sw.view());
    let mut lines = view.lines();
    assert_eq!(lines.next(), Some("01:01:23"));
    let controls = lines.next().expect("control bar");
    assert!(controls.contains("s start"));
    assert!(controls.contains("x stop"));
    assert!(controls.contains("r reset"));
}

#[test]
fn test_view_without_enabled_controls() {
    let mut sw = new(&[]);
    sw.keymap.start.set_enabled(false);
    sw.keymap.stop.set_enabled(false);
    sw.keymap.reset.set_enabled(false);

    assert_eq!(strip_ansi_escapes::strip_str(sw.view()), "00:00:00");
}

#[test]
fn test_custom_keymap() {
    let mut keymap = default_key_map();
    keymap.start = crate::key::new_binding(vec![
        crate::key::with_keys_str(&["g"]),
        crate::key::with_help("g", "go"),
    ]);
    let clock = ManualClock::new();
    let mut sw = new(&[with_clock(clock), with_keymap(keymap)]);

    assert!(sw.update(key('s')).is_none());
    assert!(sw.update(key('g')).is_some());
    assert!(sw.running());
}

#[tokio::test]
async fn test_start_command_delivers_tick() {
    let mut sw = new(&[with_interval(ms(1))]);
    let cmd = sw.start().expect("start schedules a tick");

    let msg = cmd.await.expect("tick produces a message");
    assert!(msg.downcast_ref::<TickMsg>().is_some());
    assert!(sw.update(msg).is_some());
}
