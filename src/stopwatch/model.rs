//! The stopwatch model: state, actions, tick handling and rendering.

use super::format::{duration_millis, format_elapsed, Format};
use super::keymap::{default_key_map, KeyMap};
use super::observer::{ObserverId, Observers, Snapshot};
use super::options::StopwatchOption;
use crate::clock::{Clock, SystemClock};
use crate::key::KeyMap as KeyMapTrait;
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Time between display refreshes unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

// Internal ID management for stopwatch instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered by the stopwatch's periodic task.
///
/// Each tick carries the id of the stopwatch that scheduled it and the tag
/// of the task it belongs to. A stopwatch only accepts ticks whose tag is
/// the tag of its live task, so ticks still in flight after `stop()`,
/// `reset()` or `unmount()` are dropped without effect.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The id of the stopwatch this tick targets.
    pub id: i64,
    tag: i64,
}

/// Handle of the live periodic task.
///
/// Present exactly while the stopwatch is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle {
    tag: i64,
}

impl TaskHandle {
    /// The tag carried by this task's ticks.
    pub fn tag(&self) -> i64 {
        self.tag
    }
}

/// Whether the clock is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Not advancing. The initial state.
    #[default]
    Paused,
    /// Advancing; a periodic task is scheduled.
    Running,
}

// The baseline of a running session: elapsed = carried + (now - at),
// i.e. now minus (at - carried), without subtracting from an Instant.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    at: Instant,
    carried: Duration,
}

impl Anchor {
    fn elapsed_at(&self, now: Instant) -> Duration {
        self.carried + now.saturating_duration_since(self.at)
    }
}

/// A stopwatch with start, stop and reset controls.
///
/// The stopwatch samples a [`Clock`] instead of counting ticks: every
/// accepted tick sets the elapsed time to `now - anchor`, where the anchor is
/// fixed when the clock starts. Late or irregular ticks therefore only delay
/// the display refresh; they never skew the measured time.
///
/// # Examples
///
/// ```rust
/// use bubbletea_stopwatch::clock::ManualClock;
/// use bubbletea_stopwatch::stopwatch::{new, with_clock, State};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let mut sw = new(&[with_clock(clock.clone())]);
/// assert_eq!(sw.state(), State::Paused);
///
/// let _tick = sw.start(); // hand this Cmd to the runtime
/// clock.advance(Duration::from_millis(1_500));
/// sw.stop();
///
/// assert_eq!(sw.elapsed_ms(), 1_500);
/// assert_eq!(sw.display(), "00:01:50");
/// ```
///
/// Embedding in an application:
///
/// ```rust
/// use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
/// use bubbletea_stopwatch::stopwatch::{new, Model as Stopwatch};
///
/// struct App {
///     stopwatch: Stopwatch,
/// }
///
/// impl BubbleTeaModel for App {
///     fn init() -> (Self, Option<Cmd>) {
///         let mut stopwatch = new(&[]);
///         let cmd = stopwatch.start();
///         (App { stopwatch }, cmd)
///     }
///
///     fn update(&mut self, msg: Msg) -> Option<Cmd> {
///         self.stopwatch.update(msg)
///     }
///
///     fn view(&self) -> String {
///         self.stopwatch.view()
///     }
/// }
/// ```
///
/// # Cloning
///
/// A clone is a separate stopwatch: it gets a fresh id, keeps the elapsed
/// time as of the last sample, and starts paused with no observers. Ticks
/// scheduled by the original never reach the clone.
#[derive(Debug)]
pub struct Model {
    /// Nominal time between display refreshes.
    ///
    /// Only affects how smooth the display looks, not the measured time.
    pub interval: Duration,
    /// Layout of the rendered time.
    pub format: Format,
    /// Key bindings for the controls.
    pub keymap: KeyMap,
    /// Style of the time display.
    pub style: Style,
    /// Style of the control bar under the display.
    pub controls_style: Style,
    clock: Arc<dyn Clock>,
    elapsed: Duration,
    running: bool,
    task: Option<TaskHandle>,
    anchor: Option<Anchor>,
    id: i64,
    tag: i64,
    focus: bool,
    mounted: bool,
    observers: Observers,
}

/// Creates a stopwatch configured by `opts`.
///
/// The stopwatch starts paused at zero, focused, sampling the system clock
/// every [`DEFAULT_INTERVAL`] unless an option says otherwise.
pub fn new(opts: &[StopwatchOption]) -> Model {
    let mut m = Model::new();
    for opt in opts {
        opt.apply(&mut m);
    }
    if m.interval.is_zero() {
        m.interval = DEFAULT_INTERVAL;
    }
    m
}

/// Creates a stopwatch that refreshes every `interval`.
pub fn new_with_interval(interval: Duration) -> Model {
    new(&[super::options::with_interval(interval)])
}

impl Model {
    /// Creates a stopwatch with default settings.
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            format: Format::default(),
            keymap: default_key_map(),
            style: Style::new(),
            controls_style: Style::new().faint(true),
            clock: Arc::new(SystemClock),
            elapsed: Duration::ZERO,
            running: false,
            task: None,
            anchor: None,
            id: next_id(),
            tag: 0,
            focus: true,
            mounted: true,
            observers: Observers::default(),
        }
    }

    /// Unique identifier of this stopwatch.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the clock is advancing.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Current state of the start/stop state machine.
    pub fn state(&self) -> State {
        if self.running {
            State::Running
        } else {
            State::Paused
        }
    }

    /// Elapsed time as of the last sample.
    ///
    /// While running this is refreshed on every tick, and once more when the
    /// clock is stopped.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        duration_millis(self.elapsed)
    }

    /// The live periodic task, if any. `Some` exactly while running.
    pub fn task(&self) -> Option<TaskHandle> {
        self.task
    }

    /// `false` once [`unmount`](Self::unmount) has been called.
    pub fn mounted(&self) -> bool {
        self.mounted
    }

    /// The observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            running: self.running,
            elapsed: self.elapsed,
        }
    }

    /// Replaces the clock.
    ///
    /// A running stopwatch keeps the time measured so far and continues
    /// from the new clock's present.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        let before = self.snapshot();
        self.sample();
        self.clock = clock;
        if self.running {
            self.anchor = Some(Anchor {
                at: self.clock.now(),
                carried: self.elapsed,
            });
        }
        self.commit(before);
    }

    /// Registers a callback invoked after every change to the running flag
    /// or the elapsed time.
    ///
    /// ```rust
    /// use bubbletea_stopwatch::stopwatch::new;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let changes = Arc::new(AtomicUsize::new(0));
    /// let seen = Arc::clone(&changes);
    ///
    /// let mut sw = new(&[]);
    /// sw.subscribe(move |_| {
    ///     seen.fetch_add(1, Ordering::SeqCst);
    /// });
    /// let _ = sw.start();
    /// assert_eq!(changes.load(Ordering::SeqCst), 1);
    /// ```
    pub fn subscribe<F>(&mut self, f: F) -> ObserverId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.observers.subscribe(Arc::new(f))
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Starts or resumes the clock.
    ///
    /// The anchor is placed so that time accumulated before a pause carries
    /// over. Returns the command that delivers the first tick; the runtime
    /// must execute it for the display to refresh. Starting a running or
    /// unmounted stopwatch does nothing and returns `None`, so there is never
    /// more than one periodic task.
    pub fn start(&mut self) -> Option<Cmd> {
        if !self.mounted || self.running {
            return None;
        }
        let before = self.snapshot();

        self.anchor = Some(Anchor {
            at: self.clock.now(),
            carried: self.elapsed,
        });
        self.running = true;
        let cmd = self.schedule();

        debug!(id = self.id, elapsed_ms = self.elapsed_ms(), "stopwatch started");
        self.commit(before);
        Some(cmd)
    }

    /// Pauses the clock, keeping the elapsed time.
    ///
    /// Takes a final sample, then cancels the periodic task before returning:
    /// a tick already in flight is rejected when it arrives. Stopping a
    /// paused stopwatch does nothing.
    pub fn stop(&mut self) {
        if !self.mounted || !self.running {
            return;
        }
        let before = self.snapshot();

        self.sample();
        self.cancel();

        debug!(id = self.id, elapsed_ms = self.elapsed_ms(), "stopwatch stopped");
        self.commit(before);
    }

    /// Stops the clock if it is running and clears the elapsed time.
    pub fn reset(&mut self) {
        if !self.mounted {
            return;
        }
        let before = self.snapshot();

        self.cancel();
        self.elapsed = Duration::ZERO;

        debug!(id = self.id, "stopwatch reset");
        self.commit(before);
    }

    /// Stops a running stopwatch or starts a paused one.
    pub fn toggle(&mut self) -> Option<Cmd> {
        if self.running {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    /// Tears the widget down.
    ///
    /// Cancels the periodic task unconditionally and drops all observers.
    /// Afterwards actions, ticks and key presses are ignored, so the state
    /// no longer changes.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.cancel();
        self.mounted = false;
        self.observers.clear();
        debug!(id = self.id, elapsed_ms = self.elapsed_ms(), "stopwatch unmounted");
    }

    /// Returns the tick message the live task would deliver next.
    ///
    /// Useful for hosts that drive ticks themselves. Returns `None` while
    /// paused.
    pub fn tick_msg(&self) -> Option<TickMsg> {
        self.task.map(|task| TickMsg {
            id: self.id,
            tag: task.tag,
        })
    }

    /// Handles tick and key messages.
    ///
    /// An accepted tick refreshes the elapsed time and returns the next tick
    /// command. Key presses drive the controls while the widget is focused.
    /// Everything else, including ticks for other stopwatches or for a
    /// cancelled task, returns `None`.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.mounted {
            return None;
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            return self.handle_tick(tick_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focus {
                return None;
            }
            return self.handle_key(key_msg);
        }

        None
    }

    /// The formatted elapsed time, e.g. `01:01:23`.
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed, self.format)
    }

    /// Renders the styled display followed by the control bar.
    pub fn view(&self) -> String {
        let display = self.style.render(&self.display());
        let controls = self
            .keymap
            .short_help()
            .into_iter()
            .filter(|b| b.enabled())
            .map(|b| format!("{} {}", b.help().key, b.help().desc))
            .collect::<Vec<_>>()
            .join(" • ");

        if controls.is_empty() {
            return display;
        }
        format!("{}\n{}", display, self.controls_style.render(&controls))
    }

    fn handle_tick(&mut self, tick_msg: &TickMsg) -> Option<Cmd> {
        if tick_msg.id != self.id {
            return None;
        }

        match self.task {
            Some(task) if task.tag == tick_msg.tag => {}
            _ => {
                trace!(id = self.id, tag = tick_msg.tag, "dropping stale tick");
                return None;
            }
        }

        let before = self.snapshot();
        self.sample();
        trace!(id = self.id, elapsed_ms = self.elapsed_ms(), "tick");
        self.commit(before);

        // Re-tagging on every tick keeps a single chain alive even if the
        // same tick is delivered twice.
        Some(self.schedule())
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.start.matches(key_msg) {
            self.start()
        } else if self.keymap.stop.matches(key_msg) {
            self.stop();
            None
        } else if self.keymap.reset.matches(key_msg) {
            self.reset();
            None
        } else if self.keymap.toggle.matches(key_msg) {
            self.toggle()
        } else {
            None
        }
    }

    fn schedule(&mut self) -> Cmd {
        self.tag += 1;
        self.task = Some(TaskHandle { tag: self.tag });

        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn sample(&mut self) {
        if let Some(anchor) = self.anchor {
            let now = self.clock.now();
            self.elapsed = self.elapsed.max(anchor.elapsed_at(now));
        }
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            trace!(id = self.id, tag = task.tag, "periodic task cancelled");
        }
        self.anchor = None;
        self.running = false;
    }

    fn commit(&self, before: Snapshot) {
        let after = self.snapshot();
        if after != before {
            self.observers.notify(&after);
        }
    }
}

impl Clone for Model {
    fn clone(&self) -> Self {
        Self {
            interval: self.interval,
            format: self.format,
            keymap: self.keymap.clone(),
            style: self.style.clone(),
            controls_style: self.controls_style.clone(),
            clock: Arc::clone(&self.clock),
            elapsed: self.elapsed,
            running: false,
            task: None,
            anchor: None,
            id: next_id(),
            tag: 0,
            focus: self.focus,
            mounted: self.mounted,
            observers: Observers::default(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (new(&[]), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
