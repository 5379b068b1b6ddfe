//! Change notification for hosts that mirror the stopwatch state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The observable part of the stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Whether the clock is advancing.
    pub running: bool,
    /// Elapsed time as of the last sample.
    pub elapsed: Duration,
}

/// Identifies a subscription returned by `Model::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Arc<dyn Fn(&Snapshot) + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct Observers {
    next: u64,
    entries: Vec<(ObserverId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, f: Callback) -> ObserverId {
        self.next += 1;
        let id = ObserverId(self.next);
        self.entries.push((id, f));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn notify(&self, snapshot: &Snapshot) {
        for (_, f) in &self.entries {
            f(snapshot);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
