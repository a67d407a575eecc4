//! The usage ledger is the single owner of a session's state:
//!  - The set of apps the user has opted to track.
//!  - One [entities::DailyUsage] per calendar date that received minutes.
//!
//! Reads never create records; only adding a positive number of minutes does. Derived values such
//! as the unlock status live in [unlock] and are recomputed from the records on every query.

pub mod entities;
pub mod unlock;

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use entities::{CalendarDate, DailyUsage, TrackedAppId, DEFAULT_TRACKED_APPS};
use tracing::{debug, trace};

use crate::utils::minutes::effective_minutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counter {
    Scroll,
    Run,
}

/// Session-lived store of tracked apps and per-day minutes. Nothing is persisted: dropping the
/// ledger ends the session.
#[derive(Debug, Clone)]
pub struct UsageLedger {
    tracked_apps: Vec<TrackedAppId>,
    by_date: BTreeMap<CalendarDate, DailyUsage>,
    revision: u64,
}

impl Default for UsageLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageLedger {
    /// Fresh session state: default tracked apps, no records.
    pub fn new() -> Self {
        Self {
            tracked_apps: DEFAULT_TRACKED_APPS.to_vec(),
            by_date: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Tracked apps in the order they were added.
    pub fn tracked_apps(&self) -> &[TrackedAppId] {
        &self.tracked_apps
    }

    pub fn is_tracked(&self, app_id: TrackedAppId) -> bool {
        self.tracked_apps.contains(&app_id)
    }

    /// Removes the app if it is tracked, adds it otherwise. Returns whether the app is tracked
    /// after the call.
    pub fn toggle_tracked_app(&mut self, app_id: TrackedAppId) -> bool {
        let tracked = if let Some(position) = self.tracked_apps.iter().position(|v| *v == app_id) {
            self.tracked_apps.remove(position);
            false
        } else {
            self.tracked_apps.push(app_id);
            true
        };
        self.revision += 1;
        debug!("Toggled {app_id}, tracked: {tracked}");
        tracked
    }

    /// Adds `max(0, floor(minutes))` scroll minutes to `date`. Returns the minutes that counted.
    pub fn add_scroll_minutes(&mut self, date: impl Into<CalendarDate>, minutes: f64) -> u32 {
        self.add_minutes(date.into(), minutes, Counter::Scroll)
    }

    /// Adds `max(0, floor(minutes))` run minutes to `date`. Returns the minutes that counted.
    pub fn add_run_minutes(&mut self, date: impl Into<CalendarDate>, minutes: f64) -> u32 {
        self.add_minutes(date.into(), minutes, Counter::Run)
    }

    fn add_minutes(&mut self, date: CalendarDate, minutes: f64, counter: Counter) -> u32 {
        let delta = effective_minutes(minutes);
        if delta == 0 {
            trace!("Ignoring {minutes} {counter:?} minutes for {date}");
            return 0;
        }

        let day = self.day_entry(date);
        let value = match counter {
            Counter::Scroll => &mut day.scroll_minutes,
            Counter::Run => &mut day.run_minutes,
        };
        *value = value.saturating_add(delta);
        debug!(
            "Added {delta} {counter:?} minutes to {}, now {}/{} scroll/run",
            day.date, day.scroll_minutes, day.run_minutes
        );
        self.revision += 1;
        delta
    }

    /// The only place records are created.
    fn day_entry(&mut self, date: CalendarDate) -> &mut DailyUsage {
        self.by_date
            .entry(date)
            .or_insert_with_key(|date| DailyUsage::empty(date.clone()))
    }

    /// Record for `date`, or a zero record if nothing was logged. Never inserts.
    pub fn get_day(&self, date: impl Into<CalendarDate>) -> DailyUsage {
        let date = date.into();
        match self.by_date.get(&date) {
            Some(day) => day.clone(),
            None => DailyUsage::empty(date),
        }
    }

    /// Whether a record was materialized for `date`.
    pub fn has_record(&self, date: &str) -> bool {
        self.by_date.contains_key(date)
    }

    /// Materialized records ordered by date key.
    pub fn days(&self) -> impl Iterator<Item = &DailyUsage> {
        self.by_date.values()
    }

    /// Counter of effective mutations. Unchanged by no-op calls, so consumers can compare it to
    /// decide whether to redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Cloneable handle for sharing one ledger between several writers. Each operation, including the
/// fetch-or-create-then-increment of the add operations, runs under a single lock.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<UsageLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: UsageLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Panics if a writer panicked while holding the lock: the ledger can't be trusted after that.
    pub fn lock(&self) -> MutexGuard<'_, UsageLedger> {
        self.inner
            .lock()
            .expect("Usage ledger was poisoned by a panicking writer")
    }

    pub fn toggle_tracked_app(&self, app_id: TrackedAppId) -> bool {
        self.lock().toggle_tracked_app(app_id)
    }

    pub fn add_scroll_minutes(&self, date: impl Into<CalendarDate>, minutes: f64) -> u32 {
        self.lock().add_scroll_minutes(date, minutes)
    }

    pub fn add_run_minutes(&self, date: impl Into<CalendarDate>, minutes: f64) -> u32 {
        self.lock().add_run_minutes(date, minutes)
    }

    pub fn get_day(&self, date: impl Into<CalendarDate>) -> DailyUsage {
        self.lock().get_day(date)
    }

    /// Snapshot of the tracked apps.
    pub fn tracked_apps(&self) -> Vec<TrackedAppId> {
        self.lock().tracked_apps().to_vec()
    }
}
