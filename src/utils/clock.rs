use chrono::{DateTime, Local};

/// Represents an entity responsible for providing the current moment across the application. This
/// allows "today" to be pinned in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    /// Current moment in the host's local time zone.
    fn now(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
