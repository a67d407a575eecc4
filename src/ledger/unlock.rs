use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::time::next_day;

use super::{entities::DailyUsage, UsageLedger};

/// Run minutes still owed to offset the day's scrolling.
pub fn required_run_minutes(day: &DailyUsage) -> u32 {
    day.scroll_minutes.saturating_sub(day.run_minutes)
}

/// Whether `next_day` is unlocked: its run minutes reached `day`'s scroll minutes. A tie unlocks.
pub fn is_unlocked(day: &DailyUsage, next_day: &DailyUsage) -> bool {
    next_day.run_minutes >= day.scroll_minutes
}

/// Everything the profile view shows about a day and the day after it. Built on demand and never
/// stored, so it can't go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockStatus {
    pub day: DailyUsage,
    pub next_day: DailyUsage,
    pub required_run_minutes: u32,
    pub unlocked: bool,
}

impl UnlockStatus {
    pub fn from_days(day: DailyUsage, next_day: DailyUsage) -> Self {
        Self {
            required_run_minutes: required_run_minutes(&day),
            unlocked: is_unlocked(&day, &next_day),
            day,
            next_day,
        }
    }

    /// Compares the minutes logged so far, not a settlement at the day boundary: the next day may
    /// already count as unlocked while `date` is still in progress.
    pub fn evaluate(ledger: &UsageLedger, date: NaiveDate) -> Result<Self> {
        Ok(Self::from_days(
            ledger.get_day(date),
            ledger.get_day(next_day(date)?),
        ))
    }
}

#[cfg(test)]
mod unlock_tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{is_unlocked, required_run_minutes, UnlockStatus};
    use crate::ledger::{entities::DailyUsage, UsageLedger};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()
    }

    fn next_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 6).unwrap()
    }

    fn usage(scroll_minutes: u32, run_minutes: u32) -> DailyUsage {
        DailyUsage {
            date: "2024-04-05".into(),
            scroll_minutes,
            run_minutes,
        }
    }

    #[test]
    fn required_minutes_never_negative() {
        assert_eq!(required_run_minutes(&usage(30, 0)), 30);
        assert_eq!(required_run_minutes(&usage(30, 12)), 18);
        assert_eq!(required_run_minutes(&usage(10, 45)), 0);
        assert_eq!(required_run_minutes(&usage(0, 0)), 0);
    }

    #[test]
    fn tie_counts_as_unlocked() {
        assert!(is_unlocked(&usage(30, 0), &usage(0, 30)));
        assert!(!is_unlocked(&usage(30, 0), &usage(0, 29)));
        assert!(is_unlocked(&usage(0, 0), &usage(0, 0)));
    }

    #[test]
    fn next_day_run_unlocks_after_enough_minutes() -> Result<()> {
        let mut ledger = UsageLedger::new();
        ledger.add_scroll_minutes(day(), 30.);
        ledger.add_run_minutes(next_day(), 5.);

        let status = UnlockStatus::evaluate(&ledger, day())?;
        assert_eq!(status.required_run_minutes, 30);
        assert!(!status.unlocked);

        ledger.add_run_minutes(next_day(), 25.);

        let status = UnlockStatus::evaluate(&ledger, day())?;
        assert_eq!(status.next_day.run_minutes, 30);
        assert!(status.unlocked);
        Ok(())
    }

    #[test]
    fn same_day_run_only_lowers_requirement() -> Result<()> {
        let mut ledger = UsageLedger::new();
        ledger.add_scroll_minutes(day(), 30.);
        ledger.add_run_minutes(day(), 30.);

        let status = UnlockStatus::evaluate(&ledger, day())?;
        assert_eq!(status.required_run_minutes, 0);
        assert!(!status.unlocked);
        Ok(())
    }

    #[test]
    fn evaluation_does_not_create_records() -> Result<()> {
        let ledger = UsageLedger::new();
        let status = UnlockStatus::evaluate(&ledger, day())?;
        assert!(status.unlocked);
        assert_eq!(status.next_day.date.as_str(), "2024-04-06");
        assert_eq!(ledger.days().count(), 0);
        Ok(())
    }

    #[test]
    fn last_representable_date_cannot_be_evaluated() {
        let ledger = UsageLedger::new();
        assert!(UnlockStatus::evaluate(&ledger, NaiveDate::MAX).is_err());
    }
}
