use std::{borrow::Borrow, fmt::Display, sync::Arc};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::utils::time::date_to_record_name;

/// Social platforms the user can opt into scroll-time accounting. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrackedAppId {
    Instagram,
    Tiktok,
    Twitter,
    X,
    Facebook,
    Youtube,
    Snapchat,
    Reddit,
    Pinterest,
}

impl TrackedAppId {
    pub fn id(&self) -> &'static str {
        match self {
            TrackedAppId::Instagram => "instagram",
            TrackedAppId::Tiktok => "tiktok",
            TrackedAppId::Twitter => "twitter",
            TrackedAppId::X => "x",
            TrackedAppId::Facebook => "facebook",
            TrackedAppId::Youtube => "youtube",
            TrackedAppId::Snapchat => "snapchat",
            TrackedAppId::Reddit => "reddit",
            TrackedAppId::Pinterest => "pinterest",
        }
    }

    /// Catalog entry of the app.
    pub fn app(&self) -> &'static TrackedApp {
        // The catalog is in declaration order.
        &DEFAULT_APPS[*self as usize]
    }
}

impl Display for TrackedAppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackedApp {
    pub id: TrackedAppId,
    pub label: &'static str,
}

/// Every platform that can be tracked, in display order.
pub static DEFAULT_APPS: [TrackedApp; 9] = [
    TrackedApp { id: TrackedAppId::Instagram, label: "Instagram" },
    TrackedApp { id: TrackedAppId::Tiktok, label: "TikTok" },
    TrackedApp { id: TrackedAppId::Twitter, label: "Twitter" },
    TrackedApp { id: TrackedAppId::X, label: "X" },
    TrackedApp { id: TrackedAppId::Facebook, label: "Facebook" },
    TrackedApp { id: TrackedAppId::Youtube, label: "YouTube" },
    TrackedApp { id: TrackedAppId::Snapchat, label: "Snapchat" },
    TrackedApp { id: TrackedAppId::Reddit, label: "Reddit" },
    TrackedApp { id: TrackedAppId::Pinterest, label: "Pinterest" },
];

/// Apps tracked when a session starts.
pub const DEFAULT_TRACKED_APPS: [TrackedAppId; 3] = [
    TrackedAppId::Instagram,
    TrackedAppId::Tiktok,
    TrackedAppId::Twitter,
];

/// Key of a day's record. Normally `YYYY-MM-DD`, but the ledger treats it as an opaque string, so
/// ordering is plain string ordering (which is chronological for well-formed keys).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(Arc<str>);

impl CalendarDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(date_to_record_name(value).into())
    }
}

impl From<&str> for CalendarDate {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for CalendarDate {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl Borrow<str> for CalendarDate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accumulated minutes for one calendar date. Values handed out by the ledger are copies.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    pub date: CalendarDate,
    pub scroll_minutes: u32,
    pub run_minutes: u32,
}

impl DailyUsage {
    /// Record of a day nothing was logged for.
    pub fn empty(date: CalendarDate) -> Self {
        Self {
            date,
            scroll_minutes: 0,
            run_minutes: 0,
        }
    }
}

#[cfg(test)]
mod entities_tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{CalendarDate, DailyUsage, TrackedAppId, DEFAULT_APPS};

    #[test]
    fn catalog_covers_every_id() {
        for app in DEFAULT_APPS {
            assert_eq!(app.id.app(), &app);
        }
        assert_eq!(TrackedAppId::Tiktok.app().label, "TikTok");
        assert_eq!(TrackedAppId::Youtube.to_string(), "youtube");
    }

    #[test]
    fn calendar_date_from_naive_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(CalendarDate::from(date).as_str(), "2025-03-07");
    }

    #[test]
    fn daily_usage_serializes_camel_case() {
        let day = DailyUsage {
            date: "2025-03-07".into(),
            scroll_minutes: 30,
            run_minutes: 5,
        };
        assert_eq!(
            serde_json::to_string(&day).unwrap(),
            r#"{"date":"2025-03-07","scrollMinutes":30,"runMinutes":5}"#
        );
    }

    #[test]
    fn daily_usage_reads_back_from_json() -> Result<()> {
        let day: DailyUsage = serde_json::from_str(
            r#"{"date":"2025-03-07","scrollMinutes":12,"runMinutes":40}"#,
        )?;
        assert_eq!(
            day,
            DailyUsage {
                date: CalendarDate::from("2025-03-07"),
                scroll_minutes: 12,
                run_minutes: 40,
            }
        );
        assert!(serde_json::from_str::<DailyUsage>(r#"{"date":"2025-03-07"}"#).is_err());
        Ok(())
    }
}
