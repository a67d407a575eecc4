use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;

/// A requested minute delta as typed by the user. Any finite or infinite number is accepted;
/// [MinuteDelta::effective] decides how much of it actually counts.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinuteDelta(f64);

impl MinuteDelta {
    pub fn effective(&self) -> u32 {
        effective_minutes(self.0)
    }
}

impl Display for MinuteDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.0)
    }
}

impl FromStr for MinuteDelta {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "15m" and "15min" are accepted alongside a bare number
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("min")
            .or_else(|| trimmed.strip_suffix('m'))
            .unwrap_or(trimmed);
        let v = number
            .trim()
            .parse::<f64>()
            .map_err(|e| anyhow!("Can't parse {s} into minutes: {e}"))?;
        if v.is_nan() {
            return Err(anyhow!("Can't parse {s} into minutes"));
        }
        Ok(MinuteDelta(v))
    }
}

impl Deref for MinuteDelta {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Whole minutes a request contributes: `max(0, floor(minutes))`, saturating at [u32::MAX].
/// NaN contributes nothing.
pub fn effective_minutes(minutes: f64) -> u32 {
    if minutes.is_nan() || minutes < 1. {
        return 0;
    }
    let floored = minutes.floor();
    if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

#[cfg(test)]
mod minutes_tests {
    use anyhow::Result;

    use super::{effective_minutes, MinuteDelta};

    #[test]
    fn floors_fractional_minutes() {
        assert_eq!(effective_minutes(3.9), 3);
        assert_eq!(effective_minutes(3.), 3);
        assert_eq!(effective_minutes(1.), 1);
    }

    #[test]
    fn discards_non_positive_and_sub_minute() {
        assert_eq!(effective_minutes(0.), 0);
        assert_eq!(effective_minutes(0.99), 0);
        assert_eq!(effective_minutes(-5.), 0);
        assert_eq!(effective_minutes(-0.5), 0);
        assert_eq!(effective_minutes(f64::NAN), 0);
        assert_eq!(effective_minutes(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn saturates_huge_values() {
        assert_eq!(effective_minutes(f64::INFINITY), u32::MAX);
        assert_eq!(effective_minutes(1e12), u32::MAX);
    }

    #[test]
    fn parses_user_input() -> Result<()> {
        assert_eq!("15".parse::<MinuteDelta>()?.effective(), 15);
        assert_eq!("15m".parse::<MinuteDelta>()?.effective(), 15);
        assert_eq!("2.5min".parse::<MinuteDelta>()?.effective(), 2);
        assert_eq!("-3".parse::<MinuteDelta>()?.effective(), 0);
        assert!("abc".parse::<MinuteDelta>().is_err());
        assert!("NaN".parse::<MinuteDelta>().is_err());
        Ok(())
    }
}
