use std::io::Write;

use ansi_term::Colour;
use anyhow::Result;

use crate::ledger::{
    entities::{DailyUsage, DEFAULT_APPS},
    unlock::UnlockStatus,
    UsageLedger,
};

const UNLOCKED: &str = "Unlocked";
const LOCKED: &str = "Locked until run completed";

/// Prints the catalog, marking apps that are currently tracked.
pub fn print_apps(ledger: &UsageLedger, out: &mut impl Write) -> Result<()> {
    for app in DEFAULT_APPS {
        let mark = if ledger.is_tracked(app.id) { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}\t{}", app.label, app.id)?;
    }
    Ok(())
}

pub fn print_day(day: &DailyUsage, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{}\tscrolled {} min\tran {} min",
        day.date, day.scroll_minutes, day.run_minutes
    )?;
    Ok(())
}

/// Prints days as tab separated lines, or as a JSON array.
pub fn print_history<'a>(
    days: impl Iterator<Item = &'a DailyUsage>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&days.collect::<Vec<_>>())?)?;
        return Ok(());
    }
    let mut empty = true;
    for day in days {
        empty = false;
        print_day(day, out)?;
    }
    if empty {
        writeln!(out, "Nothing logged yet")?;
    }
    Ok(())
}

/// Profile view. `is_today` switches the headings between "Today"/"Tomorrow" and plain dates.
pub fn print_status(
    status: &UnlockStatus,
    is_today: bool,
    colored: bool,
    out: &mut impl Write,
) -> Result<()> {
    let (day_heading, goal_heading, scroll_ref) = if is_today {
        (
            "Today".to_string(),
            "Tomorrow's goal".to_string(),
            "today's".to_string(),
        )
    } else {
        (
            status.day.date.to_string(),
            format!("Goal for {}", status.next_day.date),
            format!("{}'s", status.day.date),
        )
    };

    writeln!(out, "{day_heading}")?;
    writeln!(out, "  Scrolled: {} min", status.day.scroll_minutes)?;
    writeln!(out, "  Ran: {} min", status.day.run_minutes)?;
    writeln!(out, "{goal_heading}")?;
    writeln!(
        out,
        "  Run at least {} min to offset {scroll_ref} scroll.",
        status.required_run_minutes
    )?;

    let (text, colour) = if status.unlocked {
        (UNLOCKED, Colour::Blue)
    } else {
        (LOCKED, Colour::Red)
    };
    if colored {
        writeln!(out, "Status: {}", colour.bold().paint(text))?;
    } else {
        writeln!(out, "Status: {text}")?;
    }
    writeln!(
        out,
        "  Apps will be accessible the day after you match your scroll time with running."
    )?;
    Ok(())
}
