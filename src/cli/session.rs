use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use chrono_english::Dialect;
use clap::{Parser, Subcommand};
use tracing::{debug, instrument, warn};

use crate::{
    ledger::{entities::TrackedAppId, unlock::UnlockStatus, UsageLedger},
    utils::{
        clock::Clock,
        minutes::MinuteDelta,
        time::{parse_user_date, today_date},
    },
};

use super::output::{print_apps, print_day, print_history, print_status};

/// Minutes logged by `scroll` and `run` when no amount is given.
const QUICK_LOG_MINUTES: f64 = 5.;

#[derive(Parser, Debug)]
#[command(
    name = "scrun",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Commands available during a session"
)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

/// Day a command applies to. Takes every word up to the next option, so `--date 2 days ago`
/// works without quotes.
#[derive(clap::Args, Debug)]
struct DateArg {
    #[arg(
        long = "date",
        short = 'd',
        num_args = 1..,
        help = "Day to use instead of today. Examples are \"2025-03-15\", \"yesterday\", \"2 days ago\", \"15/03/2025\""
    )]
    words: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    #[command(about = "List apps that can be tracked. Tracked ones are marked with [x]")]
    Apps,
    #[command(about = "Start or stop tracking an app")]
    Toggle { app: TrackedAppId },
    #[command(about = "Log minutes of scrolling. Fractions are rounded down")]
    Scroll {
        #[arg(allow_negative_numbers = true, help = "Minutes to add, 5 by default")]
        minutes: Option<MinuteDelta>,
        #[command(flatten)]
        date: DateArg,
    },
    #[command(about = "Log minutes of running. Fractions are rounded down")]
    Run {
        #[arg(allow_negative_numbers = true, help = "Minutes to add, 5 by default")]
        minutes: Option<MinuteDelta>,
        #[command(flatten)]
        date: DateArg,
    },
    #[command(about = "Show minutes logged for a day")]
    Day {
        #[command(flatten)]
        date: DateArg,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Show whether the day after is unlocked")]
    Status {
        #[command(flatten)]
        date: DateArg,
    },
    #[command(about = "Show every day with logged minutes")]
    History {
        #[arg(long)]
        json: bool,
    },
    #[command(about = "End the session", alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session. It owns the ledger, so everything logged lives exactly as long as the
/// session.
pub struct Session {
    ledger: UsageLedger,
    clock: Box<dyn Clock>,
    dialect: Dialect,
    colored: bool,
}

impl Session {
    pub fn new(clock: Box<dyn Clock>, dialect: Dialect, colored: bool) -> Self {
        Self {
            ledger: UsageLedger::new(),
            clock,
            dialect,
            colored,
        }
    }

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Reads commands line by line until input ends or the user quits. Failing commands are
    /// reported and the session goes on.
    pub fn run(&mut self, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
        writeln!(
            out,
            "Today is {}. Type \"help\" for commands.",
            today_date(self.clock.as_ref())
        )?;
        let mut buffer = vec![];
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            // Garbage bytes become replacement characters and fail as an unknown command
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.execute(line, &mut out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    warn!("Command {line:?} failed {e:?}");
                    writeln!(out, "error: {e}")?;
                }
            }
        }
        debug!(
            "Session ended with {} logged days",
            self.ledger.days().count()
        );
        Ok(())
    }

    /// Runs a single command line.
    #[instrument(skip(self, out))]
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let command = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(v) => v.command,
            Err(e) => {
                // Help and usage errors are both just shown to the user
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            SessionCommand::Apps => print_apps(&self.ledger, out)?,
            SessionCommand::Toggle { app } => {
                let tracked = self.ledger.toggle_tracked_app(app);
                let verb = if tracked { "Tracking" } else { "Stopped tracking" };
                writeln!(out, "{verb} {}", app.app().label)?;
            }
            SessionCommand::Scroll { minutes, date } => {
                let date = self.resolve_date(&date)?;
                let added = self.ledger.add_scroll_minutes(date, quick_log(minutes));
                self.report_added(added, "scroll", date, out)?;
            }
            SessionCommand::Run { minutes, date } => {
                let date = self.resolve_date(&date)?;
                let added = self.ledger.add_run_minutes(date, quick_log(minutes));
                self.report_added(added, "run", date, out)?;
            }
            SessionCommand::Day { date, json } => {
                let day = self.ledger.get_day(self.resolve_date(&date)?);
                if json {
                    writeln!(out, "{}", serde_json::to_string(&day)?)?;
                } else {
                    print_day(&day, out)?;
                }
            }
            SessionCommand::Status { date } => {
                let date = self.resolve_date(&date)?;
                let status = UnlockStatus::evaluate(&self.ledger, date)?;
                let is_today = date == today_date(self.clock.as_ref());
                print_status(&status, is_today, self.colored, out)?;
            }
            SessionCommand::History { json } => print_history(self.ledger.days(), json, out)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn resolve_date(&self, date: &DateArg) -> Result<NaiveDate> {
        if date.words.is_empty() {
            return Ok(today_date(self.clock.as_ref()));
        }
        parse_user_date(&date.words.join(" "), self.clock.as_ref(), self.dialect)
    }

    fn report_added(
        &self,
        added: u32,
        kind: &str,
        date: NaiveDate,
        out: &mut impl Write,
    ) -> Result<()> {
        if added == 0 {
            writeln!(out, "Nothing to add")?;
        } else {
            writeln!(out, "+{added} min {kind} on {date}")?;
        }
        Ok(())
    }
}

fn quick_log(minutes: Option<MinuteDelta>) -> f64 {
    minutes.map_or(QUICK_LOG_MINUTES, |v| *v)
}
