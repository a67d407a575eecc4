pub mod output;
pub mod session;

use std::{
    fmt::Display,
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use session::Session;
use tracing::level_filters::LevelFilter;

use crate::{
    ledger::UsageLedger,
    utils::{
        clock::DefaultClock,
        logging::enable_logging,
        time::{date_to_record_name, today_date, tomorrow_date},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Scrun", version, long_about = None)]
#[command(about = "Log scroll time and run time. Tomorrow unlocks once you've run off today's scrolling", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(long, help = "Enable logging to stderr")]
    log: bool,
    #[arg(long = "log-filter", help = "Log level. Falls back to RUST_LOG, then warn")]
    log_filter: Option<LevelFilter>,
    #[arg(long = "log-dir", help = "Also write daily rotated logs into this directory")]
    log_dir: Option<PathBuf>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Start an interactive session. Nothing is kept after it ends")]
    Session,
    #[command(about = "List apps that can be tracked")]
    Apps,
    #[command(about = "Print the keys of today and tomorrow")]
    Dates,
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(args.log_filter.unwrap_or(LevelFilter::TRACE))
    } else {
        args.log_filter
    };
    enable_logging(args.log_dir.as_deref(), logging_level, args.log)?;

    match args.commands.unwrap_or(Commands::Session) {
        Commands::Session => {
            let mut session = Session::new(
                Box::new(DefaultClock),
                args.date_style.into(),
                io::stdout().is_terminal(),
            );
            session.run(io::stdin().lock(), io::stdout().lock())
        }
        Commands::Apps => {
            output::print_apps(&UsageLedger::new(), &mut io::stdout().lock())?;
            Ok(())
        }
        Commands::Dates => {
            println!("today\t{}", date_to_record_name(today_date(&DefaultClock)));
            println!("tomorrow\t{}", date_to_record_name(tomorrow_date(&DefaultClock)?));
            Ok(())
        }
    }
}

#[cfg(test)]
mod cli_tests {
    use anyhow::Result;
    use clap::Parser;
    use tracing::level_filters::LevelFilter;

    use super::{Args, Commands, DateStyle};

    #[test]
    fn session_is_the_default_command() -> Result<()> {
        let args = Args::try_parse_from(["scrun"])?;
        assert_eq!(args.commands, None);
        assert!(!args.log);
        assert_eq!(args.log_filter, None);
        assert_eq!(args.log_dir, None);
        assert_eq!(args.date_style, DateStyle::Uk);
        Ok(())
    }

    #[test]
    fn parses_global_flags_and_subcommands() -> Result<()> {
        let args = Args::try_parse_from([
            "scrun",
            "--log",
            "--log-filter",
            "debug",
            "--log-dir",
            "/tmp/scrun-logs",
            "--date-style",
            "us",
            "dates",
        ])?;
        assert_eq!(args.commands, Some(Commands::Dates));
        assert!(args.log);
        assert_eq!(args.log_filter, Some(LevelFilter::DEBUG));
        assert_eq!(args.log_dir.as_deref(), Some("/tmp/scrun-logs".as_ref()));
        assert_eq!(args.date_style, DateStyle::Us);

        let args = Args::try_parse_from(["scrun", "apps"])?;
        assert_eq!(args.commands, Some(Commands::Apps));
        let args = Args::try_parse_from(["scrun", "session"])?;
        assert_eq!(args.commands, Some(Commands::Session));
        Ok(())
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(Args::try_parse_from(["scrun", "timeline"]).is_err());
        assert!(Args::try_parse_from(["scrun", "--date-style", "fr"]).is_err());
        assert!(Args::try_parse_from(["scrun", "--log-filter", "loud"]).is_err());
    }
}
