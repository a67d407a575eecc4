//! Pairs time spent scrolling social media with time spent running.
//! Every minute scrolled on a day has to be offset by running on the following day before the
//! tracked apps count as unlocked again. All state lives in memory for one session.
//!

pub mod cli;
pub mod ledger;
pub mod utils;
