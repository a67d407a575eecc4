pub mod clock;
pub mod logging;
pub mod minutes;
pub mod time;
