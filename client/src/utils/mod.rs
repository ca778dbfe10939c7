pub mod overlap;
pub mod time;
