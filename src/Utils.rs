//! utility modules used throughout the project
/// terminal logger for the `log` macros of the polynomial and piecewise engines (thin wrapper around simplelog)
pub mod logger;
