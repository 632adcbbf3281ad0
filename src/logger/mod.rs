//! The `logger` module requires manual verification: run any subcommand with
//! `log.filter = "cheeper=trace"` and watch stderr.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
