//! Settings come from a TOML file plus `CHEEPER__*` environment overrides.
//! See `bin/seed_demo.rs` for a binary that loads them against a live store.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
