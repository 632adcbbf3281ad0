//! Text front end: one-shot subcommands, the numbered menu and table output.

mod command;
mod menu;
mod render;

pub use command::*;
pub use menu::*;
pub use render::*;
