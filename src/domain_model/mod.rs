mod date;
mod key;
mod message;
mod report;
mod user;

pub use date::*;
pub use key::*;
pub use message::*;
pub use report::*;
pub use user::*;
