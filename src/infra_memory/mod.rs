//! In-process stand-in for the Redis store, selected with `store.backend = "memory"`
//! and used by the test suites.

mod glob;
mod kv_store_memory;

pub use glob::*;
pub use kv_store_memory::*;
