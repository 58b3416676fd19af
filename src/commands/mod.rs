//! CLI commands. Each takes an already loaded index and writes to `out`.

pub mod feed;
pub mod list;
pub mod show;
pub mod tags;
