//! Helper functions shared by the query layer, the feed and the CLI

mod date;
mod list;

pub use date::*;
pub use list::*;
