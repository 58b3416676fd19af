//! Configuration module

mod site;

pub use site::FolioConfig;
pub use site::CONFIG_FILE;
