pub mod config;
pub mod error;

pub use config::StaffdeskConfig;
pub use error::{Result, StaffdeskError};
