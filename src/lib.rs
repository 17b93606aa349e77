//! chat-commander library root.

pub mod cli;
pub mod commander;
pub mod config;
pub mod directory;
pub mod display;
pub mod error;
pub mod group;
pub mod logging;
pub mod membership;
pub mod protocol;

pub use cli::Commands;
pub use commander::{Flow, Session};
pub use config::{load_settings, Settings};
pub use error::{Error, Result};
