pub mod card;
pub mod cli;
pub mod config;
pub mod countdown;
pub mod db;
pub mod error;
pub mod form;
pub mod garden;
pub mod logging;
pub mod notice;
pub mod plant;
pub mod store;
pub mod ticker;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{Result, SproutError};
