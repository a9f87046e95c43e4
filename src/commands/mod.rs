//! Command implementations for sprout CLI

mod misc;
mod plant;

pub use misc::*;
pub use plant::*;
