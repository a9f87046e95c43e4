//! TUI type definitions - modes

/// Current application mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    #[default]
    Normal,
    Help,
    /// Add-plant form overlay
    AddPlant,
}
