//! Global constants for the viewer core.

/// Zoom constants.
pub mod zoom {
    /// Minimum zoom level (percent)
    pub const MIN: u32 = 100;
    /// Maximum zoom level (percent)
    pub const MAX: u32 = 500;
    /// Zoom slider step (percent)
    pub const STEP: u32 = 50;
    /// Default zoom level (percent)
    pub const DEFAULT: u32 = 100;
}
