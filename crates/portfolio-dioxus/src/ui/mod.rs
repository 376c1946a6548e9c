mod app;
mod bridge;
pub mod components;

pub use app::App;

use portfolio_engine::{DEFAULT_TICK, Threshold};
use std::time::Duration;

/// Page-wide animation settings, provided as context by [`App`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    pub tick: Duration,
    pub reveal_threshold: Threshold,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            reveal_threshold: Threshold::REVEAL,
        }
    }
}
