//! Engine configuration
//!
//! Plain serde struct so drivers can keep it in a JSON file next to the binary.

use serde::{Deserialize, Serialize};

/// Smallest and largest chat panel the layout produces (px)
pub const MIN_PANEL_HEIGHT: f64 = 360.0;
pub const MAX_PANEL_HEIGHT: f64 = 560.0;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Chat panel height (px); sets the scroll-off threshold
    pub display_panel_height: f64,
    /// Largest frame delta a driver should feed `update` (ms)
    pub max_frame_delta_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_panel_height: 460.0,
            max_frame_delta_ms: 40.0,
        }
    }
}

impl EngineConfig {
    /// Builder: set panel height
    pub fn with_panel_height(mut self, px: f64) -> Self {
        self.display_panel_height = px;
        self
    }

    /// Panel height the layout would pick for a window of the given height
    pub fn panel_height_for_window(window_height: f64, chrome_height: f64) -> f64 {
        (window_height - chrome_height).clamp(MIN_PANEL_HEIGHT, MAX_PANEL_HEIGHT)
    }

    /// Clamp a raw frame delta to tolerate stalls
    pub fn clamp_delta(&self, dt_ms: f64) -> f64 {
        if dt_ms.is_finite() {
            dt_ms.clamp(0.0, self.max_frame_delta_ms)
        } else {
            0.0
        }
    }

    /// Parse from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded config: panel {}px, max delta {}ms",
            config.display_panel_height,
            config.max_frame_delta_ms
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
