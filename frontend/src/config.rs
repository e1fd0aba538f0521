use log::{warn, Level};
use serde::Deserialize;

/// Element the page can use to override scroll tuning:
/// `<script type="application/json" id="scroll-tuning">{ ... }</script>`
pub const TUNING_ELEMENT_ID: &str = "scroll-tuning";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Knobs for the scroll hooks. Every field falls back to its default when
/// missing from the page override.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    pub wheel_sensitivity: f64,
    pub touch_sensitivity: f64,
    /// Arrow key step in px.
    pub key_step: f64,
    /// Wheel gestures may arm the lock this close to center.
    pub entry_tolerance: f64,
    /// Native scrolling locks only this close to center.
    pub center_tolerance: f64,
    /// Drift the pin loop tolerates before correcting.
    pub pin_tolerance: f64,
    pub snap_min_distance: f64,
    pub snap_max_distance: f64,
    /// How far the page is pushed when leaving the lock.
    pub exit_nudge: f64,
    pub entry_settle_ms: u32,
    pub exit_settle_ms: u32,
    pub snap_settle_ms: u32,
    pub idle_debounce_ms: u32,
    /// Prefer the `scrollend` event over the settle timeouts when available.
    pub use_scrollend: bool,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            wheel_sensitivity: 1.2,
            touch_sensitivity: 1.0,
            key_step: 120.0,
            entry_tolerance: 50.0,
            center_tolerance: 5.0,
            pin_tolerance: 1.0,
            snap_min_distance: 10.0,
            snap_max_distance: 250.0,
            exit_nudge: 80.0,
            entry_settle_ms: 400,
            exit_settle_ms: 600,
            snap_settle_ms: 1500,
            idle_debounce_ms: 150,
            use_scrollend: true,
        }
    }
}

impl ScrollTuning {
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(tuning) => tuning,
            Err(e) => {
                warn!("Ignoring malformed scroll tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Reads the page override if there is one.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(TUNING_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let tuning = ScrollTuning::from_json(r#"{ "wheel_sensitivity": 2.0, "use_scrollend": false }"#);
        assert_eq!(tuning.wheel_sensitivity, 2.0);
        assert!(!tuning.use_scrollend);
        assert_eq!(tuning.entry_tolerance, 50.0);
        assert_eq!(tuning.exit_settle_ms, 600);
    }

    #[test]
    fn malformed_override_falls_back_to_defaults() {
        assert_eq!(ScrollTuning::from_json("{ nope"), ScrollTuning::default());
        assert_eq!(ScrollTuning::from_json(r#"{ "key_step": "big" }"#), ScrollTuning::default());
    }
}
