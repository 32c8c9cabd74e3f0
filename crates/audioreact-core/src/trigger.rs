//! Discrete dispatch: fire a one-shot handler when the value reaches a threshold.
//!
//! The dispatcher is stateless across frames. There is no edge detection,
//! debounce or cooldown: every frame at or above the threshold fires again.

use crate::band::BandSelector;
use crate::controller::{AudioController, Reaction};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Receiver of trigger events
pub trait TriggerTarget {
    /// Called once per qualifying frame with the value that fired
    fn fire(&mut self, value: f32);
}

impl<F: FnMut(f32)> TriggerTarget for F {
    fn fire(&mut self, value: f32) {
        self(value)
    }
}

/// Configuration of a trigger controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Band selection, gain and range
    pub selector: BandSelector,
    /// Fire when the normalized value is at least this
    pub threshold: f32,
    /// Log every computed value
    pub show_value: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            selector: BandSelector::default(),
            threshold: 1.0,
            show_value: false,
        }
    }
}

impl TriggerConfig {
    /// Build a controller firing into `target`
    pub fn build<T: TriggerTarget>(self, target: T) -> AudioController<TriggerController<T>> {
        AudioController::new(
            self.selector,
            TriggerController::new(target, self.threshold).with_show_value(self.show_value),
        )
    }
}

/// Threshold-triggered dispatcher
#[derive(Debug, Clone)]
pub struct TriggerController<T> {
    target: T,
    threshold: f32,
    show_value: bool,
}

impl<T: TriggerTarget> TriggerController<T> {
    /// Create a dispatcher
    pub fn new(target: T, threshold: f32) -> Self {
        Self {
            target,
            threshold,
            show_value: false,
        }
    }

    /// Builder-style debug flag
    pub fn with_show_value(mut self, show_value: bool) -> Self {
        self.show_value = show_value;
        self
    }

    /// Fire if `value >= threshold`. Returns whether it fired.
    pub fn on_value(&mut self, value: f32) -> bool {
        if self.show_value {
            info!(value, "Trigger controller value");
        }
        if value >= self.threshold {
            self.target.fire(value);
            true
        } else {
            false
        }
    }

    /// Current threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Change the threshold
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Whether values are logged
    pub fn show_value(&self) -> bool {
        self.show_value
    }

    /// Toggle value logging
    pub fn set_show_value(&mut self, show_value: bool) {
        self.show_value = show_value;
    }

    /// The trigger target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The trigger target, mutably
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}

impl<T: TriggerTarget> Reaction for TriggerController<T> {
    fn react(&mut self, value: f32) {
        self.on_value(value);
    }
}
