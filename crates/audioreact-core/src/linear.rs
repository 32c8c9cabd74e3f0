//! Continuous dispatch: drive a property toward a value-derived target.
//!
//! Each normalized value recomputes the per-dimension target. With
//! [`Interpolation::Smoothed`] the property converges on render ticks; with
//! [`Interpolation::Instantaneous`] it is written straight away. The two clocks
//! (spectrum frames, render ticks) are independent, which is why target and
//! current are tracked separately.

use crate::band::BandSelector;
use crate::channel::Channels;
use crate::controller::{AudioController, Reaction};
use crate::properties::ControlledProperty;
use crate::smoothing::{Interpolation, SmoothingState};
use serde::{Deserialize, Serialize};

/// Configuration of a continuous controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearConfig<const N: usize> {
    /// Band selection, gain and range
    #[serde(default)]
    pub selector: BandSelector,
    /// Per-dimension enable flag and multiplier
    #[serde(default)]
    pub channels: Channels<N>,
    /// Smoothed or instantaneous writes
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl<const N: usize> Default for LinearConfig<N> {
    fn default() -> Self {
        Self {
            selector: BandSelector::default(),
            channels: Channels::default(),
            interpolation: Interpolation::default(),
        }
    }
}

impl<const N: usize> LinearConfig<N> {
    /// Build a controller driving `property`.
    ///
    /// The property's current value becomes the rest value.
    pub fn build<P: ControlledProperty<N>>(
        self,
        property: P,
    ) -> AudioController<LinearController<P, N>> {
        AudioController::new(
            self.selector,
            LinearController::new(property, self.channels, self.interpolation),
        )
    }
}

/// Continuous dispatcher for one property
#[derive(Debug, Clone)]
pub struct LinearController<P, const N: usize> {
    property: P,
    channels: Channels<N>,
    interpolation: Interpolation,
    state: SmoothingState<N>,
}

impl<P: ControlledProperty<N>, const N: usize> LinearController<P, N> {
    /// Capture the property's rest value and start idle at it
    pub fn new(property: P, channels: Channels<N>, interpolation: Interpolation) -> Self {
        let state = SmoothingState::capture(property.read());
        Self {
            property,
            channels,
            interpolation,
            state,
        }
    }

    /// Recompute targets for enabled dimensions.
    ///
    /// Disabled dimensions keep their last target. In instantaneous mode the
    /// enabled dimensions are written to the property immediately and the
    /// disabled ones are left as they are.
    pub fn on_value(&mut self, value: f32) {
        let original = self.state.original();
        for (d, channel) in self.channels.iter().enumerate() {
            if channel.enabled {
                self.state.target[d] = P::MODE.target(original[d], value, channel.multiplier);
            }
        }

        if self.interpolation == Interpolation::Instantaneous {
            let mut live = self.property.read();
            for (d, channel) in self.channels.iter().enumerate() {
                if channel.enabled {
                    live[d] = self.state.target[d];
                }
            }
            self.property.write(live);
            self.state.current = live;
        }
    }

    /// Advance toward the target and write the result; no-op when instantaneous
    pub fn tick(&mut self, dt: f32) {
        if let Interpolation::Smoothed { change_speed } = self.interpolation {
            let current = self.state.step(dt, change_speed);
            self.property.write(current);
        }
    }

    /// Write the rest value back and settle there
    pub fn reset(&mut self) {
        self.state.reset();
        self.property.write(self.state.original());
    }

    /// Take the property's present value as the new rest value
    pub fn recapture(&mut self) {
        self.state.recapture(self.property.read());
    }

    /// Rest value captured at activation
    pub fn original(&self) -> [f32; N] {
        self.state.original()
    }

    /// Current target
    pub fn target(&self) -> [f32; N] {
        self.state.target
    }

    /// Value last written by a tick (or by an instantaneous update)
    pub fn current(&self) -> [f32; N] {
        self.state.current
    }

    /// Interpolation strategy
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Switch strategy; smoothing resumes from the property's live value
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
        self.state.current = self.property.read();
    }

    /// Per-dimension channels
    pub fn channels(&self) -> &Channels<N> {
        &self.channels
    }

    /// Per-dimension channels, mutably
    pub fn channels_mut(&mut self) -> &mut Channels<N> {
        &mut self.channels
    }

    /// The controlled property
    pub fn property(&self) -> &P {
        &self.property
    }

    /// The controlled property, mutably
    pub fn property_mut(&mut self) -> &mut P {
        &mut self.property
    }
}

impl<P: ControlledProperty<N>, const N: usize> Reaction for LinearController<P, N> {
    fn react(&mut self, value: f32) {
        self.on_value(value);
    }

    fn tick(&mut self, dt: f32) {
        LinearController::tick(self, dt);
    }
}
