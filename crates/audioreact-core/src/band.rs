//! Band selection and normalization
//!
//! Turns one spectrum frame into the bounded scalar every controller reacts to:
//! pick a band (or average all of them), apply gain, clamp into a range.

use crate::spectrum::SpectrumFrame;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Which part of the spectrum a controller listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencySelection {
    /// A single band by index
    Band(usize),
    /// Arithmetic mean of every band in the frame
    FullSpectrumAverage,
}

impl Default for FrequencySelection {
    fn default() -> Self {
        Self::Band(0)
    }
}

impl FrequencySelection {
    /// Check the selection against a source's band count
    pub fn validate(&self, band_count: usize) -> Result<()> {
        if band_count == 0 {
            return Err(CoreError::EmptySpectrum);
        }
        match *self {
            Self::Band(band) if band >= band_count => {
                Err(CoreError::BandOutOfRange { band, band_count })
            }
            _ => Ok(()),
        }
    }
}

/// Clamp bounds for the post-gain value.
///
/// `minimum <= maximum` is not enforced; with inverted bounds the result is
/// always `minimum`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarRange {
    /// Lower bound (inclusive)
    pub minimum: f32,
    /// Upper bound (inclusive)
    pub maximum: f32,
}

impl Default for ScalarRange {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 1.0,
        }
    }
}

impl ScalarRange {
    /// Create a range
    pub fn new(minimum: f32, maximum: f32) -> Self {
        Self { minimum, maximum }
    }

    /// `max(minimum, min(maximum, value))`
    ///
    /// Accepts `minimum > maximum` (the result is `minimum`); a NaN input
    /// lands on the bounds.
    pub fn clamp(&self, value: f32) -> f32 {
        value.min(self.maximum).max(self.minimum)
    }
}

/// Selection, gain and range of a controller, configured together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandSelector {
    /// Band (or full average) to read
    pub selection: FrequencySelection,
    /// Multiplier applied before clamping
    pub gain: f32,
    /// Clamp bounds
    pub range: ScalarRange,
}

impl Default for BandSelector {
    fn default() -> Self {
        Self {
            selection: FrequencySelection::default(),
            gain: 1.0,
            range: ScalarRange::default(),
        }
    }
}

impl BandSelector {
    /// Selector for a single band with unit gain and the [0, 1] range
    pub fn band(index: usize) -> Self {
        Self {
            selection: FrequencySelection::Band(index),
            ..Self::default()
        }
    }

    /// Selector averaging the full spectrum with unit gain and the [0, 1] range
    pub fn full_average() -> Self {
        Self {
            selection: FrequencySelection::FullSpectrumAverage,
            ..Self::default()
        }
    }

    /// Builder-style gain
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Builder-style range
    pub fn with_range(mut self, minimum: f32, maximum: f32) -> Self {
        self.range = ScalarRange::new(minimum, maximum);
        self
    }

    /// Compute the normalized value for a frame
    pub fn compute(&self, frame: &SpectrumFrame<'_>) -> Option<f32> {
        normalize(frame, self.selection, self.gain, self.range)
    }
}

/// Select, scale and clamp one frame.
///
/// Returns `None` when the frame cannot satisfy the selection (band index past
/// the end, or an empty frame for the full average); callers skip that frame.
pub fn normalize(
    frame: &SpectrumFrame<'_>,
    selection: FrequencySelection,
    gain: f32,
    range: ScalarRange,
) -> Option<f32> {
    let raw = match selection {
        FrequencySelection::Band(index) => frame.band(index)?,
        FrequencySelection::FullSpectrumAverage => frame.mean()?,
    };
    Some(range.clamp(raw * gain))
}
