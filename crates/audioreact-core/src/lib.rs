//! AudioReact Core - Spectrum-Driven Scene Controllers
//!
//! This crate turns a live audio spectrum into scene parameter changes:
//! - Band selection and normalization of spectrum frames
//! - Continuous dispatch with smoothed or instantaneous writes
//! - Discrete, threshold-triggered dispatch
//! - Property appliers for position, rotation, scale, light and particles
//! - Subscription lifecycle against a spectrum source

#![warn(missing_docs)]

pub use glam::{Quat, Vec3};
use thiserror::Error;

pub mod band;
pub mod channel;
pub mod controller;
pub mod diagnostics;
pub mod linear;
pub mod logging;
pub mod properties;
pub mod scene;
pub mod smoothing;
pub mod spectrum;
pub mod trigger;

// --- Re-exports grouped by category ---

// Spectrum input
pub use spectrum::{SpectrumBus, SpectrumFrame, SpectrumHandler, SpectrumSource, SubscriptionId};

// Normalization
pub use band::{normalize, BandSelector, FrequencySelection, ScalarRange};

// Controllers
pub use channel::{Channel, Channels};
pub use controller::{AttachedController, AudioController, ControllerStatus, Reaction};
pub use linear::{LinearConfig, LinearController};
pub use smoothing::{approach, Interpolation, SmoothingState};
pub use trigger::{TriggerConfig, TriggerController, TriggerTarget};

// Appliers & scene
pub use properties::{
    AnimationTrigger, ControlledProperty, LightIntensity, ParticleRates, Position, Rotation,
    Scale, TargetMode,
};
pub use scene::{
    Animator, AnimatorLog, EmitterSettings, Light, LightSource, ParticleEmitter, SceneTransform,
    Transform,
};

// Logging & Diagnostics
pub use diagnostics::{check_controller_config, check_linear_config, ConfigIssue, IssueSeverity};
pub use logging::{init_logging, LogConfig};

/// Core error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Selected band does not exist on the spectrum source
    #[error("Frequency band {band} is out of range (source has {band_count} bands)")]
    BandOutOfRange {
        /// Requested band index
        band: usize,
        /// Bands available on the source
        band_count: usize,
    },

    /// No spectrum source was provided at setup
    #[error("No spectrum source provided")]
    MissingSpectrumSource,

    /// A published frame does not match the source's band count
    #[error("Spectrum frame has {actual} bands, expected {expected}")]
    FrameLengthMismatch {
        /// Source band count
        expected: usize,
        /// Length of the rejected frame
        actual: usize,
    },

    /// The spectrum source has no bands at all
    #[error("Spectrum source has no bands")]
    EmptySpectrum,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::BandOutOfRange {
            band: 9,
            band_count: 8,
        };
        assert_eq!(
            err.to_string(),
            "Frequency band 9 is out of range (source has 8 bands)"
        );
        assert_eq!(
            CoreError::FrameLengthMismatch {
                expected: 8,
                actual: 4
            }
            .to_string(),
            "Spectrum frame has 4 bands, expected 8"
        );
    }
}
