//! Property appliers: where a controller's scalar ends up.
//!
//! Every continuous applier is a [`ControlledProperty`] with `N` dimensions and
//! a [`TargetMode`]. The trigger applier ([`AnimationTrigger`]) is a
//! [`TriggerTarget`].

use crate::scene::{Animator, LightSource, ParticleEmitter, SceneTransform};
use crate::trigger::TriggerTarget;
use glam::{Quat, Vec3};

/// How a target is derived from the normalized value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// `original + value * multiplier`
    Offset,
    /// `value * multiplier`; the rest value is never read
    Absolute,
}

impl TargetMode {
    /// Target for one dimension
    pub fn target(self, original: f32, value: f32, multiplier: f32) -> f32 {
        match self {
            TargetMode::Offset => original + value * multiplier,
            TargetMode::Absolute => value * multiplier,
        }
    }
}

/// A host attribute with `N` controllable dimensions
pub trait ControlledProperty<const N: usize> {
    /// Target derivation for this property
    const MODE: TargetMode = TargetMode::Offset;

    /// Read the live value
    fn read(&self) -> [f32; N];

    /// Write a new value
    fn write(&mut self, value: [f32; N]);
}

/// Position, three axes offset from the rest position
#[derive(Debug, Clone)]
pub struct Position<T>(pub T);

impl<T: SceneTransform> ControlledProperty<3> for Position<T> {
    fn read(&self) -> [f32; 3] {
        self.0.translation().to_array()
    }

    fn write(&mut self, value: [f32; 3]) {
        self.0.set_translation(Vec3::from_array(value));
    }
}

/// Rotation, nudging the quaternion's x/y/z components additively.
///
/// `w` is left alone and the quaternion is never renormalized, so large or
/// sustained values drift away from a unit rotation.
#[derive(Debug, Clone)]
pub struct Rotation<T>(pub T);

impl<T: SceneTransform> ControlledProperty<3> for Rotation<T> {
    fn read(&self) -> [f32; 3] {
        let q = self.0.rotation();
        [q.x, q.y, q.z]
    }

    fn write(&mut self, value: [f32; 3]) {
        let w = self.0.rotation().w;
        self.0.set_rotation(Quat::from_xyzw(value[0], value[1], value[2], w));
    }
}

/// Scale, three axes set directly from the value
#[derive(Debug, Clone)]
pub struct Scale<T>(pub T);

impl<T: SceneTransform> ControlledProperty<3> for Scale<T> {
    const MODE: TargetMode = TargetMode::Absolute;

    fn read(&self) -> [f32; 3] {
        self.0.scale().to_array()
    }

    fn write(&mut self, value: [f32; 3]) {
        self.0.set_scale(Vec3::from_array(value));
    }
}

/// Light intensity offset from the rest intensity
#[derive(Debug, Clone)]
pub struct LightIntensity<L>(pub L);

impl<L: LightSource> ControlledProperty<1> for LightIntensity<L> {
    fn read(&self) -> [f32; 1] {
        [self.0.intensity()]
    }

    fn write(&mut self, value: [f32; 1]) {
        self.0.set_intensity(value[0]);
    }
}

/// Particle start lifetime, start speed and emission rate, in that order
#[derive(Debug, Clone)]
pub struct ParticleRates<E>(pub E);

impl<E> ParticleRates<E> {
    /// Dimension index of the start lifetime
    pub const START_LIFETIME: usize = 0;
    /// Dimension index of the start speed
    pub const START_SPEED: usize = 1;
    /// Dimension index of the emission rate
    pub const RATE_OVER_TIME: usize = 2;
}

impl<E: ParticleEmitter> ControlledProperty<3> for ParticleRates<E> {
    fn read(&self) -> [f32; 3] {
        [
            self.0.start_lifetime(),
            self.0.start_speed(),
            self.0.rate_over_time(),
        ]
    }

    fn write(&mut self, value: [f32; 3]) {
        self.0.set_start_lifetime(value[0]);
        self.0.set_start_speed(value[1]);
        self.0.set_rate_over_time(value[2]);
    }
}

/// Fires a named animation trigger, ignoring the value
#[derive(Debug, Clone)]
pub struct AnimationTrigger<A> {
    /// Animator receiving the trigger
    pub animator: A,
    /// Trigger name passed to [`Animator::set_trigger`]
    pub trigger_name: String,
}

impl<A: Animator> AnimationTrigger<A> {
    /// Create a trigger applier
    pub fn new(animator: A, trigger_name: impl Into<String>) -> Self {
        Self {
            animator,
            trigger_name: trigger_name.into(),
        }
    }
}

impl<A: Animator> TriggerTarget for AnimationTrigger<A> {
    fn fire(&mut self, _value: f32) {
        self.animator.set_trigger(&self.trigger_name);
    }
}
