//! Host-side attributes the appliers write into.
//!
//! The scene graph belongs to the host. These traits are the narrow surface the
//! controllers need; the plain structs below implement them for hosts without
//! their own scene types, and for tests.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Object with a position, rotation and scale
pub trait SceneTransform {
    /// World position
    fn translation(&self) -> Vec3;
    /// Set world position
    fn set_translation(&mut self, translation: Vec3);
    /// Rotation quaternion
    fn rotation(&self) -> Quat;
    /// Set rotation quaternion (not renormalized)
    fn set_rotation(&mut self, rotation: Quat);
    /// Local scale
    fn scale(&self) -> Vec3;
    /// Set local scale
    fn set_scale(&mut self, scale: Vec3);
}

/// Light with a scalar intensity
pub trait LightSource {
    /// Current intensity
    fn intensity(&self) -> f32;
    /// Set intensity
    fn set_intensity(&mut self, intensity: f32);
}

/// Particle emitter parameters
pub trait ParticleEmitter {
    /// Lifetime given to newly spawned particles (seconds)
    fn start_lifetime(&self) -> f32;
    /// Set start lifetime
    fn set_start_lifetime(&mut self, value: f32);
    /// Initial speed of newly spawned particles
    fn start_speed(&self) -> f32;
    /// Set start speed
    fn set_start_speed(&mut self, value: f32);
    /// Particles emitted per second
    fn rate_over_time(&self) -> f32;
    /// Set emission rate
    fn set_rate_over_time(&mut self, value: f32);
}

/// Animation state machine accepting named triggers
pub trait Animator {
    /// Fire a named trigger
    fn set_trigger(&mut self, name: &str);
}

/// Plain transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub translation: Vec3,
    /// Rotation
    pub rotation: Quat,
    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform at a position
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::default()
        }
    }
}

impl SceneTransform for Transform {
    fn translation(&self) -> Vec3 {
        self.translation
    }
    fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }
    fn rotation(&self) -> Quat {
        self.rotation
    }
    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
    fn scale(&self) -> Vec3 {
        self.scale
    }
    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}

/// Plain light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Intensity
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self { intensity: 1.0 }
    }
}

impl LightSource for Light {
    fn intensity(&self) -> f32 {
        self.intensity
    }
    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }
}

/// Plain emitter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterSettings {
    /// Start lifetime (seconds)
    pub lifetime: f32,
    /// Start speed
    pub speed: f32,
    /// Emission rate (particles per second)
    pub rate: f32,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            lifetime: 5.0,
            speed: 5.0,
            rate: 10.0,
        }
    }
}

impl ParticleEmitter for EmitterSettings {
    fn start_lifetime(&self) -> f32 {
        self.lifetime
    }
    fn set_start_lifetime(&mut self, value: f32) {
        self.lifetime = value;
    }
    fn start_speed(&self) -> f32 {
        self.speed
    }
    fn set_start_speed(&mut self, value: f32) {
        self.speed = value;
    }
    fn rate_over_time(&self) -> f32 {
        self.rate
    }
    fn set_rate_over_time(&mut self, value: f32) {
        self.rate = value;
    }
}

/// Animator that records every trigger it receives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimatorLog {
    /// Trigger names in firing order
    pub fired: Vec<String>,
}

impl Animator for AnimatorLog {
    fn set_trigger(&mut self, name: &str) {
        self.fired.push(name.to_string());
    }
}

// Shared handles: the host keeps one clone, the applier the other.

impl<T: SceneTransform> SceneTransform for Rc<RefCell<T>> {
    fn translation(&self) -> Vec3 {
        self.borrow().translation()
    }
    fn set_translation(&mut self, translation: Vec3) {
        self.borrow_mut().set_translation(translation);
    }
    fn rotation(&self) -> Quat {
        self.borrow().rotation()
    }
    fn set_rotation(&mut self, rotation: Quat) {
        self.borrow_mut().set_rotation(rotation);
    }
    fn scale(&self) -> Vec3 {
        self.borrow().scale()
    }
    fn set_scale(&mut self, scale: Vec3) {
        self.borrow_mut().set_scale(scale);
    }
}

impl<T: LightSource> LightSource for Rc<RefCell<T>> {
    fn intensity(&self) -> f32 {
        self.borrow().intensity()
    }
    fn set_intensity(&mut self, intensity: f32) {
        self.borrow_mut().set_intensity(intensity);
    }
}

impl<T: ParticleEmitter> ParticleEmitter for Rc<RefCell<T>> {
    fn start_lifetime(&self) -> f32 {
        self.borrow().start_lifetime()
    }
    fn set_start_lifetime(&mut self, value: f32) {
        self.borrow_mut().set_start_lifetime(value);
    }
    fn start_speed(&self) -> f32 {
        self.borrow().start_speed()
    }
    fn set_start_speed(&mut self, value: f32) {
        self.borrow_mut().set_start_speed(value);
    }
    fn rate_over_time(&self) -> f32 {
        self.borrow().rate_over_time()
    }
    fn set_rate_over_time(&mut self, value: f32) {
        self.borrow_mut().set_rate_over_time(value);
    }
}

impl<T: Animator> Animator for Rc<RefCell<T>> {
    fn set_trigger(&mut self, name: &str) {
        self.borrow_mut().set_trigger(name);
    }
}
