use audioreact_core::{
    AttachedController, BandSelector, Channels, EmitterSettings, Interpolation, Light,
    LightIntensity, LinearConfig, ParticleRates, Position, Rotation, Scale, SpectrumBus,
    Transform, Vec3,
};
use std::cell::RefCell;
use std::rc::Rc;

const BANDS: usize = 8;

fn frame_with(band: usize, value: f32) -> [f32; BANDS] {
    let mut frame = [0.0; BANDS];
    frame[band] = value;
    frame
}

#[test]
fn test_position_follows_band_through_bus() {
    let mut bus = SpectrumBus::new(BANDS);
    let transform = Rc::new(RefCell::new(Transform::default()));

    let config = LinearConfig::<3> {
        selector: BandSelector::band(3).with_gain(2.0),
        interpolation: Interpolation::Smoothed { change_speed: 1.0 },
        ..LinearConfig::default()
    };
    let attached =
        AttachedController::attach(config.build(Position(Rc::clone(&transform))), Some(&mut bus));
    assert!(attached.is_active());

    // 0.5 * 2.0 clamps exactly to the 1.0 upper bound
    bus.publish(&frame_with(3, 0.5)).unwrap();
    assert_eq!(attached.controller().last_value(), Some(1.0));
    assert_eq!(attached.controller().reaction().target(), [1.0, 1.0, 1.0]);

    // The spectrum clock never writes the property; only ticks do
    assert_eq!(transform.borrow().translation, Vec3::ZERO);

    attached.tick(0.5);
    assert!((transform.borrow().translation.x - 0.5).abs() < 1e-6);

    attached.tick(1.0);
    assert_eq!(transform.borrow().translation, Vec3::ONE);
}

#[test]
fn test_full_average_drives_instantaneous_light() {
    let mut bus = SpectrumBus::new(BANDS);
    let light = Rc::new(RefCell::new(Light { intensity: 1.0 }));

    let config = LinearConfig::<1> {
        selector: BandSelector::full_average(),
        channels: Channels::from_multipliers([10.0]),
        interpolation: Interpolation::Instantaneous,
    };
    let attached = AttachedController::attach(
        config.build(LightIntensity(Rc::clone(&light))),
        Some(&mut bus),
    );

    bus.publish(&frame_with(7, 0.8)).unwrap();
    // mean = 0.1 -> 1.0 + 0.1 * 10.0
    assert!((light.borrow().intensity - 2.0).abs() < 1e-5);
    drop(attached);
}

#[test]
fn test_many_controllers_share_one_source() {
    let mut bus = SpectrumBus::new(BANDS);
    let transform = Rc::new(RefCell::new(Transform::default()));
    let emitter = Rc::new(RefCell::new(EmitterSettings {
        lifetime: 1.0,
        speed: 2.0,
        rate: 3.0,
    }));

    let instant = |selector| LinearConfig::<3> {
        selector,
        interpolation: Interpolation::Instantaneous,
        ..LinearConfig::default()
    };

    let rotation = AttachedController::attach(
        instant(BandSelector::band(0)).build(Rotation(Rc::clone(&transform))),
        Some(&mut bus),
    );
    let scale = AttachedController::attach(
        instant(BandSelector::band(1)).build(Scale(Rc::clone(&transform))),
        Some(&mut bus),
    );
    let particles = AttachedController::attach(
        instant(BandSelector::band(2)).build(ParticleRates(Rc::clone(&emitter))),
        Some(&mut bus),
    );
    assert_eq!(bus.subscriber_count(), 3);

    bus.publish(&[0.1, 0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();

    let t = transform.borrow();
    assert!((t.rotation.x - 0.1).abs() < 1e-6);
    assert_eq!(t.rotation.w, 1.0);
    assert_eq!(t.scale, Vec3::splat(0.5));
    drop(t);

    assert_eq!(
        *emitter.borrow(),
        EmitterSettings {
            lifetime: 2.0,
            speed: 3.0,
            rate: 4.0,
        }
    );

    assert!(rotation.is_active() && scale.is_active() && particles.is_active());
}

#[test]
fn test_rotation_drift_accumulates_without_renormalizing() {
    let mut bus = SpectrumBus::new(1);
    let transform = Rc::new(RefCell::new(Transform::default()));
    let mut attached = AttachedController::attach(
        LinearConfig::<3> {
            selector: BandSelector::band(0).with_range(0.0, 10.0),
            interpolation: Interpolation::Instantaneous,
            ..LinearConfig::default()
        }
        .build(Rotation(Rc::clone(&transform))),
        Some(&mut bus),
    );

    bus.publish(&[2.0]).unwrap();
    let q = transform.borrow().rotation;
    assert_eq!([q.x, q.y, q.z, q.w], [2.0, 2.0, 2.0, 1.0]);
    assert!(!q.is_normalized());

    assert!(attached.detach(&mut bus));
}

#[test]
fn test_wrong_length_frame_reaches_nobody() {
    let mut bus = SpectrumBus::new(BANDS);
    let light = Rc::new(RefCell::new(Light { intensity: 0.0 }));
    let attached = AttachedController::attach(
        LinearConfig::<1> {
            interpolation: Interpolation::Instantaneous,
            ..LinearConfig::default()
        }
        .build(LightIntensity(Rc::clone(&light))),
        Some(&mut bus),
    );

    assert!(bus.publish(&[1.0; 3]).is_err());
    assert_eq!(light.borrow().intensity, 0.0);
    assert_eq!(attached.controller().last_value(), None);
}

#[test]
fn test_smoothed_rotation_and_scale_converge_on_ticks() {
    let mut bus = SpectrumBus::new(BANDS);
    let transform = Rc::new(RefCell::new(Transform::default()));

    let smoothed = |selector| LinearConfig::<3> {
        selector,
        interpolation: Interpolation::Smoothed { change_speed: 2.0 },
        ..LinearConfig::default()
    };
    let rotation = AttachedController::attach(
        smoothed(BandSelector::band(0)).build(Rotation(Rc::clone(&transform))),
        Some(&mut bus),
    );
    let scale = AttachedController::attach(
        smoothed(BandSelector::band(1)).build(Scale(Rc::clone(&transform))),
        Some(&mut bus),
    );

    bus.publish(&[0.4, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    // Nothing moves before the first tick
    assert_eq!(transform.borrow().rotation.x, 0.0);
    assert_eq!(transform.borrow().scale, Vec3::ONE);

    rotation.tick(0.25);
    scale.tick(0.25);
    {
        let t = transform.borrow();
        assert!((t.rotation.x - 0.2).abs() < 1e-6);
        assert_eq!(t.rotation.w, 1.0);
        // Halfway from the live scale of 1.0 to the absolute target of 0.5
        assert!((t.scale.x - 0.75).abs() < 1e-6);
    }

    rotation.tick(1.0);
    scale.tick(1.0);
    let t = transform.borrow();
    assert_eq!([t.rotation.x, t.rotation.y, t.rotation.z], [0.4, 0.4, 0.4]);
    assert_eq!(t.scale, Vec3::splat(0.5));
}
