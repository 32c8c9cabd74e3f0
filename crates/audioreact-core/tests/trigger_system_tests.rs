use audioreact_core::{
    AnimationTrigger, AnimatorLog, AttachedController, BandSelector, ControllerStatus, CoreError,
    SpectrumBus, TriggerConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

fn trigger_config(band: usize, threshold: f32) -> TriggerConfig {
    TriggerConfig {
        selector: BandSelector::band(band),
        threshold,
        show_value: false,
    }
}

#[test]
fn test_animation_fires_on_sustained_high_values() {
    let mut bus = SpectrumBus::new(4);
    let animator = Rc::new(RefCell::new(AnimatorLog::default()));
    let attached = AttachedController::attach(
        trigger_config(1, 0.5).build(AnimationTrigger::new(Rc::clone(&animator), "Pulse")),
        Some(&mut bus),
    );
    assert!(attached.is_active());

    for value in [0.2, 0.6, 0.6, 0.1] {
        bus.publish(&[0.0, value, 0.0, 0.0]).unwrap();
    }

    assert_eq!(animator.borrow().fired, vec!["Pulse", "Pulse"]);
}

#[test]
fn test_closure_target_receives_value() {
    let mut bus = SpectrumBus::new(2);
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    let _attached = AttachedController::attach(
        TriggerConfig {
            selector: BandSelector::full_average().with_gain(2.0),
            threshold: 0.5,
            show_value: true,
        }
        .build(move |v: f32| sink.borrow_mut().push(v)),
        Some(&mut bus),
    );

    bus.publish(&[0.1, 0.1]).unwrap();
    bus.publish(&[0.3, 0.5]).unwrap();

    assert_eq!(fired.borrow().len(), 1);
    assert!((fired.borrow()[0] - 0.8).abs() < 1e-6);
}

#[test]
fn test_missing_source_is_inert() {
    let animator = Rc::new(RefCell::new(AnimatorLog::default()));
    let attached = AttachedController::attach(
        trigger_config(0, 0.0).build(AnimationTrigger::new(Rc::clone(&animator), "Pulse")),
        None,
    );

    assert_eq!(
        attached.status(),
        &ControllerStatus::Inert(CoreError::MissingSpectrumSource)
    );
    attached.tick(0.016);
    assert!(animator.borrow().fired.is_empty());
}

#[test]
fn test_threshold_change_at_runtime() {
    let mut bus = SpectrumBus::new(1);
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let attached = AttachedController::attach(
        trigger_config(0, 1.0).build(move |_: f32| *counter.borrow_mut() += 1),
        Some(&mut bus),
    );

    bus.publish(&[0.7]).unwrap();
    assert_eq!(*count.borrow(), 0);

    attached.controller_mut().reaction_mut().set_threshold(0.7);
    bus.publish(&[0.7]).unwrap();
    assert_eq!(*count.borrow(), 1);
}
