//! Audio controllers: band selection plus a pluggable reaction.
//!
//! An [`AudioController`] turns each spectrum frame into one normalized value
//! and hands it to its [`Reaction`]. [`AttachedController`] owns the
//! subscription to a [`SpectrumSource`] and the setup-time fault policy: a
//! controller that cannot be set up is reported once and left inert.

use crate::band::{BandSelector, FrequencySelection, ScalarRange};
use crate::spectrum::{SpectrumFrame, SpectrumSource, SubscriptionId};
use crate::{CoreError, Result};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use tracing::{debug, error, trace, warn};

/// What a controller does with each normalized value
pub trait Reaction {
    /// Called once per spectrum frame with the normalized value
    fn react(&mut self, value: f32);

    /// Called once per render tick
    fn tick(&mut self, _dt: f32) {}
}

impl<F: FnMut(f32)> Reaction for F {
    fn react(&mut self, value: f32) {
        self(value)
    }
}

/// Band selector driving a reaction
#[derive(Debug, Clone)]
pub struct AudioController<R> {
    selector: BandSelector,
    reaction: R,
    last_value: Option<f32>,
}

impl<R: Reaction> AudioController<R> {
    /// Create a controller
    pub fn new(selector: BandSelector, reaction: R) -> Self {
        Self {
            selector,
            reaction,
            last_value: None,
        }
    }

    /// Check the selection against a source's band count
    pub fn validate(&self, band_count: usize) -> Result<()> {
        self.selector.selection.validate(band_count)
    }

    /// Spectrum notification entry point.
    ///
    /// Returns the normalized value passed to the reaction, or `None` when the
    /// frame could not be read for the current selection.
    pub fn on_spectrum(&mut self, frame: &SpectrumFrame<'_>) -> Option<f32> {
        let Some(value) = self.selector.compute(frame) else {
            warn!(
                "Skipping spectrum frame: {:?} not readable from {} bands",
                self.selector.selection,
                frame.len()
            );
            return None;
        };
        trace!("Normalized spectrum value {}", value);
        self.reaction.react(value);
        self.last_value = Some(value);
        Some(value)
    }

    /// Render tick entry point
    pub fn tick(&mut self, dt: f32) {
        self.reaction.tick(dt);
    }

    /// Most recent normalized value
    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }

    /// Current band selector
    pub fn selector(&self) -> &BandSelector {
        &self.selector
    }

    /// Change the selection without validation
    pub fn set_selection(&mut self, selection: FrequencySelection) {
        self.selector.selection = selection;
    }

    /// Change the gain
    pub fn set_gain(&mut self, gain: f32) {
        self.selector.gain = gain;
    }

    /// Change the clamp range
    pub fn set_range(&mut self, range: ScalarRange) {
        self.selector.range = range;
    }

    /// The reaction
    pub fn reaction(&self) -> &R {
        &self.reaction
    }

    /// The reaction, mutably
    pub fn reaction_mut(&mut self) -> &mut R {
        &mut self.reaction
    }
}

/// Lifecycle state of an [`AttachedController`]
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerStatus {
    /// Subscribed and reacting
    Active {
        /// Subscription on the source
        subscription: SubscriptionId,
        /// Band count of the source at attach time
        band_count: usize,
    },
    /// Setup failed; frames and ticks are ignored
    Inert(CoreError),
    /// Detached from its source
    Detached,
}

/// A controller subscribed to a spectrum source.
///
/// The source holds only a weak reference. Dropping this without calling
/// [`detach`](Self::detach) makes the handler report itself dead, and the
/// source removes it on its next frame.
#[derive(Debug)]
pub struct AttachedController<R> {
    inner: Rc<RefCell<AudioController<R>>>,
    status: ControllerStatus,
}

impl<R: Reaction + 'static> AttachedController<R> {
    /// Validate and subscribe, failing on any configuration fault
    pub fn try_attach(
        controller: AudioController<R>,
        source: Option<&mut dyn SpectrumSource>,
    ) -> Result<Self> {
        let source = source.ok_or(CoreError::MissingSpectrumSource)?;
        let band_count = source.band_count();
        controller.validate(band_count)?;
        Ok(Self::subscribe(controller, source, band_count))
    }

    /// Like [`try_attach`](Self::try_attach), but a fault is logged once and
    /// yields an inert controller instead of an error.
    pub fn attach(
        controller: AudioController<R>,
        source: Option<&mut dyn SpectrumSource>,
    ) -> Self {
        let Some(source) = source else {
            return Self::inert(controller, CoreError::MissingSpectrumSource);
        };
        let band_count = source.band_count();
        match controller.validate(band_count) {
            Ok(()) => Self::subscribe(controller, source, band_count),
            Err(err) => Self::inert(controller, err),
        }
    }

    fn subscribe(
        controller: AudioController<R>,
        source: &mut dyn SpectrumSource,
        band_count: usize,
    ) -> Self {
        let inner = Rc::new(RefCell::new(controller));
        let weak = Rc::downgrade(&inner);
        let subscription = source.subscribe(Box::new(move |frame: &SpectrumFrame<'_>| {
            let Some(controller) = weak.upgrade() else {
                return false;
            };
            if frame.len() != band_count {
                warn!(
                    "Skipping spectrum frame of {} bands, expected {}",
                    frame.len(),
                    band_count
                );
                return true;
            }
            let borrowed = controller.try_borrow_mut();
            match borrowed {
                Ok(mut controller) => {
                    controller.on_spectrum(frame);
                }
                Err(_) => warn!("Re-entrant spectrum notification skipped"),
            };
            true
        }));
        debug!(
            "Controller attached as subscriber {} ({} bands)",
            subscription, band_count
        );

        Self {
            inner,
            status: ControllerStatus::Active {
                subscription,
                band_count,
            },
        }
    }

    fn inert(controller: AudioController<R>, err: CoreError) -> Self {
        error!("Audio controller disabled: {}", err);
        Self {
            inner: Rc::new(RefCell::new(controller)),
            status: ControllerStatus::Inert(err),
        }
    }
}

impl<R: Reaction> AttachedController<R> {
    /// Current lifecycle state
    pub fn status(&self) -> &ControllerStatus {
        &self.status
    }

    /// True while subscribed
    pub fn is_active(&self) -> bool {
        matches!(self.status, ControllerStatus::Active { .. })
    }

    /// Render tick; ignored unless active
    pub fn tick(&self, dt: f32) {
        if !self.is_active() {
            return;
        }
        match self.inner.try_borrow_mut() {
            Ok(mut controller) => controller.tick(dt),
            Err(_) => warn!("Tick skipped: controller already borrowed"),
        }
    }

    /// Unsubscribe from the source. Returns `false` if not active.
    pub fn detach(&mut self, source: &mut dyn SpectrumSource) -> bool {
        let ControllerStatus::Active { subscription, .. } = self.status else {
            return false;
        };
        source.unsubscribe(subscription);
        self.status = ControllerStatus::Detached;
        debug!("Controller subscriber {} detached", subscription);
        true
    }

    /// Change the selection, rejecting bands the source does not have.
    ///
    /// On error the previous selection is kept.
    pub fn set_selection(&self, selection: FrequencySelection) -> Result<()> {
        if let ControllerStatus::Active { band_count, .. } = self.status {
            selection.validate(band_count)?;
        }
        self.controller_mut().set_selection(selection);
        Ok(())
    }

    /// Borrow the controller
    pub fn controller(&self) -> Ref<'_, AudioController<R>> {
        self.inner.borrow()
    }

    /// Borrow the controller mutably.
    ///
    /// Must not be held across a spectrum notification or tick.
    pub fn controller_mut(&self) -> RefMut<'_, AudioController<R>> {
        self.inner.borrow_mut()
    }
}
