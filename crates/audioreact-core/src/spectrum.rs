//! Spectrum frames and the sources that publish them.
//!
//! A [`SpectrumSource`] produces one fixed-length frame of band magnitudes per
//! analysis step and hands it synchronously to every subscriber. The FFT side
//! lives outside this crate; [`SpectrumBus`] is the in-process fan-out a host
//! feeds with whatever its analyzer produced.

use crate::{CoreError, Result};
use tracing::{debug, trace};

/// Identifier returned by [`SpectrumSource::subscribe`].
pub type SubscriptionId = u64;

/// Callback invoked once per published frame.
///
/// Returns `false` once its subscriber is gone; the source then drops it.
pub type SpectrumHandler = Box<dyn FnMut(&SpectrumFrame<'_>) -> bool>;

/// One snapshot of per-band magnitudes, borrowed for the duration of a
/// notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumFrame<'a> {
    magnitudes: &'a [f32],
}

impl<'a> SpectrumFrame<'a> {
    /// Wrap a slice of band magnitudes
    pub fn new(magnitudes: &'a [f32]) -> Self {
        Self { magnitudes }
    }

    /// Number of bands in this frame
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True if the frame holds no bands
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Magnitude of a single band, `None` when out of range
    pub fn band(&self, index: usize) -> Option<f32> {
        self.magnitudes.get(index).copied()
    }

    /// Arithmetic mean over every band (sum / band count).
    ///
    /// Returns `None` for an empty frame.
    pub fn mean(&self) -> Option<f32> {
        if self.magnitudes.is_empty() {
            return None;
        }
        let sum: f32 = self.magnitudes.iter().sum();
        Some(sum / self.magnitudes.len() as f32)
    }

    /// Raw magnitudes
    pub fn as_slice(&self) -> &'a [f32] {
        self.magnitudes
    }
}

/// Producer of spectrum frames that controllers subscribe to.
pub trait SpectrumSource {
    /// Number of bands in every frame this source publishes
    fn band_count(&self) -> usize;

    /// Register a handler; it is called synchronously for each new frame
    /// until it returns `false` or is unsubscribed.
    fn subscribe(&mut self, handler: SpectrumHandler) -> SubscriptionId;

    /// Remove a handler. Returns `false` if the id was not registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Synchronous, single-threaded spectrum fan-out.
pub struct SpectrumBus {
    band_count: usize,
    subscribers: Vec<(SubscriptionId, SpectrumHandler)>,
    next_id: SubscriptionId,
    frames_published: u64,
}

impl SpectrumBus {
    /// Create a bus publishing frames of `band_count` bands
    pub fn new(band_count: usize) -> Self {
        Self {
            band_count,
            subscribers: Vec::new(),
            next_id: 1,
            frames_published: 0,
        }
    }

    /// Deliver a frame to every subscriber in subscription order.
    ///
    /// Frames whose length differs from the band count are rejected before
    /// anyone is notified. Handlers reporting a dead subscriber are removed.
    /// Returns the number of handlers called.
    pub fn publish(&mut self, magnitudes: &[f32]) -> Result<usize> {
        if magnitudes.len() != self.band_count {
            return Err(CoreError::FrameLengthMismatch {
                expected: self.band_count,
                actual: magnitudes.len(),
            });
        }

        let frame = SpectrumFrame::new(magnitudes);
        let called = self.subscribers.len();
        self.subscribers.retain_mut(|(id, handler)| {
            let alive = handler(&frame);
            if !alive {
                debug!("Spectrum subscriber {} dropped", id);
            }
            alive
        });
        self.frames_published += 1;
        trace!(
            "Published spectrum frame #{} to {} subscribers",
            self.frames_published,
            called
        );
        Ok(called)
    }

    /// Number of registered handlers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of frames successfully published so far
    pub fn frames_published(&self) -> u64 {
        self.frames_published
    }
}

impl SpectrumSource for SpectrumBus {
    fn band_count(&self) -> usize {
        self.band_count
    }

    fn subscribe(&mut self, handler: SpectrumHandler) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, handler));
        debug!("Spectrum subscriber {} added", id);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!("Spectrum subscriber {} removed", id);
        }
        removed
    }
}

impl std::fmt::Debug for SpectrumBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumBus")
            .field("band_count", &self.band_count)
            .field("subscribers", &self.subscribers.len())
            .field("frames_published", &self.frames_published)
            .finish()
    }
}
