use std::cell::Cell;

use crate::event::{Containment, PointerMap, same_element};
use crate::listener::Propagation;
use crate::{ElementId, Gesture, Listeners, PointerEvent, PointerId, Unsubscribe};

/// A completed tap.
#[derive(Debug)]
pub struct TapEvent {
    pub pointer_id: PointerId,
    pub target: Option<ElementId>,
    pub x: f64,
    pub y: f64,
    propagation_stopped: Cell<bool>,
}

impl TapEvent {
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

impl Propagation for TapEvent {
    fn target(&self) -> Option<ElementId> {
        self.target
    }

    fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    fn reset_propagation(&self) {
        self.propagation_stopped.set(false);
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    x: f64,
    y: f64,
}

/// Recognizes taps: a press released less than the threshold away from where it went down.
///
/// A candidate is dropped as soon as the pointer strays past the threshold, so a press is
/// recognized as a pan or a tap, never both. A release exactly at the threshold is neither.
pub struct TapGesture {
    threshold: f64,
    contains: Containment,
    candidates: PointerMap<Candidate>,
    listeners: Listeners<TapEvent>,
}

impl TapGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            contains: same_element(),
            candidates: PointerMap::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn set_containment(&mut self, contains: Containment) {
        self.contains = contains;
    }

    pub fn on_tap(
        &mut self,
        target: Option<ElementId>,
        callback: impl Fn(&TapEvent) + 'static,
    ) -> Unsubscribe {
        self.listeners.subscribe(target, callback)
    }

    pub fn is_candidate(&self, pointer_id: PointerId) -> bool {
        self.candidates.contains_key(&pointer_id)
    }

    /// Forgets every pending candidate.
    pub fn dispose(&mut self) {
        self.candidates.clear();
    }

    fn distance(candidate: Candidate, e: &PointerEvent) -> f64 {
        (e.x - candidate.x).hypot(e.y - candidate.y)
    }
}

impl Gesture for TapGesture {
    fn down(&mut self, e: &PointerEvent) {
        self.candidates
            .insert(e.pointer_id, Candidate { x: e.x, y: e.y });
    }

    fn moved(&mut self, e: &PointerEvent) {
        let Some(candidate) = self.candidates.get(&e.pointer_id).copied() else {
            return;
        };
        if Self::distance(candidate, e) > self.threshold {
            gtrace!(pointer = e.pointer_id.0, "tap candidate dropped");
            self.candidates.remove(&e.pointer_id);
        }
    }

    fn up(&mut self, e: &PointerEvent) {
        let Some(candidate) = self.candidates.remove(&e.pointer_id) else {
            return;
        };
        if Self::distance(candidate, e) >= self.threshold {
            return;
        }
        let tap = TapEvent {
            pointer_id: e.pointer_id,
            target: e.target,
            x: e.x,
            y: e.y,
            propagation_stopped: Cell::new(false),
        };
        gtrace!(pointer = e.pointer_id.0, "tap");
        self.listeners.notify(&tap, &self.contains);
    }

    fn leave(&mut self, e: &PointerEvent) {
        self.cancel(e.pointer_id);
    }

    fn cancel(&mut self, pointer_id: PointerId) {
        self.candidates.remove(&pointer_id);
    }

    fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}
