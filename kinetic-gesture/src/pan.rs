use std::cell::Cell;

use crate::event::{Containment, PointerMap, same_element};
use crate::listener::Propagation;
use crate::{
    ElementId, Gesture, Listeners, PointerEvent, PointerId, Pool, PoolHandle, Unsubscribe,
};

/// State of one pointer's pan, shared with listeners by reference.
///
/// Instances are pooled and reused across presses; everything is reset on pointer-down.
#[derive(Debug, Default)]
pub struct PanEvent {
    pub pointer_id: PointerId,
    pub target: Option<ElementId>,
    pub x: f64,
    pub y: f64,
    /// Where panning began (the first sample past the threshold).
    pub start_x: f64,
    pub start_y: f64,
    /// Movement since the previous sample.
    pub delta_x: f64,
    pub delta_y: f64,
    panning: bool,
    cancelled: bool,
    propagation_stopped: Cell<bool>,
}

impl PanEvent {
    fn reset(&mut self, e: &PointerEvent) {
        self.pointer_id = e.pointer_id;
        self.target = e.target;
        self.x = e.x;
        self.y = e.y;
        self.start_x = e.x;
        self.start_y = e.y;
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        self.panning = false;
        self.cancelled = false;
        self.propagation_stopped.set(false);
    }

    fn track(&mut self, e: &PointerEvent) {
        self.delta_x = e.x - self.x;
        self.delta_y = e.y - self.y;
        self.x = e.x;
        self.y = e.y;
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// `true` when the pan ended because the platform cancelled the pointer.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Keeps listeners registered before the current one from seeing this event.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

impl Propagation for PanEvent {
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

/// Recognizes drags: a pointer that moves further than the threshold from where it went down.
///
/// Each pressed pointer owns one pooled [`PanEvent`], acquired on down and released exactly once
/// on up, leave or cancel.
pub struct PanGesture {
    threshold: f64,
    contains: Containment,
    events: PointerMap<PoolHandle>,
    pool: Pool<PanEvent>,
    on_start: Listeners<PanEvent>,
    on_move: Listeners<PanEvent>,
    on_end: Listeners<PanEvent>,
}

impl PanGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            contains: same_element(),
            events: PointerMap::new(),
            pool: Pool::new(PanEvent::default),
            on_start: Listeners::new(),
            on_move: Listeners::new(),
            on_end: Listeners::new(),
        }
    }

    pub fn set_containment(&mut self, contains: Containment) {
        self.contains = contains;
    }

    pub fn on_start(
        &mut self,
        target: Option<ElementId>,
        callback: impl Fn(&PanEvent) + 'static,
    ) -> Unsubscribe {
        self.on_start.subscribe(target, callback)
    }

    pub fn on_move(
        &mut self,
        target: Option<ElementId>,
        callback: impl Fn(&PanEvent) + 'static,
    ) -> Unsubscribe {
        self.on_move.subscribe(target, callback)
    }

    pub fn on_end(
        &mut self,
        target: Option<ElementId>,
        callback: impl Fn(&PanEvent) + 'static,
    ) -> Unsubscribe {
        self.on_end.subscribe(target, callback)
    }

    /// The live pan for `pointer_id`, if that pointer is down.
    pub fn event(&self, pointer_id: PointerId) -> Option<&PanEvent> {
        self.events
            .get(&pointer_id)
            .and_then(|handle| self.pool.get(*handle))
    }

    pub fn active_pointers(&self) -> usize {
        self.events.len()
    }

    pub fn pool(&self) -> &Pool<PanEvent> {
        &self.pool
    }

    /// Drops all in-flight pans without notifying and reclaims their events.
    pub fn dispose(&mut self) {
        self.events.clear();
        self.pool.release_all();
    }

    fn release(&mut self, pointer_id: PointerId) {
        if let Some(handle) = self.events.remove(&pointer_id) {
            let released = self.pool.release(handle);
            debug_assert!(released, "PanGesture: pan event released twice");
        }
    }

    /// Ends the pan for `pointer_id`, notifying end listeners if it was panning.
    fn finish(&mut self, e: &PointerEvent, cancelled: bool) {
        let Some(handle) = self.events.get(&e.pointer_id).copied() else {
            return;
        };
        if let Some(event) = self.pool.get_mut(handle) {
            if !cancelled {
                event.track(e);
            }
            event.cancelled = cancelled;
        }
        if let Some(event) = self.pool.get(handle) {
            if event.panning {
                gtrace!(pointer = e.pointer_id.0, cancelled, "pan end");
                self.on_end.notify(event, &self.contains);
            }
        }
        self.release(e.pointer_id);
    }
}

impl Gesture for PanGesture {
    fn down(&mut self, e: &PointerEvent) {
        if self.events.contains_key(&e.pointer_id) {
            gwarn!(pointer = e.pointer_id.0, "pointer down while already down; restarting pan");
            self.release(e.pointer_id);
        }
        let handle = self.pool.acquire();
        if let Some(event) = self.pool.get_mut(handle) {
            event.reset(e);
        }
        self.events.insert(e.pointer_id, handle);
    }

    fn moved(&mut self, e: &PointerEvent) {
        let Some(handle) = self.events.get(&e.pointer_id).copied() else {
            return;
        };
        let Some(event) = self.pool.get_mut(handle) else {
            return;
        };
        event.track(e);

        if event.panning {
            self.on_move.notify(event, &self.contains);
            return;
        }
        let distance = (e.x - event.start_x).hypot(e.y - event.start_y);
        if distance > self.threshold {
            event.panning = true;
            event.start_x = e.x;
            event.start_y = e.y;
            gtrace!(pointer = e.pointer_id.0, distance, "pan start");
            self.on_start.notify(event, &self.contains);
        }
    }

    fn up(&mut self, e: &PointerEvent) {
        self.finish(e, false);
    }

    fn leave(&mut self, e: &PointerEvent) {
        self.finish(e, false);
    }

    fn cancel(&mut self, pointer_id: PointerId) {
        let e = PointerEvent::cancel(pointer_id);
        self.finish(&e, true);
    }

    fn clear_listeners(&mut self) {
        self.on_start.clear();
        self.on_move.clear();
        self.on_end.clear();
    }
}
