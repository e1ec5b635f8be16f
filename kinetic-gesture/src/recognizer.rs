use std::rc::Rc;

use crate::event::Containment;
use crate::{
    ElementId, PanEvent, PanGesture, PointerEvent, PointerId, PointerPhase, TapEvent, TapGesture,
    Unsubscribe,
};

/// One gesture state machine fed by the recognizer.
///
/// Hover notifications (`enter`/`over`/`out`) are ignored unless a gesture cares about them.
pub trait Gesture {
    fn enter(&mut self, _e: &PointerEvent) {}
    fn over(&mut self, _e: &PointerEvent) {}
    fn out(&mut self, _e: &PointerEvent) {}
    fn down(&mut self, e: &PointerEvent);
    fn moved(&mut self, e: &PointerEvent);
    fn up(&mut self, e: &PointerEvent);
    fn leave(&mut self, e: &PointerEvent);
    fn cancel(&mut self, pointer_id: PointerId);
    fn clear_listeners(&mut self);
}

/// Tuning for gesture recognition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureOptions {
    /// Distance a pointer must travel from its down position before it counts as a pan.
    /// Presses that stay within it are taps.
    pub threshold: f64,
    /// Taps this soon after scroll activity are swallowed by [`crate::PanScroll`]; the tap
    /// stopped a fling and was not meant as a click.
    pub tap_suppression_ms: u64,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            tap_suppression_ms: 300,
        }
    }
}

impl GestureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_tap_suppression_ms(mut self, ms: u64) -> Self {
        self.tap_suppression_ms = ms;
        self
    }
}

/// Classifies a raw pointer stream into pan and tap events.
///
/// The host forwards every pointer event for its element to [`GestureRecognizer::handle`].
/// Listener registration returns an [`Unsubscribe`] handle; `_within` variants only fire for
/// events whose target lies within the given element (see
/// [`GestureRecognizer::with_containment`]).
pub struct GestureRecognizer {
    options: GestureOptions,
    pan: PanGesture,
    tap: TapGesture,
    disposed: bool,
}

impl GestureRecognizer {
    pub fn new(options: GestureOptions) -> Self {
        let threshold = if options.threshold >= 0.0 {
            options.threshold
        } else {
            gwarn!(threshold = options.threshold, "negative gesture threshold clamped to 0");
            0.0
        };
        let options = GestureOptions {
            threshold,
            ..options
        };
        Self {
            options,
            pan: PanGesture::new(threshold),
            tap: TapGesture::new(threshold),
            disposed: false,
        }
    }

    /// Installs the element-tree test used by `_within` listeners: `contains(ancestor, target)`.
    pub fn with_containment(
        mut self,
        contains: impl Fn(ElementId, ElementId) -> bool + 'static,
    ) -> Self {
        let contains: Containment = Rc::new(contains);
        self.pan.set_containment(Rc::clone(&contains));
        self.tap.set_containment(contains);
        self
    }

    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    pub fn pan(&self) -> &PanGesture {
        &self.pan
    }

    pub fn tap(&self) -> &TapGesture {
        &self.tap
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Feeds one pointer event to every gesture. Ignored after [`GestureRecognizer::dispose`].
    pub fn handle(&mut self, e: &PointerEvent) {
        if self.disposed {
            gtrace!(phase = ?e.phase, "event after dispose ignored");
            return;
        }
        for gesture in [&mut self.pan as &mut dyn Gesture, &mut self.tap] {
            match e.phase {
                PointerPhase::Down => gesture.down(e),
                PointerPhase::Move => gesture.moved(e),
                PointerPhase::Up => gesture.up(e),
                PointerPhase::Leave => gesture.leave(e),
                PointerPhase::Cancel => gesture.cancel(e.pointer_id),
                PointerPhase::Enter => gesture.enter(e),
                PointerPhase::Over => gesture.over(e),
                PointerPhase::Out => gesture.out(e),
            }
        }
    }

    pub fn on_pan_start(&mut self, callback: impl Fn(&PanEvent) + 'static) -> Unsubscribe {
        self.pan.on_start(None, callback)
    }

    pub fn on_pan_move(&mut self, callback: impl Fn(&PanEvent) + 'static) -> Unsubscribe {
        self.pan.on_move(None, callback)
    }

    pub fn on_pan_end(&mut self, callback: impl Fn(&PanEvent) + 'static) -> Unsubscribe {
        self.pan.on_end(None, callback)
    }

    pub fn on_tap(&mut self, callback: impl Fn(&TapEvent) + 'static) -> Unsubscribe {
        self.tap.on_tap(None, callback)
    }

    pub fn on_pan_start_within(
        &mut self,
        target: ElementId,
        callback: impl Fn(&PanEvent) + 'static,
    ) -> Unsubscribe {
        self.pan.on_start(Some(target), callback)
    }

    pub fn on_pan_move_within(
        &mut self,
        target: ElementId,
        callback: impl Fn(&PanEvent) + 'static,
    ) -> Unsubscribe {
        self.pan.on_move(Some(target), callback)
    }

    pub fn on_pan_end_within(
        &mut self,
        target: ElementId,
        callback: impl Fn(&PanEvent) + 'static,
    ) -> Unsubscribe {
        self.pan.on_end(Some(target), callback)
    }

    pub fn on_tap_within(
        &mut self,
        target: ElementId,
        callback: impl Fn(&TapEvent) + 'static,
    ) -> Unsubscribe {
        self.tap.on_tap(Some(target), callback)
    }

    pub fn clear_listeners(&mut self) {
        self.pan.clear_listeners();
        self.tap.clear_listeners();
    }

    /// Detaches every listener and reclaims all pooled events. Further events are ignored.
    pub fn dispose(&mut self) {
        self.clear_listeners();
        self.pan.dispose();
        self.tap.dispose();
        self.disposed = true;
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureOptions::default())
    }
}

impl std::fmt::Debug for GestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("options", &self.options)
            .field("active_pans", &self.pan.active_pointers())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
