use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kinetic::{FrameClock, Scrollable};

use crate::{GestureRecognizer, PanEvent, PointerId, TapEvent, Unsubscribe};

/// Wires a [`GestureRecognizer`] to a scroll domain: pans drive the domain's pointer stream.
///
/// Only one pointer drives the domain at a time; pans from other pointers are ignored until it
/// ends. A tap that lands while the domain is still moving (or within
/// [`crate::GestureOptions::tap_suppression_ms`] of its last movement) stops the domain and is
/// not reported to taps registered through [`PanScroll::on_tap`].
pub struct PanScroll {
    domain: Rc<RefCell<dyn Scrollable>>,
    clock: Rc<dyn FrameClock>,
    tap_suppression_ms: u64,
    active: Rc<Cell<Option<PointerId>>>,
    subscriptions: Vec<Unsubscribe>,
}

fn drive(domain: &RefCell<dyn Scrollable>, f: impl FnOnce(&mut (dyn Scrollable + 'static))) {
    match domain.try_borrow_mut() {
        Ok(mut domain) => f(&mut *domain),
        Err(_) => {
            gwarn!("scroll domain is busy; gesture sample dropped");
        }
    }
}

fn recently_scrolled(
    domain: &RefCell<dyn Scrollable>,
    clock: &dyn FrameClock,
    window_ms: u64,
) -> bool {
    let Ok(domain) = domain.try_borrow() else {
        return true;
    };
    domain.is_scrolling()
        || domain
            .last_interaction_ms()
            .is_some_and(|at| clock.now_ms().saturating_sub(at) <= window_ms)
}

impl PanScroll {
    pub fn bind(
        recognizer: &mut GestureRecognizer,
        domain: Rc<RefCell<dyn Scrollable>>,
        clock: Rc<dyn FrameClock>,
    ) -> Self {
        let active: Rc<Cell<Option<PointerId>>> = Rc::new(Cell::new(None));
        let tap_suppression_ms = recognizer.options().tap_suppression_ms;
        let mut subscriptions = Vec::with_capacity(4);

        subscriptions.push(recognizer.on_pan_start({
            let domain = Rc::clone(&domain);
            let active = Rc::clone(&active);
            move |e: &PanEvent| {
                if active.get().is_some() {
                    return;
                }
                active.set(Some(e.pointer_id));
                drive(&domain, |d| d.pointer_start(e.x, e.y));
            }
        }));

        subscriptions.push(recognizer.on_pan_move({
            let domain = Rc::clone(&domain);
            let active = Rc::clone(&active);
            move |e: &PanEvent| {
                if active.get() == Some(e.pointer_id) {
                    drive(&domain, |d| {
                        d.pointer_move(e.x, e.y);
                    });
                }
            }
        }));

        subscriptions.push(recognizer.on_pan_end({
            let domain = Rc::clone(&domain);
            let active = Rc::clone(&active);
            move |e: &PanEvent| {
                if active.get() == Some(e.pointer_id) {
                    active.set(None);
                    drive(&domain, |d| d.pointer_end());
                }
            }
        }));

        subscriptions.push(recognizer.on_tap({
            let domain = Rc::clone(&domain);
            let clock = Rc::clone(&clock);
            move |_: &TapEvent| {
                if recently_scrolled(&domain, &*clock, tap_suppression_ms) {
                    gtrace!("tap stopped the scroll domain");
                    drive(&domain, |d| d.stop());
                }
            }
        }));

        Self {
            domain,
            clock,
            tap_suppression_ms,
            active,
            subscriptions,
        }
    }

    /// Registers a tap listener that only fires when the domain has been still for longer than
    /// the suppression window.
    pub fn on_tap(
        &mut self,
        recognizer: &mut GestureRecognizer,
        callback: impl Fn(&TapEvent) + 'static,
    ) {
        let domain = Rc::clone(&self.domain);
        let clock = Rc::clone(&self.clock);
        let window_ms = self.tap_suppression_ms;
        self.subscriptions.push(recognizer.on_tap(move |e: &TapEvent| {
            if recently_scrolled(&domain, &*clock, window_ms) {
                gtrace!(pointer = e.pointer_id.0, "tap suppressed");
                return;
            }
            callback(e);
        }));
    }

    /// The pointer currently driving the domain.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active.get()
    }

    pub fn domain(&self) -> &Rc<RefCell<dyn Scrollable>> {
        &self.domain
    }

    /// Removes every listener. A drag in progress is released as if the pointer went up.
    pub fn unbind(self) {
        if self.active.take().is_some() {
            drive(&self.domain, |d| d.pointer_end());
        }
        for subscription in self.subscriptions {
            subscription.unsubscribe();
        }
    }
}

impl std::fmt::Debug for PanScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanScroll")
            .field("active", &self.active.get())
            .field("listeners", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}
