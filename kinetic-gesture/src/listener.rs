use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::{Containment, is_within};
use crate::{ElementId, Pool, PoolHandle};

/// Events that listeners can stop from reaching the listeners registered before them.
pub trait Propagation {
    fn target(&self) -> Option<ElementId>;
    fn is_propagation_stopped(&self) -> bool;
    fn reset_propagation(&self);
}

type Callback<E> = Rc<dyn Fn(&E)>;

struct Listener<E> {
    target: Option<ElementId>,
    callback: Option<Callback<E>>,
}

struct Registry<E> {
    pool: Pool<Listener<E>>,
    /// Oldest first; notification walks it backwards.
    order: Vec<PoolHandle>,
}

impl<E> Registry<E> {
    fn remove(&mut self, handle: PoolHandle) -> bool {
        let Some(pos) = self.order.iter().position(|h| *h == handle) else {
            return false;
        };
        self.order.remove(pos);
        if let Some(listener) = self.pool.get_mut(handle) {
            listener.callback = None;
        }
        self.pool.release(handle)
    }
}

/// An ordered set of listeners for one kind of gesture event.
///
/// The most recently subscribed listener is notified first. Any listener may call
/// `stop_propagation()` on the event, which skips every listener after it for that event only.
/// Listener slots are pooled, so subscribing and unsubscribing in a steady state does not
/// allocate.
pub struct Listeners<E> {
    registry: Rc<RefCell<Registry<E>>>,
    scratch: Vec<(Option<ElementId>, Callback<E>)>,
}

impl<E: Propagation + 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                pool: Pool::new(|| Listener {
                    target: None,
                    callback: None,
                }),
                order: Vec::new(),
            })),
            scratch: Vec::new(),
        }
    }

    /// Registers `callback` for events that hit `target` (or any event when `None`).
    pub fn subscribe(
        &mut self,
        target: Option<ElementId>,
        callback: impl Fn(&E) + 'static,
    ) -> Unsubscribe {
        let handle = {
            let mut registry = self.registry.borrow_mut();
            let handle = registry.pool.acquire();
            if let Some(listener) = registry.pool.get_mut(handle) {
                listener.target = target;
                listener.callback = Some(Rc::new(callback));
            }
            registry.order.push(handle);
            handle
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Unsubscribe {
            remove: Some(Box::new(move || {
                let Some(registry) = weak.upgrade() else {
                    return false;
                };
                let removed = registry.borrow_mut().remove(handle);
                removed
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        let mut registry = self.registry.borrow_mut();
        let registry = &mut *registry;
        for handle in registry.order.drain(..) {
            if let Some(listener) = registry.pool.get_mut(handle) {
                listener.callback = None;
            }
        }
        registry.pool.release_all();
    }

    /// Delivers `event` to matching listeners, newest first, until one stops propagation.
    ///
    /// Listeners may unsubscribe (themselves or others) while being notified; the change takes
    /// effect from the next event.
    pub fn notify(&mut self, event: &E, contains: &Containment) {
        self.scratch.clear();
        {
            let registry = self.registry.borrow();
            self.scratch.extend(registry.order.iter().rev().filter_map(|handle| {
                let listener = registry.pool.get(*handle)?;
                let callback = listener.callback.clone()?;
                Some((listener.target, callback))
            }));
        }

        for (target, callback) in self.scratch.drain(..) {
            if !is_within(contains, target, event.target()) {
                continue;
            }
            callback(event);
            if event.is_propagation_stopped() {
                break;
            }
        }
        event.reset_propagation();
    }

    pub fn available_len(&self) -> usize {
        self.registry.borrow().pool.available_len()
    }
}

impl<E: Propagation + 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.registry.borrow().order.len())
            .finish_non_exhaustive()
    }
}

/// Handle returned by every `on_*` registration.
///
/// Dropping it keeps the listener registered; call [`Unsubscribe::unsubscribe`] to remove it.
#[must_use = "dropping the handle keeps the listener registered forever"]
pub struct Unsubscribe {
    remove: Option<Box<dyn FnOnce() -> bool>>,
}

impl Unsubscribe {
    /// Removes the listener. Returns `false` when it was already gone (cleared or disposed).
    pub fn unsubscribe(mut self) -> bool {
        match self.remove.take() {
            Some(remove) => remove(),
            None => false,
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unsubscribe(..)")
    }
}
