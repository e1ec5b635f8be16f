use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Shared<T> {
    fn notify(&self) {
        // Snapshot so subscribers may unsubscribe (or subscribe) while being notified.
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        let value = self.value.borrow();
        for subscriber in subscribers {
            subscriber(&value);
        }
    }
}

/// A value cell that notifies subscribers synchronously after every mutation.
///
/// The `Observable` itself is the owner handle: whoever holds it is the only writer. Readers get
/// a [`Broadcast`] via [`Observable::broadcast`], which can read and subscribe but never mutate.
pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a read-only handle to this value.
    pub fn broadcast(&self) -> Broadcast<T> {
        Broadcast {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.shared.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    pub fn set(&self, value: T) {
        *self.shared.value.borrow_mut() = value;
        self.shared.notify();
    }

    /// Sets the value only when it differs from the current one.
    ///
    /// Returns `true` (and notifies) when the value changed.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        if *self.shared.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }

    /// Mutates the value in place, then notifies.
    pub fn transform(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.shared.value.borrow_mut());
        self.shared.notify();
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.shared.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A read-only, cloneable view of an [`Observable`].
pub struct Broadcast<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T> Broadcast<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.shared.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    /// Registers `f` to be called with the new value after every mutation.
    ///
    /// Subscribers must not mutate the owning domain from inside the callback; they only see a
    /// shared reference to the value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id.wrapping_add(1));
        self.shared
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(f) as Subscriber<T>));

        let weak: Weak<Shared<T>> = Rc::downgrade(&self.shared);
        Subscription {
            remove: Some(Box::new(move || {
                let Some(shared) = weak.upgrade() else {
                    return false;
                };
                let mut subscribers = shared.subscribers.borrow_mut();
                let Some(pos) = subscribers.iter().position(|(sid, _)| *sid == id) else {
                    return false;
                };
                subscribers.remove(pos);
                true
            })),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Broadcast")
            .field(&*self.shared.value.borrow())
            .finish()
    }
}

/// Handle returned by [`Broadcast::subscribe`].
///
/// Dropping the handle keeps the subscription alive; call [`Subscription::unsubscribe`] to
/// detach.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() -> bool>>,
}

impl Subscription {
    /// Detaches the subscriber. Returns `false` if the value was already dropped.
    pub fn unsubscribe(mut self) -> bool {
        match self.remove.take() {
            Some(remove) => remove(),
            None => false,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription(..)")
    }
}
