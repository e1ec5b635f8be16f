use std::fmt;

/// Generational handle to a pooled instance.
///
/// A handle goes stale when its instance is released; stale handles never alias a later
/// acquire of the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    index: u32,
    generation: u32,
}

impl PoolHandle {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

struct Slot<T> {
    value: T,
    generation: u32,
    used: bool,
}

/// A free-list of reusable instances.
///
/// Released instances are parked rather than dropped and handed out again by the next
/// [`Pool::acquire`]; new instances are only created when the free list is empty. The caller
/// resets an acquired instance before use.
///
/// Every slot is either available or used, never both, so
/// `available_len() + used_len() == capacity()` at all times.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    used: usize,
    generator: Box<dyn Fn() -> T>,
}

impl<T> Pool<T> {
    pub fn new(generator: impl Fn() -> T + 'static) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            used: 0,
            generator: Box::new(generator),
        }
    }

    pub fn acquire(&mut self) -> PoolHandle {
        self.used += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(!slot.used, "Pool: free list holds a used slot ({index})");
            slot.used = true;
            return PoolHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        debug_assert!(index < u32::MAX, "Pool: too many instances");
        self.slots.push(Slot {
            value: (self.generator)(),
            generation: 0,
            used: true,
        });
        PoolHandle {
            index,
            generation: 0,
        }
    }

    /// Parks the instance for reuse. Returns `false` for stale or double releases.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            gwarn!(?handle, "Pool: release of a stale handle ignored");
            return false;
        };
        slot.used = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.used -= 1;
        self.free.push(handle.index);
        true
    }

    /// Releases every used instance at once (e.g. on teardown).
    pub fn release_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.used {
                slot.used = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.used = 0;
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.used && slot.generation == handle.generation)
            .map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.live_slot_mut(handle).map(|slot| &mut slot.value)
    }

    fn live_slot_mut(&mut self, handle: PoolHandle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.used && slot.generation == handle.generation)
    }

    pub fn is_used(&self, handle: PoolHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn available_len(&self) -> usize {
        self.free.len()
    }

    pub fn used_len(&self) -> usize {
        self.used
    }

    /// Total number of instances ever created.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("available", &self.available_len())
            .field("used", &self.used_len())
            .finish_non_exhaustive()
    }
}
