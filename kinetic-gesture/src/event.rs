/// Identifies one pointer (finger, pen or mouse) for the lifetime of a press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u32);

/// Opaque handle of a host UI element (a DOM node, a widget id, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer left the recognizer's element. Treated as `Up` by pan, as a cancel by tap.
    Leave,
    /// The platform aborted the press (e.g. the browser took over for native scrolling).
    Cancel,
    Enter,
    Over,
    Out,
}

/// A raw pointer sample as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    /// Element the pointer hit, if the host knows it.
    pub target: Option<ElementId>,
}

impl PointerEvent {
    pub fn new(pointer_id: PointerId, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            phase,
            x,
            y,
            target: None,
        }
    }

    pub fn down(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Down, x, y)
    }

    pub fn moved(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Move, x, y)
    }

    pub fn up(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Up, x, y)
    }

    pub fn leave(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(pointer_id, PointerPhase::Leave, x, y)
    }

    pub fn cancel(pointer_id: PointerId) -> Self {
        Self::new(pointer_id, PointerPhase::Cancel, 0.0, 0.0)
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Decides whether `target` lies within `ancestor` (inclusive).
///
/// The default only matches equal ids; hosts with an element tree supply their own.
pub type Containment = std::rc::Rc<dyn Fn(ElementId, ElementId) -> bool>;

pub(crate) fn same_element() -> Containment {
    std::rc::Rc::new(|ancestor, target| ancestor == target)
}

/// Whether a listener bound to `listener_target` should see an event hitting `event_target`.
/// Unbound listeners and untargeted events always match.
pub(crate) fn is_within(
    contains: &Containment,
    listener_target: Option<ElementId>,
    event_target: Option<ElementId>,
) -> bool {
    match (listener_target, event_target) {
        (Some(ancestor), Some(target)) => contains(ancestor, target),
        _ => true,
    }
}

/// Per-pointer state of an in-progress gesture.
pub(crate) type PointerMap<V> = std::collections::HashMap<PointerId, V>;
