use std::fmt;
use std::rc::Rc;

use crate::engine::{Extent, Kinetics, Line, Notice, Plane};
use crate::{
    Bounds, Broadcast, Easing, FrameClock, FrameId, MomentumConfig, Motion, Observable, Phase,
    Position, ScrollOptions, Size,
};

/// Callback slot type for planar scroll notifications.
pub type ScrollHandler = Rc<dyn Fn(&dyn Scrollable)>;

/// A two-dimensional scroll surface: a `width x height` viewport over a virtual content plane.
///
/// `top`/`left` are the negated offset components; `right`/`bottom` add the viewport size.
pub trait Scrollable {
    fn offset_broadcast(&self) -> Broadcast<Position>;
    fn size_broadcast(&self) -> Broadcast<Size>;
    fn offset(&self) -> Position;
    fn size(&self) -> Size;
    fn velocity(&self) -> Position;
    fn phase(&self) -> Phase;
    fn bounds_x(&self) -> Bounds;
    fn bounds_y(&self) -> Bounds;
    fn is_x_disabled(&self) -> bool;
    fn is_y_disabled(&self) -> bool;
    /// Time of the last drag sample or animated frame; `None` until the first one.
    fn last_interaction_ms(&self) -> Option<u64>;

    fn top(&self) -> f64 {
        -self.offset().y
    }

    fn left(&self) -> f64 {
        -self.offset().x
    }

    fn right(&self) -> f64 {
        self.left() + self.size().width
    }

    fn bottom(&self) -> f64 {
        self.top() + self.size().height
    }

    fn width(&self) -> f64 {
        self.size().width
    }

    fn height(&self) -> f64 {
        self.size().height
    }

    fn is_scrolling(&self) -> bool {
        self.phase().is_scrolling()
    }

    fn initialize(&mut self, x: f64, y: f64);
    fn pointer_start(&mut self, x: f64, y: f64);
    fn pointer_move(&mut self, x: f64, y: f64) -> bool;
    fn pointer_end(&mut self);
    fn frame(&mut self, id: FrameId) -> bool;
    fn reset(&mut self);
    fn stop(&mut self);
    fn set_size(&mut self, width: f64, height: f64);
    fn disable_x(&mut self);
    fn disable_y(&mut self);
    fn enable_x(&mut self);
    fn enable_y(&mut self);
    fn scroll_to(&mut self, x: f64, y: f64);
    fn animate_to(&mut self, x: f64, y: f64, duration_ms: u64, easing: Easing);
}

/// Planar scroll kinematics: two bounded axes driven by one pointer stream.
///
/// Velocity is estimated component-wise from a single 2-D sample stream so diagonal flicks stay
/// coherent. Each axis can be disabled independently, which freezes its offset while the event
/// bookkeeping keeps running (that is how horizontal-only and vertical-only scrollers are built).
pub struct ScrollDomain {
    options: ScrollOptions,
    plane: Plane,
    kinetics: Kinetics<Position>,
    size: Observable<Size>,
    on_scroll_start: Option<ScrollHandler>,
    on_scroll: Option<ScrollHandler>,
    on_scroll_end: Option<ScrollHandler>,
}

impl ScrollDomain {
    pub fn new(clock: Rc<dyn FrameClock>, options: ScrollOptions) -> Self {
        let mut options = options;
        options.momentum = options.momentum.sanitized();
        let offset = options.initial_offset;
        kdebug!(?offset, "ScrollDomain::new");

        Self {
            plane: Plane {
                x: Line::new(options.bounds_x()),
                y: Line::new(options.bounds_y()),
            },
            kinetics: Kinetics::new(clock, offset, options.momentum),
            options,
            size: Observable::new(Size::default()),
            on_scroll_start: None,
            on_scroll: None,
            on_scroll_end: None,
        }
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    /// Inverted bounds are swapped per axis and a NaN side is unbounded.
    pub fn set_bounds(&mut self, min: Position, max: Position) {
        self.options.min = min;
        self.options.max = max;
        self.plane.x.bounds = self.options.bounds_x();
        self.plane.y.bounds = self.options.bounds_y();
        kdebug!(?min, ?max, "ScrollDomain::set_bounds");
    }

    pub fn set_momentum(&mut self, momentum: MomentumConfig) {
        self.options.momentum = momentum.sanitized();
        self.kinetics.set_momentum(momentum);
    }

    pub fn motion(&self) -> &Motion<Position> {
        self.kinetics.motion()
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.kinetics.pending_frame()
    }

    pub fn set_on_scroll_start(&mut self, handler: Option<impl Fn(&dyn Scrollable) + 'static>) {
        self.on_scroll_start = handler.map(|f| Rc::new(f) as ScrollHandler);
    }

    pub fn set_on_scroll(&mut self, handler: Option<impl Fn(&dyn Scrollable) + 'static>) {
        self.on_scroll = handler.map(|f| Rc::new(f) as ScrollHandler);
    }

    pub fn set_on_scroll_end(&mut self, handler: Option<impl Fn(&dyn Scrollable) + 'static>) {
        self.on_scroll_end = handler.map(|f| Rc::new(f) as ScrollHandler);
    }

    fn flush(&mut self) {
        for notice in self.kinetics.take_notices() {
            let handler = match notice {
                Notice::Start => &self.on_scroll_start,
                Notice::Scroll => &self.on_scroll,
                Notice::End => &self.on_scroll_end,
            };
            if let Some(handler) = handler {
                handler(self as &dyn Scrollable);
            }
        }
    }

    /// Resolves a requested offset: disabled axes keep their current value, enabled axes are
    /// clamped into bounds.
    pub(crate) fn resolve_target(&self, target: Position) -> Position {
        self.kinetics.resolve(&self.plane, target)
    }

    /// Whether every enabled axis of `offset` lies within its bounds.
    pub(crate) fn in_bounds(&self, offset: Position) -> bool {
        self.plane.contains(offset)
    }

    pub(crate) fn release(&mut self) -> bool {
        self.kinetics.release()
    }

    pub(crate) fn coast_or_settle(&mut self, rest: impl FnOnce(Position) -> Option<Position>) {
        self.kinetics.coast_or_settle(&self.plane, rest);
        self.flush();
    }

    pub(crate) fn animate_with(&mut self, target: Position, duration_ms: u64, easing: Easing) {
        self.kinetics.animate_with(target, duration_ms, easing);
        self.flush();
    }

    pub(crate) fn frame_resting_at(
        &mut self,
        id: FrameId,
        rest: impl FnOnce(Position) -> Option<Position>,
    ) -> bool {
        let delivered = self.kinetics.frame(&self.plane, id, rest);
        self.flush();
        delivered
    }
}

impl Scrollable for ScrollDomain {
    fn offset_broadcast(&self) -> Broadcast<Position> {
        self.kinetics.offset_broadcast()
    }

    fn size_broadcast(&self) -> Broadcast<Size> {
        self.size.broadcast()
    }

    fn offset(&self) -> Position {
        self.kinetics.offset()
    }

    fn size(&self) -> Size {
        self.size.get()
    }

    fn velocity(&self) -> Position {
        self.kinetics.velocity()
    }

    fn phase(&self) -> Phase {
        self.kinetics.phase()
    }

    fn bounds_x(&self) -> Bounds {
        self.plane.x.bounds
    }

    fn bounds_y(&self) -> Bounds {
        self.plane.y.bounds
    }

    fn is_x_disabled(&self) -> bool {
        self.plane.x.disabled
    }

    fn is_y_disabled(&self) -> bool {
        self.plane.y.disabled
    }

    fn last_interaction_ms(&self) -> Option<u64> {
        self.kinetics.last_interaction_ms()
    }

    fn initialize(&mut self, x: f64, y: f64) {
        let duration_ms = self.options.momentum.animate_duration_ms;
        self.animate_to(x, y, duration_ms, Easing::default());
    }

    fn pointer_start(&mut self, x: f64, y: f64) {
        self.kinetics.pointer_start(Position::new(x, y));
        self.flush();
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let moved = self.kinetics.pointer_move(&self.plane, Position::new(x, y));
        self.flush();
        moved
    }

    fn pointer_end(&mut self) {
        if self.release() {
            self.coast_or_settle(|_| None);
        }
    }

    fn frame(&mut self, id: FrameId) -> bool {
        self.frame_resting_at(id, |_| None)
    }

    fn reset(&mut self) {
        self.kinetics.stop();
        self.flush();
    }

    fn stop(&mut self) {
        self.reset();
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.size
            .set_if_changed(Size::new(width.floor(), height.floor()));
    }

    fn disable_x(&mut self) {
        self.plane.x.disabled = true;
    }

    fn disable_y(&mut self) {
        self.plane.y.disabled = true;
    }

    fn enable_x(&mut self) {
        self.plane.x.disabled = false;
    }

    fn enable_y(&mut self) {
        self.plane.y.disabled = false;
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.kinetics.scroll_to(&self.plane, Position::new(x, y));
        self.flush();
    }

    fn animate_to(&mut self, x: f64, y: f64, duration_ms: u64, easing: Easing) {
        self.kinetics
            .animate_to(&self.plane, Position::new(x, y), duration_ms, easing);
        self.flush();
    }
}

impl fmt::Debug for ScrollDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollDomain")
            .field("offset", &self.offset())
            .field("size", &self.size())
            .field("velocity", &self.velocity())
            .field("phase", &self.phase())
            .field("bounds_x", &self.plane.x.bounds)
            .field("bounds_y", &self.plane.y.bounds)
            .field("x_disabled", &self.plane.x.disabled)
            .field("y_disabled", &self.plane.y.disabled)
            .field("pending_frame", &self.pending_frame())
            .finish_non_exhaustive()
    }
}
