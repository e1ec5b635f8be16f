use crate::*;

use kinetic::{FakeClock, Phase, ScrollDomain, ScrollOptions, Scrollable};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }
}

const P1: PointerId = PointerId(1);
const P2: PointerId = PointerId(2);

#[derive(Default)]
struct Counts {
    pan_start: Cell<usize>,
    pan_move: Cell<usize>,
    pan_end: Cell<usize>,
    tap: Cell<usize>,
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

fn counted(recognizer: &mut GestureRecognizer) -> (Rc<Counts>, Vec<Unsubscribe>) {
    let counts = Rc::new(Counts::default());
    let subs = vec![
        recognizer.on_pan_start({
            let c = Rc::clone(&counts);
            move |_: &PanEvent| bump(&c.pan_start)
        }),
        recognizer.on_pan_move({
            let c = Rc::clone(&counts);
            move |_: &PanEvent| bump(&c.pan_move)
        }),
        recognizer.on_pan_end({
            let c = Rc::clone(&counts);
            move |_: &PanEvent| bump(&c.pan_end)
        }),
        recognizer.on_tap({
            let c = Rc::clone(&counts);
            move |_: &TapEvent| bump(&c.tap)
        }),
    ];
    (counts, subs)
}

fn press(recognizer: &mut GestureRecognizer, id: PointerId, path: &[(f64, f64)]) {
    let (x0, y0) = path[0];
    recognizer.handle(&PointerEvent::down(id, x0, y0));
    for &(x, y) in &path[1..] {
        recognizer.handle(&PointerEvent::moved(id, x, y));
    }
    let (x1, y1) = path[path.len() - 1];
    recognizer.handle(&PointerEvent::up(id, x1, y1));
}

struct Ping {
    target: Option<ElementId>,
    stopped: Cell<bool>,
}

impl Ping {
    fn new(target: Option<ElementId>) -> Self {
        Self {
            target,
            stopped: Cell::new(false),
        }
    }
}

impl Propagation for Ping {
    fn target(&self) -> Option<ElementId> {
        self.target
    }

    fn is_propagation_stopped(&self) -> bool {
        self.stopped.get()
    }

    fn reset_propagation(&self) {
        self.stopped.set(false);
    }
}

fn any_element() -> Containment {
    Rc::new(|a: ElementId, b: ElementId| a == b)
}

#[test]
fn pool_reuses_released_instances() {
    let created = Rc::new(Cell::new(0usize));
    let mut pool = Pool::new({
        let created = Rc::clone(&created);
        move || {
            created.set(created.get() + 1);
            0u32
        }
    });

    let a = pool.acquire();
    *pool.get_mut(a).unwrap() = 7;
    assert!(pool.release(a));
    assert!(!pool.release(a));
    assert_eq!(pool.get(a), None);

    let b = pool.acquire();
    assert_eq!(b.index(), a.index());
    assert_ne!(b.generation(), a.generation());
    assert_eq!(pool.get(b), Some(&7));
    assert_eq!(created.get(), 1);

    // A stale handle cannot release the slot's new owner.
    assert!(!pool.release(a));
    assert!(pool.is_used(b));
}

#[test]
fn pool_slots_are_either_available_or_used() {
    for seed in 0..32u64 {
        let mut rng = Lcg::new(seed);
        let mut pool = Pool::new(|| ());
        let mut held: Vec<PoolHandle> = Vec::new();
        let mut released: Vec<PoolHandle> = Vec::new();

        for _ in 0..200 {
            match rng.gen_range_usize(0, 5) {
                0 | 1 => held.push(pool.acquire()),
                2 | 3 if !held.is_empty() => {
                    let h = held.swap_remove(rng.gen_range_usize(0, held.len()));
                    assert!(pool.release(h));
                    released.push(h);
                }
                4 if !released.is_empty() => {
                    let h = released[rng.gen_range_usize(0, released.len())];
                    assert!(!pool.release(h), "seed {seed}: double release accepted");
                }
                _ => {}
            }

            assert_eq!(pool.available_len() + pool.used_len(), pool.capacity());
            assert_eq!(pool.used_len(), held.len());
            assert!(held.iter().all(|h| pool.is_used(*h)));
            assert!(released.iter().all(|h| !pool.is_used(*h)));
        }

        pool.release_all();
        assert_eq!(pool.used_len(), 0);
        assert_eq!(pool.available_len(), pool.capacity());
        assert!(held.iter().all(|h| !pool.is_used(*h)));
    }
}

#[test]
fn short_press_is_a_tap_only() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    press(&mut recognizer, P1, &[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0)]);
    assert_eq!(counts.tap.get(), 1);
    assert_eq!(counts.pan_start.get(), 0);
    assert_eq!(counts.pan_move.get(), 0);
    assert_eq!(counts.pan_end.get(), 0);
}

#[test]
fn release_exactly_at_the_threshold_is_neither() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    press(&mut recognizer, P1, &[(0.0, 0.0), (5.0, 0.0)]);
    assert_eq!(counts.tap.get(), 0);
    assert_eq!(counts.pan_start.get(), 0);

    press(&mut recognizer, P1, &[(0.0, 0.0), (3.0, 4.0)]);
    assert_eq!(counts.tap.get(), 0);
    assert_eq!(counts.pan_start.get(), 0);

    press(&mut recognizer, P1, &[(0.0, 0.0), (4.9, 0.0)]);
    assert_eq!(counts.tap.get(), 1);

    press(&mut recognizer, P1, &[(0.0, 0.0), (5.1, 0.0)]);
    assert_eq!(counts.tap.get(), 1);
    assert_eq!(counts.pan_start.get(), 1);
    assert_eq!(counts.pan_end.get(), 1);
}

#[test]
fn press_past_threshold_is_a_pan_only() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    press(
        &mut recognizer,
        P1,
        &[(0.0, 0.0), (3.0, 0.0), (6.0, 0.0), (8.0, 0.0)],
    );
    assert_eq!(counts.pan_start.get(), 1);
    assert_eq!(counts.pan_move.get(), 1);
    assert_eq!(counts.pan_end.get(), 1);
    assert_eq!(counts.tap.get(), 0);
}

#[test]
fn returning_to_the_origin_is_still_a_pan() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    press(&mut recognizer, P1, &[(0.0, 0.0), (0.0, 9.0), (0.0, 0.0)]);
    assert_eq!(counts.pan_end.get(), 1);
    assert_eq!(counts.tap.get(), 0);
}

#[test]
fn pan_event_tracks_position_and_deltas() {
    let mut recognizer = GestureRecognizer::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _start = recognizer.on_pan_start({
        let seen = Rc::clone(&seen);
        move |e: &PanEvent| seen.borrow_mut().push(("start", e.x, e.start_x, e.delta_x))
    });
    let _move = recognizer.on_pan_move({
        let seen = Rc::clone(&seen);
        move |e: &PanEvent| seen.borrow_mut().push(("move", e.x, e.start_x, e.delta_x))
    });

    recognizer.handle(&PointerEvent::down(P1, 100.0, 0.0));
    recognizer.handle(&PointerEvent::moved(P1, 110.0, 0.0));
    recognizer.handle(&PointerEvent::moved(P1, 115.0, 0.0));

    assert_eq!(
        *seen.borrow(),
        vec![("start", 110.0, 110.0, 10.0), ("move", 115.0, 110.0, 5.0)]
    );
    let live = recognizer.pan().event(P1).unwrap();
    assert!(live.is_panning());
    assert_eq!(live.pointer_id, P1);
}

#[test]
fn pan_events_are_released_exactly_once() {
    let mut recognizer = GestureRecognizer::default();
    let (_counts, _subs) = counted(&mut recognizer);

    for _ in 0..10 {
        press(&mut recognizer, P1, &[(0.0, 0.0), (20.0, 0.0)]);
        press(&mut recognizer, P1, &[(0.0, 0.0), (1.0, 0.0)]);
    }
    let pool = recognizer.pan().pool();
    assert_eq!(pool.capacity(), 1);
    assert_eq!(pool.used_len(), 0);
    assert_eq!(pool.available_len(), 1);
    assert_eq!(recognizer.pan().active_pointers(), 0);

    // Down twice without an up: the first instance is recycled, not leaked.
    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::down(P1, 5.0, 5.0));
    let pool = recognizer.pan().pool();
    assert_eq!(pool.used_len(), 1);
    assert_eq!(pool.capacity(), 1);
    assert_eq!(recognizer.pan().event(P1).map(|e| e.x), Some(5.0));
}

#[test]
fn concurrent_pointers_pan_independently() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::down(P2, 100.0, 100.0));
    assert_eq!(recognizer.pan().pool().used_len(), 2);

    recognizer.handle(&PointerEvent::moved(P1, 0.0, 30.0));
    recognizer.handle(&PointerEvent::moved(P2, 101.0, 100.0));
    assert_eq!(counts.pan_start.get(), 1);

    recognizer.handle(&PointerEvent::up(P2, 101.0, 100.0));
    assert_eq!(counts.tap.get(), 1);
    recognizer.handle(&PointerEvent::up(P1, 0.0, 30.0));
    assert_eq!(counts.pan_end.get(), 1);
    assert_eq!(recognizer.pan().pool().used_len(), 0);
}

#[test]
fn leave_ends_a_pan_and_drops_a_tap() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 10.0));
    recognizer.handle(&PointerEvent::leave(P1, 0.0, 12.0));
    assert_eq!(counts.pan_end.get(), 1);

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::leave(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::up(P1, 0.0, 0.0));
    assert_eq!(counts.tap.get(), 0);
    assert_eq!(counts.pan_end.get(), 1);
    assert_eq!(recognizer.pan().pool().used_len(), 0);
}

#[test]
fn cancel_ends_a_pan_as_cancelled() {
    let mut recognizer = GestureRecognizer::default();
    let cancelled = Rc::new(Cell::new(None));
    let _end = recognizer.on_pan_end({
        let cancelled = Rc::clone(&cancelled);
        move |e: &PanEvent| cancelled.set(Some(e.is_cancelled()))
    });

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 10.0));
    recognizer.handle(&PointerEvent::cancel(P1));
    assert_eq!(cancelled.get(), Some(true));
    assert_eq!(recognizer.pan().event(P1).map(|e| e.y), None);
    assert_eq!(recognizer.pan().pool().used_len(), 0);

    // A later up for the forgotten pointer is ignored.
    cancelled.set(None);
    recognizer.handle(&PointerEvent::up(P1, 0.0, 10.0));
    assert_eq!(cancelled.get(), None);
}

#[test]
fn newest_listener_runs_first_and_can_stop_propagation() {
    let mut listeners = Listeners::<Ping>::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    let stop_in_b = Rc::new(Cell::new(true));

    let _a = listeners.subscribe(None, {
        let order = Rc::clone(&order);
        move |_: &Ping| order.borrow_mut().push("a")
    });
    let _b = listeners.subscribe(None, {
        let order = Rc::clone(&order);
        let stop = Rc::clone(&stop_in_b);
        move |e: &Ping| {
            order.borrow_mut().push("b");
            if stop.get() {
                e.stopped.set(true);
            }
        }
    });
    let _c = listeners.subscribe(None, {
        let order = Rc::clone(&order);
        move |_: &Ping| order.borrow_mut().push("c")
    });

    let ping = Ping::new(None);
    listeners.notify(&ping, &any_element());
    assert_eq!(*order.borrow(), vec!["c", "b"]);
    assert!(!ping.is_propagation_stopped());

    order.borrow_mut().clear();
    stop_in_b.set(false);
    listeners.notify(&ping, &any_element());
    assert_eq!(*order.borrow(), vec!["c", "b", "a"]);
}

#[test]
fn unsubscribed_listeners_stop_receiving_and_their_slots_are_reused() {
    let mut listeners = Listeners::<Ping>::new();
    let hits = Rc::new(Cell::new(0usize));

    let sub = listeners.subscribe(None, {
        let hits = Rc::clone(&hits);
        move |_: &Ping| bump(&hits)
    });
    listeners.notify(&Ping::new(None), &any_element());
    assert_eq!(hits.get(), 1);

    assert!(sub.unsubscribe());
    assert!(listeners.is_empty());
    assert_eq!(listeners.available_len(), 1);
    listeners.notify(&Ping::new(None), &any_element());
    assert_eq!(hits.get(), 1);

    let again = listeners.subscribe(None, |_: &Ping| {});
    assert_eq!(listeners.available_len(), 0);
    listeners.clear();
    assert!(!again.unsubscribe());
}

#[test]
fn listeners_can_unsubscribe_while_being_notified() {
    let mut listeners = Listeners::<Ping>::new();
    let slot: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0usize));

    let sub = listeners.subscribe(None, {
        let slot = Rc::clone(&slot);
        let hits = Rc::clone(&hits);
        move |_: &Ping| {
            bump(&hits);
            if let Some(sub) = slot.borrow_mut().take() {
                assert!(sub.unsubscribe());
            }
        }
    });
    *slot.borrow_mut() = Some(sub);

    listeners.notify(&Ping::new(None), &any_element());
    listeners.notify(&Ping::new(None), &any_element());
    assert_eq!(hits.get(), 1);
    assert!(listeners.is_empty());
}

#[test]
fn within_listeners_only_see_their_subtree() {
    // Element n contains n * 10 .. n * 10 + 9.
    let mut recognizer = GestureRecognizer::default()
        .with_containment(|ancestor, target| ancestor == target || target.0 / 10 == ancestor.0);
    let first = Rc::new(Cell::new(0usize));
    let second = Rc::new(Cell::new(0usize));
    let _a = recognizer.on_tap_within(ElementId(1), {
        let first = Rc::clone(&first);
        move |_: &TapEvent| bump(&first)
    });
    let _b = recognizer.on_tap_within(ElementId(2), {
        let second = Rc::clone(&second);
        move |_: &TapEvent| bump(&second)
    });

    let target = ElementId(12);
    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0).with_target(target));
    recognizer.handle(&PointerEvent::up(P1, 0.0, 0.0).with_target(target));
    assert_eq!((first.get(), second.get()), (1, 0));

    press(&mut recognizer, P1, &[(0.0, 0.0)]);
    assert_eq!((first.get(), second.get()), (2, 1));
}

#[test]
fn pan_start_within_filters_by_press_target() {
    let mut recognizer = GestureRecognizer::default();
    let hits = Rc::new(Cell::new(0usize));
    let _sub = recognizer.on_pan_start_within(ElementId(7), {
        let hits = Rc::clone(&hits);
        move |_: &PanEvent| bump(&hits)
    });

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0).with_target(ElementId(8)));
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 50.0));
    recognizer.handle(&PointerEvent::up(P1, 0.0, 50.0));
    assert_eq!(hits.get(), 0);

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0).with_target(ElementId(7)));
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 50.0));
    assert_eq!(hits.get(), 1);
}

#[test]
fn clear_listeners_keeps_tracking_pointers() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, subs) = counted(&mut recognizer);

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.clear_listeners();
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 50.0));
    recognizer.handle(&PointerEvent::up(P1, 0.0, 50.0));
    assert_eq!(counts.pan_start.get(), 0);
    assert_eq!(recognizer.pan().pool().used_len(), 0);

    for sub in subs {
        assert!(!sub.unsubscribe());
    }
}

#[test]
fn dispose_detaches_everything() {
    let mut recognizer = GestureRecognizer::default();
    let (counts, _subs) = counted(&mut recognizer);

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 50.0));
    recognizer.handle(&PointerEvent::down(P2, 0.0, 0.0));
    recognizer.dispose();

    assert!(recognizer.is_disposed());
    assert_eq!(recognizer.pan().pool().used_len(), 0);
    assert_eq!(recognizer.pan().active_pointers(), 0);
    assert!(!recognizer.tap().is_candidate(P2));

    recognizer.handle(&PointerEvent::up(P1, 0.0, 50.0));
    recognizer.handle(&PointerEvent::up(P2, 0.0, 0.0));
    assert_eq!(counts.pan_end.get(), 0);
    assert_eq!(counts.tap.get(), 0);
}

#[test]
fn negative_threshold_is_clamped() {
    let recognizer = GestureRecognizer::new(GestureOptions::new().with_threshold(-3.0));
    assert_eq!(recognizer.options().threshold, 0.0);
    assert_eq!(recognizer.options().tap_suppression_ms, 300);
}

fn scroll_fixture() -> (
    Rc<FakeClock>,
    Rc<RefCell<ScrollDomain>>,
    GestureRecognizer,
    PanScroll,
) {
    let clock = Rc::new(FakeClock::new(1_000));
    let domain = Rc::new(RefCell::new(ScrollDomain::new(
        clock.clone(),
        ScrollOptions::new(),
    )));
    let mut recognizer = GestureRecognizer::default();
    let scroll = PanScroll::bind(&mut recognizer, domain.clone(), clock.clone());
    (clock, domain, recognizer, scroll)
}

#[test]
fn pans_drive_the_bound_domain() {
    let (clock, domain, mut recognizer, scroll) = scroll_fixture();

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    clock.advance(16);
    recognizer.handle(&PointerEvent::moved(P1, 0.0, -3.0));
    assert_eq!(domain.borrow().phase(), Phase::Idle);

    clock.advance(16);
    recognizer.handle(&PointerEvent::moved(P1, 0.0, -10.0));
    assert_eq!(domain.borrow().phase(), Phase::Dragging);
    assert_eq!(scroll.active_pointer(), Some(P1));

    clock.advance(16);
    recognizer.handle(&PointerEvent::moved(P1, 0.0, -40.0));
    let offset = domain.borrow().offset();
    assert_eq!(offset.x, 0.0);
    assert!((offset.y + 10.0).abs() < 1e-9);

    clock.advance(16);
    recognizer.handle(&PointerEvent::up(P1, 0.0, -40.0));
    assert_eq!(domain.borrow().phase(), Phase::Momentum);
    assert_eq!(scroll.active_pointer(), None);
}

#[test]
fn a_second_pointer_does_not_steal_the_drag() {
    let (clock, domain, mut recognizer, scroll) = scroll_fixture();

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    recognizer.handle(&PointerEvent::down(P2, 50.0, 50.0));
    clock.advance(16);
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 20.0));
    recognizer.handle(&PointerEvent::moved(P2, 50.0, 90.0));
    assert_eq!(scroll.active_pointer(), Some(P1));

    recognizer.handle(&PointerEvent::up(P2, 50.0, 90.0));
    assert_eq!(domain.borrow().phase(), Phase::Dragging);
    recognizer.handle(&PointerEvent::up(P1, 0.0, 20.0));
    assert_ne!(domain.borrow().phase(), Phase::Dragging);
}

#[test]
fn taps_right_after_scrolling_are_swallowed() {
    let (clock, domain, mut recognizer, mut scroll) = scroll_fixture();
    let taps = Rc::new(Cell::new(0usize));
    scroll.on_tap(&mut recognizer, {
        let taps = Rc::clone(&taps);
        move |_: &TapEvent| bump(&taps)
    });

    press(&mut recognizer, P1, &[(5.0, 5.0)]);
    assert_eq!(taps.get(), 1);

    // A slow drag settles at once, but the release is still recent.
    {
        let mut d = domain.borrow_mut();
        d.pointer_start(0.0, 0.0);
        clock.advance(16);
        d.pointer_move(0.0, 1.0);
        d.pointer_end();
        assert_eq!(d.phase(), Phase::Idle);
    }
    clock.advance(100);
    press(&mut recognizer, P1, &[(5.0, 5.0)]);
    assert_eq!(taps.get(), 1);

    clock.advance(301);
    press(&mut recognizer, P1, &[(5.0, 5.0)]);
    assert_eq!(taps.get(), 2);

    {
        let mut d = domain.borrow_mut();
        d.pointer_start(0.0, 0.0);
        for y in [30.0, 60.0, 90.0] {
            clock.advance(16);
            d.pointer_move(0.0, y);
        }
        d.pointer_end();
        assert_eq!(d.phase(), Phase::Momentum);
    }
    clock.advance(1_000);
    press(&mut recognizer, P1, &[(5.0, 5.0)]);
    assert_eq!(taps.get(), 2);
    assert_eq!(domain.borrow().phase(), Phase::Idle);
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn a_new_domain_does_not_swallow_taps() {
    let clock = Rc::new(FakeClock::new(0));
    let domain = Rc::new(RefCell::new(ScrollDomain::new(
        clock.clone(),
        ScrollOptions::new(),
    )));
    assert_eq!(domain.borrow().last_interaction_ms(), None);

    let mut recognizer = GestureRecognizer::default();
    let mut scroll = PanScroll::bind(&mut recognizer, domain.clone(), clock.clone());
    let taps = Rc::new(Cell::new(0usize));
    scroll.on_tap(&mut recognizer, {
        let taps = Rc::clone(&taps);
        move |_: &TapEvent| bump(&taps)
    });

    press(&mut recognizer, P1, &[(5.0, 5.0)]);
    assert_eq!(taps.get(), 1);
    assert_eq!(domain.borrow().phase(), Phase::Idle);
}

#[test]
fn unbind_releases_an_active_drag() {
    let (clock, domain, mut recognizer, scroll) = scroll_fixture();

    recognizer.handle(&PointerEvent::down(P1, 0.0, 0.0));
    clock.advance(16);
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 20.0));
    assert_eq!(domain.borrow().phase(), Phase::Dragging);

    scroll.unbind();
    assert_ne!(domain.borrow().phase(), Phase::Dragging);

    clock.advance(16);
    recognizer.handle(&PointerEvent::moved(P1, 0.0, 200.0));
    recognizer.handle(&PointerEvent::up(P1, 0.0, 200.0));
    assert_eq!(domain.borrow().offset().y, 0.0);
}
