use std::cell::RefCell;
use std::rc::Rc;

use kinetic::{FakeClock, FrameClock, Position, ScrollDomain, ScrollOptions, Scrollable};
use kinetic_gesture::{GestureRecognizer, PanScroll, PointerEvent, PointerId};

fn main() {
    // Raw pointer events in, scroll offsets out. A host forwards its element's pointer events to
    // the recognizer and delivers frames to the domain; nothing here touches a real UI.
    let clock = Rc::new(FakeClock::new(0));
    let domain = Rc::new(RefCell::new(ScrollDomain::new(
        clock.clone(),
        ScrollOptions::new().with_bounds(Position::new(0.0, 0.0), Position::new(0.0, 4_000.0)),
    )));

    let mut recognizer = GestureRecognizer::default();
    let mut scroll = PanScroll::bind(&mut recognizer, domain.clone(), clock.clone());
    scroll.on_tap(&mut recognizer, |tap| {
        println!("tap at ({}, {})", tap.x, tap.y);
    });

    let finger = PointerId(1);
    recognizer.handle(&PointerEvent::down(finger, 200.0, 600.0));
    for y in [598.0, 580.0, 540.0, 480.0, 400.0] {
        clock.advance(16);
        recognizer.handle(&PointerEvent::moved(finger, 200.0, y));
    }
    recognizer.handle(&PointerEvent::up(finger, 200.0, 400.0));
    println!(
        "released: offset={:?} phase={:?}",
        domain.borrow().offset(),
        domain.borrow().phase()
    );

    // Let the fling coast for a while, then tap to catch it.
    for _ in 0..20 {
        let Some(id) = clock.next_frame() else {
            break;
        };
        clock.advance(16);
        domain.borrow_mut().frame(id);
    }
    println!("coasting: offset={:?}", domain.borrow().offset());

    recognizer.handle(&PointerEvent::down(finger, 200.0, 300.0));
    recognizer.handle(&PointerEvent::up(finger, 200.0, 300.0));
    println!(
        "caught: offset={:?} phase={:?} pending frames={}",
        domain.borrow().offset(),
        domain.borrow().phase(),
        clock.pending_frames()
    );

    // Once the list has been still for a moment, taps reach the app again.
    clock.advance(500);
    recognizer.handle(&PointerEvent::down(finger, 120.0, 80.0));
    recognizer.handle(&PointerEvent::up(finger, 120.0, 80.0));
    println!("now={}", clock.now_ms());

    scroll.unbind();
}
