use std::rc::Rc;

use kinetic::{Axis, AxisOptions, FakeClock, FrameClock, SnapAxisDomain};

fn main() {
    // A headless fling on a paged list: 20 pages of 100px, 300px viewport.
    //
    // A host would:
    // - forward pointer positions to pointer_start/pointer_move/pointer_end
    // - deliver each requested frame id back through frame(id) on its next animation frame
    // - apply offset() to the real scroll container
    let clock = Rc::new(FakeClock::new(0));
    let mut axis = SnapAxisDomain::new(
        clock.clone(),
        AxisOptions::new()
            .with_bounds(0.0, 1_700.0)
            .with_snap_interval(100.0),
    );
    axis.set_on_scroll_end(Some(|a: &dyn Axis| {
        println!("scroll end: start={} phase={:?}", a.start(), a.phase());
    }));

    axis.pointer_start(400.0);
    for y in [380.0, 340.0, 290.0, 230.0] {
        clock.advance(16);
        axis.pointer_move(y);
    }
    axis.pointer_end();
    println!(
        "released: offset={:.1} velocity={:.2} phase={:?} resting target={:.1}",
        axis.offset(),
        axis.velocity(),
        axis.phase(),
        axis.resting_target()
    );

    let frames = clock.run_frames(16, 10_000, |id| {
        axis.frame(id);
        if clock.now_ms() % 160 == 0 {
            println!("t={} offset={:.1}", clock.now_ms(), axis.offset());
        }
    });
    println!("done after {frames} frames: offset={}", axis.offset());
}
