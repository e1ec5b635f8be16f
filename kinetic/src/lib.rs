//! Headless scroll kinematics: momentum, elastic bounds and snapping.
//!
//! For pointer gesture recognition (pan/tap) and wiring gestures into a domain, see the
//! `kinetic-gesture` crate.
//!
//! This crate simulates how a scrollable surface should move and leaves everything visual to
//! the host:
//! - the host feeds pointer positions (`pointer_start`/`pointer_move`/`pointer_end`)
//! - the domain requests animation frames from an injected [`FrameClock`] and the host delivers
//!   them back via `frame(id)`
//! - the host renders whatever it reads from `offset_broadcast()` (subscribe to re-render)
//!
//! Offsets are negative scroll positions. A domain with `min = 0, max = 500` keeps its offset in
//! `[-500, 0]`, and `start()`/`top()` report the positive scroll position.
//!
//! All state is single-threaded (`Rc`/`RefCell`); a domain is expected to live on the UI thread
//! next to the frame loop that drives it.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod axis;
mod clock;
mod easing;
mod engine;
pub mod kinematics;
mod motion;
mod observable;
mod options;
mod planar;
mod snap_axis;
mod snap_planar;
mod types;
mod velocity;


pub use axis::{Axis, AxisDomain, AxisHandler};
pub use clock::{FakeClock, FnClock, FrameClock, FrameId};
pub use easing::Easing;
pub use kinematics::Bounds;
pub use motion::{Motion, MotionFrame, Tween};
pub use observable::{Broadcast, Observable, Subscription};
pub use options::{AxisOptions, MomentumConfig, ScrollOptions};
pub use planar::{ScrollDomain, ScrollHandler, Scrollable};
pub use snap_axis::SnapAxisDomain;
pub use snap_planar::SnapScrollDomain;
pub use types::{Phase, Position, Size, Vector};
pub use velocity::VelocityEstimator;
