//! Pointer gesture recognition for `kinetic` scroll domains.
//!
//! The host forwards raw pointer events to a [`GestureRecognizer`], which classifies them into:
//! - pans (start/move/end), once a pointer travels past the threshold (5 units by default)
//! - taps, for presses released closer than the threshold to where they went down
//!
//! [`PanScroll`] binds a recognizer to any [`kinetic::Scrollable`] so pans drive the domain's
//! `pointer_start`/`pointer_move`/`pointer_end`.
//!
//! Per-pointer pan state lives in pooled [`PanEvent`] instances (see [`Pool`]), so a steady
//! stream of presses does not allocate.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod bind;
mod event;
mod listener;
mod pan;
mod pool;
mod recognizer;
mod tap;

#[cfg(test)]
mod tests;

pub use bind::PanScroll;
pub use event::{Containment, ElementId, PointerEvent, PointerId, PointerPhase};
pub use listener::{Listeners, Propagation, Unsubscribe};
pub use pan::{PanEvent, PanGesture};
pub use pool::{Pool, PoolHandle};
pub use recognizer::{Gesture, GestureOptions, GestureRecognizer};
pub use tap::{TapEvent, TapGesture};
