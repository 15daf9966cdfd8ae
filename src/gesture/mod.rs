//! Envelope gesture interpretation: hit regions, drag lifecycle, wheel.

mod interpreter;
mod regions;

pub use interpreter::{DragTarget, GestureInterpreter};
pub use regions::{HitRegions, Modifiers, PixelRange};
