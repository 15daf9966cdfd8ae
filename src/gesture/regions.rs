//! Pixel-space hit regions for the rendered envelope.
//!
//! The rendering layer recomputes these every frame from the model's current
//! values and its frequency-to-pixel projection; the interpreter only tests
//! membership. Intervals are inclusive at both endpoints.

/// An inclusive pixel interval along the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// A range that matches nothing.
    pub fn empty() -> Self {
        Self {
            start: 0.0,
            end: -1.0,
        }
    }

    /// Inclusive membership test.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.start && x <= self.end
    }
}

/// The draggable regions of one rendered envelope.
#[derive(Debug, Clone, Copy)]
pub struct HitRegions {
    /// Grab handle around the low-cut edge.
    pub beginning: PixelRange,
    /// Grab handle around the high-cut edge.
    pub ending: PixelRange,
    /// The whole envelope body.
    pub whole_envelope: PixelRange,
    /// The carrier/offset indicator line.
    pub line: PixelRange,
    pub envelope_visible: bool,
    pub line_visible: bool,
}

impl HitRegions {
    /// Regions for an envelope that is not currently drawn.
    pub fn hidden() -> Self {
        Self {
            beginning: PixelRange::empty(),
            ending: PixelRange::empty(),
            whole_envelope: PixelRange::empty(),
            line: PixelRange::empty(),
            envelope_visible: false,
            line_visible: false,
        }
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };
}
