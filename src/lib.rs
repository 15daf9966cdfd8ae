pub mod context;
pub mod demod; // Parameter model, constraint gate, backend sync
pub mod gesture; // Envelope hit-testing and drag/wheel interpretation
pub mod modes;
pub mod prefs;
pub mod transport;

pub use context::ReceiverContext;
pub use demod::Demodulator;
pub use gesture::GestureInterpreter;

/// Wheel adjustment granularity for passband edges, in Hz.
pub const WHEEL_STEP_HZ: i64 = 50;
