//! Demodulator parameter state: constraints, limits, and backend sync.

mod demodulator;
pub mod limits;
pub mod sync;

pub use demodulator::{DemodEvent, Demodulator};
pub use limits::{BandwidthClass, FilterLimits, MIN_PASSBAND};
