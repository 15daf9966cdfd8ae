//! Receiver-wide configuration shared by every demodulator.
//!
//! These values describe the SDR front end the client is attached to, not any
//! single demodulator. They are injected explicitly at construction instead of
//! being read from process-wide state, so tests and multi-receiver setups can
//! hold several contexts side by side.

/// Ambient receiver configuration.
///
/// - `center_freq`: absolute tuning center of the receiver, Hz
/// - `bandwidth`: total visible/processable IF bandwidth, Hz; demodulator
///   offsets must stay within `±bandwidth/2`
/// - `tuning_step`: grid for offset snapping, Hz; `0` disables snapping
/// - `output_rate`: audio output sample rate, Hz; used as a permissive
///   fallback when no filter-limit class is known for a modulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverContext {
    pub center_freq: i64,
    pub bandwidth: i64,
    pub tuning_step: i64,
    pub output_rate: u32,
}

impl ReceiverContext {
    pub fn new(center_freq: i64, bandwidth: i64, tuning_step: i64, output_rate: u32) -> Self {
        Self {
            center_freq,
            bandwidth,
            tuning_step,
            output_rate,
        }
    }

    /// Largest offset magnitude a demodulator may take, in Hz.
    pub fn max_offset(&self) -> i64 {
        self.bandwidth / 2
    }
}
