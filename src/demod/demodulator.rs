//! The per-channel demodulator parameter model.
//!
//! Owns offset, passband, squelch and mode selection for one demodulator,
//! enforces the passband constraints, and keeps the backend in step by
//! pushing minimal field diffs. Every invalid request is a silent no-op: the
//! operator sees the unmodified envelope and can retry with a smaller
//! gesture, so nothing here ever needs to raise an error.

use serde_json::Value;
use tracing::{debug, trace};

use super::limits::{self, FilterLimits, MIN_PASSBAND};
use super::sync;
use crate::context::ReceiverContext;
use crate::modes::{self, Bandpass};
use crate::prefs::BandpassStore;
use crate::transport::{ControlMessage, ControlSink, ParamDelta};

/// Notifications raised by the model, delivered synchronously to listeners
/// in registration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemodEvent {
    /// The tuning offset changed; carries the new offset in Hz.
    FrequencyChange(i64),
    /// The squelch level changed; carries the new level.
    SquelchChange(f64),
}

pub struct Demodulator {
    ctx: ReceiverContext,
    modulation: String,
    secondary_mod: Option<String>,
    offset_freq: i64,
    bandpass: Option<Bandpass>,
    filter_limits: FilterLimits,
    squelch_level: f64,
    dmr_filter: i64,
    audio_service_id: i64,
    secondary_offset_freq: i64,
    last_sent: ParamDelta,
    started: bool,
    sink: Box<dyn ControlSink>,
    prefs: Box<dyn BandpassStore>,
    listeners: Vec<Box<dyn FnMut(&DemodEvent)>>,
}

impl Demodulator {
    /// Create a model for one demodulator.
    ///
    /// The initial passband comes from the preference store, falling back to
    /// the mode registry default; some modes run without a passband at all.
    pub fn new(
        modulation: &str,
        ctx: ReceiverContext,
        sink: Box<dyn ControlSink>,
        prefs: Box<dyn BandpassStore>,
    ) -> Self {
        let bandpass = prefs
            .load(modulation)
            .or_else(|| modes::find_by_modulation(modulation).and_then(|m| m.bandpass()));
        let filter_limits = limits::limits_for(modulation, None, ctx.output_rate);

        Self {
            ctx,
            modulation: modulation.to_owned(),
            secondary_mod: None,
            offset_freq: 0,
            bandpass,
            filter_limits,
            squelch_level: 0.0,
            dmr_filter: 3,
            audio_service_id: 0,
            secondary_offset_freq: 1000,
            last_sent: ParamDelta::new(),
            started: false,
            sink,
            prefs,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for model events.
    pub fn on_event(&mut self, listener: impl FnMut(&DemodEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // --- accessors -------------------------------------------------------

    pub fn context(&self) -> &ReceiverContext {
        &self.ctx
    }

    pub fn modulation(&self) -> &str {
        &self.modulation
    }

    pub fn secondary_mod(&self) -> Option<&str> {
        self.secondary_mod.as_deref()
    }

    pub fn offset_freq(&self) -> i64 {
        self.offset_freq
    }

    pub fn bandpass(&self) -> Option<Bandpass> {
        self.bandpass
    }

    pub fn filter_limits(&self) -> FilterLimits {
        self.filter_limits
    }

    pub fn min_passband(&self) -> i64 {
        MIN_PASSBAND
    }

    pub fn squelch_level(&self) -> f64 {
        self.squelch_level
    }

    /// Whether the current mode carries a squelch at all. Digital modes
    /// gate on sync instead of signal level, so their squelch controls
    /// should be hidden or disabled.
    pub fn squelch_available(&self) -> bool {
        modes::find_by_modulation(&self.modulation).map_or(true, |m| m.squelch)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    // --- mutators --------------------------------------------------------

    /// Move the tuning offset. No-op when the target is non-finite, outside
    /// `±bandwidth/2`, or equal to the current offset after rounding.
    pub fn set_offset_frequency(&mut self, target: f64) {
        if !target.is_finite() || target.abs() > self.ctx.max_offset() as f64 {
            return;
        }
        let rounded = target.round() as i64;
        if rounded == self.offset_freq {
            return;
        }
        self.offset_freq = rounded;
        self.sync();
        self.emit(DemodEvent::FrequencyChange(rounded));
    }

    /// Move one or both passband edges, subject to the constraint gate.
    ///
    /// Each proposed edge is checked against the *other edge's current*
    /// value, so a call moving both edges evaluates them independently. A
    /// rejected call leaves the passband untouched and sends nothing.
    /// Accepted edits outside a secondary overlay are remembered as the
    /// user's preference for this modulation.
    pub fn move_bandpass(&mut self, new_low: i64, new_high: i64) {
        let Some(current) = self.bandpass else {
            trace!("passband edit ignored, no passband active");
            return;
        };
        let limits = self.filter_limits;
        if new_low < limits.low
            || current.high_cut - new_low < MIN_PASSBAND
            || new_low >= current.high_cut
            || new_high > limits.high
            || new_high - current.low_cut < MIN_PASSBAND
            || new_high <= current.low_cut
        {
            trace!(new_low, new_high, "passband edit rejected");
            return;
        }
        let bandpass = Bandpass::new(new_low, new_high);
        if self.secondary_mod.is_none() {
            self.prefs.save(&self.modulation, bandpass);
        }
        self.bandpass = Some(bandpass);
        self.sync();
    }

    /// Unconditionally replace the passband, e.g. on a mode switch.
    pub fn set_bandpass(&mut self, bandpass: Bandpass) {
        self.bandpass = Some(bandpass);
        self.sync();
    }

    /// Drop the passband entirely; the backend reverts to the full IF width.
    pub fn disable_bandpass(&mut self) {
        self.bandpass = None;
        self.sync();
    }

    pub fn set_squelch(&mut self, level: f64) {
        if level == self.squelch_level {
            return;
        }
        self.squelch_level = level;
        self.sync();
        self.emit(DemodEvent::SquelchChange(level));
    }

    pub fn set_dmr_filter(&mut self, value: i64) {
        self.dmr_filter = value;
        self.sync();
    }

    pub fn set_audio_service_id(&mut self, value: i64) {
        self.audio_service_id = value;
        self.sync();
    }

    pub fn set_secondary_offset(&mut self, freq: i64) {
        self.secondary_offset_freq = freq;
        self.sync();
    }

    /// Select or clear the secondary (overlay) decoder. Changing it moves
    /// the demodulator into a different bandwidth class, so the filter
    /// limits are recomputed.
    pub fn set_secondary_demod(&mut self, value: Option<&str>) {
        if self.secondary_mod.as_deref() == value {
            return;
        }
        self.secondary_mod = value.map(str::to_owned);
        self.filter_limits =
            limits::limits_for(&self.modulation, value, self.ctx.output_rate);
        self.sync();
    }

    /// Mark the model active: tell the backend to begin producing output,
    /// then push the full parameter set (everything differs from the empty
    /// baseline).
    pub fn start(&mut self) {
        self.started = true;
        self.sink.push(ControlMessage::Start);
        self.sync();
    }

    // --- synchronization -------------------------------------------------

    fn snapshot(&self) -> ParamDelta {
        let mut params = ParamDelta::new();
        params.insert(
            "low_cut",
            sync::value_or_null(self.bandpass.map(|b| b.low_cut)),
        );
        params.insert(
            "high_cut",
            sync::value_or_null(self.bandpass.map(|b| b.high_cut)),
        );
        params.insert("offset_freq", Value::from(self.offset_freq));
        params.insert("mod", Value::from(self.modulation.as_str()));
        params.insert("dmr_filter", Value::from(self.dmr_filter));
        params.insert("audio_service_id", Value::from(self.audio_service_id));
        params.insert("squelch_level", Value::from(self.squelch_level));
        params.insert(
            "secondary_mod",
            sync::value_or_null(self.secondary_mod.as_deref()),
        );
        params.insert(
            "secondary_offset_freq",
            Value::from(self.secondary_offset_freq),
        );
        params
    }

    fn sync(&mut self) {
        if !self.started {
            return;
        }
        let diff = sync::changed_fields(&self.snapshot(), &self.last_sent);
        if diff.is_empty() {
            return;
        }
        debug!(fields = diff.len(), "pushing parameter diff");
        sync::merge(&mut self.last_sent, &diff);
        self.sink.push(ControlMessage::Params(diff));
    }

    fn emit(&mut self, event: DemodEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}
