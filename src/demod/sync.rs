//! Minimal-diff synchronization against the backend's parameter state.
//!
//! The backend keeps its own copy of every demodulator parameter; the client
//! tracks what it last sent and transmits only the fields that differ. An
//! empty diff means no message at all.

use serde_json::Value;

use crate::transport::ParamDelta;

/// Fields that may appear in a parameter message, in wire order.
pub const FIELDS: &[&str] = &[
    "low_cut",
    "high_cut",
    "offset_freq",
    "mod",
    "dmr_filter",
    "audio_service_id",
    "squelch_level",
    "secondary_mod",
    "secondary_offset_freq",
];

/// Fields of `current` that are new or changed relative to `baseline`.
pub fn changed_fields(current: &ParamDelta, baseline: &ParamDelta) -> ParamDelta {
    let mut diff = ParamDelta::new();
    for (key, value) in current {
        if baseline.get(key) != Some(value) {
            diff.insert(*key, value.clone());
        }
    }
    diff
}

/// Fold an acknowledged diff into the baseline.
pub fn merge(baseline: &mut ParamDelta, sent: &ParamDelta) {
    for (key, value) in sent {
        baseline.insert(*key, value.clone());
    }
}

/// Helper for building snapshots: absent optional values become JSON null,
/// which the backend reads as "revert to the full passband".
pub fn value_or_null<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}
