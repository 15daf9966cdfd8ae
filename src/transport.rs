//! Push-only control channel to the signal-processing backend.
//!
//! The backend holds demodulator state itself and interprets a partial-field
//! message as "update only the named fields", so the model only ever pushes
//! minimal diffs. Delivery is fire-and-forget; at-most-once semantics are the
//! transport's concern, not ours.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

/// A minimal set of changed parameters, field name to new value.
pub type ParamDelta = BTreeMap<&'static str, Value>;

/// Messages the model pushes toward the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    /// Tell the backend to begin producing output for this demodulator.
    Start,
    /// Update only the named parameters.
    Params(ParamDelta),
}

/// A channel that accepts control messages. Implementations must not block.
pub trait ControlSink {
    fn push(&mut self, msg: ControlMessage);
}

/// Sink that records every message, for tests and on-screen inspection.
///
/// Clones share the same underlying log, so a handle kept by the caller still
/// sees messages after the sink itself has been moved into a demodulator.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Rc<RefCell<Vec<ControlMessage>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle onto the same message log.
    pub fn handle(&self) -> Self {
        self.clone()
    }

    pub fn messages(&self) -> Vec<ControlMessage> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl ControlSink for RecordingSink {
    fn push(&mut self, msg: ControlMessage) {
        self.messages.borrow_mut().push(msg);
    }
}

/// Ring-buffer sink for handing messages to a writer thread. A full buffer
/// drops the message; the next diff re-sends anything still out of date.
#[cfg(feature = "rtrb")]
impl ControlSink for rtrb::Producer<ControlMessage> {
    fn push(&mut self, msg: ControlMessage) {
        if rtrb::Producer::push(self, msg).is_err() {
            tracing::trace!("control ring buffer full, dropping message");
        }
    }
}
