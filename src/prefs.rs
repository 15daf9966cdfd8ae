//! Per-mode bandpass preferences.
//!
//! Every successful user edit of the passband (outside secondary-demod
//! overlays) is remembered keyed by modulation, so re-selecting a mode
//! restores the operator's last passband instead of the registry default.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::modes::Bandpass;

/// Storage for user bandpass preferences, one entry per modulation.
pub trait BandpassStore {
    fn load(&self, modulation: &str) -> Option<Bandpass>;
    fn save(&mut self, modulation: &str, bandpass: Bandpass);
}

/// Session-local store. Clones share the same entries, so a handle kept by
/// the caller observes saves made through a demodulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, Bandpass>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Self {
        self.clone()
    }
}

impl BandpassStore for MemoryStore {
    fn load(&self, modulation: &str) -> Option<Bandpass> {
        self.entries.borrow().get(modulation).copied()
    }

    fn save(&mut self, modulation: &str, bandpass: Bandpass) {
        self.entries
            .borrow_mut()
            .insert(modulation.to_owned(), bandpass);
    }
}
