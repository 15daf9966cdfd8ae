//! Classifies pointer gestures over the envelope and drives the model.
//!
//! A drag is always computed against the origin snapshot taken at
//! drag-start, never incrementally: dropped or reordered pointer-move events
//! cannot accumulate drift, only the last processed move before drag-end
//! matters.

use tracing::trace;

use super::regions::{HitRegions, Modifiers};
use crate::demod::Demodulator;
use crate::WHEEL_STEP_HZ;

/// What the active drag is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The low-cut edge.
    Beginning,
    /// The high-cut edge.
    Ending,
    /// The envelope body: retunes the offset.
    Envelope,
    /// Shift-drag on the carrier line: offset moves against the drag while
    /// the passband follows, beat-frequency-oscillator style.
    Bfo,
    /// Shift-drag on the body: passband shift without retuning.
    Pbs,
}

/// Model values frozen at drag start.
#[derive(Debug, Clone, Copy, Default)]
struct DragOrigin {
    pointer_x: f64,
    low_cut: i64,
    high_cut: i64,
    offset_freq: i64,
}

/// Interprets pointer and wheel input against one demodulator's envelope.
///
/// One interpreter per demodulator. The rendering layer refreshes the hit
/// regions every frame via [`GestureInterpreter::update_regions`].
pub struct GestureInterpreter {
    regions: HitRegions,
    active: Option<DragTarget>,
    origin: DragOrigin,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self {
            regions: HitRegions::hidden(),
            active: None,
            origin: DragOrigin::default(),
        }
    }

    /// Replace the hit regions with the ones from the latest render frame.
    pub fn update_regions(&mut self, regions: HitRegions) {
        self.regions = regions;
    }

    pub fn active_drag(&self) -> Option<DragTarget> {
        self.active
    }

    /// Classify a pointer position. Pure; first match wins.
    pub fn classify(x: f64, regions: &HitRegions, modifiers: Modifiers) -> Option<DragTarget> {
        if modifiers.shift && regions.line_visible && regions.line.contains(x) {
            return Some(DragTarget::Bfo);
        }
        if modifiers.shift && regions.envelope_visible && regions.whole_envelope.contains(x) {
            return Some(DragTarget::Pbs);
        }
        if regions.beginning.contains(x) {
            return Some(DragTarget::Beginning);
        }
        if regions.ending.contains(x) {
            return Some(DragTarget::Ending);
        }
        if regions.whole_envelope.contains(x) {
            return Some(DragTarget::Envelope);
        }
        None
    }

    /// Begin a drag at `x`. Returns whether a drag engaged; `false` means
    /// the caller should let its default click-to-retune behavior apply.
    ///
    /// Edge-editing drags need a passband to snapshot; a body drag only
    /// retunes the offset and engages even when the demodulator runs on the
    /// full IF passband.
    pub fn drag_start(&mut self, x: f64, modifiers: Modifiers, model: &Demodulator) -> bool {
        self.active = None;
        let Some(kind) = Self::classify(x, &self.regions, modifiers) else {
            return false;
        };
        let bandpass = model.bandpass();
        if bandpass.is_none() && kind != DragTarget::Envelope {
            return false;
        }
        trace!(?kind, x, "drag engaged");
        self.active = Some(kind);
        let (low_cut, high_cut) = match bandpass {
            Some(bandpass) => (bandpass.low_cut, bandpass.high_cut),
            None => (0, 0),
        };
        self.origin = DragOrigin {
            pointer_x: x,
            low_cut,
            high_cut,
            offset_freq: model.offset_freq(),
        };
        true
    }

    /// Process a pointer move during a drag.
    ///
    /// Returns `true` whenever a drag is active, even if the model rejected
    /// or clamped every mutation, so the caller knows to keep suppressing
    /// its default click handling. `hz_per_pixel` comes from the currently
    /// visible frequency span.
    ///
    /// Bfo and Pbs issue one call per edge, each gated independently by the
    /// model's constraint checks against the opposite edge's current value.
    pub fn drag_move(&mut self, x: f64, hz_per_pixel: f64, model: &mut Demodulator) -> bool {
        let Some(kind) = self.active else {
            return false;
        };
        let origin = self.origin;
        let freq_change = (hz_per_pixel * (x - origin.pointer_x)).round() as i64;
        let sign: i64 = if kind == DragTarget::Bfo { -1 } else { 1 };

        if matches!(kind, DragTarget::Beginning | DragTarget::Bfo | DragTarget::Pbs) {
            model.move_bandpass(origin.low_cut + sign * freq_change, origin.high_cut);
        }
        if matches!(kind, DragTarget::Ending | DragTarget::Bfo | DragTarget::Pbs) {
            model.move_bandpass(origin.low_cut, origin.high_cut + sign * freq_change);
        }
        if matches!(kind, DragTarget::Envelope | DragTarget::Bfo) {
            let mut new_offset = origin.offset_freq + sign * freq_change;
            let step = model.context().tuning_step;
            if step > 0 {
                new_offset = (new_offset as f64 / step as f64).round() as i64 * step;
            }
            if new_offset.abs() > model.context().max_offset() {
                return true;
            }
            model.set_offset_frequency(new_offset as f64);
        }
        true
    }

    /// End the drag. Returns whether one had been active, letting the
    /// caller tell "ended a drag" apart from a plain click that should fall
    /// through to a direct re-tune.
    pub fn drag_end(&mut self) -> bool {
        let was_active = self.active.is_some();
        self.active = None;
        was_active
    }

    /// Apply a wheel step at `x`. Returns `false` when no region was hit
    /// (let the event bubble); `true` otherwise, whether or not the model
    /// accepted the change.
    ///
    /// Without `width_modifier` the whole passband shifts by 50 Hz per
    /// notch; with it, both edges move apart or together symmetrically.
    pub fn wheel(
        &self,
        x: f64,
        direction_up: bool,
        width_modifier: bool,
        model: &mut Demodulator,
    ) -> bool {
        if Self::classify(x, &self.regions, Modifiers::NONE).is_none() {
            return false;
        }
        let d_high = if direction_up {
            WHEEL_STEP_HZ
        } else {
            -WHEEL_STEP_HZ
        };
        let d_low = if width_modifier { -d_high } else { d_high };
        if let Some(bandpass) = model.bandpass() {
            model.move_bandpass(bandpass.low_cut + d_low, bandpass.high_cut + d_high);
        }
        true
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::regions::PixelRange;
    use crate::modes::Bandpass;
    use crate::prefs::MemoryStore;
    use crate::transport::RecordingSink;
    use crate::ReceiverContext;

    fn regions() -> HitRegions {
        HitRegions {
            beginning: PixelRange::new(95.0, 105.0),
            ending: PixelRange::new(295.0, 305.0),
            whole_envelope: PixelRange::new(95.0, 305.0),
            line: PixelRange::new(198.0, 202.0),
            envelope_visible: true,
            line_visible: true,
        }
    }

    fn make_model(tuning_step: i64) -> Demodulator {
        // "test" is unregistered on purpose: limits fall back to ±6000
        let ctx = ReceiverContext::new(7_100_000, 2_400_000, tuning_step, 12_000);
        let mut model = Demodulator::new(
            "test",
            ctx,
            Box::new(RecordingSink::new()),
            Box::new(MemoryStore::new()),
        );
        model.set_bandpass(Bandpass::new(-2000, 2000));
        model
    }

    #[test]
    fn test_classify_priority_bfo_over_pbs() {
        // line and whole_envelope overlap at x=200: shift-click must be bfo
        let regions = regions();
        assert_eq!(
            GestureInterpreter::classify(200.0, &regions, Modifiers::SHIFT),
            Some(DragTarget::Bfo)
        );
        // shift elsewhere inside the envelope is pbs
        assert_eq!(
            GestureInterpreter::classify(250.0, &regions, Modifiers::SHIFT),
            Some(DragTarget::Pbs)
        );
    }

    #[test]
    fn test_classify_edges_and_body() {
        let regions = regions();
        assert_eq!(
            GestureInterpreter::classify(100.0, &regions, Modifiers::NONE),
            Some(DragTarget::Beginning)
        );
        assert_eq!(
            GestureInterpreter::classify(300.0, &regions, Modifiers::NONE),
            Some(DragTarget::Ending)
        );
        assert_eq!(
            GestureInterpreter::classify(200.0, &regions, Modifiers::NONE),
            Some(DragTarget::Envelope)
        );
        assert_eq!(
            GestureInterpreter::classify(400.0, &regions, Modifiers::NONE),
            None
        );
    }

    #[test]
    fn test_classify_respects_visibility_of_line_and_envelope() {
        let mut regions = regions();
        regions.line_visible = false;
        // shift over the hidden line falls through to pbs
        assert_eq!(
            GestureInterpreter::classify(200.0, &regions, Modifiers::SHIFT),
            Some(DragTarget::Pbs)
        );
        regions.envelope_visible = false;
        // with the envelope also hidden, shift matches no shift target but
        // still falls through to the plain membership checks
        assert_eq!(
            GestureInterpreter::classify(200.0, &regions, Modifiers::SHIFT),
            Some(DragTarget::Envelope)
        );
    }

    #[test]
    fn test_drag_outside_regions_does_not_engage() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let model = make_model(0);
        assert!(!interp.drag_start(400.0, Modifiers::NONE, &model));
        assert_eq!(interp.active_drag(), None);
        assert!(!interp.drag_end());
    }

    #[test]
    fn test_edge_drags_need_a_bandpass() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);
        model.disable_bandpass();
        // No edges to grab without a passband
        assert!(!interp.drag_start(100.0, Modifiers::NONE, &model));
        assert!(!interp.drag_start(300.0, Modifiers::NONE, &model));
        assert!(!interp.drag_start(200.0, Modifiers::SHIFT, &model));
    }

    #[test]
    fn test_body_drag_retunes_without_bandpass() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);
        model.disable_bandpass();

        // The full-IF fallback still renders an envelope body, and dragging
        // it still retunes
        assert!(interp.drag_start(200.0, Modifiers::NONE, &model));
        assert_eq!(interp.active_drag(), Some(DragTarget::Envelope));
        assert!(interp.drag_move(220.0, 10.0, &mut model));
        assert_eq!(model.offset_freq(), 200);
        assert_eq!(model.bandpass(), None);
        assert!(interp.drag_end());
    }

    #[test]
    fn test_ending_drag_math() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        assert!(interp.drag_start(300.0, Modifiers::NONE, &model));
        // 10 px right at 10 Hz/px: high edge follows by +100
        assert!(interp.drag_move(310.0, 10.0, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 2100)));
        assert_eq!(model.offset_freq(), 0);
        assert!(interp.drag_end());
    }

    #[test]
    fn test_beginning_drag_math() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        assert!(interp.drag_start(100.0, Modifiers::NONE, &model));
        assert!(interp.drag_move(90.0, 10.0, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2100, 2000)));
    }

    #[test]
    fn test_drag_is_relative_to_origin_not_previous_move() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        interp.drag_start(300.0, Modifiers::NONE, &model);
        interp.drag_move(310.0, 10.0, &mut model);
        interp.drag_move(305.0, 10.0, &mut model);
        // +50 from the origin, not +150 accumulated
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 2050)));
    }

    #[test]
    fn test_bfo_inversion() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        assert!(interp.drag_start(200.0, Modifiers::SHIFT, &model));
        assert_eq!(interp.active_drag(), Some(DragTarget::Bfo));

        // freq_change = 100, sign = -1: the two edge calls are
        // move_bandpass(-2100, 2000) then move_bandpass(-2000, 1900),
        // each evaluated independently, and the offset moves to -100.
        assert!(interp.drag_move(210.0, 10.0, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 1900)));
        assert_eq!(model.offset_freq(), -100);
    }

    #[test]
    fn test_envelope_drag_retunes() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        interp.drag_start(200.0, Modifiers::NONE, &model);
        interp.drag_move(220.0, 10.0, &mut model);
        assert_eq!(model.offset_freq(), 200);
        // the passband edges stay put relative to the offset
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 2000)));
    }

    #[test]
    fn test_envelope_drag_snaps_to_tuning_step() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(500);

        interp.drag_start(200.0, Modifiers::NONE, &model);
        interp.drag_move(212.0, 10.0, &mut model);
        // raw target 120 Hz snaps to the 500 Hz grid
        assert_eq!(model.offset_freq(), 0);

        interp.drag_move(230.0, 10.0, &mut model);
        assert_eq!(model.offset_freq(), 500);
    }

    #[test]
    fn test_envelope_drag_rejects_out_of_band_offset_but_stays_active() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        interp.drag_start(200.0, Modifiers::NONE, &model);
        // way past bandwidth/2 = 1.2 MHz
        assert!(interp.drag_move(200_000.0, 10.0, &mut model));
        assert_eq!(model.offset_freq(), 0);
        assert!(interp.drag_end(), "drag stays active through rejections");
    }

    #[test]
    fn test_drag_move_without_active_drag_is_false() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);
        assert!(!interp.drag_move(250.0, 10.0, &mut model));
    }

    #[test]
    fn test_wheel_shifts_passband() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        assert!(interp.wheel(200.0, true, false, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-1950, 2050)));

        assert!(interp.wheel(200.0, false, false, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 2000)));
    }

    #[test]
    fn test_wheel_widens_with_modifier() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);

        assert!(interp.wheel(200.0, true, true, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2050, 2050)));

        assert!(interp.wheel(200.0, false, true, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 2000)));
    }

    #[test]
    fn test_wheel_outside_regions_bubbles() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);
        assert!(!interp.wheel(400.0, true, false, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-2000, 2000)));
    }

    #[test]
    fn test_wheel_true_even_when_model_rejects() {
        let mut interp = GestureInterpreter::new();
        interp.update_regions(regions());
        let mut model = make_model(0);
        // narrow the passband down to the minimum, then one more notch
        model.set_bandpass(Bandpass::new(-50, 50));
        assert!(interp.wheel(200.0, false, true, &mut model));
        assert_eq!(model.bandpass(), Some(Bandpass::new(-50, 50)));
    }
}
