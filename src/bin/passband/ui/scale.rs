//! Frequency scale: the pixel↔frequency projection and the hit regions it
//! implies for the rendered envelope.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use passband::gesture::{HitRegions, PixelRange};
use passband::{Demodulator, ReceiverContext};

/// Half-width of the grab handles around edges and the carrier line, in
/// columns. Terminal cells are coarse, one column either side is plenty.
const GRAB_TOLERANCE: f64 = 1.0;

/// Maps the receiver's visible span onto terminal columns.
pub struct FrequencyScale {
    pub start_freq: i64,
    pub end_freq: i64,
    width: u16,
}

impl FrequencyScale {
    pub fn new(ctx: &ReceiverContext) -> Self {
        Self {
            start_freq: ctx.center_freq - ctx.bandwidth / 2,
            end_freq: ctx.center_freq + ctx.bandwidth / 2,
            width: 1,
        }
    }

    /// Adopt the current render width; called once per frame.
    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    pub fn hz_per_pixel(&self) -> f64 {
        (self.end_freq - self.start_freq) as f64 / self.width as f64
    }

    pub fn freq_to_px(&self, freq: i64) -> f64 {
        (freq - self.start_freq) as f64 / self.hz_per_pixel()
    }

    pub fn px_to_freq(&self, x: f64) -> i64 {
        self.start_freq + (x * self.hz_per_pixel()).round() as i64
    }

    /// Hit regions for the demodulator's envelope as currently projected.
    pub fn hit_regions(&self, demod: &Demodulator) -> HitRegions {
        let Some(bandpass) = demod.bandpass() else {
            return HitRegions::hidden();
        };
        let carrier = demod.context().center_freq + demod.offset_freq();
        let left = self.freq_to_px(carrier + bandpass.low_cut);
        let right = self.freq_to_px(carrier + bandpass.high_cut);
        let line = self.freq_to_px(carrier);

        HitRegions {
            beginning: PixelRange::new(left - GRAB_TOLERANCE, left + GRAB_TOLERANCE),
            ending: PixelRange::new(right - GRAB_TOLERANCE, right + GRAB_TOLERANCE),
            whole_envelope: PixelRange::new(left, right),
            line: PixelRange::new(line - GRAB_TOLERANCE, line + GRAB_TOLERANCE),
            envelope_visible: true,
            line_visible: true,
        }
    }
}

/// Render tick marks with frequency labels every ~20 columns.
pub fn render_scale(frame: &mut Frame, area: Rect, scale: &FrequencyScale) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let label_spacing = 20u16;
    let mut ticks = String::new();
    let mut labels = String::new();

    let mut col = 0u16;
    while col < area.width {
        if col % label_spacing == 0 {
            ticks.push('┬');
            let freq_khz = scale.px_to_freq(col as f64) as f64 / 1000.0;
            let label = format!("{:.1}", freq_khz);
            labels.push_str(&label);
            // Pad out to the next label position
            let pad = label_spacing as usize - label.len().min(label_spacing as usize);
            labels.push_str(&" ".repeat(pad));
            col += 1;
        } else {
            ticks.push('─');
            col += 1;
        }
    }
    labels.truncate(area.width as usize);

    let lines = vec![
        Line::from(Span::styled(ticks, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(labels, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
