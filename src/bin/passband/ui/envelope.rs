//! Envelope row: the passband body, its grab handles, and the carrier line.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use passband::gesture::HitRegions;
use passband::Demodulator;

/// Render the envelope across one row using the same hit regions the
/// gesture interpreter sees, so what is drawn is exactly what is draggable.
pub fn render_envelope(
    frame: &mut Frame,
    area: Rect,
    regions: &HitRegions,
    demod: &Demodulator,
) {
    if area.height < 1 {
        return;
    }

    let mut spans = Vec::with_capacity(area.width as usize);
    for col in 0..area.width {
        let x = col as f64;
        let (ch, style) = if regions.line_visible && regions.line.contains(x) {
            ('│', Style::default().fg(Color::Yellow))
        } else if regions.beginning.contains(x) {
            ('┤', Style::default().fg(Color::White))
        } else if regions.ending.contains(x) {
            ('├', Style::default().fg(Color::White))
        } else if regions.envelope_visible && regions.whole_envelope.contains(x) {
            ('▓', Style::default().fg(Color::Cyan))
        } else {
            ('·', Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(ch.to_string(), style));
    }

    let mut lines = vec![Line::from(spans)];

    if area.height >= 2 {
        let bandpass_text = match demod.bandpass() {
            Some(bp) => format!(
                " passband {} .. {} Hz (width {})",
                bp.low_cut,
                bp.high_cut,
                bp.width()
            ),
            None => " passband: full IF".to_owned(),
        };
        lines.push(Line::from(Span::styled(
            bandpass_text,
            Style::default().fg(Color::Gray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
