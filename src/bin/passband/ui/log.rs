//! Control-message log pane: the diffs the model pushed to the backend.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use passband::transport::{ControlMessage, RecordingSink};

/// Render the most recent control messages, newest at the bottom.
pub fn render_log(frame: &mut Frame, area: Rect, sink: &RecordingSink) {
    if area.height < 1 {
        return;
    }

    let messages = sink.messages();
    let visible = area.height as usize;
    let skip = messages.len().saturating_sub(visible);

    let lines: Vec<Line> = messages
        .iter()
        .skip(skip)
        .map(|msg| match msg {
            ControlMessage::Start => Line::from(Span::styled(
                "dspcontrol: start",
                Style::default().fg(Color::Green),
            )),
            ControlMessage::Params(delta) => {
                let body = serde_json::to_string(delta).unwrap_or_default();
                Line::from(vec![
                    Span::styled("params: ", Style::default().fg(Color::Cyan)),
                    Span::raw(body),
                ])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
