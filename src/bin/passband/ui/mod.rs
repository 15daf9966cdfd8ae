//! TUI layout for the envelope demo.

mod envelope;
mod log;
pub mod scale;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::App;
use envelope::render_envelope;
use log::render_log;
use scale::render_scale;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status line
            Constraint::Length(2), // Envelope
            Constraint::Length(2), // Frequency scale
            Constraint::Min(4),    // Control message log
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    // The projection and the interpreter's hit regions both follow the
    // current terminal width, refreshed every frame before input is read.
    app.scale.set_width(area.width);
    let regions = app.scale.hit_regions(&app.demod);
    app.interpreter.update_regions(regions);

    render_status(frame, chunks[0], app);
    render_envelope(frame, chunks[1], &regions, &app.demod);
    render_scale(frame, chunks[2], &app.scale);

    let log_block = Block::default().title(" Backend sync ").borders(Borders::ALL);
    let log_inner = log_block.inner(chunks[3]);
    frame.render_widget(log_block, chunks[3]);
    render_log(frame, log_inner, &app.sink);

    let help = Paragraph::new(
        " [Q] Quit  [P] Packet overlay  [+/-] Squelch  drag edges/body, shift-drag line=BFO body=PBS, scroll=shift ctrl-scroll=width",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}

fn render_status(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let demod = &app.demod;
    let tuned = demod.context().center_freq + demod.offset_freq();
    let secondary = demod.secondary_mod().unwrap_or("-");
    let squelch = if demod.squelch_available() {
        format!("{:.0}", demod.squelch_level())
    } else {
        "n/a".to_owned()
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", demod.modulation().to_uppercase()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(format!(
            " {:.3} kHz  offset {:+} Hz  squelch {}  secondary {}  limits ±{} Hz",
            tuned as f64 / 1000.0,
            demod.offset_freq(),
            squelch,
            secondary,
            demod.filter_limits().high,
        )),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
