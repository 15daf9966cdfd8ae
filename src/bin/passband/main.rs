//! passband - terminal demo for the demodulator envelope
//!
//! Renders a frequency scale with one demodulator's filter envelope and
//! feeds mouse gestures into the gesture interpreter:
//!   - drag the envelope edges to adjust the passband cuts
//!   - drag the body to retune, click the scale to jump
//!   - shift-drag the carrier line for BFO, shift-drag the body for PBS
//!   - scroll to shift the passband, ctrl-scroll to widen/narrow it
//!
//! Control messages pushed toward the (simulated) backend appear in the log
//! pane.

mod app;
mod ui;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let mut terminal = ratatui::init();
    let result = App::new().run(&mut terminal);
    ratatui::restore();
    crossterm::execute!(std::io::stdout(), DisableMouseCapture)?;

    result
}
