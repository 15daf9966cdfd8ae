//! Application state and event loop for the envelope demo.

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::DefaultTerminal;

use passband::gesture::Modifiers;
use passband::prefs::MemoryStore;
use passband::transport::RecordingSink;
use passband::{Demodulator, GestureInterpreter, ReceiverContext};

use super::ui::{self, scale::FrequencyScale};

/// Demo receiver: a 24 kHz slice of the 2 m band, audio at 12 kHz.
const CONTEXT: ReceiverContext = ReceiverContext {
    center_freq: 145_500_000,
    bandwidth: 24_000,
    tuning_step: 0,
    output_rate: 12_000,
};

pub struct App {
    pub demod: Demodulator,
    pub interpreter: GestureInterpreter,
    pub sink: RecordingSink,
    pub scale: FrequencyScale,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let sink = RecordingSink::new();
        let demod = Demodulator::new(
            "nfm",
            CONTEXT,
            Box::new(sink.handle()),
            Box::new(MemoryStore::new()),
        );

        Self {
            demod,
            interpreter: GestureInterpreter::new(),
            sink,
            scale: FrequencyScale::new(&CONTEXT),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        self.demod.start();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Toggle a packet overlay to show the limit class changing
            KeyCode::Char('p') => {
                let next = match self.demod.secondary_mod() {
                    Some(_) => None,
                    None => Some("packet"),
                };
                self.demod.set_secondary_demod(next);
            }
            // Squelch keys only act on modes that carry one
            KeyCode::Char('+') | KeyCode::Char('=') if self.demod.squelch_available() => {
                let level = self.demod.squelch_level();
                self.demod.set_squelch(level + 5.0);
            }
            KeyCode::Char('-') if self.demod.squelch_available() => {
                let level = self.demod.squelch_level();
                self.demod.set_squelch(level - 5.0);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column as f64;
        let modifiers = Modifiers {
            shift: mouse.modifiers.contains(KeyModifiers::SHIFT),
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.interpreter.drag_start(x, modifiers, &self.demod) {
                    // Plain click outside any region: jump-retune to the
                    // clicked frequency.
                    let clicked = self.scale.px_to_freq(x);
                    let offset = clicked - self.demod.context().center_freq;
                    self.demod.set_offset_frequency(offset as f64);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.interpreter
                    .drag_move(x, self.scale.hz_per_pixel(), &mut self.demod);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.interpreter.drag_end();
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let up = mouse.kind == MouseEventKind::ScrollUp;
                let widen = mouse.modifiers.contains(KeyModifiers::CONTROL);
                self.interpreter.wheel(x, up, widen, &mut self.demod);
            }
            _ => {}
        }
    }
}
