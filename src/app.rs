use crate::command::Command;
use crate::game::{Clock, Phase, Session};
use crate::options::Options;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The terminal front end: draws the session after every tick or input and
/// feeds it key presses & clock ticks
#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    session: Session<R>,
    clock: Clock,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(options: &Options, rng: R) -> App<R> {
        App {
            session: Session::new(options, rng),
            clock: Clock::new(options.tick_period()),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        tracing::info!(score = self.session.score(), "quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let frame_state = self.session.frame();
        terminal.draw(|frame| frame.render_widget(&frame_state, frame.area()))?;
        Ok(())
    }

    /// Wait for either the next tick or an input event, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if self.session.phase() == Phase::Running {
            let wait = self.clock.until_tick(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.tick(Instant::now());
            } else {
                self.handle_event(read()?);
            }
        } else {
            self.clock.stop();
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn tick(&mut self, now: Instant) {
        if self.clock.poll(now) {
            self.session.step();
        }
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            self.session.pause();
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match cmd.to_input() {
            Some(input) => self.session.handle_input(input),
            None => self.quitting = true,
        }
    }
}
