use std::time::Instant;

use crossterm::event::KeyEvent;
use log::{debug, info};
use rand::Rng;

use crate::input::{is_ctrl_c, map_key, Command};
use crate::render::draw;
use crate::session::Session;
use crate::state::{Collision, Outcome, Signal};
use crate::term::Screen;
use crate::timer::Ticker;
use crate::Result;

/// Whether the main loop keeps going after handling an event.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Feeds key presses and timer ticks into a [`Session`] and puts the result
/// on a [`Screen`].
pub struct SnakeGame<R: Rng, S: Screen> {
    session: Session<R>,
    screen: S,
    ticker: Ticker,
    paused: bool,
}

impl<R: Rng, S: Screen> SnakeGame<R, S> {
    pub fn new(session: Session<R>, screen: S) -> Self {
        let ticker = Ticker::new(session.config().tick);
        SnakeGame { session, screen, ticker, paused: false }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start(Instant::now())?;

        loop {
            // A stopped ticker (paused) leaves nothing to do until a key arrives.
            let keys = match self.ticker.time_left(Instant::now()) {
                Some(timeout) => self.screen.read_key_events(timeout)?,
                None => vec![self.screen.read_key_blocking()?],
            };

            if let Flow::Quit = self.process(&keys, Instant::now())? {
                return self.quit();
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn start(&mut self, now: Instant) -> Result<()> {
        self.screen.setup()?;
        info!("game started, food at {:?}", self.session.state().food());

        draw(self.session.state(), &mut self.screen)?;
        self.ticker.start(now);
        Ok(())
    }

    /// One pass of the main loop: the keys received so far, then the tick if one is due.
    fn process(&mut self, keys: &[KeyEvent], now: Instant) -> Result<Flow> {
        for key_ev in keys {
            if let Flow::Quit = self.on_key(map_key(key_ev))? {
                return Ok(Flow::Quit);
            }
        }

        if !self.ticker.fire(now) {
            return Ok(Flow::Continue);
        }

        let outcome = self.session.handle(Signal::Tick);
        draw(self.session.state(), &mut self.screen)?;

        match outcome {
            Outcome::Ate => debug!("food eaten, length {}", self.session.state().snake().len()),
            Outcome::Crashed(collision) => return self.game_over(collision, now),
            Outcome::Moved | Outcome::Idle => {}
        }

        Ok(Flow::Continue)
    }

    fn on_key(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Pause => self.toggle_pause()?,
            Command::Turn(dir) if !self.paused => {
                self.session.handle(Signal::Turn(dir));
                debug!("next heading {:?}", self.session.state().heading());
            }
            Command::Turn(_) | Command::Ignore => {}
        }

        Ok(Flow::Continue)
    }

    fn game_over(&mut self, collision: Collision, now: Instant) -> Result<Flow> {
        self.ticker.stop();
        let score = self.session.score();
        info!("game over ({:?}), score {}", collision, score);

        self.screen.show_message(&[
            "Game Over!",
            &*format!("Score: {}", score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;

        if is_ctrl_c(&self.screen.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.screen.hide_message()?;
        self.session.restart();
        draw(self.session.state(), &mut self.screen)?;
        // The prompt blocks, so the clock has moved on since `now`.
        self.ticker.start(Instant::now().max(now));

        Ok(Flow::Continue)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.ticker.stop();
            self.screen.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.screen.hide_message()?;
            self.ticker.start(Instant::now());
        }

        self.paused = !self.paused;
        debug!("paused: {}", self.paused);
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        info!("quitting, score {}", self.session.score());
        self.screen.restore()
    }
}
