use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::GameConfig;
use crate::state::{GameState, Outcome, Signal};

/// Owns one game and the random source its food placement draws from.
pub struct Session<R: Rng> {
    config: GameConfig,
    state: GameState,
    rng: R,
}

impl Session<StdRng> {
    pub fn from_config(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session::new(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let state = GameState::new(&config, &mut rng);
        Session { config, state, rng }
    }

    pub fn handle(&mut self, signal: Signal) -> Outcome {
        self.state.update(signal, &mut self.rng)
    }

    pub fn restart(&mut self) {
        self.state.reset(&mut self.rng);
        info!("new game started, food at {:?}", self.state.food());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Food eaten in the current game.
    pub fn score(&self) -> usize {
        self.state.snake().len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use crate::state::Collision;

    #[test]
    fn seeded_sessions_agree() {
        let config = GameConfig::default().with_seed(Some(1234));
        let mut a = Session::from_config(config.clone());
        let mut b = Session::from_config(config);

        for _ in 0..12 {
            assert_eq!(a.handle(Signal::Tick), b.handle(Signal::Tick));
            assert_eq!(a.state().food(), b.state().food());
            assert_eq!(a.state().snake().body(), b.state().snake().body());
        }
    }

    #[test]
    fn crash_then_restart() {
        let config = GameConfig::default().with_board(100, 100, 20);
        let mut session = Session::new(config, StdRng::seed_from_u64(5));
        assert_eq!(session.state().snake().head(), (40, 40));

        session.handle(Signal::Turn(Direction::Up));
        let mut outcome = Outcome::Idle;
        for _ in 0..5 {
            outcome = session.handle(Signal::Tick);
            if let Outcome::Crashed(_) = outcome {
                break;
            }
        }
        assert_eq!(outcome, Outcome::Crashed(Collision::Wall));
        assert!(!session.state().is_running());

        session.restart();
        assert!(session.state().is_running());
        assert_eq!(session.state().snake().body(), &[(40, 40)]);
        assert_eq!(session.state().heading(), Direction::Right);
        assert_eq!(session.score(), 0);
    }
}
