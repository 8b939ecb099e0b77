use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::snake::{Direction, Snake};
use crate::Coords;

pub const DEFAULT_DIRECTION: Direction = Direction::Right;

/// The two inputs that drive a game: the periodic tick and a steering request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Tick,
    Turn(Direction),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing moved: a turn request, or a tick while the game is over.
    Idle,
    Moved,
    Ate,
    Crashed(Collision),
}

pub struct GameState {
    board: GameConfig,
    snake: Snake,
    food: Coords,
    pending: Option<Direction>,
    running: bool,
}

impl GameState {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let mut state = GameState {
            board: config.clone(),
            snake: Snake::new(config.center(), DEFAULT_DIRECTION),
            food: (0, 0),
            pending: None,
            running: true,
        };
        state.place_food(rng);
        state
    }

    /// Back to a one-segment snake at the center, heading right, with fresh food.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.snake = Snake::new(self.board.center(), DEFAULT_DIRECTION);
        self.pending = None;
        self.place_food(rng);
        self.running = true;
    }

    pub fn update<R: Rng>(&mut self, signal: Signal, rng: &mut R) -> Outcome {
        match signal {
            Signal::Turn(dir) => {
                self.turn(dir);
                Outcome::Idle
            }
            Signal::Tick => self.tick(rng),
        }
    }

    fn turn(&mut self, dir: Direction) {
        if !self.running || dir == self.snake.get_direction().opposite() {
            return;
        }
        debug!("heading change requested: {:?}", dir);
        self.pending = Some(dir);
    }

    fn tick<R: Rng>(&mut self, rng: &mut R) -> Outcome {
        if !self.running {
            return Outcome::Idle;
        }

        if let Some(dir) = self.pending.take() {
            self.snake.set_direction(dir);
        }

        let head = self.snake.move_step(self.board.cell_size);
        let mut outcome = Outcome::Moved;

        if head == self.food {
            self.snake.grow(self.food);
            self.place_food(rng);
            outcome = Outcome::Ate;
        }

        if !self.board.contains(head) {
            outcome = Outcome::Crashed(Collision::Wall);
        } else if self.snake.bites_itself() {
            outcome = Outcome::Crashed(Collision::Body);
        }

        if let Outcome::Crashed(_) = outcome {
            self.running = false;
        }

        outcome
    }

    fn place_food<R: Rng>(&mut self, rng: &mut R) {
        let cell_size = self.board.cell_size;
        let x = rng.gen_range(0..self.board.columns()) * cell_size;
        let y = rng.gen_range(0..self.board.rows()) * cell_size;
        self.food = (x, y);
        debug!("food placed at {:?}", self.food);
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cell_size(&self) -> i32 {
        self.board.cell_size
    }

    /// The heading the next tick will travel in.
    pub fn heading(&self) -> Direction {
        self.pending.unwrap_or_else(|| self.snake.get_direction())
    }

    #[cfg(test)]
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub fn set_food(&mut self, food: Coords) {
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn setup() -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(&GameConfig::default(), &mut rng);
        (state, rng)
    }

    fn aligned(pos: Coords) -> bool {
        pos.0 % 20 == 0 && pos.1 % 20 == 0 && (0..600).contains(&pos.0) && (0..400).contains(&pos.1)
    }

    #[test]
    fn starts_centered() {
        let (state, _) = setup();
        assert!(state.is_running());
        assert_eq!(state.snake().body(), &[(300, 200)]);
        assert_eq!(state.heading(), Right);
        assert!(aligned(state.food()));
    }

    #[test]
    fn one_tick_right() {
        let (mut state, mut rng) = setup();
        state.set_food((0, 0));

        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Moved);
        assert_eq!(state.snake().body(), &[(320, 200)]);
    }

    #[test]
    fn body_shifts_without_growing() {
        let (mut state, mut rng) = setup();
        state.set_snake(Snake::from_body(vec![(100, 100), (80, 100), (60, 100), (60, 120)], Right));
        state.set_food((0, 0));

        let before = state.snake().body().to_vec();
        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Moved);

        let after = state.snake().body();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], (120, 100));
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }

    #[test]
    fn eating_grows_and_moves_food() {
        let (mut state, mut rng) = setup();
        state.set_snake(Snake::from_body(vec![(100, 100), (80, 100)], Right));
        state.set_food((120, 100));

        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Ate);
        assert!(state.is_running());
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().body(), &[(120, 100), (100, 100), (120, 100)]);
        assert!(aligned(state.food()));

        state.set_food((0, 0));
        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Moved);
        assert_eq!(state.snake().body(), &[(140, 100), (120, 100), (100, 100)]);
    }

    #[test]
    fn reversal_is_rejected() {
        let (mut state, mut rng) = setup();

        assert_eq!(state.update(Signal::Turn(Left), &mut rng), Outcome::Idle);
        assert_eq!(state.heading(), Right);

        state.update(Signal::Turn(Up), &mut rng);
        assert_eq!(state.heading(), Up);
        state.update(Signal::Turn(Down), &mut rng);
        assert_eq!(state.heading(), Down);
    }

    #[test]
    fn last_turn_before_tick_wins() {
        let (mut state, mut rng) = setup();
        state.set_food((0, 0));

        state.update(Signal::Turn(Up), &mut rng);
        state.update(Signal::Turn(Down), &mut rng);
        // Left is still the reverse of the heading actually travelled.
        state.update(Signal::Turn(Left), &mut rng);
        state.update(Signal::Tick, &mut rng);

        assert_eq!(state.snake().get_direction(), Down);
        assert_eq!(state.snake().head(), (300, 220));
    }

    #[test]
    fn leaving_the_board_ends_the_game() {
        let (mut state, mut rng) = setup();
        state.set_snake(Snake::from_body(vec![(0, 200)], Left));
        state.set_food((300, 300));

        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Crashed(Collision::Wall));
        assert_eq!(state.snake().head(), (-20, 200));
        assert!(!state.is_running());

        state.reset(&mut rng);
        state.set_snake(Snake::from_body(vec![(580, 200)], Right));
        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Crashed(Collision::Wall));
    }

    #[test]
    fn biting_the_body_ends_the_game() {
        let (mut state, mut rng) = setup();
        state.set_snake(Snake::from_body(
            vec![(100, 100), (120, 100), (120, 120), (100, 120), (80, 120)],
            Down,
        ));
        state.set_food((0, 0));

        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Crashed(Collision::Body));
        assert!(!state.is_running());
    }

    #[test]
    fn game_over_ignores_input() {
        let (mut state, mut rng) = setup();
        state.set_snake(Snake::from_body(vec![(300, 0)], Up));
        state.update(Signal::Tick, &mut rng);
        assert!(!state.is_running());

        let frozen = state.snake().body().to_vec();
        assert_eq!(state.update(Signal::Tick, &mut rng), Outcome::Idle);
        assert_eq!(state.update(Signal::Turn(Left), &mut rng), Outcome::Idle);
        assert_eq!(state.snake().body(), &frozen[..]);
    }

    #[test]
    fn reset_restores_initial_state() {
        let (mut state, mut rng) = setup();
        state.set_snake(Snake::from_body(vec![(0, 0), (0, 20), (0, 40)], Up));
        state.update(Signal::Tick, &mut rng);
        assert!(!state.is_running());

        state.reset(&mut rng);
        assert!(state.is_running());
        assert_eq!(state.snake().body(), &[(300, 200)]);
        assert_eq!(state.heading(), Right);
        assert!(aligned(state.food()));
    }

    #[test]
    fn food_is_deterministic_for_a_seed() {
        let config = GameConfig::default();
        let a = GameState::new(&config, &mut StdRng::seed_from_u64(99));
        let b = GameState::new(&config, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.food(), b.food());
    }
}
