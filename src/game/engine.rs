use rand::{Rng, SeedableRng, rngs::StdRng, seq::IteratorRandom};
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::ConfigError,
    state::{Board, CollisionType, GameState, GameStatus, Point, Snake},
};

/// Random draws tried before falling back to scanning every free cell
pub const MAX_FOOD_ATTEMPTS: usize = 1_000;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended
    pub game_over: bool,
    /// Score after this step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with an entropy-seeded RNG
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        let board = config.board()?;
        Ok(Self { config, board, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// Start a fresh game: head centred, body trailing left, moving right
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.board.center(),
            Direction::Right,
            self.config.initial_snake_length,
            self.board.cell_size(),
        );

        // Config validation leaves at least one free cell
        let food = self.place_food(&snake).unwrap_or_else(|| snake.tail());

        info!(
            width = self.board.width(),
            height = self.board.height(),
            cell_size = self.board.cell_size(),
            "new game"
        );

        GameState::new(snake, food, self.board)
    }

    /// Pick a random grid cell not covered by the snake.
    ///
    /// Returns `None` only when the snake fills the whole board.
    pub fn place_food(&mut self, snake: &Snake) -> Option<Point> {
        let board = self.board;

        for _ in 0..MAX_FOOD_ATTEMPTS {
            let column = self.rng.gen_range(0..board.columns());
            let row = self.rng.gen_range(0..board.rows());
            let pos = board.cell_at(column, row);

            if !snake.occupies(pos) {
                debug!(x = pos.x, y = pos.y, "food placed");
                return Some(pos);
            }
        }

        let pos = board
            .cells()
            .filter(|&cell| !snake.occupies(cell))
            .choose(&mut self.rng);
        debug!(?pos, "food placed after scanning free cells");
        pos
    }

    /// Execute one turn of the game
    pub fn play_step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.is_game_over() {
            return StepResult {
                game_over: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        if let Action::Move(requested) = action {
            if !state.snake.turn(requested) {
                debug!(?requested, current = ?state.snake.direction, "reversal ignored");
            }
        }

        let new_head = state.snake.next_head(state.board.cell_size());
        state.snake.push_head(new_head);
        state.steps += 1;

        if let Some(collision_type) = state.collision() {
            state.status = GameStatus::GameOver;
            info!(score = state.score, steps = state.steps, ?collision_type, "game over");

            return StepResult {
                game_over: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let ate_food = new_head == state.food;
        if ate_food {
            state.score += 1;
            match self.place_food(&state.snake) {
                Some(food) => state.food = food,
                None => warn!(score = state.score, "no free cell left for food"),
            }
        } else {
            state.snake.pop_tail();
        }

        StepResult {
            game_over: false,
            score: state.score,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }
}
