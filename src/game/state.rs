use std::collections::VecDeque;

use super::action::Direction;

/// A grid-aligned position on the board, in board units (not cell indices)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move point by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move point one cell in a direction
    pub fn moved(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// Validated board geometry. Build one through [`GameConfig::board`](super::GameConfig::board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Board {
    pub(crate) fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of whole cells across
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of whole cells down
    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Top-left corner of the cell at (column, row)
    pub fn cell_at(&self, column: i32, row: i32) -> Point {
        Point::new(column * self.cell_size, row * self.cell_size)
    }

    /// Centre of the board snapped down to the grid
    pub fn center(&self) -> Point {
        self.cell_at(self.columns() / 2, self.rows() / 2)
    }

    /// Whether a point lies on a whole cell inside the walls
    pub fn contains(&self, pos: Point) -> bool {
        let max_x = (self.columns() - 1) * self.cell_size;
        let max_y = (self.rows() - 1) * self.cell_size;
        (0..=max_x).contains(&pos.x) && (0..=max_y).contains(&pos.y)
    }

    /// Every cell on the board, row by row
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: VecDeque<Point>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake whose body trails behind the head, opposite to `direction`
    pub fn new(head: Point, direction: Direction, length: usize, cell_size: i32) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |prev| Some(prev.moved(back, cell_size)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Point) -> bool {
        self.body_segments().any(|&segment| segment == pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Point) -> bool {
        self.body.contains(&pos)
    }

    /// Change direction unless the request reverses the snake.
    /// Returns whether the request was applied.
    pub fn turn(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Where the head lands after one move in the current direction
    pub fn next_head(&self, cell_size: i32) -> Point {
        self.head().moved(self.direction, cell_size)
    }

    /// Prepend a new head
    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
    }

    /// Drop the last segment, never the head
    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Whether turns are still being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: no further turns are applied
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Point,
    pub board: Board,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Point, board: Board) -> Self {
        Self {
            snake,
            food,
            board,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Check if a position is within the walls
    pub fn is_in_bounds(&self, pos: Point) -> bool {
        self.board.contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Point) -> bool {
        self.snake.occupies(pos)
    }

    /// Classify a collision of the current head, if any.
    ///
    /// Walls are checked first; a head outside the board can't overlap the body anyway.
    pub fn collision(&self) -> Option<CollisionType> {
        let head = self.snake.head();
        if !self.is_in_bounds(head) {
            Some(CollisionType::Wall)
        } else if self.snake.collides_with_body(head) {
            Some(CollisionType::SelfCollision)
        } else {
            None
        }
    }

    pub fn is_collision(&self) -> bool {
        self.collision().is_some()
    }
}
