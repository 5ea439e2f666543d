use super::action::{Direction, PlayerId};
use super::config::GameMode;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// A snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    pub alive: bool,
    /// Tick on which the snake was eliminated
    pub died_at: Option<u64>,
    /// Maximum number of segments
    capacity: usize,
    /// Cell left behind by the tail on the last move, consumed by `grow`
    vacated: Option<Position>,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    ///
    /// The body trails behind the head, opposite to `direction`, wrapped into `grid`.
    pub fn new(
        head: Position,
        direction: Direction,
        length: usize,
        capacity: usize,
        grid: &Grid,
    ) -> Self {
        let capacity = capacity.max(1);
        let length = length.clamp(1, capacity);
        let mut body = Vec::with_capacity(capacity);
        body.push(grid.wrap(head));

        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(grid.wrap(prev.moved_in_direction(back)));
        }

        Self {
            body,
            direction,
            alive: true,
            died_at: None,
            capacity,
            vacated: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Turn unless the new direction reverses the current one.
    ///
    /// Returns whether the direction was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Shift every segment into its predecessor's cell and step the head, wrapping at the edges
    pub fn advance(&mut self, grid: &Grid) {
        let new_head = grid.wrap(self.head().moved_in_direction(self.direction));
        self.body.insert(0, new_head);
        self.vacated = self.body.pop();
    }

    /// Reclaim the cell vacated by the last move; clamped at capacity.
    ///
    /// Returns whether the snake actually got longer.
    pub fn grow(&mut self) -> bool {
        if self.body.len() >= self.capacity {
            return false;
        }
        match self.vacated.take() {
            Some(cell) => {
                self.body.push(cell);
                true
            }
            None => false,
        }
    }

    /// Mark the snake as eliminated on `tick`; a dead snake stays dead
    pub fn kill(&mut self, tick: u64) {
        if self.alive {
            self.alive = false;
            self.died_at = Some(tick);
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

/// The single piece of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub is_bonus: bool,
}

/// A static blocking cell, placed once per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Obstacle {
    pub position: Position,
}

/// Type of collision that eliminated a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake ran into its own body
    SelfCollision,
    /// Snake hit an obstacle
    Obstacle,
    /// Both heads landed on the same cell
    HeadToHead,
    /// Snake ran into the other snake
    OtherSnake,
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub mode: GameMode,
    pub grid: Grid,
    /// One snake per player, indexed by `PlayerId::index`
    pub snakes: Vec<Snake>,
    pub scores: Vec<u32>,
    pub food: Food,
    pub obstacles: Vec<Obstacle>,
    /// Number of simulation steps taken
    pub ticks: u64,
}

impl RoundState {
    pub fn new(mode: GameMode, grid: Grid, snakes: Vec<Snake>, food: Food) -> Self {
        let scores = vec![0; snakes.len()];
        Self {
            mode,
            grid,
            snakes,
            scores,
            food,
            obstacles: Vec::new(),
            ticks: 0,
        }
    }

    pub fn snake(&self, player: PlayerId) -> Option<&Snake> {
        self.snakes.get(player.index())
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores.get(player.index()).copied().unwrap_or(0)
    }

    /// Players taking part in this round
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.snakes.len()).filter_map(PlayerId::from_index)
    }

    pub fn any_alive(&self) -> bool {
        self.snakes.iter().any(|snake| snake.alive)
    }

    /// Solo ends with its only snake, duo only once every snake is out
    pub fn is_over(&self) -> bool {
        !self.any_alive()
    }

    /// Highest score across players
    pub fn best_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Check if a position is occupied by any snake, dead or alive
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snakes.iter().any(|snake| snake.body.contains(&pos))
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.position == pos)
    }
}
