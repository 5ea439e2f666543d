use super::{
    action::{Action, Direction, PlayerId},
    collision::{entity_collision, obstacle_collision, self_collision, snake_clash},
    config::{GameConfig, GameMode},
    grid::Grid,
    spawn::{spawn_food, spawn_obstacles},
    state::{CollisionType, Food, Obstacle, Position, RoundState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Food consumed during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meal {
    pub player: PlayerId,
    pub bonus: bool,
    pub points: u32,
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Food eaten this step, in player order
    pub meals: Vec<Meal>,
    /// Snakes eliminated this step and why
    pub collisions: Vec<(PlayerId, CollisionType)>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the round has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all round logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.config.grid_width, self.config.grid_height)
    }

    /// Snakes in their starting layout: player one faces right from the
    /// left side, player two faces left from the right side, same row.
    pub fn starting_snakes(&self, mode: GameMode) -> Vec<Snake> {
        let grid = self.grid();
        let length = self.config.initial_snake_length;
        let capacity = self.config.max_snake_length;
        let row = self.config.start_row();

        let mut snakes = vec![Snake::new(
            Position::new(length as i32, row),
            Direction::Right,
            length,
            capacity,
            &grid,
        )];
        if mode == GameMode::Duo {
            snakes.push(Snake::new(
                Position::new((grid.cols - 1 - length) as i32, row),
                Direction::Left,
                length,
                capacity,
                &grid,
            ));
        }
        snakes
    }

    /// Start a fresh round: snakes, then food, then obstacles
    pub fn reset(&mut self, mode: GameMode) -> RoundState {
        let grid = self.grid();
        let snakes = self.starting_snakes(mode);

        let food = self.place_food(&grid, &snakes, &[]).unwrap_or(Food {
            position: Position::new(0, 0),
            is_bonus: false,
        });

        let count = self
            .rng
            .gen_range(self.config.min_obstacles..=self.config.max_obstacles);
        let obstacles = spawn_obstacles(&mut self.rng, &grid, count, &snakes, &food);

        log::info!(
            "New {} round on {}x{} grid with {} obstacles",
            mode.as_str(),
            grid.cols,
            grid.rows,
            obstacles.len()
        );

        let mut state = RoundState::new(mode, grid, snakes, food);
        state.obstacles = obstacles;
        state
    }

    fn place_food(
        &mut self,
        grid: &Grid,
        snakes: &[Snake],
        obstacles: &[Obstacle],
    ) -> Option<Food> {
        let food = spawn_food(
            &mut self.rng,
            grid,
            snakes,
            obstacles,
            self.config.bonus_probability,
        );
        if food.is_none() {
            log::warn!("No free cell left for food");
        }
        food
    }

    /// Execute one simulation step.
    ///
    /// Order: apply turns, move live snakes, then self, obstacle,
    /// inter-snake and food checks. A snake reaching the food grows
    /// before the inter-snake check but only scores if it survives it.
    pub fn step(&mut self, state: &mut RoundState, actions: &[Action]) -> StepResult {
        if state.is_over() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        state.ticks += 1;
        let tick = state.ticks;
        let grid = state.grid;
        let mut info = StepInfo::default();

        for (snake, action) in state.snakes.iter_mut().zip(actions) {
            if let (true, Action::Move(direction)) = (snake.alive, action) {
                snake.turn(*direction);
            }
        }

        for snake in state.snakes.iter_mut().filter(|snake| snake.alive) {
            snake.advance(&grid);
        }

        for (index, snake) in state.snakes.iter_mut().enumerate() {
            if snake.alive && self_collision(snake) {
                snake.kill(tick);
                push_collision(&mut info, index, CollisionType::SelfCollision);
            }
        }

        for (index, snake) in state.snakes.iter_mut().enumerate() {
            if snake.alive && obstacle_collision(snake.head(), &state.obstacles) {
                snake.kill(tick);
                push_collision(&mut info, index, CollisionType::Obstacle);
            }
        }

        // An eater keeps its tail, so the other snake is checked against the grown body
        let eaters: Vec<usize> = state
            .snakes
            .iter()
            .enumerate()
            .filter(|(_, snake)| {
                snake.alive && entity_collision(snake.head(), state.food.position)
            })
            .map(|(index, _)| index)
            .collect();
        for &index in &eaters {
            state.snakes[index].grow();
        }

        if let [first, second] = state.snakes.as_mut_slice() {
            if first.alive && second.alive {
                let clash = snake_clash(first, second);
                let kind = if clash.head_on {
                    CollisionType::HeadToHead
                } else {
                    CollisionType::OtherSnake
                };
                if clash.first_dies {
                    first.kill(tick);
                    push_collision(&mut info, 0, kind);
                }
                if clash.second_dies {
                    second.kill(tick);
                    push_collision(&mut info, 1, kind);
                }
            }
        }

        for index in eaters {
            if !state.snakes[index].alive {
                continue;
            }

            let bonus = state.food.is_bonus;
            let points = if bonus {
                self.config.bonus_points
            } else {
                self.config.food_points
            };
            state.scores[index] += points;
            if let Some(player) = PlayerId::from_index(index) {
                info.meals.push(Meal {
                    player,
                    bonus,
                    points,
                });
            }

            if let Some(food) = self.place_food(&grid, &state.snakes, &state.obstacles) {
                state.food = food;
            }
        }

        StepResult {
            terminated: state.is_over(),
            info,
        }
    }
}

fn push_collision(info: &mut StepInfo, index: usize, kind: CollisionType) {
    if let Some(player) = PlayerId::from_index(index) {
        log::debug!("{} eliminated: {:?}", player.label(), kind);
        info.collisions.push((player, kind));
    }
}
