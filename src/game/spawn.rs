//! Collision-free placement of food and obstacles by rejection sampling.

use rand::Rng;
use std::collections::HashSet;

use super::grid::Grid;
use super::state::{Food, Obstacle, Position, Snake};

/// Sample uniform cells until one is not in `occupied`.
///
/// Returns `None` only when every cell is taken; otherwise the loop ends
/// because at least one free cell can be drawn.
fn sample_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let taken = occupied.iter().filter(|pos| grid.contains(**pos)).count();
    if taken >= grid.cell_count() {
        return None;
    }

    loop {
        let cell = grid.random_cell(rng);
        if !occupied.contains(&cell) {
            return Some(cell);
        }
    }
}

fn snake_cells(snakes: &[Snake]) -> HashSet<Position> {
    snakes
        .iter()
        .flat_map(|snake| snake.body.iter().copied())
        .collect()
}

/// Place food on a cell free of every snake segment and obstacle.
///
/// The bonus flag is drawn independently with `bonus_probability`.
pub fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    snakes: &[Snake],
    obstacles: &[Obstacle],
    bonus_probability: f64,
) -> Option<Food> {
    let mut occupied = snake_cells(snakes);
    occupied.extend(obstacles.iter().map(|obstacle| obstacle.position));

    let position = sample_free_cell(rng, grid, &occupied)?;
    let is_bonus = rng.gen_bool(bonus_probability.clamp(0.0, 1.0));
    Some(Food { position, is_bonus })
}

/// Place up to `count` obstacles, none overlapping a snake, the food or each other.
///
/// Stops early only if the grid fills up.
pub fn spawn_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    snakes: &[Snake],
    food: &Food,
) -> Vec<Obstacle> {
    let mut occupied = snake_cells(snakes);
    occupied.insert(food.position);

    let mut obstacles = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(position) = sample_free_cell(rng, grid, &occupied) else {
            log::warn!(
                "Grid full after placing {} of {} obstacles",
                obstacles.len(),
                count
            );
            break;
        };
        occupied.insert(position);
        obstacles.push(Obstacle { position });
    }
    obstacles
}
