//! Collision predicates over the current entity state.
//!
//! Every function here is pure: callers decide what a collision means
//! (elimination, food consumption) and apply it themselves.

use super::state::{Obstacle, Position, Snake};

/// True iff the head sits on any other segment of the same snake.
///
/// A snake of length 1 never self-collides.
pub fn self_collision(snake: &Snake) -> bool {
    snake.collides_with_body(snake.head())
}

/// True iff two single cells coincide (head vs head, head vs food, head vs obstacle)
pub fn entity_collision(a: Position, b: Position) -> bool {
    a == b
}

/// True iff `head` lies on any segment of `other`, its head included.
///
/// Callers must not pass a snake's own head against itself; use [`self_collision`].
pub fn body_collision(head: Position, other: &Snake) -> bool {
    other.body.iter().any(|&segment| entity_collision(head, segment))
}

/// True iff `head` lies on any obstacle
pub fn obstacle_collision(head: Position, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|obstacle| entity_collision(head, obstacle.position))
}

/// Outcome of testing two live snakes against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnakeClash {
    /// Heads landed on the same cell
    pub head_on: bool,
    /// First snake must be eliminated
    pub first_dies: bool,
    /// Second snake must be eliminated
    pub second_dies: bool,
}

/// Resolve collisions between two snakes after both have moved.
///
/// A head-on meeting eliminates both with no priority. Otherwise a snake
/// whose head lands on the other's body dies and the other is unaffected
/// unless its own head collides too.
pub fn snake_clash(first: &Snake, second: &Snake) -> SnakeClash {
    let head_on = entity_collision(first.head(), second.head());
    if head_on {
        return SnakeClash {
            head_on,
            first_dies: true,
            second_dies: true,
        };
    }

    SnakeClash {
        head_on,
        first_dies: body_collision(first.head(), second),
        second_dies: body_collision(second.head(), first),
    }
}
