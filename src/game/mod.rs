//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies,
//! apart from the flow state machine which talks to the record store and queues sound cues.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod flow;
pub mod grid;
pub mod scheduler;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, PlayerId};
pub use config::{Difficulty, GameConfig, GameMode};
pub use engine::{GameEngine, Meal, StepInfo, StepResult};
pub use flow::{FlowSnapshot, GameFlow, Outcome, Phase, RoundResult};
pub use grid::Grid;
pub use scheduler::TickScheduler;
pub use state::{CollisionType, Food, Obstacle, Position, RoundState, Snake};
