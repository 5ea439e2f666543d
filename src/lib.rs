//! Snake Duel - a terminal snake game for one or two players
//!
//! This library provides:
//! - Core game logic: grid, collisions, spawning, tick scheduling and the game-flow state machine (game module)
//! - Best score / best time persistence (records module)
//! - TUI rendering, keyboard input and sound cues (render, input, audio modules)
//! - The interactive play loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod records;
pub mod render;
