//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver advances it one turn at a time through [`GameEngine::play_step`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, MAX_FOOD_ATTEMPTS, StepInfo, StepResult};
pub use error::ConfigError;
pub use state::{Board, CollisionType, GameState, GameStatus, Point, Snake};
