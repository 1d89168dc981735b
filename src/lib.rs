//! Grid Snake - a single-screen snake game on a discrete grid
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session clock (metrics module)
//! - The interactive driver loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
