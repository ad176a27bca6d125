//! Maze-chase arcade simulation: a player collecting pellets in a tile maze
//! while four pursuers with distinct targeting personalities hunt it.
//!
//! The host drives [`game::Game::tick`] once per frame and draws the returned
//! [`render::RenderFrame`].

pub mod config;
pub mod ecs;
pub mod game;
pub mod input;
pub mod ledger;
pub mod maze;
pub mod motion;
pub mod persistence;
pub mod random;
pub mod render;
pub mod schedule;
pub mod timers;

pub use game::{Game, GameState};
