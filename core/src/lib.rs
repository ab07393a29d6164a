//! Match-resolution engine for the tile matching game.
//!
//! A [`GameSession`] owns a [`Board`] produced by a [`BoardGenerator`]. Activating an empty slot looks up the
//! nearest tile in each cardinal direction ([`find_neighbors`]), [`evaluate`] decides which of them match and
//! which special effects fire, and the session applies the result to board, score and clock.
#![no_std]

extern crate alloc;

pub use board::*;
pub use config::*;
pub use error::*;
pub use evaluator::*;
pub use generator::*;
pub use resolver::*;
pub use session::*;
pub use snapshot::*;
pub use special::*;
pub use tile::*;
pub use types::*;

mod board;
mod config;
mod error;
mod evaluator;
mod generator;
mod resolver;
mod session;
mod snapshot;
mod special;
mod tile;
mod types;
