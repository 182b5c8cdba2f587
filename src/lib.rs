//! Bubble Pop: bubbles rise through the playfield and the player clicks them
//! away before they escape off the top.
//!
//! - `config`: immutable tuning and playfield dimensions
//! - `entities`: pure data (bubbles, particles, game state)
//! - `compute`: the simulation, as functions from state to state

pub mod compute;
pub mod config;
pub mod entities;
