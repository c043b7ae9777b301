//! isocraft library crate: re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the game entry point. This library
//! exposes the same modules so that `tests/` can import game types,
//! systems, and resources and drive them headlessly.

pub mod shared;
pub mod config;
pub mod data;
pub mod crafting;
pub mod world;
pub mod player;
pub mod save;
