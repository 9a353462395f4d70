//! Background search worker.
//!
//! The engine owns one [`Game`](crate::game::Game) behind a mutex and runs
//! searches on a dedicated thread so a caller (a protocol loop or a UI) stays
//! responsive. Only one search runs per engine at a time; the game is locked
//! for its whole duration.

mod controller;

pub use controller::{Engine, SearchJob};
