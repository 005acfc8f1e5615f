//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod quick;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod timer;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use quick::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use timer::*;
