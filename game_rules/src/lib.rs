//! # Game Rules
//!
//! The rules crate for Night Drive - resources, inventory, the night clock,
//! endings and tuning. This crate is the single source of truth for a
//! playthrough's state and knows nothing about scenes, timers or screens.

pub mod clock;
pub mod config;
pub mod endings;
pub mod resources;
pub mod state;

pub use clock::*;
pub use config::*;
pub use endings::*;
pub use resources::*;
pub use state::*;
