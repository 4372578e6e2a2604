//! # Narrative Core
//!
//! Runs one night of the drive. This crate interfaces with `game_rules`,
//! holds the scene graph, and drives it from player choices and virtual
//! timers.
//!
//! ## Core Components
//!
//! - **graph**: Scenes as data, built from beats, choices and transitions
//! - **scheduler**: Virtual-time job queue and the night's clock handle
//! - **session**: The controller that ties state, graph and timers together
//! - **resolver**: What each ending shows
//! - **presentation**: The outbound port to whatever renders the game
//!
//! ## Design Philosophy
//!
//! - **State-Driven**: Every branch reads the current `GameState`
//! - **Event-Driven**: The session reacts to choices and due jobs, one at a time
//! - **Extensible**: New scenes are data and need no new control flow

pub mod graph;
pub mod presentation;
pub mod resolver;
pub mod scheduler;
pub mod session;

pub use graph::*;
pub use presentation::*;
pub use resolver::*;
pub use scheduler::*;
pub use session::*;
