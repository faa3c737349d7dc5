//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the grid, piece
//! geometry and rotation, lock delay, line clears, the bag randomizer, and the
//! per-tick session state machine. It has **no dependencies** on rendering,
//! audio, input polling, or wall clocks, making it:
//!
//! - **Deterministic**: the same seed and intent script produce the same game
//! - **Testable**: every rule is reachable from plain function calls
//! - **Portable**: presentation layers only consume [`Signal`]s and snapshots
//!
//! # Module Structure
//!
//! - [`grid`]: 10x25 occupancy grid with atomic line clearing
//! - [`pieces`]: occupancy patterns, rotation transforms and kick tables
//! - [`piece`]: the falling piece: movement, rotation, ghost row, lock delay
//! - [`spin`]: T spin-bonus detection
//! - [`rng`]: 7-bag piece queue with preview
//! - [`scoring`]: line, combo and level counters
//! - [`config`]: tunable rule parameters
//! - [`session`]: per-tick orchestration and hold
//! - [`dispatch`]: intent ordering and outward signals
//! - [`snapshot`]: read-only state export
//!
//! # Example
//!
//! ```
//! use ttris_core::Session;
//! use ttris_types::{Intent, Signal};
//!
//! let mut session = Session::new(12345);
//!
//! session.step(0, &[Intent::MoveRight]);
//! let signals = session.step(1, &[Intent::HardDrop]);
//!
//! assert!(signals.contains(&Signal::HardDrop));
//! assert_eq!(session.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! The caller owns the frame counter and passes it to
//! [`Session::step`](session::Session::step) once per tick. Gravity and lock
//! delay are computed from that counter only.

pub mod config;
pub mod dispatch;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod spin;

pub use ttris_types as types;

// Re-export commonly used types for convenience
pub use config::RulesConfig;
pub use dispatch::IntentSet;
pub use grid::Grid;
pub use piece::{Kick, Piece};
pub use pieces::Pattern;
pub use rng::PieceQueue;
pub use scoring::ClearStats;
pub use session::{Session, Signals};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use ttris_types::Signal;
