//! Deterministic match-3 core with a timed session controller.
//!
//! The [`core`] module owns game truth: board generation under the
//! no-match-at-generation constraint, swap validation, cascade resolution
//! with combo accounting, area-clear skills on cooldown, and the timed
//! session lifecycle that turns clears into a final [`types::PuzzleResult`].
//! It is deterministic per seed and has no UI or I/O dependencies.
//!
//! [`term`] maps session snapshots to terminal rows; the default binary
//! drives a playable session with crossterm.
//!
//! # Example
//!
//! ```
//! use tui_match3::config::PuzzleConfig;
//! use tui_match3::core::SessionController;
//!
//! let mut session = SessionController::new();
//! session.begin_session(PuzzleConfig::default(), 12345).unwrap();
//!
//! // Drive the clock; the finished result is returned exactly once.
//! let result = session.tick(60.0).expect("session should finish");
//! assert_eq!(result.total_xp, 150 + (result.score as f32 * 0.1).round() as u32);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod term;
pub mod types;
