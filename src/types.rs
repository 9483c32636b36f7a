//! Core types shared across the application
//! This module contains pure data types and the gameplay tuning constants

use serde::{Deserialize, Serialize};

/// Default board shape (overridable via `PuzzleConfig`)
pub const DEFAULT_BOARD_WIDTH: usize = 6;
pub const DEFAULT_BOARD_HEIGHT: usize = 6;
pub const DEFAULT_PIECE_TYPES: usize = 6;

/// A match-free fill cannot be guaranteed with fewer piece types than this.
pub const MIN_PIECE_TYPES: usize = 3;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Fixed driver tick (milliseconds)
pub const TICK_MS: u32 = 16;

/// Session timing and reward defaults (mirroring the shipped balance sheet)
pub const DEFAULT_SESSION_SECS: f32 = 60.0;
pub const DEFAULT_COMBO_REWARD_MULTIPLIER: f32 = 0.1;
pub const DEFAULT_BASE_PUZZLE_XP: u32 = 150;
pub const DEFAULT_BASE_PUZZLE_COINS: u32 = 100;
pub const DEFAULT_CROSS_COOLDOWN_SECS: f32 = 20.0;
pub const DEFAULT_LINE_COOLDOWN_SECS: f32 = 25.0;

/// Base score per cleared piece, before the combo multiplier
pub const SCORE_PER_PIECE: u32 = 10;

/// Result derivation rates: XP and coins earned per point of score
pub const XP_PER_SCORE: f32 = 0.1;
pub const COINS_PER_SCORE: f32 = 0.05;

/// Cooldown reduction never scales a cooldown below this fraction of its base
pub const MIN_COOLDOWN_SCALE: f32 = 0.1;

/// Piece type identifier in `[0, piece_types)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceType(pub u8);

/// Cell on the board (None = empty, Some = filled with a piece type)
pub type Cell = Option<PieceType>;

/// Board coordinate, (0, 0) at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan-distance-1 neighbors are the only legal swap pairs
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Area-clear abilities usable during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    /// Clears the full row and column through the board midpoint
    Cross,
    /// Clears the board's middle row
    Line,
}

impl SkillKind {
    pub const COUNT: usize = 2;
    pub const ALL: [SkillKind; Self::COUNT] = [SkillKind::Cross, SkillKind::Line];

    /// Parse skill kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cross" => Some(SkillKind::Cross),
            "line" => Some(SkillKind::Line),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Cross => "cross",
            SkillKind::Line => "line",
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Finished,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Finished => "finished",
        }
    }
}

/// What a call to `SessionController::select` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Cell added to the selection set
    Selected,
    /// Cell was already selected and has been removed
    Deselected,
    /// Second selection triggered a swap that matched; selection reset
    SwapMatched,
    /// Second selection triggered a swap that was rejected; selection reset
    SwapRejected,
    /// Input disabled, session not running, or coordinate out of bounds
    Ignored,
}

/// Immutable outcome of one finished session, consumed by the progression layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleResult {
    pub score: u32,
    pub total_xp: u32,
    pub total_coins: u32,
    pub total_combos: u32,
}
