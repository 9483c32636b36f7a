//! Session module - drives one timed play-through over a board
//!
//! The controller owns the board and the session state: countdown, score,
//! combo peak, skill cooldowns, and the selection set. Drivers call `tick`
//! once per time step and forward player input to `select`/`swap`/`use_skill`;
//! the finished result is returned exactly once, from the call that ends the
//! session.
//!
//! Lifecycle: `Idle -> Running -> Finished`, re-armed from any state by
//! `begin_session`.

use arrayvec::ArrayVec;

use crate::config::PuzzleConfig;
use crate::core::board::{Board, CascadeReport};
use crate::core::rng::SimpleRng;
use crate::core::scoring::{clear_score, puzzle_coins, puzzle_xp, scaled_cooldown};
use crate::core::snapshot::SessionSnapshot;
use crate::error::GridError;
use crate::types::{Coord, PuzzleResult, SelectOutcome, SessionPhase, SkillKind};

/// Controls one timed match-3 session
#[derive(Debug)]
pub struct SessionController {
    config: PuzzleConfig,
    board: Option<Board>,
    phase: SessionPhase,
    time_remaining: f32,
    score: u32,
    max_combo: u32,
    cooldowns: [f32; SkillKind::COUNT],
    selection: ArrayVec<Coord, 2>,
    input_enabled: bool,
    result: Option<PuzzleResult>,
}

impl SessionController {
    /// Create an idle controller with no board
    pub fn new() -> Self {
        Self {
            config: PuzzleConfig::default(),
            board: None,
            phase: SessionPhase::Idle,
            time_remaining: 0.0,
            score: 0,
            max_combo: 0,
            cooldowns: [0.0; SkillKind::COUNT],
            selection: ArrayVec::new(),
            input_enabled: false,
            result: None,
        }
    }

    /// Start (or restart) a session: regenerate the board and reset all
    /// session state. Valid from any lifecycle state.
    ///
    /// On error (board generation rejected the config) the previous session
    /// state is left untouched.
    pub fn begin_session(&mut self, config: PuzzleConfig, seed: u32) -> Result<(), GridError> {
        let board = Board::generate(
            config.board_width,
            config.board_height,
            config.piece_types,
            SimpleRng::new(seed),
        )?;

        self.config = config;
        self.board = Some(board);
        self.phase = SessionPhase::Running;
        self.time_remaining = config.duration_secs;
        self.score = 0;
        self.max_combo = 0;
        self.cooldowns = [0.0; SkillKind::COUNT];
        self.selection.clear();
        self.input_enabled = true;
        self.result = None;
        Ok(())
    }

    /// Advance the session clock by `dt` seconds.
    ///
    /// Skill cooldowns decay in every lifecycle state, not just while
    /// running. While running the countdown also advances; the tick that
    /// reaches zero finishes the session and returns the result. Every other
    /// call returns `None`, so the finished event fires exactly once per
    /// session.
    pub fn tick(&mut self, dt: f32) -> Option<PuzzleResult> {
        for cooldown in &mut self.cooldowns {
            if *cooldown > 0.0 {
                *cooldown = (*cooldown - dt).max(0.0);
            }
        }

        if self.phase != SessionPhase::Running {
            return None;
        }

        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            return Some(self.complete());
        }

        None
    }

    /// Select or deselect a cell; the second selected cell triggers a swap
    /// attempt and resets the selection whether or not the swap matched.
    pub fn select(&mut self, coord: Coord) -> SelectOutcome {
        if self.phase != SessionPhase::Running || !self.input_enabled {
            return SelectOutcome::Ignored;
        }
        let in_bounds = self
            .board
            .as_ref()
            .is_some_and(|b| b.get(coord.x, coord.y).is_some());
        if !in_bounds {
            return SelectOutcome::Ignored;
        }

        if let Some(pos) = self.selection.iter().position(|c| *c == coord) {
            self.selection.remove(pos);
            return SelectOutcome::Deselected;
        }

        self.selection.push(coord);
        if self.selection.len() < 2 {
            return SelectOutcome::Selected;
        }

        let (a, b) = (self.selection[0], self.selection[1]);
        self.selection.clear();
        if self.swap(a, b) {
            SelectOutcome::SwapMatched
        } else {
            SelectOutcome::SwapRejected
        }
    }

    /// Attempt a swap; returns whether it matched.
    ///
    /// Non-adjacent pairs and swaps that produce no run are silent no-ops.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        if self.phase != SessionPhase::Running || !self.input_enabled {
            return false;
        }
        let Some(board) = self.board.as_mut() else {
            return false;
        };

        let report = board.swap(a, b);
        self.apply_report(&report);
        report.matched()
    }

    /// Use an area-clear skill.
    ///
    /// No-op unless the session is running and the skill is off cooldown.
    /// `cooldown_reduction` is the progression layer's query, sampled only
    /// when the skill actually fires; the result is expected in [0, 1).
    pub fn use_skill<F>(&mut self, kind: SkillKind, cooldown_reduction: F) -> bool
    where
        F: FnOnce() -> f32,
    {
        if self.phase != SessionPhase::Running || self.cooldown(kind) > 0.0 {
            return false;
        }

        let scaled = scaled_cooldown(self.config.base_cooldown(kind), cooldown_reduction());
        let Some(board) = self.board.as_mut() else {
            return false;
        };

        let report = match kind {
            SkillKind::Cross => board.clear_cross(board.width() / 2, board.height() / 2),
            SkillKind::Line => match board.clear_row(board.height() / 2) {
                Ok(report) => report,
                Err(_) => return false,
            },
        };

        self.cooldowns[kind as usize] = scaled;
        self.apply_report(&report);
        true
    }

    /// Finish now.
    ///
    /// Running: behaves exactly like timer expiry. Finished: re-emits the
    /// stored result without recomputing. Idle: nothing to report.
    pub fn force_finish(&mut self) -> Option<PuzzleResult> {
        match self.phase {
            SessionPhase::Running => Some(self.complete()),
            SessionPhase::Finished => self.result,
            SessionPhase::Idle => None,
        }
    }

    /// Account one cascade pass: raise the combo peak and add the pass score.
    pub fn on_pieces_cleared(&mut self, cleared: usize, combo: u32) {
        self.max_combo = self.max_combo.max(combo);
        self.score += clear_score(cleared, combo, self.config.combo_reward_multiplier);
    }

    fn apply_report(&mut self, report: &CascadeReport) {
        for step in &report.steps {
            self.on_pieces_cleared(step.cleared, step.combo);
        }
    }

    fn complete(&mut self) -> PuzzleResult {
        self.phase = SessionPhase::Finished;
        self.input_enabled = false;
        self.selection.clear();

        let result = PuzzleResult {
            score: self.score,
            total_xp: puzzle_xp(self.config.base_puzzle_xp, self.score),
            total_coins: puzzle_coins(self.config.base_puzzle_coins, self.score),
            total_combos: self.max_combo,
        };
        self.result = Some(result);
        result
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Remaining cooldown for a skill, 0 when ready
    pub fn cooldown(&self, kind: SkillKind) -> f32 {
        self.cooldowns[kind as usize]
    }

    /// Whether a skill can be used right now (the input affordance)
    pub fn skill_ready(&self, kind: SkillKind) -> bool {
        self.phase == SessionPhase::Running && self.cooldown(kind) <= 0.0
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn selection(&self) -> &[Coord] {
        &self.selection
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Result of the finished session, if any
    pub fn result(&self) -> Option<PuzzleResult> {
        self.result
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        match &self.board {
            Some(board) => {
                board.write_u8_grid(&mut out.board);
                out.board_width = board.width();
                out.board_height = board.height();
            }
            None => {
                out.board.clear();
                out.board_width = 0;
                out.board_height = 0;
            }
        }

        out.phase = self.phase;
        out.time_remaining = self.time_remaining;
        out.score = self.score;
        out.max_combo = self.max_combo;
        out.cooldowns = self.cooldowns;
        out.selection = [
            self.selection.first().copied(),
            self.selection.get(1).copied(),
        ];
        out.input_enabled = self.input_enabled;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut out = SessionSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        self.board.as_mut().expect("session has no board")
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
