use crate::types::{Coord, SessionPhase, SkillKind};

/// Point-in-time view of a session, written via
/// [`SessionController::snapshot_into`](crate::core::SessionController::snapshot_into)
/// and consumed by renderers and drivers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Board cells row-major: 0 = empty, piece type + 1 otherwise
    pub board: Vec<u8>,
    pub board_width: usize,
    pub board_height: usize,
    pub phase: SessionPhase,
    pub time_remaining: f32,
    pub score: u32,
    pub max_combo: u32,
    pub cooldowns: [f32; SkillKind::COUNT],
    pub selection: [Option<Coord>; 2],
    pub input_enabled: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: Vec::new(),
            board_width: 0,
            board_height: 0,
            phase: SessionPhase::Idle,
            time_remaining: 0.0,
            score: 0,
            max_combo: 0,
            cooldowns: [0.0; SkillKind::COUNT],
            selection: [None; 2],
            input_enabled: false,
        }
    }
}

impl SessionSnapshot {
    /// Byte value of the cell at (x, y), or None when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.board_width || y >= self.board_height {
            return None;
        }
        self.board.get(y * self.board_width + x).copied()
    }

    /// Whether a skill can be used right now
    pub fn skill_ready(&self, kind: SkillKind) -> bool {
        self.phase == SessionPhase::Running && self.cooldowns[kind as usize] <= 0.0
    }

    /// Whether the given cell is currently selected
    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selection.iter().any(|s| *s == Some(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup() {
        let snapshot = SessionSnapshot {
            board: vec![1, 2, 0, 3],
            board_width: 2,
            board_height: 2,
            ..Default::default()
        };

        assert_eq!(snapshot.cell(0, 0), Some(1));
        assert_eq!(snapshot.cell(1, 0), Some(2));
        assert_eq!(snapshot.cell(0, 1), Some(0));
        assert_eq!(snapshot.cell(1, 1), Some(3));
        assert_eq!(snapshot.cell(2, 0), None);
        assert_eq!(snapshot.cell(0, 2), None);
    }

    #[test]
    fn test_skill_ready_requires_running() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.skill_ready(SkillKind::Cross));

        snapshot.phase = SessionPhase::Running;
        assert!(snapshot.skill_ready(SkillKind::Cross));
        assert!(snapshot.skill_ready(SkillKind::Line));

        snapshot.cooldowns[SkillKind::Cross as usize] = 3.5;
        assert!(!snapshot.skill_ready(SkillKind::Cross));
        assert!(snapshot.skill_ready(SkillKind::Line));
    }

    #[test]
    fn test_is_selected() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_selected(Coord::new(1, 1)));

        snapshot.selection[0] = Some(Coord::new(1, 1));
        assert!(snapshot.is_selected(Coord::new(1, 1)));
        assert!(!snapshot.is_selected(Coord::new(0, 1)));
    }
}
