//! Integration tests driving the public session API end to end

use tui_match3::config::PuzzleConfig;
use tui_match3::core::{Board, SessionController, SimpleRng};
use tui_match3::types::{Coord, SessionPhase, SkillKind};

#[test]
fn test_full_session_lifecycle() {
    let mut session = SessionController::new();
    assert_eq!(session.phase(), SessionPhase::Idle);

    session
        .begin_session(PuzzleConfig::default(), 2024)
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Running);

    // Skills always clear something on a full board
    assert!(session.use_skill(SkillKind::Cross, || 0.0));
    assert!(session.score() > 0);
    let score_mid = session.score();

    // Run the clock out in 16 ms steps; the finished event fires exactly once
    let mut results = Vec::new();
    for _ in 0..4000 {
        if let Some(result) = session.tick(0.016) {
            results.push(result);
        }
    }
    assert_eq!(results.len(), 1);
    assert_eq!(session.phase(), SessionPhase::Finished);

    let result = results[0];
    assert!(result.score >= score_mid);
    assert_eq!(result.score, session.score());
    assert_eq!(
        result.total_xp,
        150 + (result.score as f32 * 0.1).round() as u32
    );
    assert_eq!(
        result.total_coins,
        100 + (result.score as f32 * 0.05).round() as u32
    );
    assert!(result.total_combos >= 1);
}

#[test]
fn test_clear_row_scenario() {
    // 6x6 board, six piece types, no empty cells
    let mut board = Board::generate(6, 6, 6, SimpleRng::new(99)).unwrap();
    assert!(board.cells().iter().all(|c| c.is_some()));

    let report = board.clear_row(3).unwrap();
    assert_eq!(report.steps[0].cleared, 6);
    assert_eq!(report.steps[0].combo, 1);

    // Collapse refilled every vacated slot
    assert!(board.cells().iter().all(|c| c.is_some()));
}

#[test]
fn test_generated_boards_are_full_and_in_range() {
    for seed in [1u32, 7, 4242] {
        let board = Board::generate(6, 6, 6, SimpleRng::new(seed)).unwrap();
        assert_eq!(board.cells().len(), 36);
        for cell in board.cells() {
            assert!(cell.expect("generated boards have no empty cells").0 < 6);
        }
    }
}

#[test]
fn test_sessions_are_deterministic_per_seed() {
    let run_one = || {
        let mut session = SessionController::new();
        session
            .begin_session(PuzzleConfig::default(), 555)
            .unwrap();
        session.use_skill(SkillKind::Cross, || 0.0);
        session.use_skill(SkillKind::Line, || 0.0);
        let result = session.force_finish().unwrap();
        let cells = session.board().unwrap().cells().to_vec();
        (result, cells)
    };

    let (result_a, cells_a) = run_one();
    let (result_b, cells_b) = run_one();
    assert_eq!(result_a, result_b);
    assert_eq!(cells_a, cells_b);
}

#[test]
fn test_clear_notifications_feed_the_score() {
    let mut session = SessionController::new();
    session
        .begin_session(PuzzleConfig::default(), 31)
        .unwrap();

    session.on_pieces_cleared(10, 1);
    assert_eq!(session.score(), 100);

    let result = session.force_finish().unwrap();
    assert_eq!(result.score, 100);
    assert_eq!(result.total_xp, 160);
    assert_eq!(result.total_coins, 105);
    assert_eq!(result.total_combos, 1);
}

#[test]
fn test_cooldowns_across_session_boundaries() {
    let mut session = SessionController::new();
    session
        .begin_session(PuzzleConfig::default(), 8)
        .unwrap();

    assert!(session.use_skill(SkillKind::Line, || 0.0));
    assert_eq!(session.cooldown(SkillKind::Line), 25.0);
    session.force_finish();

    // Cooldowns keep decaying after the session ended
    session.tick(10.0);
    assert_eq!(session.cooldown(SkillKind::Line), 15.0);

    // A fresh session starts with every cooldown cleared
    session.begin_session(PuzzleConfig::default(), 8).unwrap();
    assert_eq!(session.cooldown(SkillKind::Line), 0.0);
    assert!(session.skill_ready(SkillKind::Line));
}

#[test]
fn test_swap_rejections_never_mutate_the_board() {
    let mut session = SessionController::new();
    session
        .begin_session(PuzzleConfig::default(), 66)
        .unwrap();
    let before = session.board().unwrap().cells().to_vec();

    assert!(!session.swap(Coord::new(0, 0), Coord::new(2, 0)));
    assert!(!session.swap(Coord::new(0, 0), Coord::new(1, 1)));
    assert!(!session.swap(Coord::new(0, 0), Coord::new(0, 9)));
    assert_eq!(session.board().unwrap().cells(), &before[..]);
    assert_eq!(session.score(), 0);
}
