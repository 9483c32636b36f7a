//! View: maps a `SessionSnapshot` into terminal cells and status lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crossterm::style::Color;

use crate::core::snapshot::SessionSnapshot;
use crate::types::SkillKind;

/// Piece palette: red, orange, yellow, green, blue, purple.
/// Types beyond six wrap around.
pub const PIECE_COLORS: [Color; 6] = [
    Color::Rgb {
        r: 245,
        g: 89,
        b: 89,
    },
    Color::Rgb {
        r: 242,
        g: 171,
        b: 51,
    },
    Color::Rgb {
        r: 252,
        g: 237,
        b: 76,
    },
    Color::Rgb {
        r: 82,
        g: 196,
        b: 92,
    },
    Color::Rgb {
        r: 79,
        g: 163,
        b: 242,
    },
    Color::Rgb {
        r: 189,
        g: 117,
        b: 242,
    },
];

/// One renderable board cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub glyph: char,
    pub color: Color,
    pub selected: bool,
}

/// Color for a piece type index
pub fn piece_color(type_index: u8) -> Color {
    PIECE_COLORS[type_index as usize % PIECE_COLORS.len()]
}

/// Render the board portion of a snapshot, row by row
pub fn board_rows(snapshot: &SessionSnapshot) -> Vec<Vec<CellView>> {
    let mut rows = Vec::with_capacity(snapshot.board_height);
    for y in 0..snapshot.board_height {
        let mut row = Vec::with_capacity(snapshot.board_width);
        for x in 0..snapshot.board_width {
            let value = snapshot.cell(x, y).unwrap_or(0);
            let cell = match value {
                0 => CellView {
                    glyph: '\u{00b7}',
                    color: Color::DarkGrey,
                    selected: false,
                },
                v => CellView {
                    glyph: '\u{25cf}',
                    color: piece_color(v - 1),
                    selected: snapshot.is_selected(crate::types::Coord::new(x, y)),
                },
            };
            row.push(cell);
        }
        rows.push(row);
    }
    rows
}

/// Fixed status block shown next to the board
pub fn status_lines(snapshot: &SessionSnapshot) -> [String; 5] {
    let time = snapshot.time_remaining.max(0.0).ceil() as u32;
    let combo = snapshot.max_combo.max(1);

    [
        format!("STATE {}", snapshot.phase.as_str().to_uppercase()),
        format!("TIME {}s", time),
        format!("SCORE {}", snapshot.score),
        format!("COMBO x{}", combo),
        format!(
            "CROSS {}  LINE {}",
            cooldown_label(snapshot.cooldowns[SkillKind::Cross as usize]),
            cooldown_label(snapshot.cooldowns[SkillKind::Line as usize]),
        ),
    ]
}

fn cooldown_label(cooldown: f32) -> String {
    if cooldown > 0.0 {
        format!("{:.0}s", cooldown)
    } else {
        "READY".to_string()
    }
}
