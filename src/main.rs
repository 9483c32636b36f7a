//! Terminal match-3 runner (default binary).
//!
//! Crossterm raw-mode loop with a fixed 16 ms tick: arrow keys move the
//! cursor, Enter selects (the second selection attempts a swap), C and L
//! fire the area-clear skills, F finishes early, R restarts, Q quits.
//! The final session result is printed as JSON on exit for whatever
//! progression layer wraps this binary.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use tui_match3::config::PuzzleConfig;
use tui_match3::core::{SessionController, SessionSnapshot};
use tui_match3::term::{board_rows, status_lines};
use tui_match3::types::{Coord, SkillKind, TICK_MS};

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    seed: Option<u32>,
    config_path: PathBuf,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut seed = None;
    let mut config_path = PathBuf::from("balance.json");

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config_path = PathBuf::from(v);
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(CliArgs { seed, config_path })
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    let config = PuzzleConfig::load_or_default(&cli.config_path)?;
    config.validate()?;

    let mut session = SessionController::new();
    session.begin_session(config, cli.seed.unwrap_or_else(wall_clock_seed))?;

    let mut stdout = io::stdout();
    enter(&mut stdout)?;
    let outcome = run(&mut stdout, &mut session, config);

    // Always try to restore terminal state.
    let _ = exit(&mut stdout);
    outcome?;

    if let Some(result) = session.result() {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn run(
    stdout: &mut io::Stdout,
    session: &mut SessionController,
    config: PuzzleConfig,
) -> Result<()> {
    let mut cursor_pos = Coord::new(config.board_width / 2, config.board_height / 2);
    let mut snapshot = SessionSnapshot::default();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        session.snapshot_into(&mut snapshot);
        draw(stdout, &snapshot, cursor_pos)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left => cursor_pos.x = cursor_pos.x.saturating_sub(1),
                        KeyCode::Right => {
                            cursor_pos.x = (cursor_pos.x + 1).min(config.board_width - 1)
                        }
                        KeyCode::Up => cursor_pos.y = cursor_pos.y.saturating_sub(1),
                        KeyCode::Down => {
                            cursor_pos.y = (cursor_pos.y + 1).min(config.board_height - 1)
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            session.select(cursor_pos);
                        }
                        // The demo driver has no progression layer attached,
                        // so skills fire with no cooldown reduction.
                        KeyCode::Char('c') => {
                            session.use_skill(SkillKind::Cross, || 0.0);
                        }
                        KeyCode::Char('l') => {
                            session.use_skill(SkillKind::Line, || 0.0);
                        }
                        KeyCode::Char('f') => {
                            session.force_finish();
                        }
                        KeyCode::Char('r') => {
                            session.begin_session(config, wall_clock_seed())?;
                        }
                        _ => {}
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS as f32 / 1000.0);
        }
    }
}

fn draw(stdout: &mut io::Stdout, snapshot: &SessionSnapshot, cursor_pos: Coord) -> Result<()> {
    stdout.queue(terminal::Clear(terminal::ClearType::All))?;
    stdout.queue(cursor::MoveTo(0, 0))?;

    for (y, row) in board_rows(snapshot).iter().enumerate() {
        stdout.queue(cursor::MoveTo(1, y as u16 + 1))?;
        for (x, cell) in row.iter().enumerate() {
            let under_cursor = Coord::new(x, y) == cursor_pos;
            if under_cursor {
                stdout.queue(SetBackgroundColor(Color::DarkGrey))?;
            }
            stdout.queue(SetForegroundColor(cell.color))?;
            let glyph = if cell.selected { '\u{25c9}' } else { cell.glyph };
            stdout.queue(Print(glyph))?;
            stdout.queue(Print(' '))?;
            if under_cursor {
                stdout.queue(ResetColor)?;
            }
        }
    }
    stdout.queue(ResetColor)?;

    let status_x = snapshot.board_width as u16 * 2 + 4;
    for (i, line) in status_lines(snapshot).iter().enumerate() {
        stdout.queue(cursor::MoveTo(status_x, i as u16 + 1))?;
        stdout.queue(Print(line))?;
    }

    let help_y = snapshot.board_height.max(5) as u16 + 2;
    stdout.queue(cursor::MoveTo(1, help_y))?;
    stdout.queue(Print(
        "arrows move  enter select  c cross  l line  f finish  r restart  q quit",
    ))?;

    stdout.flush()?;
    Ok(())
}

fn enter(stdout: &mut io::Stdout) -> Result<()> {
    terminal::enable_raw_mode()?;
    stdout.queue(terminal::EnterAlternateScreen)?;
    stdout.queue(cursor::Hide)?;
    stdout.flush()?;
    Ok(())
}

fn exit(stdout: &mut io::Stdout) -> Result<()> {
    stdout.queue(ResetColor)?;
    stdout.queue(SetAttribute(Attribute::Reset))?;
    stdout.queue(cursor::Show)?;
    stdout.queue(terminal::LeaveAlternateScreen)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_uses_defaults() {
        let cli = parse_args(&[]).unwrap();
        assert_eq!(cli.seed, None);
        assert_eq!(cli.config_path, PathBuf::from("balance.json"));
    }

    #[test]
    fn parse_args_parses_seed_and_config() {
        let args = vec![
            "--seed".to_string(),
            "4242".to_string(),
            "--config".to_string(),
            "custom.json".to_string(),
        ];
        let cli = parse_args(&args).unwrap();
        assert_eq!(
            cli,
            CliArgs {
                seed: Some(4242),
                config_path: PathBuf::from("custom.json"),
            }
        );
    }

    #[test]
    fn parse_args_rejects_unknown_and_malformed() {
        assert!(parse_args(&["--verbose".to_string()]).is_err());
        assert!(parse_args(&["--seed".to_string()]).is_err());
        assert!(parse_args(&["--seed".to_string(), "abc".to_string()]).is_err());
    }
}
