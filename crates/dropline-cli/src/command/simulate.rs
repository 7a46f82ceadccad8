use std::{
    fs::File,
    io::{self, BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use dropline_engine::{AttemptOutcome, Board, Field, FieldSnapshot, Move, Piece, SpawnError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Path to the move script (JSON)
    script: PathBuf,
    /// Pretty-print the report
    #[clap(long)]
    pretty: bool,
}

/// A starting stack and the steps to replay on it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct Script {
    /// Fixed rows, bottom-aligned. Empty means an empty board.
    #[serde(default)]
    board: Vec<String>,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Step {
    Spawn { spawn: Piece },
    Move(Move),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum StepOutcome {
    Spawned,
    GameOver,
    PieceInPlay,
    Idle,
    Rejected,
    Moved,
    Locked { lines_cleared: usize },
}

impl From<AttemptOutcome> for StepOutcome {
    fn from(outcome: AttemptOutcome) -> Self {
        match outcome {
            AttemptOutcome::Idle => Self::Idle,
            AttemptOutcome::Rejected => Self::Rejected,
            AttemptOutcome::Moved => Self::Moved,
            AttemptOutcome::Locked { lines_cleared } => Self::Locked { lines_cleared },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Report {
    outcomes: Vec<StepOutcome>,
    lines_cleared: usize,
    game_over: bool,
    /// Final board in text form, top row first.
    board: Vec<String>,
    snapshot: FieldSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg { script, pretty } = arg;

    let script = read_script(script)?;
    let report = simulate(&script)?;

    let mut stdout = io::stdout().lock();
    let written = if *pretty {
        serde_json::to_writer_pretty(&mut stdout, &report)
    } else {
        serde_json::to_writer(&mut stdout, &report)
    };
    written.context("Failed to write report to stdout")?;
    writeln!(stdout).context("Failed to write report to stdout")?;
    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open script file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse script file: {}", path.display()))
}

/// Replays `script` on a fresh field. Stops at the first spawn that ends the game.
pub(crate) fn simulate(script: &Script) -> anyhow::Result<Report> {
    let board = Board::parse_rows(script.board.as_slice()).context("Invalid board in script")?;
    let mut field = Field::with_board(board);

    let mut outcomes = Vec::with_capacity(script.steps.len());
    let mut lines_cleared = 0;
    let mut game_over = false;
    for step in &script.steps {
        let outcome = match *step {
            Step::Spawn { spawn } => match field.spawn(spawn) {
                Ok(()) => StepOutcome::Spawned,
                Err(SpawnError::GameOver) => StepOutcome::GameOver,
                Err(SpawnError::PieceInPlay) => StepOutcome::PieceInPlay,
            },
            Step::Move(intent) => {
                let outcome = field.attempt(intent);
                if let AttemptOutcome::Locked { lines_cleared: n } = outcome {
                    lines_cleared += n;
                }
                outcome.into()
            }
        };
        outcomes.push(outcome);
        if outcome.is_game_over() {
            game_over = true;
            break;
        }
    }

    Ok(Report {
        outcomes,
        lines_cleared,
        game_over,
        board: field.board().to_string().lines().map(str::to_owned).collect(),
        snapshot: field.snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn run_script(json: &str) -> Report {
        let script: Script = serde_json::from_str(json).unwrap();
        simulate(&script).unwrap()
    }

    #[test]
    fn test_move_sequence() {
        let report = run_script(
            r#"{"steps": [{"spawn": "T#0@-1,3"}, "moveLeft", "rotateRight", "hardDrop", "softDrop"]}"#,
        );
        assert_eq!(
            report.outcomes,
            [
                StepOutcome::Spawned,
                StepOutcome::Moved,
                StepOutcome::Moved,
                StepOutcome::Locked { lines_cleared: 0 },
                StepOutcome::Idle,
            ]
        );
        assert!(!report.game_over);
        assert_eq!(report.snapshot.current, None);
    }

    #[test]
    fn test_gap_fill_clears_line() {
        let report = run_script(
            r#"{
                "board": ["..OO......", ".IIIIIIIII"],
                "steps": [{"spawn": "I#1@-1,-2"}, "hardDrop"]
            }"#,
        );
        assert_eq!(report.lines_cleared, 1);
        assert_eq!(&report.board[17..], ["#.........", "#.........", "#.##......"]);
    }

    #[test]
    fn test_game_over_stops_replay() {
        let mut board = vec![".........."; 20];
        board[0] = "....T.....";
        let script = json!({
            "board": board,
            "steps": [{"spawn": "T#0@-1,3"}, {"spawn": "O#0@-1,0"}, "hardDrop"],
        });
        let script: Script = serde_json::from_value(script).unwrap();
        let report = simulate(&script).unwrap();
        assert_eq!(report.outcomes, [StepOutcome::GameOver]);
        assert!(report.game_over);
        assert_eq!(report.board[0], "....#.....");
    }

    #[test]
    fn test_second_spawn_reports_piece_in_play() {
        let report = run_script(r#"{"steps": [{"spawn": "O#0@-1,3"}, {"spawn": "I#0@-1,3"}]}"#);
        assert_eq!(report.outcomes, [StepOutcome::Spawned, StepOutcome::PieceInPlay]);
        assert!(!report.game_over);
    }

    #[test]
    fn test_report_json() {
        let report = run_script(r#"{"steps": [{"spawn": "O#0@-1,3"}, "hardDrop", "moveLeft"]}"#);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value["outcomes"],
            json!([
                {"kind": "spawned"},
                {"kind": "locked", "linesCleared": 0},
                {"kind": "idle"},
            ])
        );
        assert_eq!(value["linesCleared"], 0);
        assert_eq!(value["gameOver"], false);
        assert_eq!(value["snapshot"]["height"], 20);
        assert_eq!(value["snapshot"]["width"], 10);
        assert_eq!(value["board"][19], "...##.....");
    }

    #[test]
    fn test_invalid_scripts() {
        assert!(serde_json::from_str::<Script>(r#"{"steps": ["jump"]}"#).is_err());
        assert!(serde_json::from_str::<Script>(r#"{"steps": [{"spawn": "X#0@0,0"}]}"#).is_err());
        assert!(serde_json::from_str::<Script>(r#"{"board": []}"#).is_err());

        let script: Script =
            serde_json::from_str(r#"{"board": ["....."], "steps": []}"#).unwrap();
        assert!(simulate(&script).is_err());
    }
}
