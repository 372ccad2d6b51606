//! Text formatting shared by the one-shot commands and the shell.

use gridwar::game::{CombatResult, UnitSummary};
use gridwar::{ActionOutcome, CommitReport, GameState};

/// Describe what a commit did, one line per action.
pub(super) fn format_report(report: &CommitReport) -> String {
    let mut output = String::new();

    if report.outcomes.is_empty() {
        output.push_str(&format!("Player {} passed\n", report.player));
    }
    for (action, outcome) in &report.outcomes {
        output.push_str(&format!("{action}: {}\n", describe_outcome(outcome)));
    }

    output
}

fn describe_outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Spawned { id, position } => format!("spawned unit {id} at {position}"),
        ActionOutcome::Moved { to } => format!("moved to {to}"),
        ActionOutcome::Attacked(CombatResult::Wounded { remaining }) => {
            format!("hit, {remaining} health left")
        }
        ActionOutcome::Attacked(CombatResult::Killed) => "target destroyed".to_string(),
        ActionOutcome::Attacked(CombatResult::TargetGone) => "target already gone".to_string(),
        ActionOutcome::Attacked(CombatResult::AttackerUnarmed) => "attacker gone".to_string(),
        ActionOutcome::Attacked(CombatResult::TargetImmune) => "no effect".to_string(),
        ActionOutcome::Skipped => "skipped".to_string(),
        ActionOutcome::Faulted(fault) => format!("failed ({fault})"),
    }
}

/// Current player and pending queue.
pub(super) fn format_status(game: &GameState) -> String {
    let index = game.current_player();
    let player = game.players().current();

    let mut output = format!(
        "Player {index} (#{:06X}{}), money {}\n",
        player.color,
        if player.ai { ", AI" } else { "" },
        player.money
    );

    let queue = game.list_queue();
    if queue.is_empty() {
        output.push_str("No pending actions\n");
    }
    for (i, line) in queue.iter().enumerate() {
        output.push_str(&format!("  {}. {line}\n", i + 1));
    }

    output
}

/// Units on one cell, or a note that it is empty.
pub(super) fn format_cell(summaries: &[UnitSummary]) -> String {
    if summaries.is_empty() {
        return "Empty cell\n".to_string();
    }

    let mut output = String::new();
    for summary in summaries {
        output.push_str(&format!("{summary}\n"));
    }
    output
}
