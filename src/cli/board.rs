//! Kanban board CLI commands.
//!
//! `board move` replays a complete drag gesture (start, hover, drop) for one
//! task through [`DragCoordinator`], so scripted moves follow exactly the
//! same rules as pointer-driven ones.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::cli::common::{CliError, CliResult};
use crate::config::{BoardConfig, Config};
use crate::kanban::{
    ColumnKey, DragCoordinator, DragEndEvent, DragOverEvent, DragStartEvent, DropOutcome,
    DropTarget, Task,
};

/// Kanban board commands
#[derive(Args, Debug)]
pub struct BoardArgs {
    #[command(subcommand)]
    command: BoardCommand,
}

#[derive(Subcommand, Debug)]
enum BoardCommand {
    /// Show the tasks of a board file grouped by column
    Show(BoardShowArgs),
    /// Move a task to another column
    Move(BoardMoveArgs),
}

/// Show the tasks of a board file grouped by column
#[derive(Args, Debug)]
pub struct BoardShowArgs {
    /// JSON file holding the task list
    #[arg(long, value_name = "FILE")]
    file: PathBuf,
}

/// Move a task to another column
#[derive(Args, Debug)]
pub struct BoardMoveArgs {
    /// JSON file holding the task list
    #[arg(long, value_name = "FILE")]
    file: PathBuf,

    /// Identifier of the task to move
    #[arg(long)]
    id: u64,

    /// Destination column key
    #[arg(long, value_name = "COLUMN")]
    to: String,

    /// Write the result back to the file instead of printing it
    #[arg(long)]
    write: bool,
}

impl BoardArgs {
    /// Execute board subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        match &self.command {
            BoardCommand::Show(args) => args.execute(&config.board),
            BoardCommand::Move(args) => args.execute(&config.board),
        }
    }
}

impl BoardShowArgs {
    /// Execute show command
    pub fn execute(&self, board: &BoardConfig) -> CliResult<()> {
        let tasks = read_tasks(&self.file)?;

        for column in &board.columns {
            let in_column: Vec<&Task> = tasks.iter().filter(|t| t.status == column.key).collect();
            println!("{} ({})", column.title, in_column.len());
            for task in in_column {
                println!("  #{:<5} {}", task.id, task.title().unwrap_or("(untitled)"));
            }
        }

        let unknown: Vec<&Task> = tasks
            .iter()
            .filter(|t| !board.has_column(&t.status))
            .collect();
        if !unknown.is_empty() {
            println!("Unassigned ({})", unknown.len());
            for task in unknown {
                println!("  #{:<5} [{}] {}", task.id, task.status, task.title().unwrap_or("(untitled)"));
            }
        }
        Ok(())
    }
}

impl BoardMoveArgs {
    /// Execute move command
    pub fn execute(&self, board: &BoardConfig) -> CliResult<()> {
        let to = ColumnKey::from(self.to.trim());
        if !board.has_column(&to) {
            return Err(CliError::validation(format!(
                "Unknown column '{}'. Configured columns: {}",
                to,
                board.column_keys()
            )));
        }

        let items: Vec<Arc<Task>> = read_tasks(&self.file)?.into_iter().map(Arc::new).collect();
        let (next, outcome) = move_task(board, &items, self.id, &to)?;

        match &outcome {
            DropOutcome::Moved { from, to } => {
                tracing::info!("Moved task #{} from {} to {}", self.id, from, to);
            }
            _ => tracing::info!("Task #{} already in {}", self.id, to),
        }

        let tasks: Vec<Task> = next.iter().map(|task| Task::clone(task)).collect();
        let json = serde_json::to_string_pretty(&tasks)
            .map_err(|e| CliError::io(format!("Failed to serialize tasks: {e}")))?;

        if self.write {
            if matches!(outcome, DropOutcome::Moved { .. }) {
                write_atomic(&self.file, &json)?;
            }
            println!("{}", describe(self.id, &outcome, &to));
        } else {
            println!("{json}");
        }
        Ok(())
    }
}

/// Runs a full drag gesture for task `id` toward `to`.
///
/// Returns the next collection (the input itself when nothing moved) and how
/// the drop was resolved.
pub fn move_task(
    board: &BoardConfig,
    items: &[Arc<Task>],
    id: u64,
    to: &ColumnKey,
) -> CliResult<(Vec<Arc<Task>>, DropOutcome)> {
    let task = items
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| CliError::validation(format!("No task with id {id}")))?;

    let mut coordinator =
        DragCoordinator::without_hit_testing().with_settle_delay(board.settle_delay());
    let target = DropTarget::column(format!("column-{to}"), to.clone());

    coordinator.on_drag_start(DragStartEvent::item(Task::clone(task)));
    coordinator.on_drag_over(&DragOverEvent {
        over: Some(target.clone()),
    });

    let mut next = None;
    let outcome = coordinator.on_drag_end(
        &DragEndEvent {
            over: Some(target),
        },
        |change| next = Some(change.apply(items)),
    );

    Ok((next.unwrap_or_else(|| items.to_vec()), outcome))
}

fn describe(id: u64, outcome: &DropOutcome, to: &ColumnKey) -> String {
    match outcome {
        DropOutcome::Moved { from, to } => format!("Moved task #{id}: {from} -> {to}"),
        _ => format!("Task #{id} is already in {to}; nothing to do."),
    }
}

fn read_tasks(path: &Path) -> CliResult<Vec<Task>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content).map_err(|e| {
        CliError::validation(format!("Invalid task list in {}: {e}", path.display()))
    })
}

fn write_atomic(path: &Path, content: &str) -> CliResult<()> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", temp_path.display())))?;
    fs::rename(&temp_path, path)
        .map_err(|e| CliError::io(format!("Failed to replace {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Arc<Task>> {
        vec![Arc::new(Task::new(1, "todo")), Arc::new(Task::new(2, "doing"))]
    }

    #[test]
    fn test_move_task() {
        let items = items();
        let (next, outcome) = move_task(&BoardConfig::default(), &items, 1, &ColumnKey::from("doing")).unwrap();
        assert!(matches!(outcome, DropOutcome::Moved { .. }));
        assert_eq!(next[0].status, "doing");
        assert!(Arc::ptr_eq(&items[1], &next[1]));
    }

    #[test]
    fn test_move_to_same_column() {
        let items = items();
        let (next, outcome) = move_task(&BoardConfig::default(), &items, 2, &ColumnKey::from("doing")).unwrap();
        assert_eq!(outcome, DropOutcome::SameColumn);
        assert!(next.iter().zip(&items).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_move_unknown_task() {
        let err = move_task(&BoardConfig::default(), &items(), 42, &ColumnKey::from("done")).unwrap_err();
        assert_eq!(err.message, "No task with id 42");
    }

    #[test]
    fn test_describe() {
        let outcome = DropOutcome::Moved {
            from: ColumnKey::from("todo"),
            to: ColumnKey::from("done"),
        };
        assert_eq!(describe(3, &outcome, &ColumnKey::from("done")), "Moved task #3: todo -> done");
    }
}
