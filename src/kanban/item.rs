//! Items that can be dragged between columns.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::column::ColumnKey;

/// A record the drag coordinator can move between columns.
///
/// The coordinator only ever reads the id and the current column, and only
/// ever produces new values through [`Draggable::with_column`]. Items are
/// never created or destroyed by it.
pub trait Draggable: Clone {
    /// Stable identifier type.
    type Id: Clone + PartialEq + fmt::Debug;

    /// Returns the item's identifier.
    fn id(&self) -> &Self::Id;

    /// Returns the column the item currently sits in.
    fn column(&self) -> &ColumnKey;

    /// Returns a copy of the item moved to `column`.
    fn with_column(&self, column: ColumnKey) -> Self;
}

/// A task card as delivered by the planner backend.
///
/// The status lives in `estado` (`status` is accepted on input). Every other
/// field is kept as-is so a task survives a round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier
    pub id: u64,
    /// Status column
    #[serde(rename = "estado", alias = "status")]
    pub status: ColumnKey,
    /// Remaining backend fields (title, assignee, dates, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Task {
    /// Creates a task with no extra fields.
    pub fn new(id: u64, status: impl Into<ColumnKey>) -> Self {
        Self {
            id,
            status: status.into(),
            fields: Map::new(),
        }
    }

    /// Returns the task title, if the backend sent one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.fields
            .get("titulo")
            .or_else(|| self.fields.get("title"))
            .and_then(Value::as_str)
    }
}

impl Draggable for Task {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn column(&self) -> &ColumnKey {
        &self.status
    }

    fn with_column(&self, column: ColumnKey) -> Self {
        Self {
            status: column,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_accepts_both_status_names() {
        let a: Task = serde_json::from_value(json!({"id": 1, "estado": "todo"})).unwrap();
        let b: Task = serde_json::from_value(json!({"id": 2, "status": "done"})).unwrap();
        assert_eq!(a.status, "todo");
        assert_eq!(b.status, "done");
    }

    #[test]
    fn test_task_keeps_extra_fields() {
        let value = json!({"id": 7, "estado": "doing", "titulo": "Informe", "horas": 3});
        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.title(), Some("Informe"));

        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["horas"], 3);
        assert_eq!(back["estado"], "doing");
    }

    #[test]
    fn test_with_column_only_changes_status() {
        let mut task = Task::new(3, "todo");
        task.fields.insert("title".to_string(), json!("Write docs"));
        let moved = task.with_column(ColumnKey::from("done"));
        assert_eq!(moved.status, "done");
        assert_eq!(moved.id, 3);
        assert_eq!(moved.fields, task.fields);
        assert_eq!(task.status, "todo");
    }
}
