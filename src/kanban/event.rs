//! Drag event payloads delivered by the UI layer.
//!
//! Every field is optional where a real pointer pipeline may leave it out;
//! the coordinator treats missing data as "nothing to do".

use super::column::ColumnKey;

/// Screen coordinates of the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What the user picked up.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload<T> {
    /// A draggable item
    Item(T),
    /// A whole column (column reordering is not handled here)
    Column(ColumnKey),
    /// Anything else
    Unknown,
}

/// A drop target currently under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// Identifier of the target element
    pub id: String,
    /// Column key attached to the target, if it declares one
    pub column: Option<ColumnKey>,
}

impl DropTarget {
    /// A target that declares a column key.
    pub fn column(id: impl Into<String>, column: impl Into<ColumnKey>) -> Self {
        Self {
            id: id.into(),
            column: Some(column.into()),
        }
    }

    /// A target without column metadata (e.g. another card).
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column: None,
        }
    }
}

/// Drag gesture started.
#[derive(Debug, Clone, PartialEq)]
pub struct DragStartEvent<T> {
    /// Picked-up payload
    pub payload: Option<DragPayload<T>>,
    /// Pointer position at pick-up
    pub pointer: Option<Point>,
}

impl<T> DragStartEvent<T> {
    /// Start event for an item.
    pub const fn item(item: T) -> Self {
        Self {
            payload: Some(DragPayload::Item(item)),
            pointer: None,
        }
    }
}

/// Pointer moved during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragMoveEvent {
    /// New pointer position
    pub pointer: Option<Point>,
}

impl DragMoveEvent {
    /// Move event to `(x, y)`.
    #[must_use]
    pub const fn to(x: f64, y: f64) -> Self {
        Self {
            pointer: Some(Point::new(x, y)),
        }
    }
}

/// The element under the pointer changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragOverEvent {
    /// Target under the pointer
    pub over: Option<DropTarget>,
}

/// Drag gesture released.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragEndEvent {
    /// Target under the pointer at release
    pub over: Option<DropTarget>,
}
