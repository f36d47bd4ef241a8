//! Kanban board drag-and-drop.
//!
//! The board itself (the item collection, its persistence and rendering)
//! belongs to the caller. This module only decides which single status
//! change a drag gesture commits.

pub mod column;
pub mod coordinator;
pub mod event;
pub mod item;
pub mod resolver;

pub use column::ColumnKey;
pub use coordinator::{reassign_column, DragCoordinator, DragPhase, DropOutcome, Reassignment};
pub use event::{
    DragEndEvent, DragMoveEvent, DragOverEvent, DragPayload, DragStartEvent, DropTarget, Point,
};
pub use item::{Draggable, Task};
pub use resolver::{ColumnResolver, HitRegion, LayeredTargets, NoHitTesting, Rect};
