//! Drag-and-drop column reassignment.
//!
//! [`DragCoordinator`] turns pointer/drag events into at most one committed
//! status change per gesture:
//!
//! ```text
//! Idle --start(item)--> Dragging --over--> Dragging (target recomputed)
//!   ^                      |  \--cancel--> Idle
//!   |                      end
//!   |                      v
//!   +--tick(deadline)-- Settling
//! ```
//!
//! A drop with no target under the pointer goes straight back to `Idle`.
//! Otherwise the coordinator stays in `Settling` for the settle delay, with
//! the dropped item still exposed as the active item so the renderer can
//! animate it into place. A new drag-start during `Settling` supersedes the
//! pending reset.
//!
//! None of the handlers fail: malformed or partial events are no-ops.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::column::ColumnKey;
use super::event::{
    DragEndEvent, DragMoveEvent, DragOverEvent, DragPayload, DragStartEvent, DropTarget, Point,
};
use super::item::Draggable;
use super::resolver::{ColumnResolver, NoHitTesting};
use crate::constants::{DEFAULT_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS};

/// Observable phase of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag in progress.
    Idle,
    /// An item is being dragged.
    Dragging,
    /// An item was dropped and the reset is pending.
    Settling,
}

/// How a drop was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item moved between columns; the update callback ran once.
    Moved {
        /// Column the item left
        from: ColumnKey,
        /// Column the item entered
        to: ColumnKey,
    },
    /// Released over a target in the source column.
    SameColumn,
    /// Released without a resolvable column.
    NoTarget,
    /// No drag was in progress.
    NotDragging,
}

/// A committed column change, handed to the collection-update callback.
#[derive(Debug, Clone, PartialEq)]
pub struct Reassignment<Id> {
    /// Identifier of the moved item
    pub item_id: Id,
    /// Column the item left
    pub from: ColumnKey,
    /// Column the item entered
    pub to: ColumnKey,
}

impl<Id: PartialEq> Reassignment<Id> {
    /// Produces the next collection from the previous one.
    ///
    /// Only the matching item is replaced. Every other element is the same
    /// `Arc` as before, so pointer-equality change detection keeps working.
    pub fn apply<T>(&self, items: &[Arc<T>]) -> Vec<Arc<T>>
    where
        T: Draggable<Id = Id>,
    {
        reassign_column(items, &self.item_id, &self.to)
    }
}

/// Returns a copy of `items` with item `id` moved to `column`.
///
/// Items already in `column`, and every other item, are shared unchanged.
pub fn reassign_column<T: Draggable>(
    items: &[Arc<T>],
    id: &T::Id,
    column: &ColumnKey,
) -> Vec<Arc<T>> {
    items
        .iter()
        .map(|item| {
            if item.id() == id && item.column() != column {
                Arc::new(item.with_column(column.clone()))
            } else {
                Arc::clone(item)
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
struct DragSession<T> {
    item: T,
    source: ColumnKey,
    pointer: Option<Point>,
    target: Option<ColumnKey>,
    settle_deadline: Option<Instant>,
}

/// Tracks one drag gesture at a time.
#[derive(Debug)]
pub struct DragCoordinator<T, R = NoHitTesting> {
    resolver: R,
    settle_delay: Duration,
    session: Option<DragSession<T>>,
    revision: u64,
}

impl<T: Draggable> DragCoordinator<T, NoHitTesting> {
    /// Coordinator that relies on drop-target metadata only.
    #[must_use]
    pub fn without_hit_testing() -> Self {
        Self::new(NoHitTesting)
    }
}

impl<T: Draggable, R: ColumnResolver> DragCoordinator<T, R> {
    /// Creates an idle coordinator using `resolver` for the hit-testing fallback.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            session: None,
            revision: 0,
        }
    }

    /// Sets the delay between a drop and the return to idle.
    ///
    /// Delays above [`MAX_SETTLE_DELAY_MS`] are clamped.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay.min(Duration::from_millis(MAX_SETTLE_DELAY_MS));
        self
    }

    /// Delay between a drop and the return to idle.
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(session) if session.settle_deadline.is_some() => DragPhase::Settling,
            Some(_) => DragPhase::Dragging,
        }
    }

    /// Item being dragged (or settling), for the floating preview.
    pub fn active_item(&self) -> Option<&T> {
        self.session.as_ref().map(|session| &session.item)
    }

    /// Column the item started in.
    pub fn source_column(&self) -> Option<&ColumnKey> {
        self.session.as_ref().map(|session| &session.source)
    }

    /// Column highlighted as the drop target. Never the source column.
    pub fn target_column(&self) -> Option<&ColumnKey> {
        self.session.as_ref().and_then(|session| session.target.as_ref())
    }

    /// Last pointer position reported during the current drag.
    pub fn pointer(&self) -> Option<Point> {
        self.session.as_ref().and_then(|session| session.pointer)
    }

    /// When the pending return to idle fires, if a drop is settling.
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(|session| session.settle_deadline)
    }

    /// Counter bumped on every change to the exposed state.
    ///
    /// Renderers can skip work when it has not moved.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Handles a drag-start. Anything but an item payload is ignored.
    ///
    /// Starting while a previous drop is settling discards its pending reset.
    pub fn on_drag_start(&mut self, event: DragStartEvent<T>) {
        let item = match event.payload {
            Some(DragPayload::Item(item)) => item,
            Some(DragPayload::Column(column)) => {
                debug!(column = %column, "Ignoring column drag");
                return;
            }
            Some(DragPayload::Unknown) | None => {
                debug!("Ignoring drag start without an item payload");
                return;
            }
        };

        if let Some(previous) = &self.session {
            debug!(
                item = ?previous.item.id(),
                "Superseding previous drag session"
            );
        }

        let source = item.column().clone();
        debug!(item = ?item.id(), source = %source, "Drag started");
        self.session = Some(DragSession {
            item,
            source,
            pointer: event.pointer,
            target: None,
            settle_deadline: None,
        });
        self.bump();
    }

    /// Records the pointer position. Never changes the exposed state.
    pub fn on_drag_move(&mut self, event: &DragMoveEvent) {
        let Some(pointer) = event.pointer else {
            return;
        };
        if let Some(session) = self.dragging_mut() {
            session.pointer = Some(pointer);
        }
    }

    /// Recomputes the target column.
    ///
    /// Returns true only when the highlighted column actually changed.
    pub fn on_drag_over(&mut self, event: &DragOverEvent) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.settle_deadline.is_some() {
            return false;
        }

        let resolved = self.resolve_column(event.over.as_ref(), session.pointer);
        let target = resolved.filter(|column| *column != session.source);
        if target == session.target {
            return false;
        }

        debug!(
            column = target.as_ref().map(ColumnKey::as_str),
            "Drag target changed"
        );
        if let Some(session) = self.session.as_mut() {
            session.target = target;
        }
        self.bump();
        true
    }

    /// Resolves the drop.
    ///
    /// `update` is called at most once, and only when the item moves to a
    /// different column.
    pub fn on_drag_end<F>(&mut self, event: &DragEndEvent, update: F) -> DropOutcome
    where
        F: FnOnce(Reassignment<T::Id>),
    {
        let Some(session) = self.session.as_ref() else {
            return DropOutcome::NotDragging;
        };
        if session.settle_deadline.is_some() {
            return DropOutcome::NotDragging;
        }

        let Some(over) = event.over.as_ref() else {
            debug!(item = ?session.item.id(), "Dropped outside any target");
            self.reset();
            return DropOutcome::NoTarget;
        };

        // The highlighted column is the only commit target
        let outcome = match session.target.clone() {
            Some(to) => {
                let change = Reassignment {
                    item_id: session.item.id().clone(),
                    from: session.source.clone(),
                    to: to.clone(),
                };
                info!(
                    item = ?change.item_id,
                    from = %change.from,
                    to = %change.to,
                    "Item moved"
                );
                update(change);
                DropOutcome::Moved {
                    from: session.source.clone(),
                    to,
                }
            }
            None if over.column.as_ref() == Some(&session.source) => DropOutcome::SameColumn,
            None => DropOutcome::NoTarget,
        };

        self.begin_settle();
        outcome
    }

    /// Aborts the drag immediately, without a mutation or settle delay.
    pub fn on_drag_cancel(&mut self) {
        if self.session.is_some() {
            debug!("Drag cancelled");
            self.reset();
        }
    }

    /// Performs the pending return to idle once its deadline has passed.
    ///
    /// Returns true if the coordinator went idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.settle_deadline() {
            Some(deadline) if now >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn resolve_column(
        &self,
        over: Option<&DropTarget>,
        pointer: Option<Point>,
    ) -> Option<ColumnKey> {
        over.and_then(|target| target.column.clone())
            .or_else(|| pointer.and_then(|point| self.resolver.column_at(point)))
    }

    fn dragging_mut(&mut self) -> Option<&mut DragSession<T>> {
        self.session
            .as_mut()
            .filter(|session| session.settle_deadline.is_none())
    }

    fn begin_settle(&mut self) {
        if self.settle_delay.is_zero() {
            self.reset();
            return;
        }
        let Some(deadline) = Instant::now().checked_add(self.settle_delay) else {
            self.reset();
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.target = None;
            session.settle_deadline = Some(deadline);
        }
        self.bump();
    }

    fn reset(&mut self) {
        self.session = None;
        self.bump();
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
