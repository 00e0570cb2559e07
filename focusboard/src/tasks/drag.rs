//! Drag-reorder session state.
//!
//! While a drag is in progress the dragged task moves around in a
//! provisional visual order. Nothing reaches the store until the drop,
//! when the dragged task's final visual position becomes the target of a
//! single [`TaskStore::reorder`](super::TaskStore::reorder) call.

/// Vertical extent of one rendered list item, supplied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    /// Top edge.
    pub top: f64,
    /// Height.
    pub height: f64,
}

impl ItemBounds {
    /// Creates bounds from a top edge and a height.
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Picks the visual slot the dragged item should be placed in front of.
///
/// Considers every slot except `skip` and returns the one whose midpoint
/// is nearest below the pointer, i.e. the largest negative
/// `pointer_y - midpoint`. `None` means the pointer is below every item
/// and the dragged item belongs at the end.
#[must_use]
pub fn insertion_target(pointer_y: f64, bounds: &[ItemBounds], skip: usize) -> Option<usize> {
    bounds
        .iter()
        .enumerate()
        .filter(|(slot, _)| *slot != skip)
        .fold(None, |best: Option<(usize, f64)>, (slot, b)| {
            let offset = pointer_y - b.midpoint();
            match best {
                _ if offset >= 0.0 => best,
                Some((_, best_offset)) if offset <= best_offset => best,
                _ => Some((slot, offset)),
            }
        })
        .map(|(slot, _)| slot)
}

/// An in-progress drag of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    from_index: usize,
    /// Store indices in their current visual order.
    order: Vec<usize>,
    /// Store revision the session was started against.
    revision: u64,
}

impl DragSession {
    /// Starts dragging the task at `from_index` in a sequence of `len` tasks.
    ///
    /// Returns `None` if `from_index` is out of range.
    #[must_use]
    pub fn start(from_index: usize, len: usize) -> Option<Self> {
        (from_index < len).then(|| Self {
            from_index,
            order: (0..len).collect(),
            revision: 0,
        })
    }

    /// Tags the session with the store revision it was started against.
    #[must_use]
    pub const fn at_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Store revision the session was started against.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Store index of the dragged task when the drag began.
    #[must_use]
    pub const fn from_index(&self) -> usize {
        self.from_index
    }

    /// Store indices in provisional visual order.
    #[must_use]
    pub fn visual_order(&self) -> &[usize] {
        &self.order
    }

    /// Number of tasks the session was started over.
    #[must_use]
    pub fn sequence_len(&self) -> usize {
        self.order.len()
    }

    /// Current visual position of the dragged task.
    #[must_use]
    pub fn visual_position(&self) -> Option<usize> {
        self.order.iter().position(|&i| i == self.from_index)
    }

    /// Moves the dragged task in front of the item nearest below the
    /// pointer, or to the end.
    ///
    /// `bounds` holds one entry per visual slot, in visual order. Returns
    /// whether the visual order changed. Geometry that does not match the
    /// session's sequence is ignored.
    pub fn drag_over(&mut self, pointer_y: f64, bounds: &[ItemBounds]) -> bool {
        if bounds.len() != self.order.len() {
            tracing::debug!(
                slots = bounds.len(),
                expected = self.order.len(),
                "ignoring drag geometry for a different list"
            );
            return false;
        }
        let Some(current) = self.visual_position() else {
            return false;
        };

        let before = self.order.clone();
        let dragged = self.order.remove(current);
        match insertion_target(pointer_y, bounds, current) {
            Some(slot) => {
                let slot = if slot > current { slot - 1 } else { slot };
                self.order.insert(slot, dragged);
            }
            None => self.order.push(dragged),
        }
        self.order != before
    }
}
