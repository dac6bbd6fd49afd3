use smallvec::SmallVec;

pub type PointerId = u64;

/// Inline capacity for the pointers carried by one batch. The detector only
/// interprets two concurrent pointers, so two slots cover every batch it acts
/// on without heap allocation.
pub type PointerVec = SmallVec<[TouchPoint; 2]>;

/// Position snapshot of a single pointer inside a batch, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    /// First pointer contacts the surface.
    Down,
    /// An additional pointer contacts while the gesture is live.
    PointerDown,
    Move,
    /// A pointer lifts while at least one other stays down.
    PointerUp,
    /// The last pointer lifts, ending the gesture.
    Up,
    /// The platform revoked the pointer sequence mid-gesture.
    Cancel,
}

/// One platform input batch: an action, the pointer it refers to, a monotonic
/// timestamp, and the positions of every pointer in contact at that instant.
///
/// `pointers` includes the acting pointer itself, so an `Up` batch still
/// carries the final position and a `PointerUp` batch carries both the
/// leaving pointer and the survivor. `Cancel` may arrive with no pointers.
#[derive(Clone, Debug)]
pub struct PointerBatch {
    pub action: PointerAction,
    /// The pointer `action` refers to. Ignored for `Move` and `Cancel`.
    pub changed: PointerId,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: i64,
    pub pointers: PointerVec,
}

impl PointerBatch {
    pub fn down(point: TouchPoint, time_ms: i64) -> Self {
        Self {
            action: PointerAction::Down,
            changed: point.id,
            time_ms,
            pointers: PointerVec::from_slice(&[point]),
        }
    }

    pub fn pointer_down(points: &[TouchPoint], changed: PointerId, time_ms: i64) -> Self {
        Self {
            action: PointerAction::PointerDown,
            changed,
            time_ms,
            pointers: PointerVec::from_slice(points),
        }
    }

    pub fn moved(points: &[TouchPoint], time_ms: i64) -> Self {
        Self {
            action: PointerAction::Move,
            changed: points.first().map(|point| point.id).unwrap_or_default(),
            time_ms,
            pointers: PointerVec::from_slice(points),
        }
    }

    pub fn pointer_up(points: &[TouchPoint], changed: PointerId, time_ms: i64) -> Self {
        Self {
            action: PointerAction::PointerUp,
            changed,
            time_ms,
            pointers: PointerVec::from_slice(points),
        }
    }

    pub fn up(point: TouchPoint, time_ms: i64) -> Self {
        Self {
            action: PointerAction::Up,
            changed: point.id,
            time_ms,
            pointers: PointerVec::from_slice(&[point]),
        }
    }

    pub fn cancel(time_ms: i64) -> Self {
        Self {
            action: PointerAction::Cancel,
            changed: 0,
            time_ms,
            pointers: PointerVec::new(),
        }
    }

    /// Looks up the current position of `id` within this batch.
    pub fn point(&self, id: PointerId) -> Option<TouchPoint> {
        self.pointers.iter().copied().find(|point| point.id == id)
    }
}
