//! Error types surfaced by room edits.

use room_topology_core::{
    CellCoord, Direction, EditRejection, ElementId, MoveDelta, Placement, WallEnd,
};
use thiserror::Error;

/// Failures reported by the grid index.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The cell already holds a floor.
    #[error("cell ({}, {}) already holds a floor", .0.x(), .0.y())]
    Occupied(CellCoord),
    /// The cell holds no floor.
    #[error("cell ({}, {}) holds no floor", .0.x(), .0.y())]
    Vacant(CellCoord),
}

/// Structural inconsistencies detected by the room validator.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GraphViolation {
    /// A grid cell does not resolve to a floor element at that cell.
    #[error("grid cell ({}, {}) is not backed by its floor element", .0.x(), .0.y())]
    FloorMismatch(CellCoord),
    /// An element is missing from the slot index or indexed under another slot.
    #[error("element {0:?} is not indexed under its placement")]
    UnindexedElement(ElementId),
    /// A wall occupies an edge that is not a room boundary.
    #[error("wall at {0:?} does not sit on the room boundary")]
    StrayWall(Placement),
    /// A wall carries a variant that disagrees with its neighbourhood.
    #[error("wall at {0:?} has the wrong length variant")]
    WrongVariant(Placement),
    /// A corner occupies a vertex that needs no corner or needs another kind.
    #[error("corner at {0:?} does not match the surrounding floors")]
    StrayCorner(Placement),
    /// A boundary slot that must be filled is empty.
    #[error("boundary slot {0:?} is empty")]
    MissingBoundary(Placement),
    /// A link points somewhere other than the geometric neighbour.
    #[error("element {element:?} links {direction:?} to the wrong neighbour")]
    WrongLink {
        /// Element owning the link.
        element: ElementId,
        /// Direction of the offending link.
        direction: Direction,
    },
    /// A link is not mirrored by the neighbour.
    #[error("link {direction:?} of element {element:?} is not mirrored")]
    AsymmetricLink {
        /// Element owning the link.
        element: ElementId,
        /// Direction of the offending link.
        direction: Direction,
    },
}

/// Failures raised while editing the room.
///
/// Every variant aborts the running transaction; the room is restored to the
/// state it had before the edit started.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The referenced element does not exist.
    #[error("element {0:?} does not exist")]
    MissingElement(ElementId),
    /// The referenced element is not a wall.
    #[error("element {0:?} is not a wall")]
    NotAWall(ElementId),
    /// The delta is zero or does not follow the wall's facing axis.
    #[error("delta ({}, {}) does not follow facing {facing:?}", .delta.dx(), .delta.dy())]
    UnsupportedDelta {
        /// Requested offset.
        delta: MoveDelta,
        /// Facing of the dragged wall.
        facing: Direction,
    },
    /// The edit would remove the only remaining floor.
    #[error("cannot remove ({}, {}), the last floor of the room", .0.x(), .0.y())]
    LastFloor(CellCoord),
    /// A wall end was shortened twice.
    #[error("wall at {placement:?} is already shortened at its {end:?} end")]
    CannotShrink {
        /// Slot of the wall.
        placement: Placement,
        /// End that could not be shortened.
        end: WallEnd,
    },
    /// A neighbourhood step was requested past the inspected range.
    #[error("neighbourhood step {index} is outside the {steps} inspected steps")]
    NeighborhoodOutOfRange {
        /// Requested step index.
        index: usize,
        /// Number of inspected steps.
        steps: usize,
    },
    /// No element occupies a slot the edit depends on.
    #[error("no element occupies {0:?}")]
    MissingSlot(Placement),
    /// An element already occupies a slot the edit wants to fill.
    #[error("slot {0:?} is already occupied")]
    SlotOccupied(Placement),
    /// The grid index refused an update.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The edited room failed validation.
    #[error("edited room is inconsistent: {0}")]
    Graph(#[from] GraphViolation),
}

impl EditError {
    /// Serialisable rejection code carried by [`room_topology_core::Event::EditRejected`].
    #[must_use]
    pub const fn rejection(&self) -> EditRejection {
        match self {
            Self::MissingElement(_) => EditRejection::MissingElement,
            Self::NotAWall(_) => EditRejection::NotAWall,
            Self::UnsupportedDelta { .. } => EditRejection::UnsupportedDelta,
            Self::LastFloor(_) => EditRejection::LastFloor,
            Self::CannotShrink { .. } => EditRejection::CannotShrink,
            Self::NeighborhoodOutOfRange { .. } => EditRejection::NeighborhoodOutOfRange,
            Self::MissingSlot(_) | Self::SlotOccupied(_) | Self::Grid(_) | Self::Graph(_) => {
                EditRejection::GridInconsistency
            }
        }
    }
}
