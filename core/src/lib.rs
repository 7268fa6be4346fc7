#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the room topology engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative room, and pure systems. Hosts submit [`Command`] values
//! describing desired edits, the room executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values describing every element
//! that was spawned, destroyed or moved so that a host-side element factory
//! can mirror the change.

use serde::{Deserialize, Serialize};

mod ids {
    #![allow(unsafe_code)]

    slotmap::new_key_type! {
        /// Stable handle addressing a floor, wall or corner element.
        ///
        /// Handles are generational: once an element is destroyed its handle
        /// never resolves again, even if the slot is reused.
        pub struct ElementId;
    }
}

pub use ids::ElementId;

/// Commands that express all permissible room mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the room with a rectangular block of floor cells.
    CreateRoom {
        /// Number of floor columns laid out along the x axis.
        columns: u32,
        /// Number of floor rows laid out along the y axis.
        rows: u32,
    },
    /// Drags a wall by the provided cell offset, enlarging or shrinking the room.
    ExtendRoom {
        /// Wall element grabbed by the host.
        wall: ElementId,
        /// Offset measured in whole cells; must lie on the wall's facing axis.
        delta: MoveDelta,
    },
}

/// Events broadcast by the room after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the room was rebuilt from scratch.
    RoomCreated {
        /// Number of floor columns in the new room.
        columns: u32,
        /// Number of floor rows in the new room.
        rows: u32,
    },
    /// Confirms that a floor cell was created and indexed.
    FloorSpawned {
        /// Identifier assigned to the floor element.
        floor: ElementId,
        /// Grid coordinate occupied by the floor.
        cell: CellCoord,
    },
    /// Confirms that a floor cell was removed from the grid index.
    FloorRemoved {
        /// Identifier of the removed floor element.
        floor: ElementId,
        /// Grid coordinate that became empty.
        cell: CellCoord,
    },
    /// Confirms that a wall or corner element was created.
    ElementSpawned {
        /// Identifier assigned to the element.
        element: ElementId,
        /// Shape of the new element.
        element_type: ElementType,
        /// Geometric slot occupied by the element.
        placement: Placement,
        /// Existing neighbour the element was attached to.
        anchor: Anchor,
    },
    /// Confirms that a wall or corner element was destroyed.
    ElementDestroyed {
        /// Identifier of the destroyed element.
        element: ElementId,
        /// Slot the element occupied before destruction.
        placement: Placement,
    },
    /// Confirms that an element was translated to a new slot.
    ElementMoved {
        /// Identifier of the translated element.
        element: ElementId,
        /// Slot occupied before the move.
        from: Placement,
        /// Slot occupied after the move.
        to: Placement,
    },
    /// Reports a committed wall drag.
    RoomExtended {
        /// Wall that was grabbed by the host.
        wall: ElementId,
        /// Wall now occupying the dragged slot, if one still exists.
        selection: Option<ElementId>,
    },
    /// Reports that a wall drag was rejected and the room left untouched.
    EditRejected {
        /// Wall that was grabbed by the host.
        wall: ElementId,
        /// Specific reason the edit failed.
        reason: EditRejection,
    },
}

/// Existing element a freshly spawned element is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    /// Element that already exists in the room.
    pub element: ElementId,
    /// Direction leading from the anchor to the spawned element.
    pub direction: Direction,
}

/// Location of a single grid cell expressed as x and y coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell; grows toward the east.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell; grows toward the north.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring cell one step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the cell displaced by the provided delta.
    #[must_use]
    pub const fn offset(self, delta: MoveDelta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Compass directions used for facings and adjacency links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing y.
    North,
    /// Toward increasing x.
    East,
    /// Toward decreasing y.
    South,
    /// Toward decreasing x.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Dense index used for link arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Unit cell offset `(dx, dy)` of the direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Direction one quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Direction one quarter turn counter-clockwise.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Applies a quarter turn in the provided rotational sense.
    #[must_use]
    pub const fn rotate(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => self.clockwise(),
            Rotation::CounterClockwise => self.counter_clockwise(),
        }
    }

    /// Reports whether the two directions are a quarter turn apart.
    #[must_use]
    pub const fn is_perpendicular(self, other: Direction) -> bool {
        (self.index() + other.index()) % 2 == 1
    }

    /// Resolves the direction as seen from an element facing `facing`.
    #[must_use]
    pub const fn relative_to(self, facing: Direction) -> LocalDirection {
        match (self.index() + 4 - facing.index()) % 4 {
            0 => LocalDirection::Front,
            1 => LocalDirection::Right,
            2 => LocalDirection::Back,
            _ => LocalDirection::Left,
        }
    }
}

/// Rotational sense used to pick a lateral side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Quarter turns follow north, east, south, west.
    Clockwise,
    /// Quarter turns follow north, west, south, east.
    CounterClockwise,
}

impl Rotation {
    /// Both rotational senses, clockwise first.
    pub const BOTH: [Rotation; 2] = [Rotation::Clockwise, Rotation::CounterClockwise];

    /// The opposite rotational sense.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Direction expressed in an element's own frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalDirection {
    /// Along the element's facing.
    Front,
    /// Clockwise of the facing.
    Right,
    /// Against the facing.
    Back,
    /// Counter-clockwise of the facing.
    Left,
}

impl LocalDirection {
    /// Converts the local direction into a compass direction.
    #[must_use]
    pub const fn resolve(self, facing: Direction) -> Direction {
        match self {
            Self::Front => facing,
            Self::Right => facing.clockwise(),
            Self::Back => facing.opposite(),
            Self::Left => facing.counter_clockwise(),
        }
    }
}

/// One of the four corners of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    /// Corner shared with the northern and eastern neighbours.
    NorthEast,
    /// Corner shared with the southern and eastern neighbours.
    SouthEast,
    /// Corner shared with the southern and western neighbours.
    SouthWest,
    /// Corner shared with the northern and western neighbours.
    NorthWest,
}

impl Quadrant {
    /// All quadrants in clockwise order starting at north-east.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
        Quadrant::NorthWest,
    ];

    /// Builds the quadrant spanned by two perpendicular directions, in any order.
    ///
    /// Returns `None` when the directions are parallel.
    #[must_use]
    pub const fn from_directions(first: Direction, second: Direction) -> Option<Self> {
        match (first, second) {
            (Direction::North, Direction::East) | (Direction::East, Direction::North) => {
                Some(Self::NorthEast)
            }
            (Direction::South, Direction::East) | (Direction::East, Direction::South) => {
                Some(Self::SouthEast)
            }
            (Direction::South, Direction::West) | (Direction::West, Direction::South) => {
                Some(Self::SouthWest)
            }
            (Direction::North, Direction::West) | (Direction::West, Direction::North) => {
                Some(Self::NorthWest)
            }
            _ => None,
        }
    }

    /// Vertical and horizontal directions spanning the quadrant.
    #[must_use]
    pub const fn directions(self) -> (Direction, Direction) {
        match self {
            Self::NorthEast => (Direction::North, Direction::East),
            Self::SouthEast => (Direction::South, Direction::East),
            Self::SouthWest => (Direction::South, Direction::West),
            Self::NorthWest => (Direction::North, Direction::West),
        }
    }

    /// Facing handed to the element factory for a corner piece in this quadrant.
    ///
    /// The orientation is the spanning direction whose clockwise neighbour is
    /// the other spanning direction.
    #[must_use]
    pub const fn orientation(self) -> Direction {
        match self {
            Self::NorthEast => Direction::North,
            Self::SouthEast => Direction::East,
            Self::SouthWest => Direction::South,
            Self::NorthWest => Direction::West,
        }
    }

    /// Quadrant diagonally across the vertex.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::NorthEast => Self::SouthWest,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

/// Cell offset describing how far a wall is dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveDelta {
    dx: i32,
    dy: i32,
}

impl MoveDelta {
    /// Creates a new delta from whole-cell components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Creates a delta of `steps` cells along `direction`, saturating at the
    /// `i32` range.
    #[must_use]
    pub const fn along(direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(dx.saturating_mul(steps), dy.saturating_mul(steps))
    }

    /// Horizontal component in cells.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical component in cells.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Reports whether the delta moves nothing.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Signed number of steps along `facing`; positive values point outward.
    ///
    /// Returns `None` when the delta is zero, leaves the facing axis or does
    /// not fit in an `i32` once projected.
    #[must_use]
    pub const fn steps_along(&self, facing: Direction) -> Option<i32> {
        let (fx, fy) = facing.offset();
        let (dx, dy) = (self.dx as i64, self.dy as i64);
        let steps = dx * fx as i64 + dy * fy as i64;
        let lateral = dx * fy as i64 - dy * fx as i64;
        if steps == 0 || lateral != 0 || steps < i32::MIN as i64 || steps > i32::MAX as i64 {
            None
        } else {
            Some(steps as i32)
        }
    }

    /// Rotates the delta from the frame of `from` into the frame of `to`.
    ///
    /// A delta pointing along `from` comes out pointing along `to`.
    #[must_use]
    pub const fn rotated(self, from: Direction, to: Direction) -> Self {
        let turns = (to.index() + 4 - from.index()) % 4;
        let (mut dx, mut dy) = (self.dx, self.dy);
        let mut turn = 0;
        while turn < turns {
            let next = (dy, dx.saturating_neg());
            dx = next.0;
            dy = next.1;
            turn += 1;
        }
        Self::new(dx, dy)
    }
}

/// Lateral end of a wall, seen from the floor looking out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallEnd {
    /// Counter-clockwise end.
    Left,
    /// Clockwise end.
    Right,
}

impl WallEnd {
    /// Resolves the compass direction of this end for a wall facing `facing`.
    #[must_use]
    pub const fn direction(self, facing: Direction) -> Direction {
        match self {
            Self::Left => facing.counter_clockwise(),
            Self::Right => facing.clockwise(),
        }
    }

    /// Identifies which end of a wall facing `facing` points along `side`.
    #[must_use]
    pub const fn toward(side: Direction, facing: Direction) -> Option<Self> {
        match side.relative_to(facing) {
            LocalDirection::Left => Some(Self::Left),
            LocalDirection::Right => Some(Self::Right),
            LocalDirection::Front | LocalDirection::Back => None,
        }
    }
}

/// Length variant of a wall element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallVariant {
    /// Spans the whole cell edge.
    Full,
    /// Cut back at the left end to make room for an inner corner.
    ShortenedLeft,
    /// Cut back at the right end to make room for an inner corner.
    ShortenedRight,
    /// Cut back at both ends.
    ShortenedBothEnds,
}

impl WallVariant {
    /// Builds the variant from the shortened state of each end.
    #[must_use]
    pub const fn from_ends(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Self::Full,
            (true, false) => Self::ShortenedLeft,
            (false, true) => Self::ShortenedRight,
            (true, true) => Self::ShortenedBothEnds,
        }
    }

    /// Reports whether the provided end is cut back.
    #[must_use]
    pub const fn is_shortened(self, end: WallEnd) -> bool {
        match (self, end) {
            (Self::ShortenedBothEnds, _)
            | (Self::ShortenedLeft, WallEnd::Left)
            | (Self::ShortenedRight, WallEnd::Right) => true,
            _ => false,
        }
    }

    /// Variant with the provided end cut back as well.
    ///
    /// Returns `None` when that end is already shortened.
    #[must_use]
    pub const fn shrunk(self, end: WallEnd) -> Option<Self> {
        if self.is_shortened(end) {
            return None;
        }
        let left = self.is_shortened(WallEnd::Left) || matches!(end, WallEnd::Left);
        let right = self.is_shortened(WallEnd::Right) || matches!(end, WallEnd::Right);
        Some(Self::from_ends(left, right))
    }

    /// Coarse shape used by the editor to pick a path.
    #[must_use]
    pub const fn shape(self) -> WallShape {
        match self {
            Self::Full => WallShape::Full,
            Self::ShortenedLeft | Self::ShortenedRight => WallShape::ShortenedOneSide,
            Self::ShortenedBothEnds => WallShape::ShortenedBothEnds,
        }
    }
}

/// Coarse wall shape driving the extension state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallShape {
    /// No end is shortened.
    Full,
    /// Exactly one end is shortened.
    ShortenedOneSide,
    /// Both ends are shortened.
    ShortenedBothEnds,
}

/// Whether a corner is concave or convex relative to the floor region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerKind {
    /// Concave junction between two walls of an L-shaped boundary.
    Inner,
    /// Convex junction at an outside corner of the floor region.
    Outer,
}

/// Shape of an element as handed to the element factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// Interior floor tile.
    Floor,
    /// Boundary wall with its length variant.
    Wall(WallVariant),
    /// Boundary corner with its kind.
    Corner(CornerKind),
}

impl ElementType {
    /// Reports whether the element is a wall of any variant.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall(_))
    }

    /// Reports whether the element is a corner of any kind.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self, Self::Corner(_))
    }
}

/// Geometric slot occupied by an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Placement {
    /// Floor tile at a grid cell.
    Floor {
        /// Cell occupied by the floor.
        cell: CellCoord,
    },
    /// Wall on one side of a floor cell.
    Wall {
        /// Floor cell behind the wall.
        cell: CellCoord,
        /// Side of the floor cell the wall closes off.
        facing: Direction,
    },
    /// Corner piece at one vertex of an empty cell.
    Corner {
        /// Empty cell that hosts the corner piece.
        cell: CellCoord,
        /// Vertex of the cell the corner sits on.
        quadrant: Quadrant,
    },
}

impl Placement {
    /// Grid cell the slot is anchored to.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        match self {
            Self::Floor { cell } | Self::Wall { cell, .. } | Self::Corner { cell, .. } => *cell,
        }
    }

    /// Position of the slot measured in cells, relative to cell centres.
    ///
    /// Floors sit on their cell centre, walls on the middle of their edge and
    /// corners on their vertex.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        let base = |cell: &CellCoord| (cell.x() as f32, cell.y() as f32);
        match self {
            Self::Floor { cell } => base(cell),
            Self::Wall { cell, facing } => {
                let (x, y) = base(cell);
                let (dx, dy) = facing.offset();
                (x + dx as f32 * 0.5, y + dy as f32 * 0.5)
            }
            Self::Corner { cell, quadrant } => {
                let (x, y) = base(cell);
                let (vertical, horizontal) = quadrant.directions();
                let (_, dy) = vertical.offset();
                let (dx, _) = horizontal.offset();
                (x + dx as f32 * 0.5, y + dy as f32 * 0.5)
            }
        }
    }
}

/// Reasons a wall drag may be rejected by the room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditRejection {
    /// The referenced element does not exist.
    MissingElement,
    /// The referenced element is not a wall.
    NotAWall,
    /// The delta is zero or does not follow the wall's facing axis.
    UnsupportedDelta,
    /// The edit would remove the last floor cell.
    LastFloor,
    /// A wall would have been shortened past its minimum length.
    CannotShrink,
    /// A neighbourhood lookup reached past the inspected range.
    NeighborhoodOutOfRange,
    /// The graph did not match the grid where the edit expected it to.
    GridInconsistency,
}

#[cfg(test)]
mod tests {
    use super::{
        CellCoord, Direction, EditRejection, LocalDirection, MoveDelta, Placement, Quadrant,
        WallEnd, WallShape, WallVariant,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(-1, 1);
        let destination = CellCoord::new(2, -1);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn north_points_toward_positive_y() {
        assert_eq!(
            CellCoord::new(0, 0).step(Direction::North),
            CellCoord::new(0, 1)
        );
        assert_eq!(
            CellCoord::new(0, 0).step(Direction::East),
            CellCoord::new(1, 0)
        );
    }

    #[test]
    fn rotations_cycle_back_to_start() {
        for direction in Direction::ALL {
            let turned = direction.clockwise().clockwise().clockwise().clockwise();
            assert_eq!(turned, direction);
            assert_eq!(direction.clockwise().counter_clockwise(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
            assert!(direction.is_perpendicular(direction.clockwise()));
            assert!(!direction.is_perpendicular(direction.opposite()));
        }
    }

    #[test]
    fn local_directions_resolve_against_facing() {
        for facing in Direction::ALL {
            for local in [
                LocalDirection::Front,
                LocalDirection::Right,
                LocalDirection::Back,
                LocalDirection::Left,
            ] {
                assert_eq!(local.resolve(facing).relative_to(facing), local);
            }
        }
        assert_eq!(
            WallEnd::toward(Direction::East, Direction::North),
            Some(WallEnd::Right)
        );
        assert_eq!(WallEnd::toward(Direction::South, Direction::North), None);
    }

    #[test]
    fn quadrant_is_order_insensitive() {
        for quadrant in Quadrant::ALL {
            let (vertical, horizontal) = quadrant.directions();
            assert_eq!(
                Quadrant::from_directions(vertical, horizontal),
                Some(quadrant)
            );
            assert_eq!(
                Quadrant::from_directions(horizontal, vertical),
                Some(quadrant)
            );
            let orientation = quadrant.orientation();
            assert_eq!(
                Quadrant::from_directions(orientation, orientation.clockwise()),
                Some(quadrant)
            );
        }
        assert_eq!(
            Quadrant::from_directions(Direction::North, Direction::South),
            None
        );
    }

    #[test]
    fn delta_steps_follow_facing_axis() {
        let delta = MoveDelta::along(Direction::West, 2);
        assert_eq!(delta.steps_along(Direction::West), Some(2));
        assert_eq!(delta.steps_along(Direction::East), Some(-2));
        assert_eq!(delta.steps_along(Direction::North), None);
        assert_eq!(MoveDelta::default().steps_along(Direction::North), None);
        assert_eq!(MoveDelta::new(1, 1).steps_along(Direction::East), None);
    }

    #[test]
    fn extreme_deltas_do_not_overflow() {
        assert_eq!(MoveDelta::new(i32::MIN, 0).steps_along(Direction::West), None);
        assert_eq!(
            MoveDelta::new(i32::MIN, 0).steps_along(Direction::East),
            Some(i32::MIN)
        );
        assert_eq!(MoveDelta::new(i32::MIN, i32::MIN).steps_along(Direction::North), None);
        assert_eq!(
            MoveDelta::along(Direction::West, i32::MIN),
            MoveDelta::new(i32::MAX, 0)
        );
        assert_eq!(
            MoveDelta::new(i32::MIN, 0).rotated(Direction::North, Direction::East),
            MoveDelta::new(0, i32::MAX)
        );
    }

    #[test]
    fn delta_rotates_between_frames() {
        let delta = MoveDelta::along(Direction::North, 1);
        for target in Direction::ALL {
            assert_eq!(
                delta.rotated(Direction::North, target),
                MoveDelta::along(target, 1)
            );
        }
    }

    #[test]
    fn wall_variant_shrinks_one_end_at_a_time() {
        assert_eq!(
            WallVariant::Full.shrunk(WallEnd::Left),
            Some(WallVariant::ShortenedLeft)
        );
        assert_eq!(
            WallVariant::ShortenedLeft.shrunk(WallEnd::Right),
            Some(WallVariant::ShortenedBothEnds)
        );
        assert_eq!(WallVariant::ShortenedLeft.shrunk(WallEnd::Left), None);
        assert_eq!(WallVariant::ShortenedBothEnds.shrunk(WallEnd::Right), None);
        assert_eq!(WallVariant::ShortenedRight.shape(), WallShape::ShortenedOneSide);
    }

    #[test]
    fn placement_centers_sit_on_edges_and_vertices() {
        let wall = Placement::Wall {
            cell: CellCoord::new(0, 0),
            facing: Direction::North,
        };
        assert_eq!(wall.center(), (0.0, 0.5));
        let corner = Placement::Corner {
            cell: CellCoord::new(1, 1),
            quadrant: Quadrant::SouthWest,
        };
        assert_eq!(corner.center(), (0.5, 0.5));
    }

    #[test]
    fn placement_round_trips_through_bincode() {
        assert_round_trip(&Placement::Corner {
            cell: CellCoord::new(-3, 7),
            quadrant: Quadrant::NorthWest,
        });
    }

    #[test]
    fn edit_rejection_round_trips_through_bincode() {
        assert_round_trip(&EditRejection::CannotShrink);
    }

    #[test]
    fn move_delta_round_trips_through_bincode() {
        assert_round_trip(&MoveDelta::new(0, -2));
    }
}
