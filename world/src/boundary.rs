//! Canonical boundary geometry derived from floor occupancy.
//!
//! Every wall, corner and link of a consistent room is a pure function of the
//! set of floor cells. The editor mutates the graph incrementally and uses the
//! helpers here to pick slots, variants and link targets.

use log::warn;
use room_topology_core::{
    CellCoord, CornerKind, Direction, ElementType, Placement, Quadrant, WallEnd, WallVariant,
};

use crate::GridIndex;

/// What a wall meets at one of its lateral ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lateral {
    /// The boundary turns inward; an inner corner sits at the end.
    Concave(Placement),
    /// The boundary continues with a wall along the same line.
    Straight(Placement),
    /// The boundary turns outward; an outer corner sits at the end.
    Convex(Placement),
}

impl Lateral {
    pub(crate) const fn placement(self) -> Placement {
        match self {
            Self::Concave(placement) | Self::Straight(placement) | Self::Convex(placement) => {
                placement
            }
        }
    }
}

/// Quadrant spanned by two directions.
///
/// Parallel directions describe no quadrant; the request is logged and the
/// north-east quadrant is used instead.
pub(crate) fn quadrant(first: Direction, second: Direction) -> Quadrant {
    Quadrant::from_directions(first, second).unwrap_or_else(|| {
        warn!("unsupported corner orientation {first:?}/{second:?}, using north-east");
        Quadrant::NorthEast
    })
}

pub(crate) const fn wall(cell: CellCoord, facing: Direction) -> Placement {
    Placement::Wall { cell, facing }
}

pub(crate) const fn corner(cell: CellCoord, quadrant: Quadrant) -> Placement {
    Placement::Corner { cell, quadrant }
}

pub(crate) const fn floor(cell: CellCoord) -> Placement {
    Placement::Floor { cell }
}

/// Reports whether a wall belongs on side `facing` of `cell`.
pub(crate) fn wall_exists(grid: &GridIndex, cell: CellCoord, facing: Direction) -> bool {
    grid.contains(cell) && !grid.contains(cell.step(facing))
}

/// Resolves the lateral neighbour of wall `(cell, facing)` on side `side`.
pub(crate) fn lateral(
    grid: &GridIndex,
    cell: CellCoord,
    facing: Direction,
    side: Direction,
) -> Lateral {
    let ahead = cell.step(facing);
    if grid.contains(ahead.step(side)) {
        Lateral::Concave(corner(ahead, quadrant(facing.opposite(), side)))
    } else if grid.contains(cell.step(side)) {
        Lateral::Straight(wall(cell.step(side), facing))
    } else {
        Lateral::Convex(corner(
            ahead.step(side),
            quadrant(facing.opposite(), side.opposite()),
        ))
    }
}

/// Length variant a wall at `(cell, facing)` must carry.
pub(crate) fn wall_variant(grid: &GridIndex, cell: CellCoord, facing: Direction) -> WallVariant {
    let concave = |end: WallEnd| {
        matches!(
            lateral(grid, cell, facing, end.direction(facing)),
            Lateral::Concave(_)
        )
    };
    WallVariant::from_ends(concave(WallEnd::Left), concave(WallEnd::Right))
}

/// Corner kind required at vertex `quadrant` of the empty cell `cell`.
pub(crate) fn corner_kind(
    grid: &GridIndex,
    cell: CellCoord,
    quadrant: Quadrant,
) -> Option<CornerKind> {
    if grid.contains(cell) {
        return None;
    }
    let (a, b) = quadrant.directions();
    let first = grid.contains(cell.step(a));
    let second = grid.contains(cell.step(b));
    match (first, second) {
        (true, true) => Some(CornerKind::Inner),
        (false, false) if grid.contains(cell.step(a).step(b)) => Some(CornerKind::Outer),
        _ => None,
    }
}

/// Element type the slot must hold, or `None` when the slot must stay empty.
pub(crate) fn derived_type(grid: &GridIndex, placement: Placement) -> Option<ElementType> {
    match placement {
        Placement::Floor { cell } => grid.contains(cell).then_some(ElementType::Floor),
        Placement::Wall { cell, facing } => wall_exists(grid, cell, facing)
            .then(|| ElementType::Wall(wall_variant(grid, cell, facing))),
        Placement::Corner { cell, quadrant } => {
            corner_kind(grid, cell, quadrant).map(ElementType::Corner)
        }
    }
}

/// The two walls a corner joins, each paired with the direction leading from
/// that wall to the corner.
pub(crate) fn corner_walls(
    cell: CellCoord,
    quadrant: Quadrant,
    kind: CornerKind,
) -> [(Placement, Direction); 2] {
    let (a, b) = quadrant.directions();
    match kind {
        CornerKind::Inner => [
            (wall(cell.step(a), a.opposite()), b),
            (wall(cell.step(b), b.opposite()), a),
        ],
        CornerKind::Outer => {
            let floor_cell = cell.step(a).step(b);
            [
                (wall(floor_cell, b.opposite()), a.opposite()),
                (wall(floor_cell, a.opposite()), b.opposite()),
            ]
        }
    }
}

/// Slots each link of the element at `placement` must point to.
///
/// Indexed by [`Direction::index`]. Slots that need no element yield `None`.
pub(crate) fn canonical_links(grid: &GridIndex, placement: Placement) -> [Option<Placement>; 4] {
    let mut links = [None; 4];
    match placement {
        Placement::Floor { cell } => {
            for direction in Direction::ALL {
                let neighbor = cell.step(direction);
                links[direction.index()] = Some(if grid.contains(neighbor) {
                    floor(neighbor)
                } else {
                    wall(cell, direction)
                });
            }
        }
        Placement::Wall { cell, facing } => {
            links[facing.opposite().index()] = Some(floor(cell));
            for side in [facing.clockwise(), facing.counter_clockwise()] {
                links[side.index()] = Some(lateral(grid, cell, facing, side).placement());
            }
        }
        Placement::Corner { cell, quadrant } => {
            if let Some(kind) = corner_kind(grid, cell, quadrant) {
                for (wall, toward_corner) in corner_walls(cell, quadrant, kind) {
                    links[toward_corner.opposite().index()] = Some(wall);
                }
            }
        }
    }
    links
}

/// Every cell touching the vertex at `quadrant` of `cell`, each paired with
/// the quadrant pointing back at that vertex.
pub(crate) fn vertex_cells(cell: CellCoord, quadrant: Quadrant) -> [(CellCoord, Quadrant); 4] {
    let (a, b) = quadrant.directions();
    [
        (cell, quadrant),
        (cell.step(a), self::quadrant(a.opposite(), b)),
        (cell.step(b), self::quadrant(a, b.opposite())),
        (cell.step(a).step(b), quadrant.opposite()),
    ]
}

/// Corner slots at the four vertices of `cell`.
pub(crate) fn vertex_corners(cell: CellCoord) -> Vec<Placement> {
    let mut slots = Vec::with_capacity(16);
    for vertex in Quadrant::ALL {
        for (neighbor, toward) in vertex_cells(cell, vertex) {
            slots.push(corner(neighbor, toward));
        }
    }
    slots
}

/// Cells of the 3x3 block centred on `cell`.
pub(crate) fn block(cell: CellCoord) -> Vec<CellCoord> {
    let mut cells = Vec::with_capacity(9);
    for dy in -1..=1 {
        for dx in -1..=1 {
            cells.push(CellCoord::new(cell.x() + dx, cell.y() + dy));
        }
    }
    cells
}

/// Wall slots on every edge touching a vertex of `cell`.
pub(crate) fn vertex_walls(cell: CellCoord) -> Vec<Placement> {
    let cells = block(cell);
    let mut slots = Vec::with_capacity(24);
    for &from in &cells {
        for facing in Direction::ALL {
            if cells.contains(&from.step(facing)) {
                slots.push(wall(from, facing));
            }
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_topology_core::ElementId;
    use slotmap::SlotMap;

    fn grid_of(cells: &[(i32, i32)]) -> GridIndex {
        let mut arena: SlotMap<ElementId, ()> = SlotMap::with_key();
        let mut grid = GridIndex::new();
        for &(x, y) in cells {
            grid.insert(CellCoord::new(x, y), arena.insert(()))
                .expect("unique cells");
        }
        grid
    }

    #[test]
    fn lateral_prefers_concave_then_straight() {
        // Two floors side by side with a third north of the eastern one.
        let grid = grid_of(&[(0, 0), (1, 0), (1, 1)]);
        let origin = CellCoord::new(0, 0);

        assert_eq!(
            lateral(&grid, origin, Direction::North, Direction::East),
            Lateral::Concave(corner(CellCoord::new(0, 1), Quadrant::SouthEast))
        );
        assert_eq!(
            lateral(&grid, origin, Direction::South, Direction::East),
            Lateral::Straight(wall(CellCoord::new(1, 0), Direction::South))
        );
        assert_eq!(
            lateral(&grid, origin, Direction::North, Direction::West),
            Lateral::Convex(corner(CellCoord::new(-1, 1), Quadrant::SouthEast))
        );
    }

    #[test]
    fn wall_variant_follows_concave_ends() {
        let grid = grid_of(&[(0, 0), (1, 0), (1, 1)]);

        assert_eq!(
            wall_variant(&grid, CellCoord::new(0, 0), Direction::North),
            WallVariant::ShortenedRight
        );
        assert_eq!(
            wall_variant(&grid, CellCoord::new(1, 1), Direction::West),
            WallVariant::ShortenedLeft
        );
        assert_eq!(
            wall_variant(&grid, CellCoord::new(1, 0), Direction::South),
            WallVariant::Full
        );
    }

    #[test]
    fn corner_kind_distinguishes_inner_and_outer() {
        let grid = grid_of(&[(0, 0), (1, 0), (1, 1)]);

        assert_eq!(
            corner_kind(&grid, CellCoord::new(0, 1), Quadrant::SouthEast),
            Some(CornerKind::Inner)
        );
        assert_eq!(
            corner_kind(&grid, CellCoord::new(-1, -1), Quadrant::NorthEast),
            Some(CornerKind::Outer)
        );
        assert_eq!(
            corner_kind(&grid, CellCoord::new(0, -1), Quadrant::NorthEast),
            None
        );
        assert_eq!(corner_kind(&grid, CellCoord::new(0, 0), Quadrant::NorthEast), None);
    }

    #[test]
    fn canonical_links_are_mirrored() {
        let grid = grid_of(&[(0, 0), (1, 0), (1, 1), (3, 3), (2, 4)]);
        let mut slots = Vec::new();
        for cell in grid.cells() {
            slots.push(floor(cell));
            for facing in Direction::ALL {
                slots.push(wall(cell, facing));
            }
            slots.extend(vertex_corners(cell));
        }
        slots.retain(|slot| derived_type(&grid, *slot).is_some());

        for slot in &slots {
            let links = canonical_links(&grid, *slot);
            for direction in Direction::ALL {
                let Some(target) = links[direction.index()] else {
                    continue;
                };
                assert!(
                    derived_type(&grid, target).is_some(),
                    "{slot:?} links {direction:?} to empty slot {target:?}"
                );
                let back = canonical_links(&grid, target)[direction.opposite().index()];
                assert_eq!(back, Some(*slot), "{slot:?} -> {target:?} is not mirrored");
            }
        }
    }

    #[test]
    fn parallel_directions_fall_back_to_north_east() {
        assert_eq!(quadrant(Direction::East, Direction::West), Quadrant::NorthEast);
        assert_eq!(quadrant(Direction::West, Direction::South), Quadrant::SouthWest);
    }

    #[test]
    fn vertex_walls_cover_inner_edges_of_block() {
        let walls = vertex_walls(CellCoord::new(0, 0));
        assert_eq!(walls.len(), 24);
        assert!(walls.contains(&wall(CellCoord::new(-1, 1), Direction::East)));
        assert!(!walls.contains(&wall(CellCoord::new(1, 1), Direction::East)));
    }
}
