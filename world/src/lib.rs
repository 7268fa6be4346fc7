#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative room topology: floors on a grid, the walls and corners that
//! bound them, and the incremental edits that move those walls.

mod boundary;
mod conditions;
mod editor;
mod error;
mod factory;
mod graph;
mod grid;
mod layout;
mod mutation;
mod retraction;
pub mod validate;

use log::warn;
use room_topology_core::{CellCoord, Command, ElementId, Event, MoveDelta, Placement};
use serde::{Deserialize, Serialize};

pub use conditions::{CornerSituation, NeighborStep, WallConditions};
pub use editor::{EditOutcome, EditPath, FrontResolution, SideResolution, StepOutcome};
pub use error::{EditError, GraphViolation, GridError};
pub use factory::{dispatch, world_position, ElementFactory};
pub use graph::{Element, ElementGraph};
pub use grid::{DiagonalNeighbors, GridIndex};

const DEFAULT_TILE_LENGTH: f32 = 100.0;
const DEFAULT_NEIGHBORHOOD_STEPS: usize = 5;

/// Tunables shared by every room.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Side length of one cell in world units.
    pub tile_length: f32,
    /// Number of boundary elements inspected on each side of a dragged wall.
    pub neighborhood_steps: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            tile_length: DEFAULT_TILE_LENGTH,
            neighborhood_steps: DEFAULT_NEIGHBORHOOD_STEPS,
        }
    }
}

/// Floors, walls and corners of a single room.
#[derive(Clone, Debug, Default)]
pub struct Room {
    grid: GridIndex,
    graph: ElementGraph,
    config: RoomConfig,
}

impl Room {
    /// Creates a room without any floors.
    #[must_use]
    pub fn new(config: RoomConfig) -> Self {
        Self {
            grid: GridIndex::new(),
            graph: ElementGraph::new(),
            config,
        }
    }

    /// Creates a `columns` by `rows` room with its south-west floor at the origin.
    pub fn rectangle(columns: u32, rows: u32, config: RoomConfig) -> Result<Self, EditError> {
        let mut events = Vec::new();
        layout::populate(layout::rectangle_cells(columns, rows), config, &mut events)
    }

    /// Creates a room covering the provided cells; duplicates are ignored.
    pub fn from_cells<I>(cells: I, config: RoomConfig) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut events = Vec::new();
        layout::populate(cells.into_iter().collect(), config, &mut events)
    }

    /// Drags `wall` by `delta` as a single transaction.
    ///
    /// Outward deltas grow the room one cell per step, inward deltas shrink
    /// it. Each step continues with the wall occupying the dragged slot and
    /// the drag stops early once no wall is left there. On any error the room
    /// is left exactly as it was.
    pub fn extend(&mut self, wall: ElementId, delta: MoveDelta) -> Result<EditOutcome, EditError> {
        editor::run(self, wall, delta)
    }
}

/// Drags `wall` by `delta` and mirrors the committed changes into `factory`.
pub fn extend_room<F>(
    room: &mut Room,
    wall: ElementId,
    delta: MoveDelta,
    factory: &mut F,
) -> Result<EditOutcome, EditError>
where
    F: ElementFactory + ?Sized,
{
    let outcome = room.extend(wall, delta)?;
    dispatch(&outcome.events, room.config.tile_length, factory);
    Ok(outcome)
}

/// Applies the provided command to the room, recording the resulting events.
pub fn apply(room: &mut Room, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::CreateRoom { columns, rows } => {
            let mut created = Vec::new();
            let cells = layout::rectangle_cells(columns, rows);
            match layout::populate(cells, room.config, &mut created) {
                Ok(rebuilt) => {
                    for (element, entry) in room.graph.iter() {
                        out_events.push(match entry.placement() {
                            Placement::Floor { cell } => Event::FloorRemoved {
                                floor: element,
                                cell,
                            },
                            placement => Event::ElementDestroyed { element, placement },
                        });
                    }
                    *room = rebuilt;
                    out_events.push(Event::RoomCreated { columns, rows });
                    out_events.extend(created);
                }
                Err(error) => warn!("could not lay out a {columns}x{rows} room: {error}"),
            }
        }
        Command::ExtendRoom { wall, delta } => match room.extend(wall, delta) {
            Ok(outcome) => {
                out_events.extend(outcome.events);
                out_events.push(Event::RoomExtended {
                    wall,
                    selection: outcome.selection,
                });
            }
            Err(error) => out_events.push(Event::EditRejected {
                wall,
                reason: error.rejection(),
            }),
        },
    }
}

/// Query functions that provide read-only access to the room.
pub mod query {
    use room_topology_core::{CellCoord, CornerKind, Direction, ElementId, ElementType, Placement};

    use super::{EditError, Element, ElementGraph, GridIndex, Room, RoomConfig, WallConditions};

    /// Tunables the room was created with.
    #[must_use]
    pub fn config(room: &Room) -> &RoomConfig {
        &room.config
    }

    /// Read-only access to the floor index.
    #[must_use]
    pub fn grid(room: &Room) -> &GridIndex {
        &room.grid
    }

    /// Read-only access to the element graph.
    #[must_use]
    pub fn graph(room: &Room) -> &ElementGraph {
        &room.graph
    }

    /// Looks up an element by handle.
    #[must_use]
    pub fn element(room: &Room, element: ElementId) -> Option<&Element> {
        room.graph.get(element)
    }

    /// Element occupying the provided slot.
    #[must_use]
    pub fn element_at(room: &Room, placement: Placement) -> Option<ElementId> {
        room.graph.at(placement)
    }

    /// Wall closing off side `facing` of the floor at `cell`.
    #[must_use]
    pub fn wall_at(room: &Room, cell: CellCoord, facing: Direction) -> Option<ElementId> {
        room.graph.at(Placement::Wall { cell, facing })
    }

    /// Occupied cells in row-major order, bottom row first.
    #[must_use]
    pub fn floor_cells(room: &Room) -> Vec<CellCoord> {
        room.grid.cells().collect()
    }

    /// Every wall with its slot, ordered by slot.
    #[must_use]
    pub fn walls(room: &Room) -> Vec<(Placement, ElementId)> {
        let mut walls: Vec<(Placement, ElementId)> = room
            .graph
            .iter()
            .filter(|(_, entry)| entry.element_type().is_wall())
            .map(|(element, entry)| (entry.placement(), element))
            .collect();
        walls.sort();
        walls
    }

    /// Boundary snapshot around `wall` using the configured neighbourhood size.
    pub fn wall_conditions(room: &Room, wall: ElementId) -> Result<WallConditions, EditError> {
        WallConditions::inspect(&room.graph, wall, room.config.neighborhood_steps)
    }

    /// Tally of the room's elements by kind.
    #[must_use]
    pub fn counts(room: &Room) -> ElementCounts {
        let mut counts = ElementCounts::default();
        for (_, entry) in room.graph.iter() {
            match entry.element_type() {
                ElementType::Floor => counts.floors += 1,
                ElementType::Wall(_) => counts.walls += 1,
                ElementType::Corner(CornerKind::Inner) => counts.inner_corners += 1,
                ElementType::Corner(CornerKind::Outer) => counts.outer_corners += 1,
            }
        }
        counts
    }

    /// Number of elements of each kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ElementCounts {
        /// Floor tiles.
        pub floors: usize,
        /// Walls of any variant.
        pub walls: usize,
        /// Concave corners.
        pub inner_corners: usize,
        /// Convex corners.
        pub outer_corners: usize,
    }
}
