//! Builds rooms from scratch.

use std::collections::BTreeSet;

use log::debug;
use room_topology_core::{CellCoord, Direction, ElementId, Event};

use crate::{boundary, mutation::Mutation, EditError, Room, RoomConfig};

/// Lays out the floors of `cells` with their complete boundary, recording a
/// spawn event for every element.
pub(crate) fn populate(
    cells: BTreeSet<CellCoord>,
    config: RoomConfig,
    events: &mut Vec<Event>,
) -> Result<Room, EditError> {
    let mut room = Room::new(config);
    {
        let mut mutation = Mutation::new(&mut room.grid, &mut room.graph, events);
        for &cell in &cells {
            let _ = mutation.spawn_floor(cell)?;
        }
        for &cell in &cells {
            for facing in Direction::ALL {
                if !cells.contains(&cell.step(facing)) {
                    let _ = mutation.spawn_wall(cell, facing)?;
                }
            }
        }
        for &cell in &cells {
            for slot in boundary::vertex_corners(cell) {
                mutation.reconcile(slot)?;
            }
        }
        let elements: Vec<ElementId> = mutation
            .graph()
            .iter()
            .map(|(element, _)| element)
            .collect();
        mutation.stitch(&elements)?;
    }
    debug!(
        "laid out {} floors with {} elements",
        room.grid.len(),
        room.graph.len()
    );
    Ok(room)
}

/// Cells of a `columns` by `rows` block with its south-west cell at the origin.
pub(crate) fn rectangle_cells(columns: u32, rows: u32) -> BTreeSet<CellCoord> {
    let columns = i32::try_from(columns).unwrap_or(i32::MAX);
    let rows = i32::try_from(rows).unwrap_or(i32::MAX);
    (0..rows)
        .flat_map(|y| (0..columns).map(move |x| CellCoord::new(x, y)))
        .collect()
}
