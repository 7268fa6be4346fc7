//! Whole-room consistency check run before an edit commits.

use room_topology_core::{Direction, ElementType, Placement, Quadrant};

use crate::{
    boundary::{self, canonical_links, derived_type},
    GraphViolation, Room,
};

/// Verifies that the room's elements match the boundary its floors imply.
///
/// Checks, in order: every floor cell is backed by its floor element, every
/// element is indexed under its slot and carries the derived type, every
/// boundary slot around a floor is filled, and every link points at the
/// geometric neighbour and is mirrored.
pub fn check(room: &Room) -> Result<(), GraphViolation> {
    let grid = &room.grid;
    let graph = &room.graph;

    for (cell, floor) in grid.iter() {
        let backed = graph
            .get(floor)
            .is_some_and(|element| element.placement() == boundary::floor(cell));
        if !backed {
            return Err(GraphViolation::FloorMismatch(cell));
        }
    }

    if graph.slot_count() != graph.len() {
        if let Some((element, _)) = graph
            .iter()
            .find(|(element, entry)| graph.at(entry.placement()) != Some(*element))
        {
            return Err(GraphViolation::UnindexedElement(element));
        }
    }

    for (element, entry) in graph.iter() {
        let placement = entry.placement();
        if graph.at(placement) != Some(element) {
            return Err(GraphViolation::UnindexedElement(element));
        }
        let expected = derived_type(grid, placement);
        if expected == Some(entry.element_type()) {
            continue;
        }
        return Err(match (placement, expected) {
            (Placement::Floor { cell }, _) => GraphViolation::FloorMismatch(cell),
            (Placement::Wall { .. }, Some(ElementType::Wall(_))) => {
                GraphViolation::WrongVariant(placement)
            }
            (Placement::Wall { .. }, _) => GraphViolation::StrayWall(placement),
            (Placement::Corner { .. }, _) => GraphViolation::StrayCorner(placement),
        });
    }

    for cell in grid.cells() {
        let mut required: Vec<Placement> = Direction::ALL
            .iter()
            .map(|facing| boundary::wall(cell, *facing))
            .collect();
        for vertex in Quadrant::ALL {
            required.extend(
                boundary::vertex_cells(cell, vertex)
                    .into_iter()
                    .map(|(neighbor, toward)| boundary::corner(neighbor, toward)),
            );
        }
        for slot in required {
            if derived_type(grid, slot).is_some() && graph.at(slot).is_none() {
                return Err(GraphViolation::MissingBoundary(slot));
            }
        }
    }

    for (element, entry) in graph.iter() {
        let links = canonical_links(grid, entry.placement());
        for direction in Direction::ALL {
            let expected = links[direction.index()].and_then(|slot| graph.at(slot));
            if entry.link(direction) != expected {
                return Err(GraphViolation::WrongLink { element, direction });
            }
            if let Some(neighbor) = entry.link(direction) {
                let mirrored = graph
                    .get(neighbor)
                    .and_then(|other| other.link(direction.opposite()));
                if mirrored != Some(element) {
                    return Err(GraphViolation::AsymmetricLink { element, direction });
                }
            }
        }
    }

    Ok(())
}
