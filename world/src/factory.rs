//! Host-side element lifecycle and replay of committed edits.

use glam::Vec2;
use room_topology_core::{CellCoord, Direction, ElementId, ElementType, Event, Placement};

/// Host collaborator that owns the visible counterpart of every element.
///
/// The room never calls a factory while an edit is running. Committed events
/// are replayed through [`dispatch`], so a factory only ever sees consistent
/// states.
pub trait ElementFactory {
    /// Creates the visible element for a wall or corner next to `anchor`.
    ///
    /// `direction` leads from the anchor to the new element and `orientation`
    /// is the facing of the new element.
    fn spawn_adjacent(
        &mut self,
        spawned: ElementId,
        anchor: ElementId,
        direction: Direction,
        orientation: Direction,
        element_type: ElementType,
    );

    /// Creates the visible element for a floor.
    fn spawn_floor_at(&mut self, floor: ElementId, cell: CellCoord);

    /// Removes the visible element.
    fn destroy(&mut self, element: ElementId);

    /// Shifts the visible element by `position_delta` world units.
    fn set_position(&mut self, element: ElementId, position_delta: Vec2);
}

/// World-space position of a slot, in units where one cell spans `tile_length`.
#[must_use]
pub fn world_position(placement: Placement, tile_length: f32) -> Vec2 {
    let (x, y) = placement.center();
    Vec2::new(x, y) * tile_length
}

/// Replays committed events into the factory in order.
pub fn dispatch<F>(events: &[Event], tile_length: f32, factory: &mut F)
where
    F: ElementFactory + ?Sized,
{
    for event in events {
        match *event {
            Event::FloorSpawned { floor, cell } => factory.spawn_floor_at(floor, cell),
            Event::FloorRemoved { floor, .. } => factory.destroy(floor),
            Event::ElementSpawned {
                element,
                element_type,
                placement,
                anchor,
            } => {
                let orientation = match placement {
                    Placement::Floor { .. } => Direction::North,
                    Placement::Wall { facing, .. } => facing,
                    Placement::Corner { quadrant, .. } => quadrant.orientation(),
                };
                factory.spawn_adjacent(
                    element,
                    anchor.element,
                    anchor.direction,
                    orientation,
                    element_type,
                );
            }
            Event::ElementDestroyed { element, .. } => factory.destroy(element),
            Event::ElementMoved { element, from, to } => {
                let delta = world_position(to, tile_length) - world_position(from, tile_length);
                factory.set_position(element, delta);
            }
            Event::RoomCreated { .. }
            | Event::RoomExtended { .. }
            | Event::EditRejected { .. } => {}
        }
    }
}
