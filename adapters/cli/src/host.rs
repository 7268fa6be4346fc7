//! Terminal stand-in for a scene that owns visible elements.

use std::collections::HashMap;

use glam::Vec2;
use log::trace;
use room_topology_core::{CellCoord, Direction, ElementId, ElementType};
use room_topology_world::ElementFactory;

/// Keeps the world-space offset applied to every live element and tallies
/// lifecycle calls.
#[derive(Debug, Default)]
pub(crate) struct Scene {
    offsets: HashMap<ElementId, Vec2>,
    spawned: usize,
    destroyed: usize,
    moved: usize,
}

impl Scene {
    pub(crate) fn live(&self) -> usize {
        self.offsets.len()
    }

    pub(crate) fn summary(&self) -> String {
        format!(
            "scene: {} live, {} spawned, {} destroyed, {} moved",
            self.live(),
            self.spawned,
            self.destroyed,
            self.moved
        )
    }
}

impl ElementFactory for Scene {
    fn spawn_adjacent(
        &mut self,
        spawned: ElementId,
        anchor: ElementId,
        direction: Direction,
        orientation: Direction,
        element_type: ElementType,
    ) {
        trace!(
            "spawn {element_type:?} {spawned:?} {direction:?} of {anchor:?} facing {orientation:?}"
        );
        let _ = self.offsets.insert(spawned, Vec2::ZERO);
        self.spawned += 1;
    }

    fn spawn_floor_at(&mut self, floor: ElementId, cell: CellCoord) {
        trace!("spawn floor {floor:?} at {cell:?}");
        let _ = self.offsets.insert(floor, Vec2::ZERO);
        self.spawned += 1;
    }

    fn destroy(&mut self, element: ElementId) {
        trace!("destroy {element:?}");
        let _ = self.offsets.remove(&element);
        self.destroyed += 1;
    }

    fn set_position(&mut self, element: ElementId, position_delta: Vec2) {
        trace!("move {element:?} by {position_delta}");
        *self.offsets.entry(element).or_insert(Vec2::ZERO) += position_delta;
        self.moved += 1;
    }
}
