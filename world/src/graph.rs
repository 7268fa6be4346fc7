//! Arena of room elements and their four-way adjacency links.

use std::collections::HashMap;

use room_topology_core::{Direction, ElementId, ElementType, LocalDirection, Placement};
use slotmap::SlotMap;

use crate::EditError;

/// Floor, wall or corner stored in the element graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    placement: Placement,
    element_type: ElementType,
    links: [Option<ElementId>; 4],
}

impl Element {
    fn new(placement: Placement, element_type: ElementType) -> Self {
        Self {
            placement,
            element_type,
            links: [None; 4],
        }
    }

    /// Geometric slot occupied by the element.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Shape of the element.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Neighbour linked in the provided compass direction.
    #[must_use]
    pub const fn link(&self, direction: Direction) -> Option<ElementId> {
        self.links[direction.index()]
    }

    /// Direction the element faces.
    ///
    /// Walls face out of the room, corners face their quadrant orientation and
    /// floors face north.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        match self.placement {
            Placement::Floor { .. } => Direction::North,
            Placement::Wall { facing, .. } => facing,
            Placement::Corner { quadrant, .. } => quadrant.orientation(),
        }
    }

    /// Neighbour linked in a direction expressed in the element's own frame.
    #[must_use]
    pub const fn link_local(&self, direction: LocalDirection) -> Option<ElementId> {
        self.link(direction.resolve(self.facing()))
    }
}

/// Generational arena of elements plus an index from slots to handles.
#[derive(Clone, Debug, Default)]
pub struct ElementGraph {
    elements: SlotMap<ElementId, Element>,
    slots: HashMap<Placement, ElementId>,
}

impl ElementGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Reports whether the graph holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by handle.
    #[must_use]
    pub fn get(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(element)
    }

    /// Element occupying the provided slot.
    #[must_use]
    pub fn at(&self, placement: Placement) -> Option<ElementId> {
        self.slots.get(&placement).copied()
    }

    /// Iterates over every element.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.elements.iter()
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn insert(
        &mut self,
        placement: Placement,
        element_type: ElementType,
    ) -> Result<ElementId, EditError> {
        if self.slots.contains_key(&placement) {
            return Err(EditError::SlotOccupied(placement));
        }
        let element = self.elements.insert(Element::new(placement, element_type));
        let _ = self.slots.insert(placement, element);
        Ok(element)
    }

    /// Removes the element and clears every link pointing at it.
    pub(crate) fn remove(&mut self, element: ElementId) -> Option<Element> {
        self.disconnect_all(element);
        let removed = self.elements.remove(element)?;
        let _ = self.slots.remove(&removed.placement);
        Some(removed)
    }

    /// Moves the element to another slot, dropping all of its links.
    pub(crate) fn relocate(
        &mut self,
        element: ElementId,
        to: Placement,
    ) -> Result<Placement, EditError> {
        if self.slots.contains_key(&to) {
            return Err(EditError::SlotOccupied(to));
        }
        self.disconnect_all(element);
        let entry = self
            .elements
            .get_mut(element)
            .ok_or(EditError::MissingElement(element))?;
        let from = entry.placement;
        entry.placement = to;
        let _ = self.slots.remove(&from);
        let _ = self.slots.insert(to, element);
        Ok(from)
    }

    /// Links `from` to `to` along `direction` and mirrors the link back.
    pub(crate) fn connect(&mut self, from: ElementId, direction: Direction, to: ElementId) {
        if let Some(entry) = self.elements.get_mut(from) {
            entry.links[direction.index()] = Some(to);
        }
        if let Some(entry) = self.elements.get_mut(to) {
            entry.links[direction.opposite().index()] = Some(from);
        }
    }

    /// Clears every link of the element together with the mirrored links.
    pub(crate) fn disconnect_all(&mut self, element: ElementId) {
        let Some(entry) = self.elements.get_mut(element) else {
            return;
        };
        let links = std::mem::replace(&mut entry.links, [None; 4]);
        for direction in Direction::ALL {
            let Some(neighbor) = links[direction.index()] else {
                continue;
            };
            if let Some(other) = self.elements.get_mut(neighbor) {
                let back = &mut other.links[direction.opposite().index()];
                if *back == Some(element) {
                    *back = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_topology_core::{CellCoord, WallVariant};

    fn floor(x: i32, y: i32) -> Placement {
        Placement::Floor {
            cell: CellCoord::new(x, y),
        }
    }

    #[test]
    fn insert_refuses_taken_slots() {
        let mut graph = ElementGraph::new();
        let first = graph.insert(floor(0, 0), ElementType::Floor).expect("insert");

        assert_eq!(
            graph.insert(floor(0, 0), ElementType::Floor),
            Err(EditError::SlotOccupied(floor(0, 0)))
        );
        assert_eq!(graph.at(floor(0, 0)), Some(first));
    }

    #[test]
    fn connect_mirrors_links() {
        let mut graph = ElementGraph::new();
        let west = graph.insert(floor(0, 0), ElementType::Floor).expect("insert");
        let east = graph.insert(floor(1, 0), ElementType::Floor).expect("insert");

        graph.connect(west, Direction::East, east);

        assert_eq!(graph.get(west).and_then(|e| e.link(Direction::East)), Some(east));
        assert_eq!(graph.get(east).and_then(|e| e.link(Direction::West)), Some(west));
    }

    #[test]
    fn remove_clears_links_from_neighbors() {
        let mut graph = ElementGraph::new();
        let floor_id = graph.insert(floor(0, 0), ElementType::Floor).expect("insert");
        let wall_slot = Placement::Wall {
            cell: CellCoord::new(0, 0),
            facing: Direction::North,
        };
        let wall = graph
            .insert(wall_slot, ElementType::Wall(WallVariant::Full))
            .expect("insert");
        graph.connect(floor_id, Direction::North, wall);

        let removed = graph.remove(wall).expect("wall exists");

        assert_eq!(removed.placement(), wall_slot);
        assert_eq!(graph.at(wall_slot), None);
        assert!(graph.get(wall).is_none());
        assert_eq!(graph.get(floor_id).and_then(|e| e.link(Direction::North)), None);
    }

    #[test]
    fn relocate_keeps_handle_and_drops_links() {
        let mut graph = ElementGraph::new();
        let floor_id = graph.insert(floor(0, 0), ElementType::Floor).expect("insert");
        let from = Placement::Wall {
            cell: CellCoord::new(0, 0),
            facing: Direction::East,
        };
        let to = Placement::Wall {
            cell: CellCoord::new(1, 0),
            facing: Direction::East,
        };
        let wall = graph
            .insert(from, ElementType::Wall(WallVariant::Full))
            .expect("insert");
        graph.connect(floor_id, Direction::East, wall);

        assert_eq!(graph.relocate(wall, to), Ok(from));

        assert_eq!(graph.at(to), Some(wall));
        assert_eq!(graph.at(from), None);
        assert_eq!(graph.get(floor_id).and_then(|e| e.link(Direction::East)), None);
        assert_eq!(graph.get(wall).map(Element::facing), Some(Direction::East));
        assert_eq!(
            graph.get(wall).and_then(|e| e.link_local(LocalDirection::Back)),
            None
        );
    }
}
