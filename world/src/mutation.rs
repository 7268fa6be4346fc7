//! Recorded graph mutations shared by every edit path.

use log::trace;
use room_topology_core::{
    Anchor, CellCoord, CornerKind, Direction, ElementId, ElementType, Event, Placement, Quadrant,
    WallEnd, WallVariant,
};

use crate::{
    boundary::{self, corner_walls, derived_type},
    EditError, ElementGraph, GridIndex,
};

/// Mutable view of a room that records an event for every change.
pub(crate) struct Mutation<'a> {
    grid: &'a mut GridIndex,
    graph: &'a mut ElementGraph,
    events: &'a mut Vec<Event>,
    touched: Vec<ElementId>,
}

impl<'a> Mutation<'a> {
    pub(crate) fn new(
        grid: &'a mut GridIndex,
        graph: &'a mut ElementGraph,
        events: &'a mut Vec<Event>,
    ) -> Self {
        Self {
            grid,
            graph,
            events,
            touched: Vec::new(),
        }
    }

    pub(crate) fn grid(&self) -> &GridIndex {
        &*self.grid
    }

    pub(crate) fn graph(&self) -> &ElementGraph {
        &*self.graph
    }

    pub(crate) fn has_floor(&self, cell: CellCoord) -> bool {
        self.grid.contains(cell)
    }

    pub(crate) fn spawn_floor(&mut self, cell: CellCoord) -> Result<ElementId, EditError> {
        let floor = self.graph.insert(boundary::floor(cell), ElementType::Floor)?;
        self.grid.insert(cell, floor)?;
        trace!("spawned floor {floor:?} at {cell:?}");
        self.touched.push(floor);
        self.events.push(Event::FloorSpawned { floor, cell });
        Ok(floor)
    }

    pub(crate) fn remove_floor(&mut self, cell: CellCoord) -> Result<ElementId, EditError> {
        let floor = self.grid.remove(cell)?;
        let _ = self.graph.remove(floor);
        trace!("removed floor {floor:?} at {cell:?}");
        self.events.push(Event::FloorRemoved { floor, cell });
        Ok(floor)
    }

    /// Spawns a wall carrying the variant derived from the current grid.
    pub(crate) fn spawn_wall(
        &mut self,
        cell: CellCoord,
        facing: Direction,
    ) -> Result<ElementId, EditError> {
        let variant = boundary::wall_variant(&*self.grid, cell, facing);
        self.spawn_wall_variant(cell, facing, variant)
    }

    fn spawn_wall_variant(
        &mut self,
        cell: CellCoord,
        facing: Direction,
        variant: WallVariant,
    ) -> Result<ElementId, EditError> {
        let floor = self
            .grid
            .get(cell)
            .ok_or(EditError::MissingSlot(boundary::floor(cell)))?;
        let anchor = Anchor {
            element: floor,
            direction: facing,
        };
        self.spawn(boundary::wall(cell, facing), ElementType::Wall(variant), anchor)
    }

    pub(crate) fn spawn_corner(
        &mut self,
        cell: CellCoord,
        quadrant: Quadrant,
        kind: CornerKind,
    ) -> Result<ElementId, EditError> {
        let walls = corner_walls(cell, quadrant, kind);
        let anchor = walls
            .iter()
            .find_map(|(wall, direction)| {
                self.graph.at(*wall).map(|element| Anchor {
                    element,
                    direction: *direction,
                })
            })
            .ok_or(EditError::MissingSlot(walls[0].0))?;
        self.spawn(
            boundary::corner(cell, quadrant),
            ElementType::Corner(kind),
            anchor,
        )
    }

    fn spawn(
        &mut self,
        placement: Placement,
        element_type: ElementType,
        anchor: Anchor,
    ) -> Result<ElementId, EditError> {
        let element = self.graph.insert(placement, element_type)?;
        trace!("spawned {element_type:?} {element:?} at {placement:?}");
        self.touched.push(element);
        self.events.push(Event::ElementSpawned {
            element,
            element_type,
            placement,
            anchor,
        });
        Ok(element)
    }

    /// Destroys the element at `placement`, which must be occupied.
    pub(crate) fn destroy_at(&mut self, placement: Placement) -> Result<ElementId, EditError> {
        let element = self
            .graph
            .at(placement)
            .ok_or(EditError::MissingSlot(placement))?;
        let _ = self.graph.remove(element);
        trace!("destroyed {element:?} at {placement:?}");
        self.events.push(Event::ElementDestroyed { element, placement });
        Ok(element)
    }

    /// Moves the element at `from` to `to`, keeping its handle.
    pub(crate) fn translate(
        &mut self,
        from: Placement,
        to: Placement,
    ) -> Result<ElementId, EditError> {
        let element = self.graph.at(from).ok_or(EditError::MissingSlot(from))?;
        let _ = self.graph.relocate(element, to)?;
        trace!("moved {element:?} from {from:?} to {to:?}");
        self.touched.push(element);
        self.events.push(Event::ElementMoved { element, from, to });
        Ok(element)
    }

    /// Replaces the wall at `(cell, facing)` with one of another variant.
    pub(crate) fn replace_wall(
        &mut self,
        cell: CellCoord,
        facing: Direction,
        variant: WallVariant,
    ) -> Result<ElementId, EditError> {
        let _ = self.destroy_at(boundary::wall(cell, facing))?;
        self.spawn_wall_variant(cell, facing, variant)
    }

    /// Shortens the wall at `(cell, facing)` on the end pointing along `side`.
    pub(crate) fn shrink(
        &mut self,
        cell: CellCoord,
        facing: Direction,
        side: Direction,
    ) -> Result<ElementId, EditError> {
        let placement = boundary::wall(cell, facing);
        let current = self.wall_variant_at(placement)?;
        let end = WallEnd::toward(side, facing).ok_or(EditError::MissingSlot(placement))?;
        let shrunk = current
            .shrunk(end)
            .ok_or(EditError::CannotShrink { placement, end })?;
        self.replace_wall(cell, facing, shrunk)
    }

    pub(crate) fn wall_variant_at(&self, placement: Placement) -> Result<WallVariant, EditError> {
        match self
            .graph
            .at(placement)
            .and_then(|element| self.graph.get(element))
            .map(|element| element.element_type())
        {
            Some(ElementType::Wall(variant)) => Ok(variant),
            _ => Err(EditError::MissingSlot(placement)),
        }
    }

    /// Brings the slot in line with the current grid, spawning, destroying or
    /// replacing whatever sits there.
    pub(crate) fn reconcile(&mut self, placement: Placement) -> Result<(), EditError> {
        let expected = derived_type(&*self.grid, placement);
        let existing = self
            .graph
            .at(placement)
            .and_then(|element| self.graph.get(element))
            .map(|element| element.element_type());
        if expected == existing {
            return Ok(());
        }
        if existing.is_some() {
            let _ = self.destroy_at(placement)?;
        }
        match (expected, placement) {
            (Some(ElementType::Wall(variant)), Placement::Wall { cell, facing }) => {
                let _ = self.spawn_wall_variant(cell, facing, variant)?;
            }
            (Some(ElementType::Corner(kind)), Placement::Corner { cell, quadrant }) => {
                let _ = self.spawn_corner(cell, quadrant, kind)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Re-derives the variant of every wall touching a vertex of `center`.
    pub(crate) fn reshape_around(&mut self, center: CellCoord) -> Result<(), EditError> {
        for placement in boundary::vertex_walls(center) {
            let Placement::Wall { cell, facing } = placement else {
                continue;
            };
            let Ok(current) = self.wall_variant_at(placement) else {
                continue;
            };
            let derived = boundary::wall_variant(&*self.grid, cell, facing);
            if derived != current {
                let _ = self.replace_wall(cell, facing, derived)?;
            }
        }
        Ok(())
    }

    /// Rebuilds the links of every element around `center` from geometry.
    pub(crate) fn stitch_around(&mut self, center: CellCoord) -> Result<(), EditError> {
        let mut placements: Vec<Placement> = boundary::block(center)
            .into_iter()
            .filter(|cell| center.manhattan_distance(*cell) <= 1)
            .map(boundary::floor)
            .collect();
        placements.extend(boundary::vertex_walls(center));
        placements.extend(boundary::vertex_corners(center));

        let mut elements: Vec<ElementId> = placements
            .into_iter()
            .filter_map(|placement| self.graph.at(placement))
            .collect();
        elements.extend(
            self.touched
                .iter()
                .copied()
                .filter(|element| self.graph.get(*element).is_some()),
        );
        elements.sort();
        elements.dedup();
        self.stitch(&elements)
    }

    pub(crate) fn stitch(&mut self, elements: &[ElementId]) -> Result<(), EditError> {
        for &element in elements {
            self.graph.disconnect_all(element);
        }
        for &element in elements {
            let Some(placement) = self.graph.get(element).map(|entry| entry.placement()) else {
                continue;
            };
            let links = boundary::canonical_links(&*self.grid, placement);
            for direction in Direction::ALL {
                let Some(target) = links[direction.index()] else {
                    continue;
                };
                let neighbor = self
                    .graph
                    .at(target)
                    .ok_or(EditError::MissingSlot(target))?;
                self.graph.connect(element, direction, neighbor);
            }
        }
        self.touched.clear();
        Ok(())
    }
}
