//! Bounded walk along the boundary on both sides of a wall.

use room_topology_core::{
    CornerKind, Direction, ElementId, ElementType, Placement, Rotation, WallShape, WallVariant,
};

use crate::{EditError, ElementGraph};

/// Element reached while walking the boundary away from a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborStep {
    /// Element that was reached.
    pub element: ElementId,
    /// Shape of the reached element.
    pub element_type: ElementType,
    /// Slot of the reached element.
    pub placement: Placement,
    /// Compass direction of the link that led to the element.
    pub reached_via: Direction,
}

/// Kind of corner, if any, sitting directly beside a wall on each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CornerSituation {
    /// Corner immediately clockwise of the wall.
    pub clockwise: Option<CornerKind>,
    /// Corner immediately counter-clockwise of the wall.
    pub counter_clockwise: Option<CornerKind>,
}

impl CornerSituation {
    /// Corner on the side selected by `rotation`.
    #[must_use]
    pub const fn side(&self, rotation: Rotation) -> Option<CornerKind> {
        match rotation {
            Rotation::Clockwise => self.clockwise,
            Rotation::CounterClockwise => self.counter_clockwise,
        }
    }
}

/// Snapshot of the boundary around a wall.
///
/// Both rotational senses hold exactly the inspected number of entries. An
/// entry is `None` once the walk ran into an empty link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallConditions {
    wall: ElementId,
    placement: Placement,
    facing: Direction,
    variant: WallVariant,
    clockwise: Vec<Option<NeighborStep>>,
    counter_clockwise: Vec<Option<NeighborStep>>,
}

impl WallConditions {
    /// Walks `steps` elements along the boundary in both senses starting at `wall`.
    pub fn inspect(graph: &ElementGraph, wall: ElementId, steps: usize) -> Result<Self, EditError> {
        let element = graph.get(wall).ok_or(EditError::MissingElement(wall))?;
        let (ElementType::Wall(variant), Placement::Wall { facing, .. }) =
            (element.element_type(), element.placement())
        else {
            return Err(EditError::NotAWall(wall));
        };

        Ok(Self {
            wall,
            placement: element.placement(),
            facing,
            variant,
            clockwise: walk(graph, wall, facing, Rotation::Clockwise, steps),
            counter_clockwise: walk(graph, wall, facing, Rotation::CounterClockwise, steps),
        })
    }

    /// Inspected wall.
    #[must_use]
    pub const fn wall(&self) -> ElementId {
        self.wall
    }

    /// Slot of the inspected wall.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Facing of the inspected wall.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Length variant of the inspected wall.
    #[must_use]
    pub const fn variant(&self) -> WallVariant {
        self.variant
    }

    /// Coarse shape of the inspected wall.
    #[must_use]
    pub const fn shape(&self) -> WallShape {
        self.variant.shape()
    }

    /// Number of entries recorded per rotational sense.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.clockwise.len()
    }

    /// Entry `index` steps away in the provided sense.
    pub fn step(
        &self,
        rotation: Rotation,
        index: usize,
    ) -> Result<Option<&NeighborStep>, EditError> {
        let entries = match rotation {
            Rotation::Clockwise => &self.clockwise,
            Rotation::CounterClockwise => &self.counter_clockwise,
        };
        entries
            .get(index)
            .map(Option::as_ref)
            .ok_or(EditError::NeighborhoodOutOfRange {
                index,
                steps: entries.len(),
            })
    }

    /// Corner kinds found directly beside the wall.
    #[must_use]
    pub fn corner_situation(&self) -> CornerSituation {
        let kind = |entries: &[Option<NeighborStep>]| match entries.first() {
            Some(Some(NeighborStep {
                element_type: ElementType::Corner(kind),
                ..
            })) => Some(*kind),
            _ => None,
        };
        CornerSituation {
            clockwise: kind(&self.clockwise),
            counter_clockwise: kind(&self.counter_clockwise),
        }
    }
}

fn walk(
    graph: &ElementGraph,
    start: ElementId,
    facing: Direction,
    rotation: Rotation,
    steps: usize,
) -> Vec<Option<NeighborStep>> {
    let mut entries = Vec::with_capacity(steps);
    let mut current = start;
    let mut look = facing.rotate(rotation);

    while entries.len() < steps {
        let Some(next) = graph.get(current).and_then(|element| element.link(look)) else {
            break;
        };
        let Some(element) = graph.get(next) else {
            break;
        };
        entries.push(Some(NeighborStep {
            element: next,
            element_type: element.element_type(),
            placement: element.placement(),
            reached_via: look,
        }));

        if element.element_type().is_corner() {
            let preferred = look.rotate(rotation);
            look = if element.link(preferred).is_some() {
                preferred
            } else {
                look.rotate(rotation.reversed())
            };
        }
        current = next;
    }

    entries.resize(steps, None);
    entries
}
