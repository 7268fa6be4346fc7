//! Wall-drag state machine that grows and shrinks the room one cell at a time.
//!
//! An outward step turns the empty cell in front of the dragged wall into a
//! floor. The wall's variant picks the path: full and single-shortened walls
//! translate outward and resolve each lateral side, while a wall shortened at
//! both ends sits in a notch and either hands the drag to a neighbouring wall
//! or closes a one-cell hole outright.

use log::{debug, warn};
use room_topology_core::{
    CellCoord, CornerKind, Direction, ElementId, ElementType, Event, MoveDelta, Placement,
    Quadrant, Rotation, WallShape, WallVariant,
};

use crate::{
    boundary::{self, corner, quadrant, wall},
    conditions::WallConditions,
    mutation::Mutation,
    retraction, validate, EditError, Room,
};

/// How one lateral side of a dragged wall was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideResolution {
    /// An outer corner beside the wall moved outward with it.
    CornerTranslate,
    /// A straight run of walls was split, leaving a notch behind the new floor.
    StraightRun,
    /// The new floor touched a floor diagonally ahead and the boundaries merged.
    DiagonalMerge,
    /// The new floor filled the notch beside a shortened end.
    LateralMerge,
}

/// What happened to the dragged wall itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrontResolution {
    /// The wall moved one cell outward.
    Translated,
    /// The wall ran into a floor and was removed with the wall it met.
    Collided,
}

/// Path taken by a single edit step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditPath {
    /// The wall advanced and both lateral sides were resolved.
    Extended {
        /// Shape of the wall before the step.
        shape: WallShape,
        /// Whether the wall was replaced by a full-length wall first.
        enlarged: bool,
        /// Outcome for the wall itself.
        front: FrontResolution,
        /// Resolution of the clockwise side.
        clockwise: SideResolution,
        /// Resolution of the counter-clockwise side.
        counter_clockwise: SideResolution,
    },
    /// The drag was handed to a neighbouring wall facing the same empty cell.
    Redirected {
        /// Wall that performed the step.
        via: ElementId,
        /// Delta expressed in the frame of that wall.
        delta: MoveDelta,
        /// Path the neighbouring wall took.
        then: Box<EditPath>,
    },
    /// A one-cell hole enclosed on all four sides was filled with floor.
    FilledSquare,
    /// The floor behind the wall was removed.
    Retracted,
}

/// Result of a single one-cell step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Path the step took.
    pub path: EditPath,
    /// Wall occupying the dragged slot after the step, if any.
    pub wall: Option<ElementId>,
    /// Whether `wall` is a different element than the one that was dragged.
    pub replaced: bool,
}

/// Result of a committed drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// Outcome of every step, in order.
    pub steps: Vec<StepOutcome>,
    /// Wall occupying the dragged slot once the drag finished.
    pub selection: Option<ElementId>,
    /// Changes recorded while editing, ready to be mirrored by a host.
    pub events: Vec<Event>,
}

pub(crate) fn run(
    room: &mut Room,
    wall: ElementId,
    delta: MoveDelta,
) -> Result<EditOutcome, EditError> {
    let facing = wall_facing(room, wall)?;
    let steps = delta
        .steps_along(facing)
        .ok_or(EditError::UnsupportedDelta { delta, facing })?;

    let snapshot = room.clone();
    let mut events = Vec::new();
    let result = match drive(room, wall, steps, &mut events) {
        Ok(outcomes) => validate::check(room)
            .map(|()| outcomes)
            .map_err(EditError::from),
        Err(error) => Err(error),
    };

    match result {
        Ok(outcomes) => {
            let selection = outcomes.last().and_then(|outcome| outcome.wall);
            debug!(
                "dragged {wall:?} by {steps} cells in {} steps, selection {selection:?}",
                outcomes.len()
            );
            Ok(EditOutcome {
                steps: outcomes,
                selection,
                events,
            })
        }
        Err(error) => {
            warn!("rolling back drag of {wall:?}: {error}");
            *room = snapshot;
            Err(error)
        }
    }
}

fn wall_facing(room: &Room, wall: ElementId) -> Result<Direction, EditError> {
    let element = room.graph.get(wall).ok_or(EditError::MissingElement(wall))?;
    match (element.element_type(), element.placement()) {
        (ElementType::Wall(_), Placement::Wall { facing, .. }) => Ok(facing),
        _ => Err(EditError::NotAWall(wall)),
    }
}

fn drive(
    room: &mut Room,
    wall: ElementId,
    steps: i32,
    events: &mut Vec<Event>,
) -> Result<Vec<StepOutcome>, EditError> {
    let neighborhood = room.config.neighborhood_steps;
    let mut mutation = Mutation::new(&mut room.grid, &mut room.graph, events);
    let mut outcomes = Vec::new();
    let mut active = Some(wall);

    for _ in 0..steps.unsigned_abs() {
        let Some(current) = active else {
            break;
        };
        let outcome = if steps > 0 {
            extend_step(&mut mutation, current, neighborhood, false)?
        } else {
            retraction::retract_step(&mut mutation, current)?
        };
        active = outcome.wall;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Grows the room by the cell in front of `wall`.
pub(crate) fn extend_step(
    mutation: &mut Mutation<'_>,
    wall: ElementId,
    neighborhood: usize,
    redirected: bool,
) -> Result<StepOutcome, EditError> {
    let conditions = WallConditions::inspect(mutation.graph(), wall, neighborhood)?;
    let (cell, facing) = slot_of(&conditions)?;
    let target = boundary::wall(cell.step(facing), facing);

    let path = match conditions.shape() {
        WallShape::Full => extend_wall(mutation, &conditions, false)?,
        WallShape::ShortenedOneSide => {
            let enlarged = should_enlarge(&conditions)?;
            if enlarged {
                debug!("enlarging {wall:?} before extending");
                let _ = mutation.replace_wall(cell, facing, WallVariant::Full)?;
            }
            extend_wall(mutation, &conditions, enlarged)?
        }
        WallShape::ShortenedBothEnds if redirected => extend_wall(mutation, &conditions, false)?,
        WallShape::ShortenedBothEnds => close_gap(mutation, &conditions, neighborhood)?,
    };

    let selection = mutation.graph().at(target);
    Ok(StepOutcome {
        path,
        wall: selection,
        replaced: selection != Some(wall),
    })
}

fn slot_of(conditions: &WallConditions) -> Result<(CellCoord, Direction), EditError> {
    match conditions.placement() {
        Placement::Wall { cell, facing } => Ok((cell, facing)),
        _ => Err(EditError::NotAWall(conditions.wall())),
    }
}

const fn side_of(facing: Direction, rotation: Rotation) -> Direction {
    facing.rotate(rotation)
}

/// A single-shortened wall is replaced by a full one when both lateral
/// neighbours are corners and each is followed two steps out by another corner.
fn should_enlarge(conditions: &WallConditions) -> Result<bool, EditError> {
    for rotation in Rotation::BOTH {
        let corner_at = |index| -> Result<bool, EditError> {
            Ok(matches!(
                conditions.step(rotation, index)?,
                Some(step) if matches!(step.element_type, ElementType::Corner(_))
            ))
        };
        if !corner_at(0)? || !corner_at(2)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn classify(
    mutation: &Mutation<'_>,
    conditions: &WallConditions,
    rotation: Rotation,
) -> Result<SideResolution, EditError> {
    let (cell, facing) = slot_of(conditions)?;
    let ahead = cell.step(facing);
    let diagonals = mutation.grid().diagonal_neighbors(ahead, facing);
    let diagonal = match rotation {
        Rotation::Clockwise => diagonals.clockwise,
        Rotation::CounterClockwise => diagonals.counter_clockwise,
    };

    let lateral = conditions.step(rotation, 0)?.map(|step| step.element_type);
    match lateral {
        Some(ElementType::Corner(CornerKind::Inner)) => Ok(SideResolution::LateralMerge),
        _ if diagonal.is_some() => Ok(SideResolution::DiagonalMerge),
        Some(ElementType::Corner(CornerKind::Outer)) => Ok(SideResolution::CornerTranslate),
        Some(ElementType::Wall(_)) => Ok(SideResolution::StraightRun),
        _ => {
            let side = side_of(facing, rotation);
            Err(EditError::MissingSlot(
                boundary::lateral(mutation.grid(), cell, facing, side).placement(),
            ))
        }
    }
}

fn extend_wall(
    mutation: &mut Mutation<'_>,
    conditions: &WallConditions,
    enlarged: bool,
) -> Result<EditPath, EditError> {
    let (cell, facing) = slot_of(conditions)?;
    let ahead = cell.step(facing);
    let front = ahead.step(facing);
    let blocked = mutation.has_floor(front);

    let clockwise = classify(mutation, conditions, Rotation::Clockwise)?;
    let counter_clockwise = classify(mutation, conditions, Rotation::CounterClockwise)?;
    debug!(
        "extending {:?} at {cell:?} facing {facing:?}: blocked {blocked}, \
         sides {clockwise:?}/{counter_clockwise:?}",
        conditions.wall()
    );

    let _ = mutation.spawn_floor(ahead)?;
    let front_resolution = if blocked {
        let _ = mutation.destroy_at(wall(cell, facing))?;
        let _ = mutation.destroy_at(wall(front, facing.opposite()))?;
        FrontResolution::Collided
    } else {
        let _ = mutation.translate(wall(cell, facing), wall(ahead, facing))?;
        FrontResolution::Translated
    };

    resolve_side(mutation, cell, facing, facing.clockwise(), clockwise, blocked)?;
    resolve_side(
        mutation,
        cell,
        facing,
        facing.counter_clockwise(),
        counter_clockwise,
        blocked,
    )?;

    mutation.reshape_around(ahead)?;
    mutation.stitch_around(ahead)?;

    Ok(EditPath::Extended {
        shape: conditions.shape(),
        enlarged,
        front: front_resolution,
        clockwise,
        counter_clockwise,
    })
}

/// Rebuilds the boundary on side `side` of the new floor in front of `(cell, facing)`.
///
/// Cell names: `beside` is next to the dragged wall's floor, `lateral` next to
/// the new floor, `diagonal` next to the cell in front of the new floor.
fn resolve_side(
    mutation: &mut Mutation<'_>,
    cell: CellCoord,
    facing: Direction,
    side: Direction,
    resolution: SideResolution,
    blocked: bool,
) -> Result<(), EditError> {
    let back = facing.opposite();
    let away = side.opposite();
    let ahead = cell.step(facing);
    let front = ahead.step(facing);
    let beside = cell.step(side);
    let lateral = ahead.step(side);
    let diagonal = front.step(side);

    match resolution {
        SideResolution::LateralMerge => {
            let _ = mutation.destroy_at(wall(lateral, away))?;
            let _ = mutation.destroy_at(corner(ahead, quadrant(back, side)))?;
            if blocked {
                let _ = mutation.destroy_at(corner(ahead, quadrant(facing, side)))?;
            } else if mutation.has_floor(diagonal) {
                let _ = mutation.spawn_corner(front, quadrant(back, side), CornerKind::Inner)?;
                let _ = mutation.shrink(diagonal, away, back)?;
            } else {
                let _ = mutation.destroy_at(corner(front, quadrant(back, side)))?;
            }
        }
        SideResolution::DiagonalMerge => {
            let _ = mutation.spawn_wall(ahead, side)?;
            if mutation.has_floor(beside) {
                let _ = mutation.spawn_corner(lateral, quadrant(away, back), CornerKind::Inner)?;
                let _ = mutation.shrink(beside, facing, away)?;
            } else {
                let _ = mutation.destroy_at(corner(lateral, quadrant(away, back)))?;
            }
            if !blocked {
                let _ = mutation.destroy_at(corner(ahead, quadrant(facing, side)))?;
                let _ = mutation.spawn_corner(front, quadrant(back, side), CornerKind::Inner)?;
                let _ = mutation.shrink(diagonal, away, back)?;
            }
            let _ = mutation.spawn_corner(lateral, quadrant(away, facing), CornerKind::Inner)?;
            let _ = mutation.shrink(diagonal, back, away)?;
        }
        SideResolution::CornerTranslate => {
            let outer = quadrant(back, away);
            if blocked {
                let _ = mutation.destroy_at(corner(lateral, outer))?;
                let _ = mutation.destroy_at(corner(lateral, quadrant(away, facing)))?;
            } else {
                let _ = mutation.translate(corner(lateral, outer), corner(diagonal, outer))?;
            }
            let _ = mutation.spawn_wall(ahead, side)?;
        }
        SideResolution::StraightRun => {
            let _ = mutation.spawn_wall(ahead, side)?;
            let _ = mutation.spawn_corner(lateral, quadrant(away, back), CornerKind::Inner)?;
            let _ = mutation.shrink(beside, facing, away)?;
            if blocked {
                let _ = mutation.destroy_at(corner(lateral, quadrant(away, facing)))?;
            } else {
                let _ = mutation.spawn_corner(diagonal, quadrant(back, away), CornerKind::Outer)?;
            }
        }
    }
    Ok(())
}

/// Handles a wall shortened at both ends.
///
/// The wall clockwise around the notch faces the same empty cell. When it is
/// not itself shortened at both ends the drag is handed to it. Otherwise the
/// wall beyond it decides: a third both-shortened wall means the cell is
/// enclosed on all sides and is filled directly.
fn close_gap(
    mutation: &mut Mutation<'_>,
    conditions: &WallConditions,
    neighborhood: usize,
) -> Result<EditPath, EditError> {
    let (cell, facing) = slot_of(conditions)?;
    let ahead = cell.step(facing);
    let side = facing.clockwise();
    let expected = wall(ahead.step(side), side.opposite());

    let neighbor = wall_step(conditions, expected)?;
    if !is_shortened_at_both_ends(mutation, neighbor) {
        return redirect(mutation, facing, neighbor, neighborhood);
    }

    let neighbor_conditions = WallConditions::inspect(mutation.graph(), neighbor, neighborhood)?;
    let beyond = wall_step(&neighbor_conditions, wall(ahead.step(facing), facing.opposite()))?;
    if !is_shortened_at_both_ends(mutation, beyond) {
        return redirect(mutation, facing, beyond, neighborhood);
    }

    fill_square(mutation, ahead)
}

fn wall_step(conditions: &WallConditions, expected: Placement) -> Result<ElementId, EditError> {
    match conditions.step(Rotation::Clockwise, 1)? {
        Some(step) if step.element_type.is_wall() && step.placement == expected => Ok(step.element),
        _ => Err(EditError::MissingSlot(expected)),
    }
}

fn is_shortened_at_both_ends(mutation: &Mutation<'_>, element: ElementId) -> bool {
    matches!(
        mutation.graph().get(element).map(|entry| entry.element_type()),
        Some(ElementType::Wall(variant)) if variant.shape() == WallShape::ShortenedBothEnds
    )
}

fn redirect(
    mutation: &mut Mutation<'_>,
    facing: Direction,
    via: ElementId,
    neighborhood: usize,
) -> Result<EditPath, EditError> {
    let via_facing = mutation
        .graph()
        .get(via)
        .map(|element| element.facing())
        .ok_or(EditError::MissingElement(via))?;
    let delta = MoveDelta::along(facing, 1).rotated(facing, via_facing);
    debug!("redirecting drag to {via:?} facing {via_facing:?}");
    let outcome = extend_step(mutation, via, neighborhood, true)?;
    Ok(EditPath::Redirected {
        via,
        delta,
        then: Box::new(outcome.path),
    })
}

fn fill_square(mutation: &mut Mutation<'_>, hole: CellCoord) -> Result<EditPath, EditError> {
    debug!("filling enclosed cell {hole:?}");
    for direction in Direction::ALL {
        let _ = mutation.destroy_at(wall(hole.step(direction), direction.opposite()))?;
    }
    for vertex in Quadrant::ALL {
        let _ = mutation.destroy_at(corner(hole, vertex))?;
    }
    let _ = mutation.spawn_floor(hole)?;
    mutation.reshape_around(hole)?;
    mutation.stitch_around(hole)?;
    Ok(EditPath::FilledSquare)
}
