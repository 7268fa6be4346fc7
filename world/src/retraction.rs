//! Inward drag: removes the floor behind a wall.

use log::debug;
use room_topology_core::{Direction, ElementId, Placement};

use crate::{
    boundary::{self, wall},
    editor::{EditPath, StepOutcome},
    mutation::Mutation,
    EditError,
};

/// Shrinks the room by the floor behind `dragged`.
///
/// The wall follows the drag when a floor remains behind it; otherwise it
/// disappears together with the floor.
pub(crate) fn retract_step(
    mutation: &mut Mutation<'_>,
    dragged: ElementId,
) -> Result<StepOutcome, EditError> {
    let placement = mutation
        .graph()
        .get(dragged)
        .map(|element| element.placement())
        .ok_or(EditError::MissingElement(dragged))?;
    let Placement::Wall {
        cell: removed,
        facing,
    } = placement
    else {
        return Err(EditError::NotAWall(dragged));
    };
    if mutation.grid().len() <= 1 {
        return Err(EditError::LastFloor(removed));
    }

    let behind = removed.step(facing.opposite());
    let target = wall(behind, facing);
    debug!("retracting {dragged:?} from {removed:?} toward {behind:?}");

    let _ = mutation.remove_floor(removed)?;
    if mutation.has_floor(behind) {
        let _ = mutation.translate(placement, target)?;
    } else {
        let _ = mutation.destroy_at(placement)?;
    }

    for direction in Direction::ALL {
        if direction == facing {
            continue;
        }
        let neighbor = removed.step(direction);
        if mutation.has_floor(neighbor) {
            if direction != facing.opposite() {
                let _ = mutation.spawn_wall(neighbor, direction.opposite())?;
            }
        } else {
            let _ = mutation.destroy_at(wall(removed, direction))?;
        }
    }

    for slot in boundary::vertex_corners(removed) {
        mutation.reconcile(slot)?;
    }
    mutation.reshape_around(removed)?;
    mutation.stitch_around(removed)?;

    let selection = mutation.graph().at(target);
    Ok(StepOutcome {
        path: EditPath::Retracted,
        wall: selection,
        replaced: selection != Some(dragged),
    })
}
