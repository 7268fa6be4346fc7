#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure drag system that turns pointer motion on a selected wall into room edits.

use glam::Vec2;
use log::debug;
use room_topology_core::{Command, Direction, ElementId, Event, MoveDelta};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragInput {
    /// Wall picked up by the pointer on this frame.
    pub select: Option<ElementId>,
    /// Pointer motion since the previous frame, in world units.
    pub motion: Vec2,
    /// Indicates whether the pointer let go of the wall on this frame.
    pub release: bool,
}

impl DragInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(select: Option<ElementId>, motion: Vec2, release: bool) -> Self {
        Self {
            select,
            motion,
            release,
        }
    }
}

impl Default for DragInput {
    fn default() -> Self {
        Self {
            select: None,
            motion: Vec2::ZERO,
            release: false,
        }
    }
}

/// Drag system that accumulates motion along the selected wall's facing and
/// emits one extension command per whole tile.
#[derive(Clone, Debug)]
pub struct WallDrag {
    tile_length: f32,
    selection: Option<ElementId>,
    accumulated: f32,
    awaiting: Option<ElementId>,
}

impl WallDrag {
    /// Creates a drag system for cells spanning `tile_length` world units.
    #[must_use]
    pub const fn new(tile_length: f32) -> Self {
        Self {
            tile_length,
            selection: None,
            accumulated: 0.0,
            awaiting: None,
        }
    }

    /// Wall currently being dragged.
    #[must_use]
    pub const fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Motion along the facing that has not yet added up to a whole tile.
    #[must_use]
    pub const fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Consumes world events and adapter-derived input to emit drag commands.
    ///
    /// The `facing_of` closure should mirror the world's wall lookup so the
    /// system can project motion onto the selected wall's facing. No further
    /// command is emitted until the world answered the previous one.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: DragInput,
        mut facing_of: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(ElementId) -> Option<Direction>,
    {
        for event in events {
            match *event {
                Event::RoomExtended { wall, selection } if self.awaiting == Some(wall) => {
                    self.awaiting = None;
                    self.selection = selection;
                    if selection.is_none() {
                        self.accumulated = 0.0;
                    }
                }
                Event::EditRejected { wall, reason } if self.awaiting == Some(wall) => {
                    debug!("drag of {wall:?} rejected: {reason:?}");
                    self.awaiting = None;
                    self.accumulated = 0.0;
                }
                Event::RoomCreated { .. } => self.reset(),
                _ => {}
            }
        }

        if input.release {
            self.reset();
            return;
        }

        if let Some(wall) = input.select {
            self.selection = Some(wall);
            self.accumulated = 0.0;
            self.awaiting = None;
        }

        let Some(wall) = self.selection else {
            return;
        };
        let Some(facing) = facing_of(wall) else {
            self.reset();
            return;
        };

        let (dx, dy) = facing.offset();
        self.accumulated += input.motion.dot(Vec2::new(dx as f32, dy as f32));

        if self.awaiting.is_some() || self.tile_length <= 0.0 {
            return;
        }

        let tiles = (self.accumulated / self.tile_length).trunc();
        if tiles == 0.0 {
            return;
        }
        self.accumulated -= tiles * self.tile_length;
        let steps = tiles as i32;
        debug!("dragging {wall:?} {steps} tiles toward {facing:?}");
        self.awaiting = Some(wall);
        out.push(Command::ExtendRoom {
            wall,
            delta: MoveDelta::along(facing, steps),
        });
    }

    fn reset(&mut self) {
        self.selection = None;
        self.accumulated = 0.0;
        self.awaiting = None;
    }
}
