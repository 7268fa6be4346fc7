use proptest::{prelude::*, sample::Index};
use room_topology_core::{CellCoord, MoveDelta, Placement};
use room_topology_world::{query, validate, EditError, Room, RoomConfig};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn extending_then_retracting_restores_a_rectangle(
        columns in 1u32..=4,
        rows in 1u32..=4,
        pick in any::<Index>(),
        steps in 1i32..=3,
    ) {
        let mut room = Room::rectangle(columns, rows, RoomConfig::default()).expect("room");
        let floors = query::floor_cells(&room);
        let counts = query::counts(&room);
        let walls = query::walls(&room);
        let (placement, dragged) = walls[pick.index(walls.len())];
        let Placement::Wall { facing, .. } = placement else {
            panic!("walls sit in wall slots");
        };

        let grown = room
            .extend(dragged, MoveDelta::along(facing, steps))
            .expect("outward drag succeeds");
        prop_assert!(validate::check(&room).is_ok());
        prop_assert_eq!(query::counts(&room).floors, counts.floors + steps as usize);

        let selection = grown.selection.expect("dragged slot keeps a wall");
        let _ = room
            .extend(selection, MoveDelta::along(facing, -steps))
            .expect("inward drag succeeds");

        prop_assert!(validate::check(&room).is_ok());
        prop_assert_eq!(query::floor_cells(&room), floors);
        prop_assert_eq!(query::counts(&room), counts);
    }

    #[test]
    fn arbitrary_drags_never_leave_an_inconsistent_room(
        mask in 1u16..(1 << 12),
        drags in prop::collection::vec((any::<Index>(), 1i32..=2, any::<bool>()), 1..8),
    ) {
        let cells = (0..12)
            .filter(|bit| mask & (1u16 << *bit) != 0)
            .map(|bit| CellCoord::new(bit % 4, bit / 4));
        let mut room = Room::from_cells(cells, RoomConfig::default()).expect("room");
        prop_assert!(validate::check(&room).is_ok());

        for (pick, magnitude, outward) in drags {
            let walls = query::walls(&room);
            let (placement, wall) = walls[pick.index(walls.len())];
            let Placement::Wall { facing, .. } = placement else {
                panic!("walls sit in wall slots");
            };
            let steps = if outward { magnitude } else { -magnitude };
            let before = query::floor_cells(&room);

            match room.extend(wall, MoveDelta::along(facing, steps)) {
                Ok(_) => {}
                Err(EditError::LastFloor(_)) if !outward => {
                    prop_assert_eq!(query::floor_cells(&room), before);
                }
                Err(error) => {
                    return Err(TestCaseError::fail(format!(
                        "dragging {placement:?} by {steps} was rejected: {error}"
                    )));
                }
            }
            prop_assert!(validate::check(&room).is_ok());
            prop_assert!(!query::floor_cells(&room).is_empty());
        }
    }
}
