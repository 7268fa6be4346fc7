use room_topology_core::{
    CellCoord, Command, Direction, EditRejection, ElementId, Event, MoveDelta, Placement,
};
use room_topology_world::{apply, query, validate, Room, RoomConfig};

fn snapshot(room: &Room) -> (Vec<CellCoord>, Vec<(Placement, ElementId)>) {
    (query::floor_cells(room), query::walls(room))
}

fn reject(room: &mut Room, wall: ElementId, delta: MoveDelta) -> EditRejection {
    let before = snapshot(room);
    let mut events = Vec::new();

    apply(room, Command::ExtendRoom { wall, delta }, &mut events);

    assert_eq!(snapshot(room), before, "a rejected drag leaves the room untouched");
    assert!(validate::check(room).is_ok());
    match events.as_slice() {
        [Event::EditRejected {
            wall: rejected,
            reason,
        }] => {
            assert_eq!(*rejected, wall);
            *reason
        }
        other => panic!("expected a single rejection, got {other:?}"),
    }
}

fn north_wall(room: &Room, x: i32, y: i32) -> ElementId {
    query::wall_at(room, CellCoord::new(x, y), Direction::North).expect("wall")
}

#[test]
fn sideways_and_zero_deltas_are_unsupported() {
    let mut room = Room::rectangle(2, 2, RoomConfig::default()).expect("room");
    let wall = north_wall(&room, 0, 1);

    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(1, 0)),
        EditRejection::UnsupportedDelta
    );
    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(1, 1)),
        EditRejection::UnsupportedDelta
    );
    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(0, 0)),
        EditRejection::UnsupportedDelta
    );
}

#[test]
fn deltas_beyond_the_cell_range_are_unsupported() {
    let mut room = Room::rectangle(2, 2, RoomConfig::default()).expect("room");
    let wall = query::wall_at(&room, CellCoord::new(0, 0), Direction::South).expect("wall");

    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(0, i32::MIN)),
        EditRejection::UnsupportedDelta
    );
}

#[test]
fn the_last_floor_cannot_be_removed() {
    let mut room = Room::rectangle(1, 1, RoomConfig::default()).expect("room");
    let wall = north_wall(&room, 0, 0);

    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(0, -1)),
        EditRejection::LastFloor
    );
}

#[test]
fn a_partial_drag_is_rolled_back_when_a_later_step_fails() {
    let mut room = Room::rectangle(1, 2, RoomConfig::default()).expect("room");
    let wall = north_wall(&room, 0, 1);

    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(0, -2)),
        EditRejection::LastFloor
    );
    assert_eq!(query::counts(&room).floors, 2);
}

#[test]
fn floors_are_not_walls() {
    let mut room = Room::rectangle(1, 1, RoomConfig::default()).expect("room");
    let floor = query::grid(&room).get(CellCoord::new(0, 0)).expect("floor");

    assert_eq!(
        reject(&mut room, floor, MoveDelta::new(0, 1)),
        EditRejection::NotAWall
    );
}

#[test]
fn destroyed_walls_are_missing() {
    let mut room = Room::rectangle(2, 2, RoomConfig::default()).expect("room");
    let dragged = north_wall(&room, 0, 1);
    let outcome = room
        .extend(dragged, MoveDelta::new(0, -1))
        .expect("retraction succeeds");
    assert!(outcome.steps[0].replaced);

    assert_eq!(
        reject(&mut room, dragged, MoveDelta::new(0, 1)),
        EditRejection::MissingElement
    );
}

#[test]
fn an_empty_neighbourhood_cannot_resolve_an_extension() {
    let config = RoomConfig {
        neighborhood_steps: 0,
        ..RoomConfig::default()
    };
    let mut room = Room::rectangle(1, 1, config).expect("room");
    let wall = north_wall(&room, 0, 0);

    assert_eq!(
        reject(&mut room, wall, MoveDelta::new(0, 1)),
        EditRejection::NeighborhoodOutOfRange
    );
}

#[test]
fn accepted_drags_report_the_selection() {
    let mut room = Room::rectangle(1, 1, RoomConfig::default()).expect("room");
    let wall = north_wall(&room, 0, 0);
    let mut events = Vec::new();

    apply(
        &mut room,
        Command::ExtendRoom {
            wall,
            delta: MoveDelta::new(0, 2),
        },
        &mut events,
    );

    assert_eq!(
        events.last(),
        Some(&Event::RoomExtended {
            wall,
            selection: Some(wall),
        })
    );
    assert_eq!(query::counts(&room).floors, 3);
}

#[test]
fn creating_a_room_replaces_every_element() {
    let mut room = Room::rectangle(1, 1, RoomConfig::default()).expect("room");
    let previous = query::graph(&room).len();
    let mut events = Vec::new();

    apply(
        &mut room,
        Command::CreateRoom {
            columns: 2,
            rows: 3,
        },
        &mut events,
    );

    let removed = events
        .iter()
        .take_while(|event| !matches!(event, Event::RoomCreated { .. }))
        .count();
    assert_eq!(removed, previous);
    assert!(events.contains(&Event::RoomCreated {
        columns: 2,
        rows: 3
    }));
    assert_eq!(query::counts(&room).floors, 6);
    assert!(validate::check(&room).is_ok());
}
