use glam::Vec2;
use room_topology_core::{CellCoord, Direction, ElementId, ElementType, MoveDelta, Placement};
use room_topology_world::{extend_room, query, world_position, ElementFactory, Room, RoomConfig};

#[derive(Debug, PartialEq)]
enum Call {
    SpawnAdjacent {
        spawned: ElementId,
        anchor: ElementId,
        direction: Direction,
        orientation: Direction,
        element_type: ElementType,
    },
    SpawnFloor(ElementId, CellCoord),
    Destroy(ElementId),
    Move(ElementId, Vec2),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl ElementFactory for Recorder {
    fn spawn_adjacent(
        &mut self,
        spawned: ElementId,
        anchor: ElementId,
        direction: Direction,
        orientation: Direction,
        element_type: ElementType,
    ) {
        self.calls.push(Call::SpawnAdjacent {
            spawned,
            anchor,
            direction,
            orientation,
            element_type,
        });
    }

    fn spawn_floor_at(&mut self, floor: ElementId, cell: CellCoord) {
        self.calls.push(Call::SpawnFloor(floor, cell));
    }

    fn destroy(&mut self, element: ElementId) {
        self.calls.push(Call::Destroy(element));
    }

    fn set_position(&mut self, element: ElementId, position_delta: Vec2) {
        self.calls.push(Call::Move(element, position_delta));
    }
}

#[test]
fn extension_is_mirrored_into_the_factory() {
    let mut room = Room::rectangle(1, 1, RoomConfig::default()).expect("room");
    let north = query::wall_at(&room, CellCoord::new(0, 0), Direction::North).expect("wall");
    let mut recorder = Recorder::default();

    let _ = extend_room(&mut room, north, MoveDelta::new(0, 1), &mut recorder).expect("extends");

    let new_floor = query::grid(&room).get(CellCoord::new(0, 1)).expect("floor");
    assert_eq!(recorder.calls[0], Call::SpawnFloor(new_floor, CellCoord::new(0, 1)));

    let moves: Vec<&Call> = recorder
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Move(..)))
        .collect();
    assert_eq!(moves.len(), 3);
    assert!(moves
        .iter()
        .all(|call| matches!(call, Call::Move(_, delta) if *delta == Vec2::new(0.0, 100.0))));
    assert!(recorder.calls.contains(&Call::Move(north, Vec2::new(0.0, 100.0))));

    let east = query::wall_at(&room, CellCoord::new(0, 1), Direction::East).expect("wall");
    assert!(recorder.calls.contains(&Call::SpawnAdjacent {
        spawned: east,
        anchor: new_floor,
        direction: Direction::East,
        orientation: Direction::East,
        element_type: query::element(&room, east).expect("east").element_type(),
    }));
    let spawned = recorder
        .calls
        .iter()
        .filter(|call| matches!(call, Call::SpawnAdjacent { .. }))
        .count();
    assert_eq!(spawned, 2);
    assert!(!recorder.calls.iter().any(|call| matches!(call, Call::Destroy(_))));
}

#[test]
fn rejected_edits_reach_no_factory() {
    let mut room = Room::rectangle(1, 1, RoomConfig::default()).expect("room");
    let north = query::wall_at(&room, CellCoord::new(0, 0), Direction::North).expect("wall");
    let mut recorder = Recorder::default();

    assert!(extend_room(&mut room, north, MoveDelta::new(0, -1), &mut recorder).is_err());
    assert!(recorder.calls.is_empty());
}

#[test]
fn positions_scale_with_the_tile_length() {
    let placement = Placement::Wall {
        cell: CellCoord::new(2, -1),
        facing: Direction::East,
    };

    assert_eq!(world_position(placement, 10.0), Vec2::new(25.0, -10.0));
}
