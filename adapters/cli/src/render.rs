//! Plain-text view of a room.

use std::fmt::Write as _;

use room_topology_core::CellCoord;
use room_topology_world::{query, Room};

const FLOOR: char = '#';
const EMPTY: char = '.';

/// Draws the occupied cells with the top row first, followed by an element tally.
pub(crate) fn render(room: &Room) -> String {
    let mut out = String::new();
    let grid = query::grid(room);
    if let Some((min, max)) = grid.bounds() {
        for y in (min.y()..=max.y()).rev() {
            let row: String = (min.x()..=max.x())
                .map(|x| {
                    if grid.contains(CellCoord::new(x, y)) {
                        FLOOR
                    } else {
                        EMPTY
                    }
                })
                .collect();
            let _ = writeln!(out, "{y:>4} {row}");
        }
        let _ = writeln!(out, "     origin ({}, {})", min.x(), min.y());
    } else {
        let _ = writeln!(out, "(empty room)");
    }

    let counts = query::counts(room);
    let _ = writeln!(
        out,
        "floors {} walls {} inner corners {} outer corners {}",
        counts.floors, counts.walls, counts.inner_corners, counts.outer_corners
    );
    out
}

#[cfg(test)]
mod tests {
    use room_topology_world::RoomConfig;

    use super::*;

    #[test]
    fn draws_rows_top_down() {
        let room = Room::from_cells(
            [
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
            ],
            RoomConfig::default(),
        )
        .expect("room");

        let text = render(&room);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "   1 #.");
        assert_eq!(lines[1], "   0 ##");
        assert_eq!(lines[3], "floors 3 walls 8 inner corners 1 outer corners 5");
    }

    #[test]
    fn empty_rooms_render_a_placeholder() {
        let text = render(&Room::new(RoomConfig::default()));

        assert!(text.starts_with("(empty room)"));
    }
}
