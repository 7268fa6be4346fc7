//! Sparse index from grid coordinates to floor elements.

use std::collections::BTreeMap;

use room_topology_core::{CellCoord, Direction, ElementId};

use crate::GridError;

/// Ordered map of occupied cells to the floor element living there.
///
/// The index only knows about floors; walls and corners are tracked by the
/// element graph.
#[derive(Clone, Debug, Default)]
pub struct GridIndex {
    floors: BTreeMap<CellCoord, ElementId>,
}

/// Floors found diagonally ahead of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagonalNeighbors {
    /// Floor one step ahead and one step clockwise, if any.
    pub clockwise: Option<ElementId>,
    /// Floor one step ahead and one step counter-clockwise, if any.
    pub counter_clockwise: Option<ElementId>,
}

impl GridIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor element stored at the provided cell.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<ElementId> {
        self.floors.get(&cell).copied()
    }

    /// Reports whether the cell holds a floor.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.floors.contains_key(&cell)
    }

    /// Number of floor cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Reports whether the index holds no floors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Iterates over occupied cells in row-major order, bottom row first.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let mut cells: Vec<CellCoord> = self.floors.keys().copied().collect();
        cells.sort_by_key(|cell| (cell.y(), cell.x()));
        cells.into_iter()
    }

    /// Iterates over every floor and its cell.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, ElementId)> + '_ {
        self.floors.iter().map(|(cell, floor)| (*cell, *floor))
    }

    /// Smallest and largest occupied coordinates, if any floor exists.
    #[must_use]
    pub fn bounds(&self) -> Option<(CellCoord, CellCoord)> {
        let mut cells = self.floors.keys();
        let first = *cells.next()?;
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (min_x, min_y);
        for cell in cells {
            min_x = min_x.min(cell.x());
            min_y = min_y.min(cell.y());
            max_x = max_x.max(cell.x());
            max_y = max_y.max(cell.y());
        }
        Some((CellCoord::new(min_x, min_y), CellCoord::new(max_x, max_y)))
    }

    /// Floors diagonally ahead of `cell` when looking toward `facing`.
    ///
    /// The lookups step once along `facing` and then once to either side.
    #[must_use]
    pub fn diagonal_neighbors(&self, cell: CellCoord, facing: Direction) -> DiagonalNeighbors {
        let ahead = cell.step(facing);
        DiagonalNeighbors {
            clockwise: self.get(ahead.step(facing.clockwise())),
            counter_clockwise: self.get(ahead.step(facing.counter_clockwise())),
        }
    }

    pub(crate) fn insert(&mut self, cell: CellCoord, floor: ElementId) -> Result<(), GridError> {
        if self.floors.contains_key(&cell) {
            return Err(GridError::Occupied(cell));
        }
        let _ = self.floors.insert(cell, floor);
        Ok(())
    }

    pub(crate) fn remove(&mut self, cell: CellCoord) -> Result<ElementId, GridError> {
        self.floors.remove(&cell).ok_or(GridError::Vacant(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(count: usize) -> Vec<ElementId> {
        let mut arena: SlotMap<ElementId, ()> = SlotMap::with_key();
        (0..count).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn insert_rejects_occupied_cells() {
        let ids = ids(2);
        let mut grid = GridIndex::new();
        let cell = CellCoord::new(2, 3);

        assert_eq!(grid.insert(cell, ids[0]), Ok(()));
        assert_eq!(grid.insert(cell, ids[1]), Err(GridError::Occupied(cell)));
        assert_eq!(grid.get(cell), Some(ids[0]));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn remove_reports_vacant_cells() {
        let ids = ids(1);
        let mut grid = GridIndex::new();
        let cell = CellCoord::new(0, 0);
        grid.insert(cell, ids[0]).expect("insert");

        assert_eq!(grid.remove(cell), Ok(ids[0]));
        assert_eq!(grid.remove(cell), Err(GridError::Vacant(cell)));
        assert!(grid.is_empty());
    }

    #[test]
    fn diagonal_neighbors_look_ahead_then_sideways() {
        let ids = ids(2);
        let mut grid = GridIndex::new();
        grid.insert(CellCoord::new(1, 1), ids[0]).expect("insert");
        grid.insert(CellCoord::new(-1, 1), ids[1]).expect("insert");

        let neighbors = grid.diagonal_neighbors(CellCoord::new(0, 0), Direction::North);
        assert_eq!(neighbors.clockwise, Some(ids[0]));
        assert_eq!(neighbors.counter_clockwise, Some(ids[1]));

        let sideways = grid.diagonal_neighbors(CellCoord::new(0, 0), Direction::East);
        assert_eq!(sideways.clockwise, None);
        assert_eq!(sideways.counter_clockwise, Some(ids[0]));
    }

    #[test]
    fn bounds_cover_every_cell() {
        let ids = ids(3);
        let mut grid = GridIndex::new();
        assert_eq!(grid.bounds(), None);
        grid.insert(CellCoord::new(4, -1), ids[0]).expect("insert");
        grid.insert(CellCoord::new(-2, 5), ids[1]).expect("insert");
        grid.insert(CellCoord::new(0, 0), ids[2]).expect("insert");

        assert_eq!(
            grid.bounds(),
            Some((CellCoord::new(-2, -1), CellCoord::new(4, 5)))
        );
        let rows: Vec<i32> = grid.cells().map(|cell| cell.y()).collect();
        assert_eq!(rows, vec![-1, 0, 5]);
    }
}
