use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a frame shows at one cell, with the cursor folded in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Empty,
    Exit,
    Obstacle,
    Vehicle(VehicleId),
    Player,
    PlayerOnExit,
    /// Selected car under the cursor
    Carried(VehicleId),
}

/// Owned snapshot of a lot handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LotView {
    pub level: Level,
    pub size: Coord2,
    pub cells: Array2<Cell>,
    pub cursor: Coord2,
    pub selected: Option<VehicleId>,
    pub vehicles_left: CellCount,
}

impl LotView {
    pub fn from_lot(lot: &ParkingLot) -> Self {
        Self {
            level: lot.level(),
            size: lot.size(),
            cells: lot.cells().clone(),
            cursor: lot.cursor(),
            selected: lot.selected(),
            vehicles_left: lot.vehicle_count(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn glyph_at(&self, coords: Coord2) -> Glyph {
        let cell = self.cell_at(coords);
        if coords == self.cursor {
            return match cell {
                Cell::Exit => Glyph::PlayerOnExit,
                Cell::Occupied(id) => Glyph::Carried(id),
                Cell::Empty | Cell::Obstacle => Glyph::Player,
            };
        }

        match cell {
            Cell::Empty => Glyph::Empty,
            Cell::Exit => Glyph::Exit,
            Cell::Obstacle => Glyph::Obstacle,
            Cell::Occupied(id) => Glyph::Vehicle(id),
        }
    }

    /// Row-major glyphs, one inner iterator per row.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Glyph> + '_> + '_ {
        let (rows, cols) = self.size;
        (0..rows).map(move |row| (0..cols).map(move |col| self.glyph_at((row, col))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn glyphs_distinguish_player_and_exit() {
        let lot = ParkingLot::from_layout(1, (3, 3), &[(2, 2)], &[(1, 1)], (0, 1)).unwrap();
        let view = LotView::from_lot(&lot);

        assert_eq!(view.glyph_at((0, 0)), Glyph::Exit);
        assert_eq!(view.glyph_at((0, 1)), Glyph::Player);
        assert_eq!(view.glyph_at((1, 1)), Glyph::Vehicle(VehicleId(1)));
        assert_eq!(view.glyph_at((2, 2)), Glyph::Obstacle);
        assert_eq!(view.glyph_at((2, 0)), Glyph::Empty);
    }

    #[test]
    fn glyphs_follow_cursor_onto_exit_and_car() {
        let mut lot = ParkingLot::from_layout(1, (3, 3), &[], &[(1, 1)], (0, 1)).unwrap();
        lot.move_cursor(Direction::Left).unwrap();

        let view = LotView::from_lot(&lot);
        assert_eq!(view.glyph_at((0, 0)), Glyph::PlayerOnExit);

        lot.select_vehicle((1, 1)).unwrap();
        let view = LotView::from_lot(&lot);
        assert_eq!(view.glyph_at((1, 1)), Glyph::Carried(VehicleId(1)));
        assert_eq!(view.glyph_at((0, 0)), Glyph::Exit);
        assert_eq!(view.selected, Some(VehicleId(1)));
    }

    #[test]
    fn rows_cover_whole_lot() {
        let lot = ParkingLot::from_layout(2, (2, 4), &[], &[], (1, 3)).unwrap();
        let view = LotView::from_lot(&lot);

        let rows: Vec<Vec<Glyph>> = view.rows().map(Iterator::collect).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[0][0], Glyph::Exit);
        assert_eq!(rows[1][3], Glyph::Player);
        assert_eq!(view.level, 2);
        assert_eq!(view.vehicles_left, 0);
    }
}
